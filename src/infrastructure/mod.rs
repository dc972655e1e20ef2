//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - ABI sources (Sourcify, block explorers, proxy unwrapping) and the
//!   alloy-dyn-abi call decoder
//! - Address-info sources backed by token and address lists
//! - The Alloy-based chain reader

pub mod abi;
pub mod address_info;
pub mod ethereum;
pub mod http;
