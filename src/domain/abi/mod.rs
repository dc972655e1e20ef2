//! ABI domain models and contracts
//!
//! This module defines the traits and types for ABI resolution and calldata
//! decoding, independent of where ABIs come from or which library decodes.

mod decoder;
mod source;

pub use alloy_json_abi::JsonAbi;
pub use decoder::{CallDecoder, DecodeError, DecodedArg, DecodedCall};
pub use source::{AbiSource, FetchAbiError, KnownProxy};
