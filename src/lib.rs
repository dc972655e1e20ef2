//! noyolo: human-readable descriptions of EVM transactions
//!
//! Resolves the target contract's ABI from public sources (unwrapping known
//! proxies), decodes the call and annotates every address involved with
//! token, registry and context information.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod parser;

pub use domain::{Address, Transaction};
pub use parser::{format_address, format_call, Parser, ParserError, ParserResult};
