//! Call decoder trait and types

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::JsonAbi;
use thiserror::Error;

use crate::domain::Transaction;

/// A decoded function argument
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedArg {
    /// Parameter name (or "arg{n}" if unnamed)
    pub name: String,
    /// Declared Solidity type
    pub kind: DynSolType,
    /// Decoded value
    pub value: DynSolValue,
}

/// Result of decoding a function call
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    /// Function name
    pub function_name: String,
    /// Full function signature (e.g., "transfer(address,uint256)")
    pub signature: String,
    /// Decoded arguments, in declaration order
    pub arguments: Vec<DecodedArg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid calldata: {0}")]
    InvalidCalldata(String),

    #[error("no function in the ABI matches selector 0x{0}")]
    UnknownSelector(String),

    #[error("failed to decode arguments of {function}: {reason}")]
    ArgumentDecode { function: String, reason: String },

    #[error("unsupported ABI: {0}")]
    Unsupported(String),
}

impl DecodeError {
    /// Whether the calldata simply does not fit the ABI
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::InvalidCalldata(_) | Self::UnknownSelector(_) | Self::ArgumentDecode { .. }
        )
    }
}

/// Trait for calldata decoding implementations
///
/// Selector matching and argument decoding are delegated to an ABI library;
/// this trait keeps the orchestrator independent of which one.
pub trait CallDecoder: Send + Sync {
    /// Decode `tx.data` against the functions of `abi`
    fn decode(&self, abi: &JsonAbi, tx: &Transaction) -> Result<DecodedCall, DecodeError>;
}
