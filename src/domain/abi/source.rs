//! ABI source trait and error taxonomy

use alloy_json_abi::JsonAbi;
use serde::Deserialize;
use thiserror::Error;

/// Why a single ABI lookup (or the whole aggregate) failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchAbiError {
    /// Transport failure, non-success status or unparseable response
    #[error("failed to fetch ABI: {0}")]
    FetchingAbi(String),

    /// The target's bytecode matched no known proxy descriptor
    #[error("not a known proxy: {0}")]
    NoProxy(String),

    /// Every configured source failed; causes are in source order
    #[error("no ABIs could be found ({} sources failed)", .0.len())]
    NotFound(Vec<FetchAbiError>),
}

impl FetchAbiError {
    pub fn fetching(message: impl Into<String>) -> Self {
        Self::FetchingAbi(message.into())
    }

    /// Per-source causes of an aggregate failure, empty for leaf errors
    pub fn causes(&self) -> &[FetchAbiError] {
        match self {
            Self::NotFound(causes) => causes,
            _ => &[],
        }
    }
}

/// Anything that can produce the ABI of a contract address.
///
/// Implementations hold only immutable configuration, so one instance can be
/// queried concurrently and repeatedly.
#[async_trait::async_trait]
pub trait AbiSource: Send + Sync {
    async fn fetch_abi_for_address(&self, address: &str) -> Result<JsonAbi, FetchAbiError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// A well-known proxy implementation, identified by its bytecode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnownProxy {
    /// Deployed bytecode of one instance of the proxy (hex)
    pub bytecode: String,
    /// Storage slot holding the delegate address (32-byte hex)
    pub location: String,
}
