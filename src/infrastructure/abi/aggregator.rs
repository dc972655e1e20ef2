//! Fan-out ABI resolution over a prioritized list of sources

use std::sync::Arc;

use alloy_json_abi::JsonAbi;
use futures::future::join_all;
use tracing::{debug, info};

use crate::domain::abi::{AbiSource, FetchAbiError};

/// Query every source for `address` at once and keep all successes.
///
/// Waits for every source, even after one succeeded, so a slow but trusted
/// source still gets its place. Successful ABIs keep the order of `sources`;
/// index 0 is the preferred answer. When nothing succeeded the error carries
/// one cause per source, in order.
pub async fn resolve_abis(
    sources: &[Arc<dyn AbiSource>],
    address: &str,
) -> Result<Vec<JsonAbi>, FetchAbiError> {
    let results = join_all(sources.iter().map(|source| async move {
        let result = source.fetch_abi_for_address(address).await;
        match &result {
            Ok(_) => debug!(source = source.name(), address, "ABI resolved"),
            Err(err) => debug!(source = source.name(), address, %err, "ABI source failed"),
        }
        result
    }))
    .await;

    let mut abis = Vec::new();
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(abi) => abis.push(abi),
            Err(err) => errors.push(err),
        }
    }

    if abis.is_empty() {
        info!(address, failed = errors.len(), "no ABI source succeeded");
        return Err(FetchAbiError::NotFound(errors));
    }
    Ok(abis)
}
