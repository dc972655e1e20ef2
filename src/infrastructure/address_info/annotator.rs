//! Address annotation aggregator

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::domain::address_info::{AddressFetchResult, AddressInfo, AddressInfoSource, FetchContext};
use crate::domain::Address;

/// Query every source about every distinct address.
///
/// All (address, source) lookups run concurrently. Each address's entries
/// are concatenated in source order.
pub async fn annotate(
    sources: &[Arc<dyn AddressInfoSource>],
    addresses: &[Address],
    context: &FetchContext,
) -> AddressFetchResult {
    let mut seen = HashSet::new();
    let mut distinct = Vec::new();
    for address in addresses {
        if seen.insert(address.as_str()) {
            distinct.push(address);
        }
    }

    let per_address = distinct.into_iter().map(|address| async move {
        let infos: Vec<AddressInfo> = join_all(
            sources
                .iter()
                .map(|source| source.fetch_info(address, context)),
        )
        .await
        .into_iter()
        .flatten()
        .collect();
        (address.clone(), infos)
    });

    let result: AddressFetchResult = join_all(per_address).await.into_iter().collect();
    debug!(
        addresses = result.len(),
        annotated = result.values().filter(|infos| !infos.is_empty()).count(),
        "annotated addresses"
    );
    result
}
