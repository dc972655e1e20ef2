//! Default ABI and address-info source lists per chain

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::networks::{network, BUILTIN_PROXY_REFERENCES};
use super::{Config, KnownProxySpec};
use crate::domain::abi::{AbiSource, KnownProxy};
use crate::domain::address_info::AddressInfoSource;
use crate::domain::chain::ChainReader;
use crate::infrastructure::abi::{ExplorerAbiSource, ProxyAbiSource, SourcifyAbiSource};
use crate::infrastructure::address_info::{
    load_address_list, load_token_list, AddressListSource, ContextSource, ListKind, ListLocation,
    TokenListSource,
};

#[derive(Debug, Clone, Default)]
pub struct AbiSourceOptions {
    pub chain_id: u64,
    pub explorer_api_key: Option<String>,
    /// Query the explorer only through the proxy source
    pub accommodate_rate_limit: bool,
    pub known_proxies: Vec<KnownProxy>,
}

/// ABI sources in priority order.
///
/// Chains outside the network table only get Sourcify. Known chains get the
/// proxy unwrapper (over Sourcify and the explorer) first, then the explorer
/// and Sourcify directly. With `accommodate_rate_limit` the direct explorer
/// query is dropped.
pub fn abi_sources_for_chain(
    options: &AbiSourceOptions,
    reader: Arc<dyn ChainReader>,
) -> Vec<Arc<dyn AbiSource>> {
    let sourcify: Arc<dyn AbiSource> = Arc::new(SourcifyAbiSource::new(options.chain_id));
    let Some(network) = network(options.chain_id) else {
        debug!(chain_id = options.chain_id, "unknown chain, using Sourcify only");
        return vec![sourcify];
    };

    let explorer: Arc<dyn AbiSource> = Arc::new(ExplorerAbiSource::new(
        network.explorer_api_url,
        options.explorer_api_key.clone(),
    ));
    let proxy: Arc<dyn AbiSource> = Arc::new(ProxyAbiSource::new(
        reader,
        vec![sourcify.clone(), explorer.clone()],
        options.known_proxies.clone(),
    ));

    if options.accommodate_rate_limit {
        vec![proxy, sourcify]
    } else {
        vec![proxy, explorer, sourcify]
    }
}

impl From<&super::ProxyReference> for KnownProxySpec {
    fn from(reference: &super::ProxyReference) -> Self {
        Self {
            bytecode: None,
            reference: Some(reference.address.to_string()),
            chain_id: Some(reference.chain_id),
            location: reference.location.to_string(),
        }
    }
}

/// Turn configured and builtin proxy descriptors into matchable entries.
///
/// Entries given by reference have their bytecode read through the reader
/// `reader_for` returns for the reference's chain. Entries that cannot be
/// resolved are logged and left out. Configured entries come first.
pub async fn resolve_known_proxies<F>(
    chain_id: u64,
    specs: &[KnownProxySpec],
    reader_for: F,
) -> Vec<KnownProxy>
where
    F: Fn(u64) -> Option<Arc<dyn ChainReader>>,
{
    let pending = specs
        .iter()
        .cloned()
        .chain(BUILTIN_PROXY_REFERENCES.iter().map(KnownProxySpec::from))
        .map(|spec| {
            let reader = spec
                .bytecode
                .is_none()
                .then(|| reader_for(spec.chain_id.unwrap_or(chain_id)))
                .flatten();
            resolve_known_proxy(spec, reader)
        });

    join_all(pending).await.into_iter().flatten().collect()
}

async fn resolve_known_proxy(
    spec: KnownProxySpec,
    reader: Option<Arc<dyn ChainReader>>,
) -> Option<KnownProxy> {
    if let Some(bytecode) = spec.bytecode {
        return Some(KnownProxy {
            bytecode: normalize_bytecode(&bytecode),
            location: spec.location,
        });
    }

    let Some(reference) = spec.reference else {
        warn!(location = %spec.location, "known proxy has neither bytecode nor reference");
        return None;
    };
    let Some(reader) = reader else {
        warn!(%reference, chain_id = ?spec.chain_id, "no RPC endpoint for proxy reference");
        return None;
    };

    match reader.get_code(&reference).await {
        Ok(code) if !code.trim_start_matches("0x").is_empty() => Some(KnownProxy {
            bytecode: code,
            location: spec.location,
        }),
        Ok(_) => {
            warn!(%reference, endpoint = %reader.endpoint_name(), "proxy reference has no code");
            None
        }
        Err(err) => {
            warn!(%reference, error = %format!("{err:#}"), "failed to read proxy reference");
            None
        }
    }
}

/// Lowercase `0x`-prefixed hex, the form `eth_getCode` returns
fn normalize_bytecode(bytecode: &str) -> String {
    let hex = bytecode.trim();
    let hex = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    format!("0x{}", hex.to_ascii_lowercase())
}

enum ListSpec {
    Token(ListLocation),
    Address(ListLocation, ListKind),
}

/// Address-info sources in priority order: warning lists, curated lists,
/// token lists, then the transaction context.
///
/// The network's published lists are included ahead of configured ones.
/// Lists are loaded concurrently and filtered to `chain_id`; a list that
/// fails to load is logged and skipped.
pub async fn address_info_sources_for_chain(
    chain_id: u64,
    config: &Config,
    http: &reqwest::Client,
) -> Vec<Arc<dyn AddressInfoSource>> {
    let network = network(chain_id);
    let locations = |network_url: Option<&'static str>, configured: &[String]| {
        network_url
            .map(ListLocation::parse)
            .into_iter()
            .chain(configured.iter().map(|location| ListLocation::parse(location)))
            .collect::<Vec<_>>()
    };

    let mut specs = Vec::new();
    specs.extend(
        locations(None, &config.warning_lists)
            .into_iter()
            .map(|location| ListSpec::Address(location, ListKind::Warning)),
    );
    specs.extend(
        locations(
            network.and_then(|network| network.generic_address_list_url),
            &config.address_lists,
        )
        .into_iter()
        .map(|location| ListSpec::Address(location, ListKind::Curated)),
    );
    specs.extend(
        locations(
            network.and_then(|network| network.token_list_url),
            &config.token_lists,
        )
        .into_iter()
        .map(ListSpec::Token),
    );

    let mut sources: Vec<Arc<dyn AddressInfoSource>> =
        join_all(specs.into_iter().map(|spec| load_source(http, chain_id, spec)))
            .await
            .into_iter()
            .flatten()
            .collect();
    sources.push(Arc::new(ContextSource));
    sources
}

async fn load_source(
    http: &reqwest::Client,
    chain_id: u64,
    spec: ListSpec,
) -> Option<Arc<dyn AddressInfoSource>> {
    match spec {
        ListSpec::Token(location) => match load_token_list(http, &location).await {
            Ok(list) => Some(Arc::new(TokenListSource::for_chain(
                list,
                chain_id,
                location.to_string(),
            ))),
            Err(err) => {
                warn!(error = %err, "skipping token list");
                None
            }
        },
        ListSpec::Address(location, kind) => match load_address_list(http, &location).await {
            Ok(list) => Some(Arc::new(AddressListSource::for_chain(
                list,
                chain_id,
                kind,
                location.to_string(),
            ))),
            Err(err) => {
                warn!(error = %err, ?kind, "skipping address list");
                None
            }
        },
    }
}
