//! Proxy-unwrapping ABI source
//!
//! A proxy's own ABI is useless for decoding: calls are forwarded to a
//! delegate whose address sits in a fixed storage slot. This source matches
//! the target's bytecode against a table of known proxy implementations and,
//! on a hit, answers with the delegate's ABI.

use std::sync::Arc;

use alloy_json_abi::JsonAbi;
use tracing::debug;

use super::aggregator::resolve_abis;
use super::fingerprint::fingerprint;
use crate::domain::abi::{AbiSource, FetchAbiError, KnownProxy};
use crate::domain::chain::ChainReader;
use crate::domain::Address;

/// Hex length of an address (20 bytes)
const ADDRESS_HEX_LEN: usize = 40;

pub struct ProxyAbiSource {
    reader: Arc<dyn ChainReader>,
    /// Sources used to resolve the delegate, in priority order
    sources: Vec<Arc<dyn AbiSource>>,
    known_proxies: Vec<KnownProxy>,
}

impl ProxyAbiSource {
    pub fn new(
        reader: Arc<dyn ChainReader>,
        sources: Vec<Arc<dyn AbiSource>>,
        known_proxies: Vec<KnownProxy>,
    ) -> Self {
        Self {
            reader,
            sources,
            known_proxies,
        }
    }

    pub fn known_proxies(&self) -> &[KnownProxy] {
        &self.known_proxies
    }

    /// First known proxy whose fingerprint equals that of `code`
    pub fn match_proxy(&self, code: &str) -> Option<&KnownProxy> {
        let target = fingerprint(code);
        self.known_proxies
            .iter()
            .find(|proxy| fingerprint(&proxy.bytecode) == target)
    }

    /// Read the delegate address out of the proxy's storage
    pub async fn implementation_address(
        &self,
        proxy: &KnownProxy,
        address: &str,
    ) -> Result<Address, FetchAbiError> {
        let word = self
            .reader
            .get_storage_at(address, &proxy.location)
            .await
            .map_err(|err| FetchAbiError::fetching(format!("storage read failed: {err:#}")))?;
        delegate_from_storage_word(&word)
    }
}

#[async_trait::async_trait]
impl AbiSource for ProxyAbiSource {
    async fn fetch_abi_for_address(&self, address: &str) -> Result<JsonAbi, FetchAbiError> {
        let code = self
            .reader
            .get_code(address)
            .await
            .map_err(|err| FetchAbiError::fetching(format!("code read failed: {err:#}")))?;

        if code.trim_start_matches("0x").is_empty() {
            return Err(FetchAbiError::NoProxy("Has no contract code".into()));
        }

        let Some(proxy) = self.match_proxy(&code) else {
            return Err(FetchAbiError::NoProxy("Is not a proxy".into()));
        };

        let implementation = self.implementation_address(proxy, address).await?;
        debug!(proxy = address, %implementation, "unwrapping known proxy");

        resolve_abis(&self.sources, &implementation)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| FetchAbiError::NotFound(Vec::new()))
    }

    fn name(&self) -> &str {
        "proxy"
    }
}

/// Interpret the low-order 20 bytes of a 32-byte storage word as an address.
///
/// The address keeps the word's hex case; no checksum is applied.
pub fn delegate_from_storage_word(word: &str) -> Result<Address, FetchAbiError> {
    let hex = word.trim();
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if hex.len() < ADDRESS_HEX_LEN || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FetchAbiError::fetching(format!(
            "unexpected storage word: {word}"
        )));
    }
    Ok(format!("0x{}", &hex[hex.len() - ADDRESS_HEX_LEN..]))
}
