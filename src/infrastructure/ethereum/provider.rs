//! Chain reader over an Alloy JSON-RPC provider
//!
//! Transactions are fetched with a raw request and parsed from JSON so that
//! chains with non-standard transaction types (Celo, L2s) still work.

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{bail, Context, Result};

use crate::domain::chain::ChainReader;
use crate::domain::Transaction;

/// `ChainReader` backed by any Alloy provider
pub struct AlloyChainReader<P> {
    provider: P,
    endpoint: String,
}

impl<P> AlloyChainReader<P> {
    pub fn new(provider: P, endpoint: impl Into<String>) -> Self {
        Self {
            provider,
            endpoint: endpoint.into(),
        }
    }
}

/// Connect to an HTTP JSON-RPC endpoint
pub fn connect_http(url: &str) -> Result<AlloyChainReader<impl Provider + 'static>> {
    let rpc_url = url.parse().context("Invalid HTTP URL")?;
    let provider = ProviderBuilder::new().connect_http(rpc_url);
    Ok(AlloyChainReader::new(provider, url))
}

#[async_trait::async_trait]
impl<P> ChainReader for AlloyChainReader<P>
where
    P: Provider + Send + Sync + 'static,
{
    async fn get_code(&self, address: &str) -> Result<String> {
        let address = parse_address(address)?;
        let code = self
            .provider
            .get_code_at(address)
            .await
            .with_context(|| format!("eth_getCode failed on {}", self.endpoint))?;
        Ok(format!("0x{}", hex::encode(code)))
    }

    async fn get_storage_at(&self, address: &str, slot: &str) -> Result<String> {
        let address = parse_address(address)?;
        let slot = parse_hex_u256(slot)?;
        let value = self
            .provider
            .get_storage_at(address, slot)
            .await
            .with_context(|| format!("eth_getStorageAt failed on {}", self.endpoint))?;
        Ok(format!("0x{}", hex::encode(value.to_be_bytes::<32>())))
    }

    async fn get_transaction(&self, hash: &str) -> Result<Option<Transaction>> {
        let json: serde_json::Value = self
            .provider
            .raw_request("eth_getTransactionByHash".into(), (hash,))
            .await
            .with_context(|| format!("eth_getTransactionByHash failed on {}", self.endpoint))?;

        if json.is_null() {
            return Ok(None);
        }
        parse_rpc_transaction(&json).map(Some)
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

fn parse_address(address: &str) -> Result<Address> {
    address
        .trim()
        .parse()
        .with_context(|| format!("Invalid address: {address}"))
}

/// Parse an `eth_getTransactionByHash` result
fn parse_rpc_transaction(json: &serde_json::Value) -> Result<Transaction> {
    let from = json
        .get("from")
        .and_then(|v| v.as_str())
        .context("transaction has no sender")?;
    let Some(to) = json.get("to").and_then(|v| v.as_str()) else {
        bail!("contract creation transactions cannot be described");
    };

    // Nodes return lowercase hex; decoded arguments are rendered checksummed.
    let from = parse_address(from)?.to_checksum(None);
    let to = parse_address(to)?.to_checksum(None);

    let value_str = json.get("value").and_then(|v| v.as_str()).unwrap_or("0x0");
    let value = parse_hex_u256(value_str)?;
    let input = json.get("input").and_then(|v| v.as_str()).unwrap_or("0x");

    Ok(Transaction::new(from, to, input, value))
}

/// Parse hex string to U256
fn parse_hex_u256(s: &str) -> Result<U256> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() || s == "0" {
        return Ok(U256::ZERO);
    }
    // Pad to 64 chars for proper parsing
    let padded = format!("{:0>64}", s);
    let bytes = hex::decode(&padded).context("Failed to decode hex")?;
    Ok(U256::from_be_slice(&bytes))
}
