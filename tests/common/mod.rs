//! Shared fixtures: a local HTTP stub server and an in-memory chain
#![allow(dead_code)]

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use axum::Router;
use noyolo::domain::chain::ChainReader;
use noyolo::Transaction;

pub const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";
pub const SENDER: &str = "0x1111111111111111111111111111111111111111";

pub const ERC20_ABI: &str = r#"[
    {"type":"function","name":"transfer","stateMutability":"nonpayable",
     "inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],
     "outputs":[{"name":"","type":"bool"}]},
    {"type":"function","name":"balanceOf","stateMutability":"view",
     "inputs":[{"name":"owner","type":"address"}],
     "outputs":[{"name":"","type":"uint256"}]}
]"#;

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn abi_value(abi: &str) -> serde_json::Value {
    serde_json::from_str(abi).unwrap()
}

/// Sourcify `metadata.json` wrapping `abi`
pub fn sourcify_metadata(abi: &str) -> serde_json::Value {
    serde_json::json!({
        "compiler": {"version": "0.8.17+commit.8df45f5f"},
        "language": "Solidity",
        "output": {"abi": abi_value(abi), "devdoc": {}, "userdoc": {}},
        "version": 1
    })
}

pub fn sourcify_path(chain_id: u64, address: &str) -> String {
    format!("/contracts/full_match/{chain_id}/{address}/metadata.json")
}

/// Canned code and storage
#[derive(Default)]
pub struct MockChain {
    pub code: HashMap<String, String>,
    pub storage: HashMap<(String, String), String>,
}

#[async_trait::async_trait]
impl ChainReader for MockChain {
    async fn get_code(&self, address: &str) -> Result<String> {
        Ok(self.code.get(address).cloned().unwrap_or_else(|| "0x".into()))
    }

    async fn get_storage_at(&self, address: &str, slot: &str) -> Result<String> {
        self.storage
            .get(&(address.to_string(), slot.to_string()))
            .cloned()
            .ok_or_else(|| anyhow!("empty slot {slot} at {address}"))
    }

    async fn get_transaction(&self, _hash: &str) -> Result<Option<Transaction>> {
        Ok(None)
    }

    fn endpoint_name(&self) -> String {
        "mock".into()
    }
}

/// Bytecode ending in a solc 0.5 style metadata trailer
pub fn deployed(code: &str, swarm_byte: &str) -> String {
    format!("{code}a165627a7a72305820{}0029", swarm_byte.repeat(32))
}
