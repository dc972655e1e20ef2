//! Chain read capability
//!
//! The proxy source and the CLI need a handful of JSON-RPC reads. They go
//! through this trait so tests can substitute canned chain state.

use anyhow::Result;

use super::Transaction;

#[async_trait::async_trait]
pub trait ChainReader: Send + Sync {
    /// Deployed bytecode of `address` as `0x`-prefixed hex (`0x` when empty)
    async fn get_code(&self, address: &str) -> Result<String>;

    /// Raw 32-byte storage word at `slot` as `0x`-prefixed hex
    async fn get_storage_at(&self, address: &str, slot: &str) -> Result<String>;

    /// Look up a mined or pending transaction by hash
    async fn get_transaction(&self, hash: &str) -> Result<Option<Transaction>>;

    /// Endpoint display name
    fn endpoint_name(&self) -> String;
}
