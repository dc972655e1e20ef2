//! Registry document shapes
//!
//! Token lists follow the Uniswap token-list format; generic and warning
//! lists use the same layout under an `addresses` key.

use serde::Deserialize;

use crate::domain::Address;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenList {
    #[serde(default)]
    pub tokens: Vec<TokenListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListEntry {
    pub chain_id: u64,
    pub symbol: String,
    pub address: Address,
    pub name: String,
    #[serde(default, rename = "logoURI")]
    pub logo_uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressList {
    #[serde(default)]
    pub addresses: Vec<AddressListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressListEntry {
    pub chain_id: u64,
    pub address: Address,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "logoURI")]
    pub logo_uri: Option<String>,
}

impl TokenList {
    /// Keep only the entries for `chain_id`
    pub fn retain_chain(&mut self, chain_id: u64) {
        self.tokens.retain(|token| token.chain_id == chain_id);
    }
}

impl AddressList {
    /// Keep only the entries for `chain_id`
    pub fn retain_chain(&mut self, chain_id: u64) {
        self.addresses.retain(|entry| entry.chain_id == chain_id);
    }
}
