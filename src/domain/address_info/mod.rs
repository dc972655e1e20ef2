//! Address annotation models and the source contract
//!
//! An address-info source answers "what do we know about this address?"
//! with zero or more [`AddressInfo`] entries. Sources never fail: a source
//! with nothing to say (or nothing reachable) returns an empty list.

mod lists;

use std::collections::HashMap;

use serde::Serialize;

use super::{Address, Transaction};

pub use lists::{AddressList, AddressListEntry, TokenList, TokenListEntry};

/// Entry from a token registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub chain_id: u64,
    pub symbol: String,
    pub address: Address,
    pub name: String,
    #[serde(rename = "logoURI")]
    pub logo_uri: Option<String>,
    /// Where the list was loaded from
    pub source: String,
}

/// Entry from a curated or warning address registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericInfo {
    pub chain_id: u64,
    pub address: Address,
    pub name: String,
    pub description: String,
    #[serde(rename = "logoURI")]
    pub logo_uri: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContextKind {
    /// The address is the transaction sender
    MsgSender,
}

/// Fact derived from the transaction itself rather than fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContextInfo {
    pub context: ContextKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AddressInfo {
    Token(TokenInfo),
    Generic(GenericInfo),
    /// Same shape as [`AddressInfo::Generic`], flagged as risky
    Warning(GenericInfo),
    Context(ContextInfo),
}

impl AddressInfo {
    /// Label to show in place of the raw address, if this entry has one
    pub fn label(&self) -> Option<String> {
        match self {
            Self::Token(token) => Some(format!("Token: {} ({})", token.name, token.symbol)),
            Self::Generic(info) | Self::Warning(info) => Some(info.name.clone()),
            Self::Context(_) => None,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Self::Warning(_))
    }
}

/// Annotations per address; each list follows the configured source order
pub type AddressFetchResult = HashMap<Address, Vec<AddressInfo>>;

/// Per-transaction context handed to every source
#[derive(Debug, Clone)]
pub struct FetchContext {
    pub tx: Transaction,
}

impl FetchContext {
    pub fn new(tx: Transaction) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
pub trait AddressInfoSource: Send + Sync {
    async fn fetch_info(&self, address: &str, context: &FetchContext) -> Vec<AddressInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(name: &str) -> GenericInfo {
        GenericInfo {
            chain_id: 42220,
            address: "0x01".into(),
            name: name.into(),
            description: String::new(),
            logo_uri: None,
            source: "test".into(),
        }
    }

    #[test]
    fn token_label_includes_symbol() {
        let info = AddressInfo::Token(TokenInfo {
            chain_id: 1,
            symbol: "USDC".into(),
            address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48".into(),
            name: "USD Coin".into(),
            logo_uri: None,
            source: "test".into(),
        });
        assert_eq!(info.label().as_deref(), Some("Token: USD Coin (USDC)"));
    }

    #[test]
    fn warning_and_generic_share_label_shape() {
        assert_eq!(
            AddressInfo::Warning(generic("Drainer")).label().as_deref(),
            Some("Drainer")
        );
        assert_eq!(
            AddressInfo::Generic(generic("Exchange")).label().as_deref(),
            Some("Exchange")
        );
        assert!(AddressInfo::Warning(generic("Drainer")).is_warning());
    }

    #[test]
    fn context_has_no_label() {
        let info = AddressInfo::Context(ContextInfo {
            context: ContextKind::MsgSender,
        });
        assert!(info.label().is_none());
    }

    #[test]
    fn serializes_with_type_tag() {
        let info = AddressInfo::Context(ContextInfo {
            context: ContextKind::MsgSender,
        });
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], "context");
        assert_eq!(json["context"], "msgSender");
    }
}
