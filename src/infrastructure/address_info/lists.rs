//! Registry-backed address-info sources

use crate::domain::address_info::{
    AddressInfo, AddressInfoSource, AddressList, FetchContext, GenericInfo, TokenInfo, TokenList,
};

/// Answers from a token registry
#[derive(Debug, Clone)]
pub struct TokenListSource {
    list: TokenList,
    source: String,
}

impl TokenListSource {
    /// `source` records where the list came from and is copied onto every hit
    pub fn new(list: TokenList, source: impl Into<String>) -> Self {
        Self {
            list,
            source: source.into(),
        }
    }

    /// Same as [`TokenListSource::new`], keeping only entries for `chain_id`
    pub fn for_chain(mut list: TokenList, chain_id: u64, source: impl Into<String>) -> Self {
        list.retain_chain(chain_id);
        Self::new(list, source)
    }

    pub fn len(&self) -> usize {
        self.list.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.tokens.is_empty()
    }
}

#[async_trait::async_trait]
impl AddressInfoSource for TokenListSource {
    async fn fetch_info(&self, address: &str, _context: &FetchContext) -> Vec<AddressInfo> {
        self.list
            .tokens
            .iter()
            .find(|token| token.address == address)
            .map(|token| {
                AddressInfo::Token(TokenInfo {
                    chain_id: token.chain_id,
                    symbol: token.symbol.clone(),
                    address: token.address.clone(),
                    name: token.name.clone(),
                    logo_uri: token.logo_uri.clone(),
                    source: self.source.clone(),
                })
            })
            .into_iter()
            .collect()
    }
}

/// How hits from an address list are tagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Curated,
    Warning,
}

/// Answers from a curated or warning address registry
#[derive(Debug, Clone)]
pub struct AddressListSource {
    list: AddressList,
    source: String,
    kind: ListKind,
}

impl AddressListSource {
    pub fn new(list: AddressList, kind: ListKind, source: impl Into<String>) -> Self {
        Self {
            list,
            source: source.into(),
            kind,
        }
    }

    pub fn for_chain(
        mut list: AddressList,
        chain_id: u64,
        kind: ListKind,
        source: impl Into<String>,
    ) -> Self {
        list.retain_chain(chain_id);
        Self::new(list, kind, source)
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.list.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.addresses.is_empty()
    }
}

#[async_trait::async_trait]
impl AddressInfoSource for AddressListSource {
    async fn fetch_info(&self, address: &str, _context: &FetchContext) -> Vec<AddressInfo> {
        let Some(entry) = self.list.addresses.iter().find(|entry| entry.address == address) else {
            return Vec::new();
        };

        let info = GenericInfo {
            chain_id: entry.chain_id,
            address: entry.address.clone(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            logo_uri: entry.logo_uri.clone(),
            source: self.source.clone(),
        };
        match self.kind {
            ListKind::Curated => vec![AddressInfo::Generic(info)],
            ListKind::Warning => vec![AddressInfo::Warning(info)],
        }
    }
}
