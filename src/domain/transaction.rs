//! Transaction input model

use alloy_primitives::U256;

/// Account identifier as supplied by callers and data sources.
///
/// Compared verbatim. No checksum or case normalization is applied, so
/// callers must use the format of the lists they query.
pub type Address = String;

/// Transaction to describe. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub from: Address,
    pub to: Address,
    /// Calldata as hex, with or without `0x` prefix
    pub data: String,
    pub value: U256,
}

impl Transaction {
    pub fn new(
        from: impl Into<Address>,
        to: impl Into<Address>,
        data: impl Into<String>,
        value: U256,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            data: data.into(),
            value,
        }
    }

    /// Calldata bytes
    pub fn calldata(&self) -> Result<Vec<u8>, hex::FromHexError> {
        let data = self.data.trim();
        let payload = data
            .strip_prefix("0x")
            .or_else(|| data.strip_prefix("0X"))
            .unwrap_or(data);
        hex::decode(payload)
    }
}
