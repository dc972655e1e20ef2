//! Transaction parser
//!
//! Resolves the target's ABI, decodes the call, discovers every address the
//! transaction touches and annotates them. Decoding is best effort: whatever
//! happens to the call body, `from` and `to` are always annotated.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::abi::{AbiSource, CallDecoder, DecodeError, DecodedCall, FetchAbiError};
use crate::domain::address_info::{
    AddressFetchResult, AddressInfo, AddressInfoSource, FetchContext,
};
use crate::domain::{Address, Transaction};
use crate::infrastructure::abi::{resolve_abis, AlloyCallDecoder};
use crate::infrastructure::address_info::annotate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// ABI resolution failed for every configured source
    #[error(transparent)]
    Fetch(#[from] FetchAbiError),

    #[error("no ABI sources configured")]
    NoAbiFetchers,

    /// The resolved ABI does not describe this calldata
    #[error("calldata does not match the ABI: {0}")]
    AbiMismatch(String),

    #[error("unexpected decoder failure: {0}")]
    Unknown(String),
}

impl From<DecodeError> for ParserError {
    fn from(err: DecodeError) -> Self {
        if err.is_mismatch() {
            Self::AbiMismatch(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

/// Everything known about one transaction
#[derive(Debug, Clone)]
pub struct ParserResult {
    pub decoded_call: Result<DecodedCall, ParserError>,
    pub address_info: AddressFetchResult,
}

impl ParserResult {
    /// Rendered call, using the annotations gathered alongside it
    pub fn describe(&self) -> Option<String> {
        self.decoded_call
            .as_ref()
            .ok()
            .map(|call| format_call(call, Some(&self.address_info)))
    }

    /// Addresses carrying a warning annotation
    pub fn warnings(&self) -> Vec<(&Address, &AddressInfo)> {
        self.address_info
            .iter()
            .flat_map(|(address, infos)| {
                infos
                    .iter()
                    .filter(|info| info.is_warning())
                    .map(move |info| (address, info))
            })
            .collect()
    }
}

pub struct Parser {
    /// Priority order: earlier sources win when several succeed
    abi_sources: Vec<Arc<dyn AbiSource>>,
    address_info_sources: Vec<Arc<dyn AddressInfoSource>>,
    decoder: Arc<dyn CallDecoder>,
}

impl Parser {
    pub fn new(
        abi_sources: Vec<Arc<dyn AbiSource>>,
        address_info_sources: Vec<Arc<dyn AddressInfoSource>>,
    ) -> Self {
        Self {
            abi_sources,
            address_info_sources,
            decoder: Arc::new(AlloyCallDecoder),
        }
    }

    /// Replace the calldata decoder
    pub fn with_decoder(mut self, decoder: Arc<dyn CallDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn abi_sources(&self) -> &[Arc<dyn AbiSource>] {
        &self.abi_sources
    }

    pub fn address_info_sources(&self) -> &[Arc<dyn AddressInfoSource>] {
        &self.address_info_sources
    }

    pub async fn parse(&self, tx: &Transaction) -> ParserResult {
        let decoded_call = self.decode_transaction(tx).await;
        if let Err(err) = &decoded_call {
            info!(to = %tx.to, error = %err, "could not decode transaction");
        }
        let address_info = self.address_info(tx, decoded_call.as_ref().ok()).await;
        ParserResult {
            decoded_call,
            address_info,
        }
    }

    pub async fn decode_transaction(&self, tx: &Transaction) -> Result<DecodedCall, ParserError> {
        if self.abi_sources.is_empty() {
            return Err(ParserError::NoAbiFetchers);
        }

        let abis = resolve_abis(&self.abi_sources, &tx.to).await?;
        let Some(abi) = abis.first() else {
            return Err(FetchAbiError::NotFound(Vec::new()).into());
        };
        debug!(to = %tx.to, candidates = abis.len(), "decoding with highest-priority ABI");

        match catch_unwind(AssertUnwindSafe(|| self.decoder.decode(abi, tx))) {
            Ok(result) => Ok(result?),
            Err(payload) => Err(ParserError::Unknown(panic_message(&*payload))),
        }
    }

    /// Annotate `from`, `to` and every address argument of `decoded`
    pub async fn address_info(
        &self,
        tx: &Transaction,
        decoded: Option<&DecodedCall>,
    ) -> AddressFetchResult {
        let addresses = collect_addresses(tx, decoded);
        let context = FetchContext::new(tx.clone());
        annotate(&self.address_info_sources, &addresses, &context).await
    }
}

/// `from`, `to`, then address arguments in declaration order, deduplicated.
///
/// Array arguments are scanned element by element; tuples are not entered.
/// An unknown (blank) sender is left out.
pub fn collect_addresses(tx: &Transaction, decoded: Option<&DecodedCall>) -> Vec<Address> {
    let mut addresses = vec![tx.from.clone(), tx.to.clone()];
    if let Some(call) = decoded {
        for arg in &call.arguments {
            collect_from_param(&arg.kind, &arg.value, &mut addresses);
        }
    }

    let mut seen = HashSet::new();
    addresses.retain(|address| !address.trim().is_empty() && seen.insert(address.clone()));
    addresses
}

fn collect_from_param(kind: &DynSolType, value: &DynSolValue, out: &mut Vec<Address>) {
    match (kind, value) {
        (
            DynSolType::Array(element) | DynSolType::FixedArray(element, _),
            DynSolValue::Array(values) | DynSolValue::FixedArray(values),
        ) => {
            for value in values {
                collect_from_param(element, value, out);
            }
        }
        (DynSolType::Address, DynSolValue::Address(address)) => {
            out.push(address.to_checksum(None));
        }
        _ => {}
    }
}

/// Render `name(arg: value, ...)`
pub fn format_call(call: &DecodedCall, address_info: Option<&AddressFetchResult>) -> String {
    let arguments: Vec<String> = call
        .arguments
        .iter()
        .map(|arg| format!("{}: {}", arg.name, format_value(&arg.value, address_info)))
        .collect();
    format!("{}({})", call.function_name, arguments.join(", "))
}

/// Token label, then registry name, then the address itself
pub fn format_address(address: &str, address_info: Option<&AddressFetchResult>) -> String {
    let Some(infos) = address_info.and_then(|info| info.get(address)) else {
        return address.to_string();
    };

    infos
        .iter()
        .find(|info| matches!(info, AddressInfo::Token(_)))
        .or_else(|| {
            infos
                .iter()
                .find(|info| matches!(info, AddressInfo::Generic(_) | AddressInfo::Warning(_)))
        })
        .and_then(AddressInfo::label)
        .unwrap_or_else(|| address.to_string())
}

fn format_value(value: &DynSolValue, address_info: Option<&AddressFetchResult>) -> String {
    match value {
        DynSolValue::Array(values) | DynSolValue::FixedArray(values) => {
            let items: Vec<String> = values
                .iter()
                .map(|value| format_value(value, address_info))
                .collect();
            format!("[{}]", items.join(", "))
        }
        DynSolValue::Address(address) => {
            format!("\"{}\"", format_address(&address.to_checksum(None), address_info))
        }
        DynSolValue::Uint(value, _) => value.to_string(),
        DynSolValue::Int(value, _) => value.to_string(),
        DynSolValue::Bool(value) => value.to_string(),
        DynSolValue::String(value) => value.clone(),
        DynSolValue::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        DynSolValue::FixedBytes(word, size) => {
            format!("0x{}", hex::encode(&word.as_slice()[..(*size).min(32)]))
        }
        DynSolValue::Function(function) => format!("0x{}", hex::encode(function.as_slice())),
        DynSolValue::Tuple(fields) => {
            let items: Vec<String> = fields
                .iter()
                .map(|field| format_value(field, address_info))
                .collect();
            format!("({})", items.join(", "))
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "decoder panicked".to_string())
}
