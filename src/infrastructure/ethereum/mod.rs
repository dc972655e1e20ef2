//! Ethereum infrastructure - Alloy provider implementations

mod provider;

pub use provider::{connect_http, AlloyChainReader};
