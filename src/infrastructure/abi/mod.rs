//! ABI infrastructure - remote ABI sources, proxy unwrapping and alloy-based decoding

mod aggregator;
mod decoder;
mod explorer;
pub mod fingerprint;
mod proxy;
mod sourcify;

pub use aggregator::resolve_abis;
pub use decoder::AlloyCallDecoder;
pub use explorer::ExplorerAbiSource;
pub use fingerprint::fingerprint;
pub use proxy::{delegate_from_storage_word, ProxyAbiSource};
pub use sourcify::{SourcifyAbiSource, SOURCIFY_REPO_URL};
