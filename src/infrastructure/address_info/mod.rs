//! Address-info sources and the annotation aggregator

mod annotator;
mod context;
mod lists;
pub mod loader;

pub use annotator::annotate;
pub use context::ContextSource;
pub use lists::{AddressListSource, ListKind, TokenListSource};
pub use loader::{load_address_list, load_token_list, ListLoadError, ListLocation};
