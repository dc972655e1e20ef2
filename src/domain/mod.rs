//! Domain layer - capability traits and plain data types
//!
//! Nothing in here talks to the network. Concrete sources live in
//! `crate::infrastructure` and plug in through the traits defined here.

pub mod abi;
pub mod address_info;
pub mod chain;
mod transaction;

pub use transaction::{Address, Transaction};
