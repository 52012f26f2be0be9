//! Kitty Token — an ownership registry for non-fungible kitties
//!
//! Kitties are identified by integers, carry lineage and gene fields, and
//! belong to exactly one address. The registry answers ownership queries
//! and moves kitties between owners, recording every change in a
//! hash-chained event log.

pub mod config;
pub mod registry;
pub mod storage;
pub mod token;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixture;

pub use config::RegistryConfig;
pub use registry::{ErrorKind, KittyRegistry, RegistryError, SharedRegistry, TransferEvent};
pub use storage::RegistryStore;
pub use token::{Address, Kitty, KittyId, NewKitty};
