//! Ownership registry
//!
//! - **KittyRegistry**: the ledger of kitty records and owner counts
//! - **SharedRegistry**: serialized writes, consistent snapshot reads
//! - **EventLog**: hash-chained journal of Birth and Transfer events

mod error;
mod events;
mod ledger;
mod shared;

pub use error::{ErrorKind, RegistryError};
pub use events::{EventLog, EventRecord, RegistryEvent, TransferEvent};
pub use ledger::{KittyRegistry, NAME, SYMBOL};
pub use shared::SharedRegistry;

#[cfg(test)]
mod tests;
