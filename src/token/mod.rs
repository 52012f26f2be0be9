//! Token primitives — addresses and kitty records

mod address;
mod kitty;

pub use address::{Address, AddressParseError, ADDRESS_LEN};
pub use kitty::{Kitty, KittyId, NewKitty, SENTINEL_ID};
