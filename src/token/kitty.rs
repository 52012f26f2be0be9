//! Kitty — the token record
//!
//! A kitty is a lineage reference pair, a generation number, a gene code
//! and an owner. The record at identifier 0 is the "un-kitty": every field
//! is zero and it belongs to the zero address, so real kitties start at 1.

use super::Address;
use serde::{Deserialize, Serialize};

/// Token identifier
pub type KittyId = u64;

/// Identifier of the sentinel record
pub const SENTINEL_ID: KittyId = 0;

/// A single kitty record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Kitty {
    /// Parent reference; not required to exist
    pub mum_id: KittyId,
    /// Parent reference; not required to exist
    pub dad_id: KittyId,
    pub generation: u64,
    pub genes: u64,
    /// Current holder; zero means unowned
    pub owner: Address,
}

impl Kitty {
    /// The all-zero sentinel record
    pub const fn sentinel() -> Self {
        Self {
            mum_id: 0,
            dad_id: 0,
            generation: 0,
            genes: 0,
            owner: Address::ZERO,
        }
    }

    /// Build an owned record from creation parameters
    pub fn from_new(new: NewKitty, owner: Address) -> Self {
        Self {
            mum_id: new.mum_id,
            dad_id: new.dad_id,
            generation: new.generation,
            genes: new.genes,
            owner,
        }
    }

    pub fn is_owned(&self) -> bool {
        !self.owner.is_zero()
    }

    pub fn summary(&self, id: KittyId) -> String {
        format!(
            "Kitty #{} | gen={} | genes={} | mum={} | dad={} | owner={}",
            id, self.generation, self.genes, self.mum_id, self.dad_id, self.owner
        )
    }
}

/// Creation parameters for a kitty (everything but the owner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewKitty {
    pub mum_id: KittyId,
    pub dad_id: KittyId,
    pub generation: u64,
    pub genes: u64,
}

impl NewKitty {
    /// A generation-0 kitty with no parents
    pub fn gen0(genes: u64) -> Self {
        Self {
            mum_id: 0,
            dad_id: 0,
            generation: 0,
            genes,
        }
    }
}
