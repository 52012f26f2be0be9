//! Test fixtures — seeding a registry without going through mint
//!
//! `add_kitty` and `set_owner_kitty_count` bypass every production check;
//! they exist only so tests can arrange state directly. Compiled under
//! `cfg(test)` or the `fixtures` feature, never in a default build.

use crate::config::RegistryConfig;
use crate::registry::KittyRegistry;
use crate::token::{Address, Kitty, KittyId};

pub struct KittyFixture {
    registry: KittyRegistry,
}

impl KittyFixture {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            registry: KittyRegistry::new(config),
        }
    }

    /// Deterministic test account; `index` 0 is the first account
    pub fn account(&self, index: usize) -> Address {
        Address::derive(&format!("kitty-test-account-{}", index))
    }

    /// The first `N` test accounts, all distinct and non-zero
    pub fn accounts<const N: usize>(&self) -> [Address; N] {
        std::array::from_fn(|i| self.account(i))
    }

    pub fn contract_address(&self) -> Address {
        self.registry.contract_address()
    }

    /// Append a kitty owned by `owner` and bump the owner's count (and the
    /// gen-0 count for generation 0)
    pub fn add_kitty(
        &mut self,
        mum_id: KittyId,
        dad_id: KittyId,
        generation: u64,
        genes: u64,
        owner: Address,
    ) -> KittyId {
        self.registry.insert_unchecked(Kitty {
            mum_id,
            dad_id,
            generation,
            genes,
            owner,
        })
    }

    /// Overwrite the stored count for `owner`
    pub fn set_owner_kitty_count(&mut self, owner: Address, count: u64) {
        self.registry.set_balance_unchecked(owner, count);
    }

    pub fn registry(&self) -> &KittyRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut KittyRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> KittyRegistry {
        self.registry
    }
}

impl Default for KittyFixture {
    fn default() -> Self {
        Self::new()
    }
}
