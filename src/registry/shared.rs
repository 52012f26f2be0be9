//! SharedRegistry — a cloneable handle for concurrent callers
//!
//! Mutations hold the write lock across the whole check-then-apply step,
//! so transfers are totally ordered. Reads share the read lock and never
//! observe an owner change without the matching count change.

use super::error::RegistryError;
use super::events::TransferEvent;
use super::ledger::KittyRegistry;
use crate::token::{Address, Kitty, KittyId, NewKitty};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct SharedRegistry {
    inner: Arc<RwLock<KittyRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: KittyRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub async fn get_kitty(&self, id: KittyId) -> Kitty {
        self.inner.read().await.get_kitty(id)
    }

    pub async fn balance_of(&self, owner: Address) -> u64 {
        self.inner.read().await.balance_of(owner)
    }

    pub async fn owner_of(&self, id: KittyId) -> Result<Address, RegistryError> {
        self.inner.read().await.owner_of(id)
    }

    pub async fn total_supply(&self) -> u64 {
        self.inner.read().await.total_supply()
    }

    /// Kitty record together with its owner's balance, read under one lock
    pub async fn kitty_with_balance(&self, id: KittyId) -> (Kitty, u64) {
        let reg = self.inner.read().await;
        let kitty = reg.get_kitty(id);
        (kitty, reg.balance_of(kitty.owner))
    }

    pub async fn transfer(
        &self,
        caller: Address,
        to: Address,
        id: KittyId,
    ) -> Result<TransferEvent, RegistryError> {
        self.inner.write().await.transfer(caller, to, id)
    }

    pub async fn mint(
        &self,
        caller: Address,
        owner: Address,
        new: NewKitty,
    ) -> Result<KittyId, RegistryError> {
        self.inner.write().await.mint(caller, owner, new)
    }

    /// Consistent copy of the whole registry
    pub async fn snapshot(&self) -> KittyRegistry {
        self.inner.read().await.clone()
    }

    /// Recover the registry once no other handles remain
    pub fn try_into_inner(self) -> Result<KittyRegistry, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl From<KittyRegistry> for SharedRegistry {
    fn from(registry: KittyRegistry) -> Self {
        Self::new(registry)
    }
}
