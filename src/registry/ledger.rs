//! KittyRegistry — ownership ledger for kitties
//!
//! Holds every kitty record (slot 0 is the sentinel), the per-owner token
//! counts and the event log. Mutations validate all preconditions before
//! touching state, so a failed call changes nothing.

use super::error::RegistryError;
use super::events::{EventLog, RegistryEvent, TransferEvent};
use crate::config::RegistryConfig;
use crate::token::{Address, Kitty, KittyId, NewKitty, SENTINEL_ID};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token collection name
pub const NAME: &str = "Kitty Token";
/// Token collection symbol
pub const SYMBOL: &str = "CAT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KittyRegistry {
    config: RegistryConfig,
    /// Indexed by kitty id
    kitties: Vec<Kitty>,
    owner_counts: HashMap<Address, u64>,
    gen0_count: u64,
    events: EventLog,
}

impl KittyRegistry {
    /// Create an empty registry holding only the sentinel
    pub fn new(config: RegistryConfig) -> Self {
        info!(
            "Created registry at {} (admin {})",
            config.contract_address, config.admin
        );
        Self {
            config,
            kitties: vec![Kitty::sentinel()],
            owner_counts: HashMap::new(),
            gen0_count: 0,
            events: EventLog::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        NAME
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOL
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn contract_address(&self) -> Address {
        self.config.contract_address
    }

    /// Record at `id`; unassigned slots read as the zeroed sentinel
    pub fn get_kitty(&self, id: KittyId) -> Kitty {
        self.slot(id).copied().unwrap_or_default()
    }

    /// Number of kitties held by `owner`
    pub fn balance_of(&self, owner: Address) -> u64 {
        self.owner_counts.get(&owner).copied().unwrap_or(0)
    }

    /// Current owner of `id`
    pub fn owner_of(&self, id: KittyId) -> Result<Address, RegistryError> {
        match self.slot(id) {
            Some(kitty) if kitty.is_owned() => Ok(kitty.owner),
            _ => Err(RegistryError::NotFound(id)),
        }
    }

    /// Number of real kitties (the sentinel excluded)
    pub fn total_supply(&self) -> u64 {
        (self.kitties.len() as u64).saturating_sub(1)
    }

    pub fn gen0_count(&self) -> u64 {
        self.gen0_count
    }

    /// Ids held by `owner`, ascending
    pub fn tokens_of_owner(&self, owner: Address) -> Vec<KittyId> {
        if owner.is_zero() {
            return Vec::new();
        }
        self.kitties
            .iter()
            .enumerate()
            .filter(|(_, k)| k.owner == owner)
            .map(|(id, _)| id as KittyId)
            .collect()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Move `id` from `caller` to `to`
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        id: KittyId,
    ) -> Result<TransferEvent, RegistryError> {
        let from = self.owner_of(id)?;
        if caller != from {
            debug!("Rejected transfer of kitty {} by non-owner {}", id, caller);
            return Err(RegistryError::NotOwner { caller, id });
        }
        self.check_recipient(to)?;

        if let Some(kitty) = self.slot_mut(id) {
            kitty.owner = to;
        }
        self.decrement(from);
        self.increment(to);

        let event = TransferEvent { from, to, id };
        self.events.append(RegistryEvent::Transfer(event));
        info!("Kitty {} transferred {} -> {}", id, from.short(), to.short());
        Ok(event)
    }

    /// Admin-only creation of a gen-0 kitty owned by `owner`
    pub fn mint(
        &mut self,
        caller: Address,
        owner: Address,
        new: NewKitty,
    ) -> Result<KittyId, RegistryError> {
        if caller != self.config.admin {
            debug!("Rejected mint by non-admin {}", caller);
            return Err(RegistryError::NotAdmin { caller });
        }
        self.check_recipient(owner)?;
        if new.generation != 0 || new.mum_id != 0 || new.dad_id != 0 {
            return Err(RegistryError::InvalidArgument(format!(
                "mint creates gen-0 kitties only (generation={}, mum={}, dad={})",
                new.generation, new.mum_id, new.dad_id
            )));
        }
        if self.gen0_count >= self.config.gen0_limit {
            return Err(RegistryError::LimitReached {
                limit: self.config.gen0_limit,
            });
        }

        let id = self.push(Kitty::from_new(new, owner));
        info!("Minted {}", self.get_kitty(id).summary(id));
        Ok(id)
    }

    /// List every violated invariant; empty means healthy
    pub fn check_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();

        match self.slot(SENTINEL_ID) {
            Some(k) if *k == Kitty::sentinel() => {}
            Some(_) => violations.push("sentinel kitty 0 has been modified".to_string()),
            None => violations.push("sentinel kitty 0 is missing".to_string()),
        }

        let mut recount: HashMap<Address, u64> = HashMap::new();
        for kitty in self.kitties.iter().filter(|k| k.is_owned()) {
            *recount.entry(kitty.owner).or_insert(0) += 1;
        }

        let owned = recount.values().sum::<u64>();
        let counted = self.owner_counts.values().sum::<u64>();
        if owned != counted {
            violations.push(format!(
                "owner counts sum to {} but {} kitties are owned",
                counted, owned
            ));
        }

        let mut owners: Vec<&Address> = recount.keys().chain(self.owner_counts.keys()).collect();
        owners.sort();
        owners.dedup();
        for owner in owners {
            let expected = recount.get(owner).copied().unwrap_or(0);
            let actual = self.balance_of(*owner);
            if expected != actual {
                violations.push(format!(
                    "{} holds {} kitties but its count is {}",
                    owner, expected, actual
                ));
            }
        }

        let gen0_records = self
            .kitties
            .iter()
            .skip(1)
            .filter(|k| k.generation == 0)
            .count() as u64;
        if gen0_records != self.gen0_count {
            violations.push(format!(
                "gen-0 count is {} but {} gen-0 kitties exist",
                self.gen0_count, gen0_records
            ));
        }

        if recount.contains_key(&self.config.contract_address) {
            violations.push("the registry address owns kitties".to_string());
        }

        if !self.events.verify_chain() {
            violations.push("event chain does not verify".to_string());
        }

        violations
    }

    /// Replace the configuration, refusing a registry address that holds kitties
    pub fn reconfigure(&mut self, config: RegistryConfig) -> Result<(), RegistryError> {
        if self.balance_of(config.contract_address) > 0
            || !self.tokens_of_owner(config.contract_address).is_empty()
        {
            return Err(RegistryError::InvalidArgument(format!(
                "new registry address {} owns kitties",
                config.contract_address
            )));
        }
        if config != self.config {
            info!(
                "Reconfigured registry: address {}, admin {}, gen-0 limit {}",
                config.contract_address, config.admin, config.gen0_limit
            );
        }
        self.config = config;
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ({}) at {} | supply={} | gen0={}/{} | owners={} | events={}",
            NAME,
            SYMBOL,
            self.config.contract_address,
            self.total_supply(),
            self.gen0_count,
            self.config.gen0_limit,
            self.owner_counts.values().filter(|c| **c > 0).count(),
            self.events.len()
        )
    }

    fn check_recipient(&self, to: Address) -> Result<(), RegistryError> {
        if to.is_zero() {
            return Err(RegistryError::InvalidArgument(
                "recipient is the zero address".to_string(),
            ));
        }
        if to == self.config.contract_address {
            return Err(RegistryError::InvalidArgument(
                "recipient is the registry address".to_string(),
            ));
        }
        Ok(())
    }

    /// Append a record, bump its owner's count and log the birth
    fn push(&mut self, kitty: Kitty) -> KittyId {
        let id = self.kitties.len() as KittyId;
        self.kitties.push(kitty);
        self.increment(kitty.owner);
        if kitty.generation == 0 {
            self.gen0_count += 1;
        }
        self.events.append(RegistryEvent::Birth {
            owner: kitty.owner,
            id,
            mum_id: kitty.mum_id,
            dad_id: kitty.dad_id,
            genes: kitty.genes,
        });
        id
    }

    fn slot(&self, id: KittyId) -> Option<&Kitty> {
        usize::try_from(id).ok().and_then(|i| self.kitties.get(i))
    }

    fn slot_mut(&mut self, id: KittyId) -> Option<&mut Kitty> {
        usize::try_from(id).ok().and_then(|i| self.kitties.get_mut(i))
    }

    fn increment(&mut self, owner: Address) {
        if owner.is_zero() {
            return;
        }
        *self.owner_counts.entry(owner).or_insert(0) += 1;
    }

    fn decrement(&mut self, owner: Address) {
        if let Some(count) = self.owner_counts.get_mut(&owner) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.owner_counts.remove(&owner);
            }
        }
    }
}

/// Seeding hooks used by the test fixtures; they skip admin and limit checks
#[cfg(any(test, feature = "fixtures"))]
impl KittyRegistry {
    pub(crate) fn insert_unchecked(&mut self, kitty: Kitty) -> KittyId {
        self.push(kitty)
    }

    pub(crate) fn set_balance_unchecked(&mut self, owner: Address, count: u64) {
        self.owner_counts.insert(owner, count);
    }
}

impl Default for KittyRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
