//! Behaviour of the public registry surface against fixture-seeded state

use super::*;
use crate::fixture::KittyFixture;
use crate::token::{Address, Kitty};

const GENES: u64 = 1234567812345678;

/// Kitty 1 owned by the first account; returns (fixture, owner, new owner)
fn with_kitty_one() -> (KittyFixture, Address, Address) {
    let mut fixture = KittyFixture::new();
    let [_, kitty_owner, new_owner] = fixture.accounts::<3>();
    let id = fixture.add_kitty(2, 1, 0, GENES, kitty_owner);
    assert_eq!(id, 1);
    (fixture, kitty_owner, new_owner)
}

#[test]
fn test_created_with_un_kitty() {
    let fixture = KittyFixture::new();
    let kitty = fixture.registry().get_kitty(0);
    assert_eq!(kitty.mum_id, 0);
    assert_eq!(kitty.dad_id, 0);
    assert_eq!(kitty.generation, 0);
    assert_eq!(kitty.genes, 0);
    assert_eq!(kitty.owner, Address::ZERO);
}

#[test]
fn test_balance_of_returns_seeded_count() {
    let mut fixture = KittyFixture::new();
    let owner = fixture.account(1);
    fixture.set_owner_kitty_count(owner, 2);
    assert_eq!(fixture.registry().balance_of(owner), 2);
}

#[test]
fn test_balance_of_unknown_address_is_zero() {
    let fixture = KittyFixture::new();
    assert_eq!(fixture.registry().balance_of(fixture.account(7)), 0);
    assert_eq!(fixture.registry().balance_of(Address::ZERO), 0);
}

#[test]
fn test_balance_of_counts_added_kitties() {
    let mut fixture = KittyFixture::new();
    let owner = fixture.account(1);
    for genes in 0..3 {
        fixture.add_kitty(0, 0, 0, genes, owner);
    }
    assert_eq!(fixture.registry().balance_of(owner), 3);
}

#[test]
fn test_owner_of_returns_owner() {
    let mut fixture = KittyFixture::new();
    let owner = fixture.account(1);
    let id = fixture.add_kitty(1, 2, 0, GENES, owner);
    assert_eq!(fixture.registry().owner_of(id), Ok(owner));
    assert_eq!(
        fixture.registry().get_kitty(id),
        Kitty { mum_id: 1, dad_id: 2, generation: 0, genes: GENES, owner }
    );
}

#[test]
fn test_owner_of_missing_kitty_fails() {
    let fixture = KittyFixture::new();
    let err = fixture.registry().owner_of(123).unwrap_err();
    assert_eq!(err, RegistryError::NotFound(123));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_name_and_symbol() {
    let fixture = KittyFixture::new();
    assert_eq!(fixture.registry().name(), "Kitty Token");
    assert_eq!(fixture.registry().symbol(), "CAT");
}

#[test]
fn test_transfer_changes_ownership() {
    let (mut fixture, kitty_owner, new_owner) = with_kitty_one();
    let reg = fixture.registry_mut();
    reg.transfer(kitty_owner, new_owner, 1).unwrap();

    assert_eq!(reg.owner_of(1), Ok(new_owner));
    assert_eq!(reg.balance_of(kitty_owner), 0);
    assert_eq!(reg.balance_of(new_owner), 1);
}

#[test]
fn test_transfer_emits_event() {
    let (mut fixture, kitty_owner, new_owner) = with_kitty_one();
    let reg = fixture.registry_mut();
    let before = reg.events().len();
    let event = reg.transfer(kitty_owner, new_owner, 1).unwrap();

    assert_eq!(event, TransferEvent { from: kitty_owner, to: new_owner, id: 1 });
    assert_eq!(reg.events().len(), before + 1);
    assert_eq!(reg.events().transfers_of(1), vec![event]);
    match reg.events().last().map(|r| &r.event) {
        Some(RegistryEvent::Transfer(t)) => assert_eq!(*t, event),
        other => panic!("Expected Transfer, got {:?}", other),
    }
}

#[test]
fn test_transfer_by_non_owner_fails() {
    let (mut fixture, kitty_owner, new_owner) = with_kitty_one();
    let reg = fixture.registry_mut();
    let events_before = reg.events().len();

    let err = reg.transfer(new_owner, new_owner, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(reg.owner_of(1), Ok(kitty_owner));
    assert_eq!(reg.balance_of(kitty_owner), 1);
    assert_eq!(reg.balance_of(new_owner), 0);
    assert_eq!(reg.events().len(), events_before);
}

#[test]
fn test_transfer_to_zero_address_fails() {
    let (mut fixture, kitty_owner, _) = with_kitty_one();
    let reg = fixture.registry_mut();
    let err = reg.transfer(kitty_owner, Address::ZERO, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(reg.owner_of(1), Ok(kitty_owner));
    assert_eq!(reg.balance_of(kitty_owner), 1);
}

#[test]
fn test_transfer_to_contract_address_fails() {
    let (mut fixture, kitty_owner, _) = with_kitty_one();
    let contract = fixture.contract_address();
    let reg = fixture.registry_mut();
    let err = reg.transfer(kitty_owner, contract, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(reg.owner_of(1), Ok(kitty_owner));
    assert!(reg.check_invariants().is_empty());
}

#[test]
fn test_ownership_check_precedes_recipient_check() {
    let (mut fixture, _, new_owner) = with_kitty_one();
    let reg = fixture.registry_mut();
    let err = reg.transfer(new_owner, Address::ZERO, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[test]
fn test_transfer_chain_keeps_history() {
    let mut fixture = KittyFixture::new();
    let [a, b, c] = fixture.accounts::<3>();
    let id = fixture.add_kitty(0, 0, 0, GENES, a);
    let reg = fixture.registry_mut();

    reg.transfer(a, b, id).unwrap();
    reg.transfer(b, c, id).unwrap();

    let history = reg.events().transfers_of(id);
    assert_eq!(history.len(), 2);
    assert_eq!((history[0].from, history[0].to), (a, b));
    assert_eq!((history[1].from, history[1].to), (b, c));
    assert_eq!(reg.tokens_of_owner(c), vec![id]);
    assert!(reg.events().verify_chain());
}
