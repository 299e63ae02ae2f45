//! Bond ledger tests

use assert_matches::assert_matches;
use dpos_core::address::testing::{
    established_identity_1, established_identity_2, established_identity_3,
    identity_from_simple_seed,
};
use dpos_core::dec::Dec;
use pretty_assertions::assert_eq;
use test_log::test;

use super::candidate;
use crate::bonds::{
    check_bond_totals, DelegateeBond, DelegateeBonds, DelegatorBond,
    DelegatorBonds,
};
use crate::error::{BondError, CollectionError};

fn three_candidates() -> DelegateeBonds {
    DelegateeBonds::from(vec![
        candidate(1, 10),
        candidate(2, 20),
        candidate(3, 30),
    ])
}

#[test]
fn test_get_finds_position_and_record() {
    let bonds = three_candidates();
    let (index, bond) = bonds.get(&established_identity_2()).unwrap();
    assert_eq!(index, 1);
    assert_eq!(bond.total_bond_tokens, Dec::from(20_u64));

    let (index, bond) = bonds.get(&established_identity_1()).unwrap();
    assert_eq!(index, 0);
    assert_eq!(bond.delegatee, established_identity_1());
}

#[test]
fn test_get_not_found() {
    let bonds = three_candidates();
    assert!(bonds.get(&identity_from_simple_seed(9)).is_none());
    assert!(DelegateeBonds::new().get(&established_identity_1()).is_none());

    let delegator_bonds = DelegatorBonds::from(vec![DelegatorBond::new(
        established_identity_1(),
        Dec::from(5_u64),
    )]);
    assert!(delegator_bonds.get(&established_identity_2()).is_none());
    let (index, bond) = delegator_bonds.get(&established_identity_1()).unwrap();
    assert_eq!(index, 0);
    assert_eq!(bond.bond_tokens, Dec::from(5_u64));
}

#[test]
fn test_get_compares_the_whole_identity() {
    let bonds = three_candidates();
    let mut other_chain = established_identity_1();
    other_chain.chain_id = "other-chain".to_string();
    assert!(bonds.get(&other_chain).is_none());
    let mut other_app = established_identity_1();
    other_app.app = "other-app".to_string();
    assert!(bonds.get(&other_app).is_none());
}

#[test]
fn test_get_mut_modifies_in_place() {
    let mut bonds = three_candidates();
    let (index, bond) = bonds.get_mut(&established_identity_3()).unwrap();
    assert_eq!(index, 2);
    bond.total_bond_tokens = Dec::from(33_u64);
    assert_eq!(bonds[2].total_bond_tokens, Dec::from(33_u64));
}

#[test]
fn test_remove_out_of_bounds() {
    let mut bonds = three_candidates();
    let before = bonds.clone();

    assert_matches!(bonds.remove(-1), Err(CollectionError::NegativeIndex));
    assert_eq!(bonds, before);

    let len = bonds.len();
    assert_matches!(
        bonds.remove(len),
        Err(CollectionError::OutOfBounds { index: 3, len: 3 })
    );
    assert_matches!(
        bonds.remove(i64::MAX),
        Err(CollectionError::OutOfBounds { .. })
    );
    assert_eq!(bonds, before);

    assert_matches!(
        bonds.remove(i128::MIN),
        Err(CollectionError::NegativeIndex)
    );
    assert_matches!(
        bonds.remove(u128::MAX),
        Err(CollectionError::OutOfBounds {
            index: usize::MAX,
            len: 3
        })
    );
    assert_matches!(
        bonds.remove(i128::MAX),
        Err(CollectionError::OutOfBounds {
            index: usize::MAX,
            len: 3
        })
    );
    assert_eq!(bonds, before);

    let mut empty = DelegatorBonds::new();
    assert_matches!(
        empty.remove(0_u8),
        Err(CollectionError::OutOfBounds { index: 0, len: 0 })
    );
}

#[test]
fn test_remove_preserves_order() {
    let mut bonds = three_candidates();
    let removed = bonds.remove(0).unwrap();
    assert_eq!(removed.delegatee, established_identity_1());
    let remaining = bonds
        .iter()
        .map(|bond| bond.delegatee.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        remaining,
        vec![established_identity_2(), established_identity_3()]
    );
    // Positions shift down after a removal
    assert_eq!(bonds.get(&established_identity_3()).unwrap().0, 1);

    let removed = bonds.remove(1_i32).unwrap();
    assert_eq!(removed.delegatee, established_identity_3());
    assert_eq!(bonds.len(), 1);
}

#[test]
fn test_delegate_and_unbond_follow_the_exchange_rate() {
    let mut bond = DelegateeBond::new(
        established_identity_1(),
        Dec::new(5, 2).unwrap(),
        identity_from_simple_seed(100),
    );
    assert_eq!(bond.exchange_rate, Dec::one());
    assert!(bond.voting_power().is_zero());

    let minted = bond.delegate(Dec::from(100_u64)).unwrap();
    assert_eq!(minted, Dec::from(100_u64));

    bond.set_exchange_rate(Dec::two()).unwrap();
    assert_eq!(bond.bond_value().unwrap(), Dec::from(200_u64));
    let minted = bond.delegate(Dec::from(50_u64)).unwrap();
    assert_eq!(minted, Dec::from(25_u64));
    assert_eq!(bond.total_bond_tokens, Dec::from(125_u64));

    let coins = bond.unbond(Dec::from(25_u64)).unwrap();
    assert_eq!(coins, Dec::from(50_u64));
    assert_eq!(bond.total_bond_tokens, Dec::from(100_u64));

    // Minting and burning leaves the voting power to the recomputation
    assert!(bond.voting_power().is_zero());
}

#[test]
fn test_delegate_truncates_minted_tokens() {
    let mut bond = candidate(1, 0);
    bond.set_exchange_rate(Dec::new(3, 0).unwrap()).unwrap();
    let minted = bond.delegate(Dec::one()).unwrap();
    assert_eq!(minted, "0.333333333333".parse::<Dec>().unwrap());
}

#[test]
fn test_bond_errors() {
    let mut bond = candidate(1, 10);
    assert_matches!(
        bond.delegate(Dec::zero()),
        Err(BondError::NonPositiveAmount(_))
    );
    assert_matches!(
        bond.unbond(Dec::new(-1, 0).unwrap()),
        Err(BondError::NonPositiveAmount(_))
    );
    assert_matches!(
        bond.unbond(Dec::from(11_u64)),
        Err(BondError::InsufficientBondTokens { .. })
    );
    assert_matches!(
        bond.set_exchange_rate(Dec::zero()),
        Err(BondError::NonPositiveExchangeRate(_))
    );
    assert_eq!(bond.total_bond_tokens, Dec::from(10_u64));
    assert_eq!(bond.exchange_rate, Dec::one());
}

#[test]
fn test_delegator_bond_tokens() {
    let mut bond =
        DelegatorBond::new(established_identity_1(), Dec::from(4_u64));
    bond.add_tokens(Dec::from(6_u64)).unwrap();
    assert_eq!(bond.bond_tokens, Dec::from(10_u64));
    bond.remove_tokens(Dec::from(10_u64)).unwrap();
    assert!(bond.bond_tokens.is_zero());
    assert_matches!(
        bond.remove_tokens(Dec::one()),
        Err(BondError::InsufficientBondTokens { .. })
    );
    assert_matches!(
        bond.add_tokens(Dec::zero()),
        Err(BondError::NonPositiveAmount(_))
    );
}

#[test]
fn test_validator_record_truncates_power() {
    let mut bonds = DelegateeBonds::from(vec![candidate(1, 0)]);
    let (_, bond) = bonds.get_mut(&established_identity_1()).unwrap();
    bond.delegate("30.75".parse().unwrap()).unwrap();
    crate::bonds::voting_power::update_voting_power(
        &mut bonds,
        &super::params(10, 0),
    )
    .unwrap();
    let validator = bonds[0].validator().unwrap();
    assert_eq!(validator.consensus_key, established_identity_1().address);
    assert_eq!(validator.voting_power, 30);
}

#[test]
fn test_check_bond_totals() {
    let delegatees = DelegateeBonds::from(vec![
        candidate(1, 10),
        candidate(2, 0),
        candidate(3, 7),
    ]);
    let mut delegator_bonds = vec![
        DelegatorBond::new(established_identity_1(), Dec::from(4_u64)),
        DelegatorBond::new(established_identity_3(), Dec::from(7_u64)),
        DelegatorBond::new(established_identity_1(), Dec::from(6_u64)),
    ];
    check_bond_totals(&delegatees, &delegator_bonds).unwrap();

    delegator_bonds[2].bond_tokens = Dec::from(5_u64);
    assert_eq!(
        check_bond_totals(&delegatees, &delegator_bonds),
        Err(BondError::TotalMismatch {
            delegatee: established_identity_1(),
            delegated: Dec::from(9_u64),
            recorded: Dec::from(10_u64),
        })
    );

    let stray =
        DelegatorBond::new(identity_from_simple_seed(8), Dec::from(1_u64));
    assert_eq!(
        check_bond_totals(&delegatees, [&stray]),
        Err(BondError::UnknownDelegatee(identity_from_simple_seed(8)))
    );
}

#[test]
fn test_bond_list_encodings() {
    let bonds = DelegatorBonds::from(vec![DelegatorBond::new(
        established_identity_1(),
        Dec::new(15, 1).unwrap(),
    )]);
    let json = serde_json::to_value(&bonds).unwrap();
    assert!(json.is_array(), "serialized as a plain list: {json}");
    let decoded: DelegatorBonds = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, bonds);

    let bytes = borsh::to_vec(&bonds).unwrap();
    let decoded: DelegatorBonds = borsh::from_slice(&bytes).unwrap();
    assert_eq!(decoded, bonds);
}
