mod test_bonds;

use dpos_core::address::testing::{arb_identity, identity_from_simple_seed};
use dpos_core::address::Identity;
use dpos_core::dec::testing::{arb_positive_dec_ceiled, arb_whole_dec};
use dpos_core::dec::Dec;
use proptest::prelude::*;

use crate::bonds::{DelegateeBond, DelegateeBonds};
use crate::parameters::PosParams;
use crate::types::ConsensusValidator;

/// The custodial account of the candidate with the given seed
fn account_for(seed: u8) -> Identity {
    Identity::new("test-chain", "bank", vec![seed; 20])
}

/// A candidate with the given bond tokens at an exchange rate of 1
pub fn candidate(seed: u8, bond_tokens: u64) -> DelegateeBond {
    candidate_with_identity(identity_from_simple_seed(seed), bond_tokens)
}

/// A candidate with the given bond tokens at an exchange rate of 1
pub fn candidate_with_identity(
    delegatee: Identity,
    bond_tokens: u64,
) -> DelegateeBond {
    let seed = delegatee.address.first().copied().unwrap_or_default();
    let commission = Dec::new(1, 1).unwrap();
    let mut bond = DelegateeBond::new(delegatee, commission, account_for(seed));
    bond.total_bond_tokens = Dec::from(bond_tokens);
    bond
}

/// Parameters with the given active set size and minimum bond
pub fn params(max_validator_slots: u64, min_validator_bond: u64) -> PosParams {
    PosParams {
        max_validator_slots,
        min_validator_bond: Dec::from(min_validator_bond),
        ..PosParams::default()
    }
}

/// The power a candidate should get before truncation to the active set
pub fn expected_floored_power(
    bond: &DelegateeBond,
    params: &PosParams,
) -> Dec {
    let value = bond.bond_value().unwrap();
    if value < params.min_validator_bond {
        Dec::zero()
    } else {
        value
    }
}

/// Generate candidates with unique identities in arbitrary order. Exchange
/// rates are often exactly 1 so that voting powers tie now and then.
pub fn arb_delegatee_bonds(
    size: std::ops::Range<usize>,
) -> impl Strategy<Value = DelegateeBonds> {
    prop::collection::btree_set(arb_identity(), size)
        .prop_flat_map(|identities| {
            let len = identities.len();
            let exchange_rate =
                prop_oneof![Just(Dec::one()), arb_positive_dec_ceiled(3)];
            (
                Just(identities),
                prop::collection::vec(
                    (arb_whole_dec(0..100), exchange_rate),
                    len,
                ),
            )
        })
        .prop_map(|(identities, values)| {
            identities
                .into_iter()
                .zip(values)
                .map(|(delegatee, (bond_tokens, exchange_rate))| {
                    let mut bond = candidate_with_identity(delegatee, 0);
                    bond.total_bond_tokens = bond_tokens;
                    bond.exchange_rate = exchange_rate;
                    bond
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
        .prop_map(DelegateeBonds::from)
}

/// Generate candidates whose identities come from seeds below 16, so that
/// their consensus keys collide with [`arb_previous_validators`].
pub fn arb_seeded_delegatee_bonds(
    size: std::ops::Range<usize>,
) -> impl Strategy<Value = DelegateeBonds> {
    prop::collection::btree_map(0_u8..16, 0_u64..50, size)
        .prop_map(|bonds| {
            bonds
                .into_iter()
                .map(|(seed, bond_tokens)| candidate(seed, bond_tokens))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
        .prop_map(DelegateeBonds::from)
}

/// Generate a previously published validator set with keys from seeds below
/// 20. Keys may repeat.
pub fn arb_previous_validators(
) -> impl Strategy<Value = Vec<ConsensusValidator>> {
    prop::collection::vec((0_u8..20, 0_u64..60), 0..12).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(seed, power)| ConsensusValidator::new(vec![seed; 20], power))
            .collect()
    })
}
