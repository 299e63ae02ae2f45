//! Voting power recomputation.
//!
//! [`update_voting_power`] is the only place that assigns
//! [`DelegateeBond::voting_power`].

use std::cmp::Ordering;

use dpos_core::dec::Dec;

use super::{DelegateeBond, DelegateeBonds};
use crate::error::VotingPowerError;
use crate::parameters::PosParams;

/// The total order of candidates: descending voting power, then ascending
/// identity (chain id, application id, address bytes).
pub fn cmp_by_voting_power(a: &DelegateeBond, b: &DelegateeBond) -> Ordering {
    match a.voting_power.cmp(&b.voting_power) {
        Ordering::Equal => a.delegatee.cmp(&b.delegatee),
        ordering => ordering.reverse(),
    }
}

/// The voting power a candidate is entitled to before truncation to the
/// active set: its bond value, or zero below the minimum validator bond.
fn floored_power(
    bond: &DelegateeBond,
    min_validator_bond: Dec,
) -> Result<Dec, VotingPowerError> {
    let power = bond.total_bond_tokens.try_mul(bond.exchange_rate)?;
    Ok(if power < min_validator_bond {
        Dec::zero()
    } else {
        power
    })
}

/// Recompute the voting power of every candidate, zero the power of everyone
/// outside the first `max_validator_slots` and leave the candidates sorted by
/// [`cmp_by_voting_power`]. Returns the total voting power of the active set.
///
/// All powers are computed before anything is written, so on error the
/// bonds are left as they were.
pub fn update_voting_power(
    bonds: &mut DelegateeBonds,
    params: &PosParams,
) -> Result<Dec, VotingPowerError> {
    let max_validators = params.max_validators();
    let powers = bonds
        .iter()
        .map(|bond| floored_power(bond, params.min_validator_bond))
        .collect::<Result<Vec<_>, _>>()?;

    // The active set is the top `max_validators` powers whichever way ties
    // are broken, so the total doesn't depend on the final order.
    let mut descending = powers.clone();
    descending.sort_by(|a, b| b.cmp(a));
    let total = descending
        .into_iter()
        .take(max_validators)
        .try_fold(Dec::zero(), |acc, power| acc.try_add(power))?;

    for (bond, power) in bonds.0.iter_mut().zip(powers) {
        bond.voting_power = power;
    }
    bonds.0.sort_by(cmp_by_voting_power);
    let active = max_validators.min(bonds.len());
    let (_, inactive) = bonds.0.split_at_mut(active);
    for bond in inactive.iter_mut() {
        bond.voting_power = Dec::zero();
    }
    // All zero now, which leaves them in identity order
    inactive.sort_by(cmp_by_voting_power);

    tracing::debug!(
        "Recomputed voting power of {} candidates, max validators \
         {max_validators}, total active voting power {total}",
        bonds.len()
    );
    Ok(total)
}
