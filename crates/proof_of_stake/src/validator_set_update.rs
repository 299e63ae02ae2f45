//! Validator set updates

use std::collections::HashMap;

use crate::bonds::DelegateeBonds;
use crate::error::VotingPowerError;
use crate::types::ConsensusValidator;

/// Get the active validator set from bonds already sorted by
/// [`crate::bonds::voting_power::update_voting_power`].
///
/// Stops at the first candidate without voting power and yields at most
/// `max_validators` entries. The sort order is not re-checked.
pub fn get_validators(
    bonds: &DelegateeBonds,
    max_validators: usize,
) -> Result<Vec<ConsensusValidator>, VotingPowerError> {
    bonds
        .iter()
        .take_while(|bond| !bond.voting_power().is_zero())
        .take(max_validators)
        .map(|bond| bond.validator())
        .collect()
}

/// The updates the consensus engine needs to move from the `previous`
/// validator set to the one derived from `bonds`.
///
/// Only the keys of the previous set are visited: a validator whose power
/// differs from its previous power is emitted with its new power, which is 0
/// when it left the active set. A validator that is new to the active set is
/// not emitted.
pub fn validators_diff(
    previous: &[ConsensusValidator],
    bonds: &DelegateeBonds,
    max_validators: usize,
) -> Result<Vec<ConsensusValidator>, VotingPowerError> {
    let new = get_validators(bonds, max_validators)?;
    let diff = previous
        .iter()
        .filter_map(|prev| {
            let current_power = new
                .iter()
                .find(|validator| validator.consensus_key == prev.consensus_key)
                .map(|validator| validator.voting_power)
                .unwrap_or_default();
            (current_power != prev.voting_power).then(|| {
                ConsensusValidator::new(
                    prev.consensus_key.clone(),
                    current_power,
                )
            })
        })
        .collect::<Vec<_>>();
    log_diff(&diff);
    Ok(diff)
}

/// Same output as [`validators_diff`], looking the new powers up in a map
/// instead of scanning the new set for every previous validator.
pub fn validators_diff_indexed(
    previous: &[ConsensusValidator],
    bonds: &DelegateeBonds,
    max_validators: usize,
) -> Result<Vec<ConsensusValidator>, VotingPowerError> {
    let new = get_validators(bonds, max_validators)?;
    let mut new_powers: HashMap<&[u8], u64> = HashMap::with_capacity(new.len());
    for validator in &new {
        // A scan finds the first entry for a key
        new_powers
            .entry(validator.consensus_key.as_slice())
            .or_insert(validator.voting_power);
    }
    let diff = previous
        .iter()
        .filter_map(|prev| {
            let current_power = new_powers
                .get(prev.consensus_key.as_slice())
                .copied()
                .unwrap_or_default();
            (current_power != prev.voting_power).then(|| {
                ConsensusValidator::new(
                    prev.consensus_key.clone(),
                    current_power,
                )
            })
        })
        .collect::<Vec<_>>();
    log_diff(&diff);
    Ok(diff)
}

fn log_diff(diff: &[ConsensusValidator]) {
    tracing::debug!("{} validator set updates", diff.len());
    for update in diff {
        tracing::debug!("Validator set update: {update}");
    }
}
