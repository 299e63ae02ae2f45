//! Proof of Stake data types shared with the consensus engine

use std::fmt::Display;

use borsh::{BorshDeserialize, BorshSerialize};
use data_encoding::HEXUPPER;
use dpos_core::dec::Dec;
use serde::{Deserialize, Serialize};

use crate::error::VotingPowerError;

/// A validator as the consensus engine sees it: its consensus key and an
/// integer voting power.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct ConsensusValidator {
    /// A public key used for signing validator's consensus actions
    pub consensus_key: Vec<u8>,
    /// Integer voting power. Zero in an update removes the validator.
    pub voting_power: u64,
}

impl ConsensusValidator {
    /// Construct a validator record.
    pub fn new(consensus_key: impl Into<Vec<u8>>, voting_power: u64) -> Self {
        Self {
            consensus_key: consensus_key.into(),
            voting_power,
        }
    }
}

impl Display for ConsensusValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} with voting power {}",
            HEXUPPER.encode(&self.consensus_key),
            self.voting_power
        )
    }
}

/// Calculate voting power in the consensus engine's integer representation
/// by truncating the decimal voting power to its integer floor.
pub fn into_tm_voting_power(power: Dec) -> Result<u64, VotingPowerError> {
    power
        .to_uint()
        .and_then(|uint| uint.checked_to_u64())
        .ok_or(VotingPowerError::PowerOutOfRange(power))
}
