//! Proof of Stake system.
//!
//! Delegations are accounted for in [`bonds`]. After every change to the
//! bonds the host recomputes the voting power with
//! [`bonds::voting_power::update_voting_power`] and hands the consensus
//! engine the updates from [`validator_set_update::validators_diff`].
//! Unbonding and commission changes wait in the [`queue`] until they mature.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bonds;
pub mod error;
pub mod parameters;
pub mod queue;
pub mod types;
pub mod validator_set_update;

#[cfg(test)]
mod tests;

pub use bonds::voting_power::{cmp_by_voting_power, update_voting_power};
pub use bonds::{
    check_bond_totals, BondList, BondRecord, DelegateeBond, DelegateeBonds,
    DelegatorBond, DelegatorBonds,
};
pub use error::{BondError, CollectionError, ParamsError, VotingPowerError};
pub use parameters::PosParams;
pub use queue::{QueueElem, QueueElemKind};
pub use types::{into_tm_voting_power, ConsensusValidator};
pub use validator_set_update::{
    get_validators, validators_diff, validators_diff_indexed,
};
