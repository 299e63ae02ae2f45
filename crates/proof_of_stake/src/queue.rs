//! Queued state changes awaiting maturation.
//!
//! Unbonding and commission rate changes don't take effect right away. They
//! are queued with the block height at which they were requested and
//! processed by the host once [`QueueElem::is_mature`].

use borsh::{BorshDeserialize, BorshSerialize};
use dpos_core::address::Identity;
use dpos_core::arith::{self, OptionExt};
use dpos_core::dec::Dec;
use dpos_core::storage::BlockHeight;
use serde::{Deserialize, Serialize};

use crate::parameters::PosParams;

/// A pending change for a validator candidate.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub struct QueueElem {
    /// The candidate the change applies to
    pub delegatee: Identity,
    /// Height of the block in which the change was requested
    pub height_at_init: BlockHeight,
    /// What is changing
    pub kind: QueueElemKind,
}

#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
)]
pub enum QueueElemKind {
    /// Bond tokens being unbonded
    Unbond {
        /// Account to pay out to
        account: Identity,
        bond_tokens: Dec,
    },
    /// A commission rate change
    ModComm {
        /// Proposed change in commission
        comm_change: Dec,
    },
}

impl QueueElem {
    /// Queue an unbonding.
    pub fn unbond(
        delegatee: Identity,
        height_at_init: BlockHeight,
        account: Identity,
        bond_tokens: Dec,
    ) -> Self {
        Self {
            delegatee,
            height_at_init,
            kind: QueueElemKind::Unbond {
                account,
                bond_tokens,
            },
        }
    }

    /// Queue a commission rate change.
    pub fn mod_comm(
        delegatee: Identity,
        height_at_init: BlockHeight,
        comm_change: Dec,
    ) -> Self {
        Self {
            delegatee,
            height_at_init,
            kind: QueueElemKind::ModComm { comm_change },
        }
    }

    /// The height from which this change may be processed.
    pub fn maturation_height(
        &self,
        params: &PosParams,
    ) -> Result<BlockHeight, arith::Error> {
        let period = match self.kind {
            QueueElemKind::Unbond { .. } => params.unbonding_period,
            QueueElemKind::ModComm { .. } => params.commission_change_period,
        };
        self.height_at_init.checked_add(period).or_overflow()
    }

    /// Check if this change may be processed at the `current` height.
    pub fn is_mature(
        &self,
        current: BlockHeight,
        params: &PosParams,
    ) -> Result<bool, arith::Error> {
        Ok(current >= self.maturation_height(params)?)
    }
}
