//! Ledger positions used to time queued state changes.

use std::fmt::Display;
use std::num::ParseIntError;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSchema, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Height of a block, i.e. the level.
#[derive(
    Clone,
    Copy,
    Default,
    BorshSerialize,
    BorshDeserialize,
    BorshSchema,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Serialize,
    Deserialize,
)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// Get the height of the next block
    pub fn next_height(&self) -> Option<BlockHeight> {
        self.checked_add(1)
    }

    /// Add a number of blocks, `None` on overflow.
    pub fn checked_add(self, blocks: u64) -> Option<BlockHeight> {
        Some(BlockHeight(self.0.checked_add(blocks)?))
    }

    /// Subtract a number of blocks, `None` on underflow.
    pub fn checked_sub(self, blocks: u64) -> Option<BlockHeight> {
        Some(BlockHeight(self.0.checked_sub(blocks)?))
    }
}

impl Display for BlockHeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BlockHeight> for u64 {
    fn from(height: BlockHeight) -> Self {
        height.0
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        BlockHeight(height)
    }
}

impl FromStr for BlockHeight {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse::<u64>()?))
    }
}
