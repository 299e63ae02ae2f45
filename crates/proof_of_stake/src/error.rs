//! Custom error types

use dpos_core::address::Identity;
use dpos_core::arith;
use dpos_core::dec::Dec;
use thiserror::Error;

#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Cannot remove a negative element")]
    NegativeIndex,
    #[error(
        "Element {index} is out of upper bound for a collection of length \
         {len}"
    )]
    OutOfBounds { index: usize, len: usize },
}

#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VotingPowerError {
    #[error("Voting power arithmetic failed: {0}")]
    Arith(#[from] arith::Error),
    #[error(
        "Voting power {0} cannot be represented as a consensus voting power"
    )]
    PowerOutOfRange(Dec),
}

#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BondError {
    #[error("The bonded amount must be positive, got {0}")]
    NonPositiveAmount(Dec),
    #[error(
        "Trying to unbond more bond tokens ({requested}) than the amount \
         bonded ({available}) to {delegatee}"
    )]
    InsufficientBondTokens {
        delegatee: Identity,
        requested: Dec,
        available: Dec,
    },
    #[error("The exchange rate must be positive, got {0}")]
    NonPositiveExchangeRate(Dec),
    #[error(
        "Delegator bonds to {delegatee} sum to {delegated} bond tokens but \
         the delegatee records {recorded}"
    )]
    TotalMismatch {
        delegatee: Identity,
        delegated: Dec,
        recorded: Dec,
    },
    #[error("A delegator bond refers to an unknown delegatee {0}")]
    UnknownDelegatee(Identity),
    #[error("Bond arithmetic failed: {0}")]
    Arith(#[from] arith::Error),
}

#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("The maximum number of validator slots must be at least 1")]
    NoValidatorSlots,
    #[error("The minimum validator bond must not be negative, got {0}")]
    NegativeMinValidatorBond(Dec),
}
