//! Bond ledger entities.
//!
//! A [`DelegateeBond`] holds the total amount of bond tokens issued against a
//! single validator candidate and their exchange rate to coins. Accrued
//! rewards raise the exchange rate and slashing lowers it. Delegating coins
//! credits the delegator with a [`DelegatorBond`] whose bond tokens are the
//! delegated coins divided by the current exchange rate.

pub mod voting_power;

use std::ops::Index;

use borsh::{BorshDeserialize, BorshSerialize};
use dpos_core::address::Identity;
use dpos_core::dec::Dec;
use serde::{Deserialize, Serialize};

use crate::error::{BondError, CollectionError, VotingPowerError};
use crate::types::{into_tm_voting_power, ConsensusValidator};

/// A record that belongs to a single delegatee and can be looked up by it.
pub trait BondRecord {
    /// The candidate this record refers to.
    fn delegatee(&self) -> &Identity;
}

/// The bond tokens and exchange rate of a single validator candidate.
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
pub struct DelegateeBond {
    /// The candidate
    pub delegatee: Identity,
    /// Current commission rate
    pub commission: Dec,
    /// Bond token to coin exchange rate
    pub exchange_rate: Dec,
    /// Sum of the bond tokens issued against this candidate
    pub total_bond_tokens: Dec,
    /// Account holding the bonded coins
    pub account: Identity,
    /// Only ever assigned by [`voting_power::update_voting_power`]
    voting_power: Dec,
}

impl DelegateeBond {
    /// A fresh candidate with no bonds and an exchange rate of 1.
    pub fn new(
        delegatee: Identity,
        commission: Dec,
        account: Identity,
    ) -> Self {
        Self {
            delegatee,
            commission,
            exchange_rate: Dec::one(),
            total_bond_tokens: Dec::zero(),
            account,
            voting_power: Dec::zero(),
        }
    }

    /// The voting power from the last recomputation.
    pub fn voting_power(&self) -> Dec {
        self.voting_power
    }

    /// Value of the bonds in coins.
    pub fn bond_value(&self) -> Result<Dec, BondError> {
        Ok(self.total_bond_tokens.try_mul(self.exchange_rate)?)
    }

    /// Delegate coins, returning the bond tokens minted for them.
    pub fn delegate(&mut self, coins: Dec) -> Result<Dec, BondError> {
        if !coins.is_positive() {
            return Err(BondError::NonPositiveAmount(coins));
        }
        let minted = coins.try_div(self.exchange_rate)?;
        self.total_bond_tokens = self.total_bond_tokens.try_add(minted)?;
        tracing::debug!(
            "Minted {minted} bond tokens for {coins} coins delegated to {}",
            self.delegatee
        );
        Ok(minted)
    }

    /// Burn bond tokens, returning their value in coins.
    pub fn unbond(&mut self, bond_tokens: Dec) -> Result<Dec, BondError> {
        if !bond_tokens.is_positive() {
            return Err(BondError::NonPositiveAmount(bond_tokens));
        }
        if bond_tokens > self.total_bond_tokens {
            return Err(BondError::InsufficientBondTokens {
                delegatee: self.delegatee.clone(),
                requested: bond_tokens,
                available: self.total_bond_tokens,
            });
        }
        let coins = bond_tokens.try_mul(self.exchange_rate)?;
        self.total_bond_tokens = self.total_bond_tokens.try_sub(bond_tokens)?;
        Ok(coins)
    }

    /// Apply an exchange rate computed by reward or slashing logic.
    pub fn set_exchange_rate(&mut self, rate: Dec) -> Result<(), BondError> {
        if !rate.is_positive() {
            return Err(BondError::NonPositiveExchangeRate(rate));
        }
        self.exchange_rate = rate;
        Ok(())
    }

    /// The consensus validator record of this candidate. The public key is
    /// the candidate's address and the power is the integer floor of the
    /// voting power.
    pub fn validator(&self) -> Result<ConsensusValidator, VotingPowerError> {
        Ok(ConsensusValidator::new(
            self.delegatee.address.clone(),
            into_tm_voting_power(self.voting_power)?,
        ))
    }
}

impl BondRecord for DelegateeBond {
    fn delegatee(&self) -> &Identity {
        &self.delegatee
    }
}

/// Bond tokens held by one delegator with one candidate.
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
pub struct DelegatorBond {
    /// The candidate the tokens are delegated to
    pub delegatee: Identity,
    /// Amount of bond tokens
    pub bond_tokens: Dec,
}

impl DelegatorBond {
    /// A bond with the given amount of tokens.
    pub fn new(delegatee: Identity, bond_tokens: Dec) -> Self {
        Self {
            delegatee,
            bond_tokens,
        }
    }

    /// Credit freshly minted bond tokens.
    pub fn add_tokens(&mut self, tokens: Dec) -> Result<(), BondError> {
        if !tokens.is_positive() {
            return Err(BondError::NonPositiveAmount(tokens));
        }
        self.bond_tokens = self.bond_tokens.try_add(tokens)?;
        Ok(())
    }

    /// Debit bond tokens that are being unbonded.
    pub fn remove_tokens(&mut self, tokens: Dec) -> Result<(), BondError> {
        if !tokens.is_positive() {
            return Err(BondError::NonPositiveAmount(tokens));
        }
        if tokens > self.bond_tokens {
            return Err(BondError::InsufficientBondTokens {
                delegatee: self.delegatee.clone(),
                requested: tokens,
                available: self.bond_tokens,
            });
        }
        self.bond_tokens = self.bond_tokens.try_sub(tokens)?;
        Ok(())
    }
}

impl BondRecord for DelegatorBond {
    fn delegatee(&self) -> &Identity {
        &self.delegatee
    }
}

/// An ordered list of bond records.
///
/// The list does not enforce unique delegatees. Callers must not push a
/// second record for a delegatee that is already present.
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
#[serde(transparent)]
pub struct BondList<T>(Vec<T>);

/// All the validator candidates
pub type DelegateeBonds = BondList<DelegateeBond>;

/// All the bonds of a delegator, one per candidate
pub type DelegatorBonds = BondList<DelegatorBond>;

impl<T> BondList<T> {
    /// An empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no records
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the records in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Append a record
    pub fn push(&mut self, record: T) {
        self.0.push(record)
    }

    /// Remove the record at `index`, shifting the later ones down.
    ///
    /// Fails when the index is negative or not below the length, in which
    /// case the list is left untouched. Any index taken before a successful
    /// removal is stale afterwards.
    pub fn remove<I>(&mut self, index: I) -> Result<T, CollectionError>
    where
        I: TryInto<usize> + PartialOrd + Default,
    {
        let len = self.len();
        let negative = index < I::default();
        let index = index.try_into().map_err(|_| {
            if negative {
                CollectionError::NegativeIndex
            } else {
                // Too large for `usize`
                CollectionError::OutOfBounds {
                    index: usize::MAX,
                    len,
                }
            }
        })?;
        if index >= len {
            return Err(CollectionError::OutOfBounds { index, len });
        }
        Ok(self.0.remove(index))
    }
}

impl<T: BondRecord> BondList<T> {
    /// Find the record for a delegatee with its position.
    pub fn get(&self, delegatee: &Identity) -> Option<(usize, &T)> {
        self.0
            .iter()
            .enumerate()
            .find(|(_, record)| record.delegatee() == delegatee)
    }

    /// Find the record for a delegatee with its position, for modification.
    pub fn get_mut(
        &mut self,
        delegatee: &Identity,
    ) -> Option<(usize, &mut T)> {
        self.0
            .iter_mut()
            .enumerate()
            .find(|(_, record)| record.delegatee() == delegatee)
    }
}

impl<T> Default for BondList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for BondList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> From<Vec<T>> for BondList<T> {
    fn from(records: Vec<T>) -> Self {
        Self(records)
    }
}

impl<T> FromIterator<T> for BondList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for BondList<T> {
    type IntoIter = std::vec::IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a BondList<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Check that the delegator bonds of every candidate add up to its total
/// bond tokens. Candidates without delegator bonds must have no tokens.
pub fn check_bond_totals<'a>(
    delegatees: &DelegateeBonds,
    delegator_bonds: impl IntoIterator<Item = &'a DelegatorBond>,
) -> Result<(), BondError> {
    let mut delegated = vec![Dec::zero(); delegatees.len()];
    for bond in delegator_bonds {
        let (index, _) = delegatees.get(&bond.delegatee).ok_or_else(|| {
            BondError::UnknownDelegatee(bond.delegatee.clone())
        })?;
        delegated[index] = delegated[index].try_add(bond.bond_tokens)?;
    }
    for (delegatee, delegated) in delegatees.iter().zip(delegated) {
        if delegated != delegatee.total_bond_tokens {
            return Err(BondError::TotalMismatch {
                delegatee: delegatee.delegatee.clone(),
                delegated,
                recorded: delegatee.total_bond_tokens,
            });
        }
    }
    Ok(())
}
