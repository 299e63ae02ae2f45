//! Proof-of-Stake system parameters

use std::path::Path;

use borsh::{BorshDeserialize, BorshSerialize};
use dpos_core::dec::Dec;
use eyre::{eyre, WrapErr};
use serde::{Deserialize, Serialize};

use crate::error::ParamsError;

/// Proof-of-Stake system parameters
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    BorshDeserialize,
    BorshSerialize,
    Serialize,
    Deserialize,
)]
#[serde(default)]
pub struct PosParams {
    /// A maximum number of active validators
    pub max_validator_slots: u64,
    /// The minimum bond value (bond tokens times exchange rate) a candidate
    /// needs to get any voting power.
    pub min_validator_bond: Dec,
    /// Number of blocks an unbonding waits before it can be paid out.
    pub unbonding_period: u64,
    /// Number of blocks a commission rate change waits before it takes
    /// effect.
    pub commission_change_period: u64,
}

impl Default for PosParams {
    fn default() -> Self {
        Self {
            max_validator_slots: 100,
            min_validator_bond: Dec::zero(),
            unbonding_period: 30,
            commission_change_period: 30,
        }
    }
}

impl PosParams {
    /// The maximum number of active validators as a collection size.
    pub fn max_validators(&self) -> usize {
        usize::try_from(self.max_validator_slots).unwrap_or(usize::MAX)
    }

    /// Check the parameters, returning every violated constraint.
    #[must_use]
    pub fn validate(&self) -> Vec<ParamsError> {
        let mut errors = vec![];
        if self.max_validator_slots == 0 {
            errors.push(ParamsError::NoValidatorSlots);
        }
        if self.min_validator_bond.is_negative() {
            errors.push(ParamsError::NegativeMinValidatorBond(
                self.min_validator_bond,
            ));
        }
        errors
    }

    /// Parse and validate parameters from a TOML string. Missing fields take
    /// their default values.
    pub fn from_toml_str(contents: &str) -> eyre::Result<Self> {
        let params: Self = toml::from_str(contents)
            .wrap_err("Couldn't parse PoS parameters TOML")?;
        let errors = params.validate();
        if errors.is_empty() {
            Ok(params)
        } else {
            let reasons = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            Err(eyre!("Invalid PoS parameters: {reasons}"))
        }
    }

    /// Read and validate parameters from a TOML file.
    pub fn read_toml(path: &Path) -> eyre::Result<Self> {
        let file_contents =
            std::fs::read_to_string(path).wrap_err_with(|| {
                format!(
                    "Couldn't read PoS parameters config file from {}",
                    path.to_string_lossy()
                )
            })?;
        Self::from_toml_str(&file_contents).wrap_err_with(|| {
            format!("Invalid PoS parameters in {}", path.to_string_lossy())
        })
    }
}

/// Testing helpers
#[cfg(any(test, feature = "testing"))]
pub mod testing {
    use proptest::prelude::*;

    use super::*;

    prop_compose! {
        /// Generate arbitrary valid PoS parameters. The minimum bond is a
        /// whole number of coins below 50 so that it cuts through typical
        /// generated bond values.
        pub fn arb_pos_params(num_max_validator_slots: Option<u64>)
            (max_validator_slots in 1..num_max_validator_slots.unwrap_or(10),
            min_validator_bond in 0_u64..50,
            unbonding_period in 0_u64..100,
            commission_change_period in 0_u64..100)
            -> PosParams {
            PosParams {
                max_validator_slots,
                min_validator_bond: Dec::from(min_validator_bond),
                unbonding_period,
                commission_change_period,
            }
        }
    }
}
