//! A fixed precision decimal type for bond, exchange rate and voting power
//! computations. For rounding, any computation that exceeds the specified
//! precision is truncated towards zero to the closest value with the
//! specified precision.
//!
//! Every node must derive bit-identical values from the same ledger state, so
//! there is no floating point anywhere and every operation is checked: an
//! overflow is reported, never wrapped.

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSchema, BorshSerialize};
use eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::arith;
use crate::uint::{u128_to_uint, Uint, I256};

/// The number of Dec places for PoS rational calculations
pub const POS_DECIMAL_PRECISION: u8 = 12;

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
/// Generic error [`Dec`] operations can return
pub struct Error(#[from] eyre::Error);

/// Generic result type for fallible [`Dec`] operations
pub type Result<T> = std::result::Result<T, Error>;

/// A 256 bit number with [`POS_DECIMAL_PRECISION`] number of Dec places.
///
/// To be precise, an instance X of this type should be interpreted as the Dec
/// X * 10 ^ (-[`POS_DECIMAL_PRECISION`])
#[derive(
    Clone,
    Copy,
    Default,
    BorshSerialize,
    BorshDeserialize,
    BorshSchema,
    PartialEq,
    Serialize,
    Deserialize,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Dec(pub I256);

/// `10 ^ POS_DECIMAL_PRECISION`, the raw representation of one.
fn scale() -> Uint {
    Uint::exp10(usize::from(POS_DECIMAL_PRECISION))
}

impl Dec {
    /// Performs division with truncation.
    ///
    /// The absolute values are divided to [`POS_DECIMAL_PRECISION`] places,
    /// the fractional part beyond that is discarded and the result is negated
    /// if exactly one operand is negative. `None` is returned on a zero
    /// divisor or if the scaled numerator overflows.
    ///
    /// ## Example
    ///
    /// ```
    /// use dpos_core::dec::Dec;
    ///
    /// let x = Dec::new(3, 1).unwrap(); // Represents 0.3
    /// let y = Dec::new(2, 1).unwrap(); // Represents 0.2
    /// let result = x.trunc_div(&y).unwrap();
    /// assert_eq!(result, Dec::new(15, 1).unwrap());
    /// ```
    pub fn trunc_div(&self, rhs: &Self) -> Option<Self> {
        let is_neg = self.0.is_negative() ^ rhs.0.is_negative();
        let res = self
            .0
            .abs()
            .fixed_precision_div(&rhs.0.abs(), POS_DECIMAL_PRECISION)?;
        I256::from_parts(res, is_neg).map(Self)
    }

    /// The representation of 0
    pub fn zero() -> Self {
        Self(I256::zero())
    }

    /// Check if value is zero
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// The representation of 1
    pub fn one() -> Self {
        Self(I256(scale()))
    }

    /// The representation of 2
    pub fn two() -> Self {
        Self::from(2u64)
    }

    /// Create a new [`Dec`] using a mantissa and a scale.
    pub fn new(mantissa: i128, scale: u8) -> Option<Self> {
        let scale_diff = POS_DECIMAL_PRECISION.checked_sub(scale)?;
        let abs = u128_to_uint(mantissa.unsigned_abs())
            .checked_mul(Uint::exp10(usize::from(scale_diff)))?;
        I256::from_parts(abs, mantissa.is_negative()).map(Self)
    }

    /// Get the absolute value of self as integer
    pub fn abs(&self) -> Uint {
        self.0.abs()
    }

    /// Convert the Dec type into a I256 with truncation
    pub fn to_i256(&self) -> I256 {
        let negative = self.is_negative();
        I256::from_parts(self.0.abs() / scale(), negative)
            .expect("Dividing by a positive scale cannot grow the magnitude")
    }

    /// Convert the Dec type into a Uint with truncation. `None` for negative
    /// values.
    pub fn to_uint(&self) -> Option<Uint> {
        if self.is_negative() {
            None
        } else {
            self.0.abs().checked_div(scale())
        }
    }

    /// Do subtraction of two [`Dec`]s
    pub fn checked_sub(&self, rhs: Self) -> Option<Self> {
        Some(Self(self.0.checked_sub(rhs.0)?))
    }

    /// Do addition of two [`Dec`]s
    pub fn checked_add(&self, other: Self) -> Option<Self> {
        Some(Dec(self.0.checked_add(other.0)?))
    }

    /// Checked multiplication. Return `None` if overflow. The full product
    /// must fit in 255 bits before it is scaled back down.
    pub fn checked_mul(&self, other: impl Into<Self>) -> Option<Self> {
        let other: Self = other.into();
        let result = self.0.checked_mul(other.0)?;
        let inner = result.checked_div(I256(scale()))?;
        Some(Dec(inner))
    }

    /// Checked division
    pub fn checked_div(&self, rhs: impl Into<Self>) -> Option<Self> {
        let rhs: Self = rhs.into();
        self.trunc_div(&rhs)
    }

    /// Checked negation
    pub fn checked_neg(&self) -> Option<Self> {
        Some(Self(self.0.checked_neg()?))
    }

    /// Like [`Dec::checked_add`], reporting an [`arith::Error`].
    pub fn try_add(
        &self,
        other: Self,
    ) -> std::result::Result<Self, arith::Error> {
        self.checked_add(other).ok_or(arith::Error::Overflow)
    }

    /// Like [`Dec::checked_sub`], reporting an [`arith::Error`].
    pub fn try_sub(
        &self,
        rhs: Self,
    ) -> std::result::Result<Self, arith::Error> {
        self.checked_sub(rhs).ok_or(arith::Error::Underflow)
    }

    /// Like [`Dec::checked_mul`], reporting an [`arith::Error`].
    pub fn try_mul(
        &self,
        other: Self,
    ) -> std::result::Result<Self, arith::Error> {
        self.checked_mul(other).ok_or(arith::Error::Overflow)
    }

    /// Like [`Dec::checked_div`], reporting an [`arith::Error`].
    pub fn try_div(
        &self,
        rhs: Self,
    ) -> std::result::Result<Self, arith::Error> {
        if rhs.is_zero() {
            return Err(arith::Error::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(arith::Error::Overflow)
    }

    /// Return if the [`Dec`] is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Return if the [`Dec`] is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }
}

impl FromStr for Dec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let ((large, small), is_neg) = if let Some(strip) = s.strip_prefix('-')
        {
            (strip.split_once('.').unwrap_or((strip, "0")), true)
        } else {
            (s.split_once('.').unwrap_or((s, "0")), false)
        };

        let num_large = if large.is_empty() {
            Uint::zero()
        } else {
            Uint::from_dec_str(large).map_err(|e| {
                eyre!("Could not parse {} as an integer: {:?}", large, e)
            })?
        };

        if small.is_empty() {
            return Err(eyre!(
                "Failed to parse Dec from string as there were no numbers \
                 following the decimal point."
            )
            .into());
        }
        if !small.chars().all(|c| c.is_ascii_digit()) {
            return Err(eyre!("Could not parse .{} as decimals", small).into());
        }

        let trimmed = small
            .trim_end_matches('0')
            .chars()
            .take(usize::from(POS_DECIMAL_PRECISION))
            .collect::<String>();
        let decimal_part = if trimmed.is_empty() {
            Uint::zero()
        } else {
            // `trimmed.len` <= `POS_DECIMAL_PRECISION`
            let len_diff = usize::from(POS_DECIMAL_PRECISION)
                .checked_sub(trimmed.len())
                .ok_or_else(|| eyre!("Too many decimal places"))?;
            Uint::from_dec_str(&trimmed)
                .map_err(|e| {
                    eyre!("Could not parse .{} as decimals: {:?}", small, e)
                })?
                .checked_mul(Uint::exp10(len_diff))
                .ok_or_else(|| eyre!("Decimal part overflow"))?
        };
        let int_part = scale().checked_mul(num_large).ok_or_else(|| {
            eyre!(
                "The number {} is too large to fit in the Dec type.",
                num_large
            )
        })?;
        let magnitude = int_part
            .checked_add(decimal_part)
            .ok_or_else(|| eyre!("Failed to add integral and decimal part"))?;
        I256::from_parts(magnitude, is_neg)
            .map(Dec)
            .ok_or_else(|| eyre!("The number {} is out of the Dec range", s))
            .map_err(Error::from)
    }
}

impl TryFrom<String> for Dec {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_str(&value)
    }
}

impl From<u64> for Dec {
    fn from(num: u64) -> Self {
        Self(I256(
            Uint::from(num)
                .checked_mul(scale())
                .expect("Cannot overflow as the value is in `u64` range"),
        ))
    }
}

impl From<Dec> for String {
    fn from(value: Dec) -> String {
        value.to_string()
    }
}

impl Display for Dec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let is_neg = self.is_negative();
        let mut string = self.0.abs().to_string();
        let precision = usize::from(POS_DECIMAL_PRECISION);
        if let Some(idx) = string.len().checked_sub(precision) {
            if idx > 0 {
                string.insert(idx, '.');
            } else {
                string.insert_str(0, "0.");
            }
        } else {
            let mut str_pre = "0.".to_string();
            for _ in string.len()..precision {
                str_pre.push('0');
            }
            str_pre.push_str(string.as_str());
            string = str_pre;
        };
        let stripped_string = string.trim_end_matches('0');
        let stripped_string = stripped_string.trim_end_matches('.');
        if stripped_string.is_empty() || stripped_string == "0" {
            f.write_str("0")
        } else if is_neg {
            write!(f, "-{}", stripped_string)
        } else {
            f.write_str(stripped_string)
        }
    }
}

impl Debug for Dec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string())
    }
}

/// Helpers for testing.
#[cfg(any(test, feature = "testing"))]
#[allow(clippy::arithmetic_side_effects)]
pub mod testing {
    use proptest::prelude::*;

    use super::*;

    impl std::ops::Add<Dec> for Dec {
        type Output = Dec;

        fn add(self, rhs: Dec) -> Self::Output {
            self.checked_add(rhs).unwrap()
        }
    }

    impl std::ops::AddAssign for Dec {
        fn add_assign(&mut self, rhs: Self) {
            *self = self.checked_add(rhs).unwrap();
        }
    }

    impl std::ops::Sub<Dec> for Dec {
        type Output = Dec;

        fn sub(self, rhs: Dec) -> Self::Output {
            self.checked_sub(rhs).unwrap()
        }
    }

    impl<T> std::ops::Mul<T> for Dec
    where
        T: Into<Self>,
    {
        type Output = Dec;

        fn mul(self, rhs: T) -> Self::Output {
            self.checked_mul(rhs.into()).unwrap()
        }
    }

    impl<T> std::ops::Div<T> for Dec
    where
        T: Into<Self>,
    {
        type Output = Self;

        fn div(self, rhs: T) -> Self::Output {
            self.trunc_div(&rhs.into()).unwrap()
        }
    }

    impl std::iter::Sum for Dec {
        fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
            iter.fold(Dec::zero(), |a, b| a + b)
        }
    }

    impl std::ops::Neg for Dec {
        type Output = Dec;

        fn neg(self) -> Self::Output {
            self.checked_neg().unwrap()
        }
    }

    /// Generate an arbitrary whole `Dec` in the given range, handy for token
    /// amounts that should collide with each other now and then.
    pub fn arb_whole_dec(
        range: std::ops::Range<u64>,
    ) -> impl Strategy<Value = Dec> {
        range.prop_map(Dec::from)
    }

    /// Generate an arbitrary positive `Dec` no larger than `max` whole units,
    /// with up to 6 decimal places.
    pub fn arb_positive_dec_ceiled(max: u64) -> impl Strategy<Value = Dec> {
        (1_u64..=max.saturating_mul(1_000_000)).prop_map(|micro| {
            Dec::new(i128::from(micro), 6).unwrap()
        })
    }
}
