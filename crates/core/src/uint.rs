#![allow(clippy::assign_op_pattern)]
//! An unsigned 256 bit integer type and its two's complement signed
//! counterpart. Used as the backing type of [`crate::dec::Dec`].
//!
//! Only checked arithmetic is exposed on [`I256`]. Every operation that
//! cannot be represented returns `None`.
use std::cmp::Ordering;
use std::fmt;

use borsh::{BorshDeserialize, BorshSchema, BorshSerialize};
use uint::construct_uint;

construct_uint! {
    /// Unsigned 256 bit integer.
    #[derive(
        BorshSerialize,
        BorshDeserialize,
        BorshSchema,
    )]

    pub struct Uint(4);
}

/// The value zero.
pub const ZERO: Uint = Uint::from_u64(0);

/// The value one.
pub const ONE: Uint = Uint::from_u64(1);

/// The maximum 256 bit integer
pub const MAX_VALUE: Uint = Uint([u64::MAX; 4]);

/// The maximum absolute value a [`I256`] may have.
/// Note the the last digit is 2^63 - 1. We add this cap so
/// we can use two's complement.
pub const MAX_SIGNED_VALUE: Uint =
    Uint([u64::MAX, u64::MAX, u64::MAX, 9223372036854775807]);

const MINUS_ZERO: Uint = Uint([0u64, 0u64, 0u64, 9223372036854775808]);

impl Uint {
    /// Convert a [`u64`] to a [`Uint`].
    pub const fn from_u64(x: u64) -> Uint {
        Uint([x.to_le(), 0, 0, 0])
    }

    /// Try to narrow down to a [`u64`]. `None` if any of the upper words is
    /// in use.
    pub fn checked_to_u64(&self) -> Option<u64> {
        if self.bits() > 64 {
            None
        } else {
            Some(self.low_u64())
        }
    }

    /// Divide two [`Uint`]s with scaled to allow the `denom` number
    /// of decimal places.
    ///
    /// This method is checked and will return `None` if
    ///  * `self` * 10^(`denom`) overflows 256 bits
    ///  * `other` is  zero (`checked_div` will return `None`).
    pub fn fixed_precision_div(&self, rhs: &Self, denom: u8) -> Option<Self> {
        self.checked_mul(Uint::exp10(usize::from(denom)))?
            .checked_div(*rhs)
    }

    /// Compute the two's complement of a number.
    fn negate(&self) -> Self {
        let mut output = self.0;
        for byte in output.iter_mut() {
            *byte ^= u64::MAX;
        }
        Self(output).overflowing_add(ONE).0.canonical()
    }

    /// There are two valid representations of zero: plus and
    /// minus. We only allow the positive representation.
    fn canonical(self) -> Self {
        if self == MINUS_ZERO { Self::zero() } else { self }
    }
}

/// Widen a [`u128`] into the two low words of a [`Uint`].
pub const fn u128_to_uint(x: u128) -> Uint {
    Uint([x as u64, (x >> 64) as u64, 0, 0])
}

/// A signed 256 big integer.
#[derive(
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    BorshSerialize,
    BorshDeserialize,
    BorshSchema,
)]
pub struct I256(pub Uint);

impl fmt::Debug for I256 {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <Self as fmt::Display>::fmt(self, f)
    }
}

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", self.abs())
    }
}

impl I256 {
    /// Check if the amount is not negative (greater
    /// than or equal to zero)
    pub fn non_negative(&self) -> bool {
        self.0.0[3].leading_zeros() > 0
    }

    /// Check if the amount is negative (less than zero)
    pub fn is_negative(&self) -> bool {
        !self.non_negative()
    }

    /// Check if the amount is positive (greater than zero)
    pub fn is_positive(&self) -> bool {
        self.non_negative() && !self.is_zero()
    }

    /// Get the absolute value
    pub fn abs(&self) -> Uint {
        if self.non_negative() {
            self.0
        } else {
            self.0.negate()
        }
    }

    /// Check if this value is zero
    pub fn is_zero(&self) -> bool {
        self.0 == Uint::zero()
    }

    /// Gives the zero value of an I256
    pub fn zero() -> I256 {
        Self(Uint::zero())
    }

    /// Gives the one value of an I256
    pub fn one() -> I256 {
        Self(Uint::one())
    }

    /// the maximum I256 value
    pub fn maximum() -> Self {
        Self(MAX_SIGNED_VALUE)
    }

    /// Build a value from its magnitude and sign. `None` if the magnitude
    /// exceeds [`MAX_SIGNED_VALUE`].
    pub fn from_parts(magnitude: Uint, negative: bool) -> Option<Self> {
        if magnitude > MAX_SIGNED_VALUE {
            return None;
        }
        if negative {
            Some(Self(magnitude.negate()))
        } else {
            Some(Self(magnitude))
        }
    }

    /// Checked addition
    pub fn checked_add(&self, rhs: Self) -> Option<Self> {
        match (self.non_negative(), rhs.non_negative()) {
            (true, true) => {
                Self::from_parts(self.0.checked_add(rhs.0)?, false)
            }
            (false, false) => {
                Self::from_parts(self.abs().checked_add(rhs.abs())?, true)
            }
            (true, false) => {
                let (pos, neg) = (self.0, rhs.abs());
                if pos >= neg {
                    Self::from_parts(pos.checked_sub(neg)?, false)
                } else {
                    Self::from_parts(neg.checked_sub(pos)?, true)
                }
            }
            (false, true) => rhs.checked_add(*self),
        }
    }

    /// Checked subtraction
    pub fn checked_sub(&self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs.checked_neg()?)
    }

    /// Checked negation. Every representable value has a representable
    /// negation, the option is kept for symmetry with the other operations.
    pub fn checked_neg(&self) -> Option<Self> {
        Some(Self(self.0.negate()))
    }

    /// Checked multiplication
    pub fn checked_mul(&self, rhs: Self) -> Option<Self> {
        let negative = self.is_negative() ^ rhs.is_negative();
        Self::from_parts(self.abs().checked_mul(rhs.abs())?, negative)
    }

    /// Checked division, truncating towards zero. `None` on a zero divisor.
    pub fn checked_div(&self, rhs: Self) -> Option<Self> {
        let negative = self.is_negative() ^ rhs.is_negative();
        Self::from_parts(self.abs().checked_div(rhs.abs())?, negative)
    }
}

impl From<u64> for I256 {
    fn from(val: u64) -> Self {
        Self(Uint::from_u64(val))
    }
}

impl From<i128> for I256 {
    fn from(val: i128) -> Self {
        let magnitude = u128_to_uint(val.unsigned_abs());
        // A 128 bit magnitude is far below the signed cap
        if val.is_negative() {
            Self(magnitude.negate())
        } else {
            Self(magnitude)
        }
    }
}

impl TryFrom<Uint> for I256 {
    type Error = crate::arith::Error;

    fn try_from(value: Uint) -> Result<Self, Self::Error> {
        Self::from_parts(value, false).ok_or(crate::arith::Error::Overflow)
    }
}

impl PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for I256 {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.non_negative(), other.non_negative()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => {
                let this = self.abs();
                let that = other.abs();
                this.cmp(&that)
            }
            (false, false) => {
                let this = self.abs();
                let that = other.abs();
                that.cmp(&this)
            }
        }
    }
}
