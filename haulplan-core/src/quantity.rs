//! Fixed-point quantities used for exact constraint and objective arithmetic.
//!
//! Profits, coefficients and bounds are quantised once to integer
//! micro-units. Selectors then add and compare plain integers, so no rounding
//! can flip a feasibility or optimality decision mid-search.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Number of micro-units in one whole unit.
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Largest magnitude accepted by [`Fixed::from_f64`].
///
/// Keeps sums of several thousand quantities well inside `i64`.
pub const MAX_MAGNITUDE: f64 = 1.0e9;

/// A signed quantity stored as integer micro-units.
///
/// Arithmetic saturates instead of overflowing.
///
/// # Examples
/// ```
/// use haulplan_core::Fixed;
///
/// let fuel = Fixed::from_f64(84.0).unwrap();
/// let labour = Fixed::from_f64(75.0).unwrap();
/// assert_eq!((fuel + labour).to_f64(), 159.0);
/// assert_eq!(Fixed::from_f64(0.7).unwrap().micros(), 700_000);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Fixed(i64);

impl Fixed {
    /// The zero quantity.
    pub const ZERO: Self = Self(0);

    /// Construct a quantity from raw micro-units.
    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Raw micro-units.
    #[must_use]
    pub const fn micros(self) -> i64 {
        self.0
    }

    /// Quantise a float, rounding to the nearest micro-unit.
    ///
    /// Returns `None` for non-finite values and for magnitudes above
    /// [`MAX_MAGNITUDE`].
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "quantisation scales a range-checked float into i64 micro-units"
    )]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > MAX_MAGNITUDE {
            return None;
        }
        let scaled = (value * 1_000_000.0).round();
        Some(Self(scaled as i64))
    }

    /// Quantise a named field of a record, mapping failures to
    /// [`ValidationError::OutOfRange`].
    pub fn quantise_field(
        record: &str,
        field: &'static str,
        value: f64,
    ) -> Result<Self, ValidationError> {
        Self::from_f64(value).ok_or_else(|| ValidationError::OutOfRange {
            record: record.to_owned(),
            field,
            value,
        })
    }

    /// Convert back to a float.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "reporting converts micro-units back to whole units"
    )]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Whether the quantity is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Whether the quantity is above zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl Add for Fixed {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Fixed {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Fixed {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let unit = MICROS_PER_UNIT.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:06}",
            magnitude.div_euclid(unit),
            magnitude.rem_euclid(unit)
        )
    }
}
