//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    29.99 is stored as 2999; "rounded to 2 decimal places" is simply     │
//! │    the native precision of the representation.                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Currency is deliberately NOT modelled: all amounts are plain numeric
//! values in hundredths, and `Display` renders them without a symbol.
//!
//! ## Usage
//! ```rust
//! use basket_core::money::{Money, Rate};
//!
//! let price = Money::from_cents(1499); // 14.99
//! let vat = Rate::from_bps(2200);      // 22%
//!
//! let total = price + price.scale(vat);
//! assert_eq!(total.to_string(), "18.29");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit (hundredths, "cents").
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate math may dip negative; validation at the
///   entity boundary keeps product costs non-negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (e.g. 14 and 99).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Scales the amount by a rate, rounding to the nearest cent.
    ///
    /// This single primitive backs both uses of percentage math in the cart:
    /// - a tax step adds `total.scale(rate)` to the running total
    /// - a discount decorator prices the wrapped product at
    ///   `inner.cost().scale(factor)`
    ///
    /// ## Implementation
    /// Integer math in i128 to prevent overflow on large amounts:
    /// `(cents * bps + 5000) / 10000`. The +5000 rounds the half-cent.
    pub fn scale(&self, rate: Rate) -> Money {
        let scaled = (self.0 as i128 * rate.bps() as i128 + 5000) / 10_000;
        Money::from_cents(scaled as i64)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage rate in basis points (1 bps = 0.01% = 1/10000).
///
/// Used for both tax rates (`PDV = 0.22` → 2200 bps) and discount factors
/// (half price → 5000 bps). Basis points keep rate math in integers, the
/// same trick the `Money` type uses for amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a fractional value, e.g. `0.22` for 22%.
    ///
    /// Fails if the input is not a finite, non-negative number. This is the
    /// boundary where sloppy caller input (NaN, infinities, negatives) is
    /// rejected instead of silently defaulted.
    pub fn from_fraction(fraction: f64) -> Result<Self, ValidationError> {
        if !fraction.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "rate".to_string(),
            });
        }
        if fraction < 0.0 {
            return Err(ValidationError::MustBeNonNegative {
                field: "rate".to_string(),
            });
        }

        Ok(Rate((fraction * 10_000.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Renders the rate as a percent label without a trailing `%`.
    ///
    /// Used by the discount decorator for descriptions like
    /// `"Code Complete (discount 50%)"`.
    ///
    /// - 5000 bps → `"50"`
    /// - 1250 bps → `"12.5"`
    /// - 825 bps  → `"8.25"`
    pub fn percent_label(&self) -> String {
        let whole = self.0 / 100;
        let frac = self.0 % 100;

        if frac == 0 {
            format!("{whole}")
        } else if frac % 10 == 0 {
            format!("{whole}.{}", frac / 10)
        } else {
            format!("{whole}.{frac:02}")
        }
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount with two decimal places and no currency symbol,
/// matching the "currency is not implemented" scope of the cart.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1499);
        assert_eq!(money.cents(), 1499);
        assert_eq!(money.major(), 14);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(14, 99);
        assert_eq!(money.cents(), 1499);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display_has_no_currency_symbol() {
        assert_eq!(Money::from_cents(1499).to_string(), "14.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);
    }

    #[test]
    fn test_scale_basic() {
        // 10.00 at 10% = 1.00
        let amount = Money::from_cents(1000);
        assert_eq!(amount.scale(Rate::from_bps(1000)).cents(), 100);
    }

    #[test]
    fn test_scale_rounds_half_up() {
        // 10.00 at 8.25% = 0.825 → 0.83
        let amount = Money::from_cents(1000);
        assert_eq!(amount.scale(Rate::from_bps(825)).cents(), 83);
    }

    #[test]
    fn test_scale_as_discount_factor() {
        // 30.00 at half price = 15.00
        let cost = Money::from_cents(3000);
        assert_eq!(cost.scale(Rate::from_bps(5000)).cents(), 1500);
    }

    #[test]
    fn test_rate_from_fraction() {
        assert_eq!(Rate::from_fraction(0.22).unwrap().bps(), 2200);
        assert_eq!(Rate::from_fraction(0.5).unwrap().bps(), 5000);
        assert_eq!(Rate::from_fraction(0.0).unwrap().bps(), 0);
    }

    #[test]
    fn test_rate_from_fraction_rejects_garbage() {
        assert!(Rate::from_fraction(f64::NAN).is_err());
        assert!(Rate::from_fraction(f64::INFINITY).is_err());
        assert!(Rate::from_fraction(-0.1).is_err());
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(Rate::from_bps(5000).percent_label(), "50");
        assert_eq!(Rate::from_bps(1250).percent_label(), "12.5");
        assert_eq!(Rate::from_bps(825).percent_label(), "8.25");
        assert_eq!(Rate::from_bps(0).percent_label(), "0");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(-100).is_negative());
        assert!(Rate::zero().is_zero());
    }
}
