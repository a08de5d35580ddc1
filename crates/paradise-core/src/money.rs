//! # Money Module
//!
//! Provides the `Money` type for handling currency amounts safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With binary floats:                                                    │
//! │    16.00 × 0.18 = 2.8800000000000003  ❌                                │
//! │                                                                         │
//! │  Totals are recomputed on every cart mutation, so float noise would    │
//! │  leak into every order summary the customer sees.                       │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal                                             │
//! │    16.00 × 0.18 = 2.88 exactly, never rounded internally               │
//! │    Rounding to 2 places happens only in Display                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use paradise_core::money::Money;
//!
//! let price = Money::from_cents(800); // $8.00
//! let line = price * 2;               // $16.00
//! assert_eq!(line.to_string(), "$16.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A currency amount in major units (dollars), backed by an exact decimal.
///
/// ## Design Decisions
/// - **Decimal, not cents**: tax is applied unrounded, so fractional cents
///   must survive until display
/// - **String on the wire**: written as `"8.00"` (at least two decimals,
///   never padded past the exact value); `8` or `8.5` (numbers) written by
///   older clients still deserialize
/// - **Saturating arithmetic**: `+`, `-` and `×` clamp at the decimal range
///   instead of panicking, so an absurd amount can't take the session down
///
/// ## Where Money is Used
/// ```text
/// CartItem.price ──► CartItem.line_total ──► Totals.subtotal
///                                              │
///                          Totals.fee ◄────────┤
///                          Totals.tax ◄────────┤
///                                              ▼
///                                        Totals.total ──► "$23.87"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use paradise_core::money::Money;
    ///
    /// let fee = Money::from_cents(499);
    /// assert_eq!(fee.to_string(), "$4.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Wraps an existing decimal amount (major units).
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use paradise_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(897));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Applies a rate without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use paradise_core::money::Money;
    /// use paradise_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(1000);
    /// let tax = subtotal.apply_rate(TaxRate::from_bps(825));
    /// // $10.00 × 8.25% = $0.825, kept exact
    /// assert_eq!(tax.amount().to_string(), "0.825");
    /// ```
    pub fn apply_rate(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_mul(rate.as_fraction()).normalize())
    }

    /// Rounds to whole cents, half away from zero.
    ///
    /// Only for display; totals keep the unrounded value.
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Fixed two-decimal form, e.g. `$16.00` or `-$1.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

/// Exact amount as a string with at least two decimals:
/// `16.00`, `2.88`, `0.00`, `0.825`.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut amount = self.0.normalize();
        if amount.scale() < 2 {
            amount.rescale(2);
        }
        serializer.collect_str(&amount)
    }
}

/// Parses `8`, `8.00` or `$8.00`.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
        Decimal::from_str(digits)
            .map(Money)
            .map_err(|_| CoreError::InvalidAmount(s.to_string()))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
