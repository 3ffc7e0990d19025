//! # Money Module
//!
//! Provides the `Money` type for rounded monetary values.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    37.05 + 34.99 + 30.4 = 102.44000000000001  ❌ WRONG!                 │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal in, integer cents out                           │
//! │    Prices are parsed as exact decimals, discounted, rounded to 2       │
//! │    places and stored as cents. Summing cents can't drift:              │
//! │    3705 + 3499 + 3040 = 10244 cents = 102.44                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! On the wire a `Money` is a plain JSON number with at most two decimals
//! (`37.05`, `30.4`, `0.0`), never a string and never cents.
//!
//! ## Usage
//! ```rust
//! use cartwise_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_cents(3705); // 37.05
//! let total = price.checked_add(Money::from_cents(3499)).unwrap();
//! assert_eq!(total.cents(), 7204);
//!
//! // Decimals are rounded half away from zero to 2 places
//! let rounded = Money::from_decimal(Decimal::new(30405, 3)); // 30.405
//! assert_eq!(rounded.cents(), 3041);
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;

/// Number of decimal places every monetary amount is rounded to.
pub const MONEY_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount rounded to two decimal places, stored in cents.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Price (exact decimal) ──► × (1 - rate) ──► round(2) ──► Money          │
/// │                                                           │             │
/// │                          EvaluatedLineItem.discounted_price             │
/// │                                                           │             │
/// │                                     Σ ──► EvaluatedCart.total_price     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Cents are held in an `i128`, so every `Decimal` converts without loss of
/// range. Sums are checked: an overflowing total is `None`, never clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i128);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i128) -> Self {
        Money(cents)
    }

    /// Rounds a decimal amount to two places (half away from zero) and
    /// converts it to Money.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Decimal::new(370_500, 4); // 37.0500
    /// assert_eq!(Money::from_decimal(amount), Money::from_cents(3705));
    ///
    /// let half = Decimal::new(1_005, 3); // 1.005
    /// assert_eq!(Money::from_decimal(half), Money::from_cents(101));
    /// ```
    pub fn from_decimal(amount: Decimal) -> Self {
        let rounded =
            amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        // scale is at most MONEY_SCALE after rounding; a 96-bit mantissa
        // times 100 always fits in i128
        let shift = 10i128.pow(MONEY_SCALE - rounded.scale().min(MONEY_SCALE));
        Money(rounded.mantissa() * shift)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i128 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the amount as a float, for JSON rendering only.
    ///
    /// Dividing the exact cent count by 100 yields the float closest to the
    /// two-decimal value, so `3705` renders as `37.05`.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Sums amounts exactly.
    ///
    /// Each addend is already whole cents, so the sum needs no rounding.
    /// Returns `None` if the sum does not fit.
    pub fn checked_total<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), Money::checked_add)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as a plain two-decimal amount (`37.05`, `-5.50`).
///
/// There is no currency symbol: the service does not handle currencies.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
