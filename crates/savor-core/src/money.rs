//! # Money Module
//!
//! Provides the `Money` type for menu prices, add-on surcharges and discounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Burger $12.00 + Extra Cheese $1.50 + Bacon $0.10 + Sauce $0.20        │
//! │    as f64: 13.799999999999999  ❌                                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    1200 + 150 + 10 + 20 = 1380 cents, exactly                          │
//! │                                                                         │
//! │  Percentages are computed in basis points and rounded ONCE,            │
//! │  half-up, to the nearest cent.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use savor_core::money::{DiscountRate, Money};
//!
//! let base = Money::from_cents(1200);         // $12.00
//! let cheese = Money::from_major_minor(1, 50); // $1.50
//! let subtotal = base + cheese;
//! assert_eq!(subtotal.cents(), 1350);
//!
//! let off = subtotal.percentage_of(DiscountRate::from_percent(10));
//! assert_eq!(off.cents(), 135);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

/// Basis points in 100%.
pub const FULL_RATE_BPS: u32 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// The engine works in a single implicit currency; conversion is never done
/// here.
///
/// ## Where Money Flows
/// ```text
/// MenuItem.base_price ──┐
///                       ├──► subtotal ──► best discount ──► total (>= 0)
/// OptionValue.additional_price ──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use savor_core::money::Money;
    ///
    /// let price = Money::from_cents(1350); // $13.50
    /// assert_eq!(price.cents(), 1350);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
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

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Computes `rate` of this amount, rounded half-up to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math only: `(cents * bps + 5000) / 10000`. The +5000 is the
    /// half-up bias (5000/10000 = 0.5 cent).
    ///
    /// ## Example
    /// ```rust
    /// use savor_core::money::{DiscountRate, Money};
    ///
    /// // 15% of $10.10 = $1.515 → $1.52
    /// let cut = Money::from_cents(1010).percentage_of(DiscountRate::from_percent(15));
    /// assert_eq!(cut.cents(), 152);
    /// ```
    pub fn percentage_of(&self, rate: DiscountRate) -> Money {
        // i128 so huge menus * 10000 cannot overflow
        let bps = rate.bps() as i128;
        let cents = (self.0 as i128 * bps + (FULL_RATE_BPS as i128 / 2)) / FULL_RATE_BPS as i128;
        let cents = i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(cents)
    }

    /// Adds `other`, pinning the result at the `i64` bounds instead of
    /// overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use savor_core::money::Money;
    ///
    /// let max = Money::from_cents(i64::MAX);
    /// assert_eq!(max.saturating_add(Money::from_cents(1)), max);
    /// ```
    #[inline]
    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Subtracts `reduction`, never going below zero.
    ///
    /// ## Example
    /// ```rust
    /// use savor_core::money::Money;
    ///
    /// let total = Money::from_cents(300).minus_floor_zero(Money::from_cents(500));
    /// assert!(total.is_zero());
    /// ```
    #[inline]
    pub fn minus_floor_zero(self, reduction: Money) -> Money {
        Money(self.0.saturating_sub(reduction.0).max(0))
    }
}

/// Debug-style rendering for logs. Apps format for display themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// A percentage expressed in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%, so 1000 bps = 10% and 1250 bps = 12.5%.
/// Whole-percent promotions stay exact and fractional ones need no floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage (10 → 10%).
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        DiscountRate(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Rates above 100% are not meaningful for a discount.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.0 <= FULL_RATE_BPS
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
