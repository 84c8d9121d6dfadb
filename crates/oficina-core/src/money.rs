//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer centavos                                         │
//! │    R$ 550,00 = 55000 centavos                                           │
//! │    R$ 550,00 × 2 = 110000 centavos, exactly                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use oficina_core::money::Money;
//!
//! let price = Money::from_reais(550);
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 110_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;
use crate::MAX_DISCOUNT_UNITS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (1/100 of a real).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit can go negative under a heavy discount
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// CatalogItem.price ──► CartLine.line_total ──► Cart.subtotal
///                                                   │
///                            DiscountRate ──────────┤
///                                                   ▼
///                 PricingBreakdown { discount_amount, total, profit }
///                                                   │
///                                                   ▼
///                         CompletedSale ──► SessionSummary
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use oficina_core::money::Money;
    ///
    /// let price = Money::from_cents(27_550);
    /// assert_eq!(price.cents(), 27_550);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole reais.
    ///
    /// The price list is quoted in whole reais, so this is how the catalog
    /// table is written.
    #[inline]
    pub const fn from_reais(reais: i64) -> Self {
        Money(reais * 100)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-reais portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use oficina_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).reais(), 10);
    /// assert_eq!(Money::from_cents(-550).reais(), -5);
    /// ```
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
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

    /// Multiplies money by a cart quantity.
    ///
    /// ## Example
    /// ```rust
    /// use oficina_core::money::Money;
    ///
    /// let unit = Money::from_reais(975);
    /// assert_eq!(unit.multiply_quantity(3), Money::from_reais(2925));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Returns the amount taken off by a percentage discount.
    ///
    /// ## Implementation
    /// `amount × units / MAX_DISCOUNT_UNITS` in i128, with the rate at its
    /// full stored precision. This is the only rounding step: the result
    /// rounds half away from zero to the centavo.
    ///
    /// ## Example
    /// ```rust
    /// use oficina_core::money::Money;
    /// use oficina_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_reais(1100);
    /// let discount = subtotal.discount_amount(DiscountRate::from_percentage(10.0));
    /// assert_eq!(discount, Money::from_reais(110));
    /// ```
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        let whole = MAX_DISCOUNT_UNITS as i128;
        let scaled = self.0 as i128 * rate.units() as i128;
        let half = if scaled < 0 { -whole / 2 } else { whole / 2 };
        Money::from_cents(((scaled + half) / whole) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `1234.56` rendering. Localised output (`R$ 1.234,56`) belongs to
/// the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.reais().abs(), self.cents_part())
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
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.reais(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_reais() {
        assert_eq!(Money::from_reais(18_000).cents(), 1_800_000);
        assert_eq!(Money::from_reais(0), Money::zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_reais(990)), "990.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::zero()), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
        assert!((b - a).is_negative());

        let mut c = a;
        c += b;
        c -= Money::from_cents(100);
        assert_eq!(c.cents(), 1400);
    }

    #[test]
    fn test_sum() {
        let values = [Money::from_reais(550), Money::from_reais(275), Money::from_reais(150)];
        let by_ref: Money = values.iter().sum();
        let by_value: Money = values.into_iter().sum();
        assert_eq!(by_ref, Money::from_reais(975));
        assert_eq!(by_value, by_ref);
    }

    #[test]
    fn test_discount_amount_exact_for_whole_percent() {
        let subtotal = Money::from_reais(1100);
        assert_eq!(
            subtotal.discount_amount(DiscountRate::from_percentage(10.0)),
            Money::from_reais(110)
        );
        assert_eq!(subtotal.discount_amount(DiscountRate::zero()), Money::zero());
        assert_eq!(subtotal.discount_amount(DiscountRate::full()), subtotal);
    }

    #[test]
    fn test_discount_amount_rounds_fractional_centavos() {
        // 0.33% of R$ 1,50 = 0.495 centavos -> 0
        let small = Money::from_cents(150);
        assert_eq!(small.discount_amount(DiscountRate::from_percentage(0.33)).cents(), 0);

        // 12.5% of R$ 0,05 = 0.625 centavos -> 1
        let tiny = Money::from_cents(5);
        assert_eq!(tiny.discount_amount(DiscountRate::from_percentage(12.5)).cents(), 1);
    }

    #[test]
    fn test_discount_amount_uses_every_decimal_of_the_rate() {
        // 33.333% of R$ 1.100,00 = 36666.3 centavos
        let subtotal = Money::from_reais(1100);
        let rate = DiscountRate::from_percentage(33.333);
        assert_eq!(subtotal.discount_amount(rate).cents(), 36_666);
        assert_eq!((subtotal - subtotal.discount_amount(rate)).cents(), 73_334);
    }
}
