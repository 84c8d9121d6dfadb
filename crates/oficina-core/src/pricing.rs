//! # Pricing Engine
//!
//! Pure derivation of the totals shown under the cart.
//!
//! ```text
//! subtotal        = Σ price × quantity
//! discount_amount = subtotal × discount%
//! total           = subtotal − discount_amount
//! total_cost      = Σ cost × quantity
//! profit          = total − total_cost
//! ```
//!
//! Nothing here is stored. The session recomputes a breakdown every time
//! one is asked for, so it can't drift from the cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::DiscountRate;

/// Every derived figure for one cart + discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingBreakdown {
    pub subtotal: Money,
    pub discount_rate: DiscountRate,
    pub discount_amount: Money,
    pub total: Money,
    pub total_cost: Money,
    pub profit: Money,
}

impl PricingBreakdown {
    /// Computes the breakdown for `cart` at `discount`.
    ///
    /// ## Example
    /// ```rust
    /// use oficina_core::{Cart, Catalog, DiscountRate, Money, PricingBreakdown};
    ///
    /// let catalog = Catalog::workshop().unwrap();
    /// let mut cart = Cart::new();
    /// cart.add_item(catalog.get("kit").unwrap());
    ///
    /// let pricing = PricingBreakdown::compute(&cart, DiscountRate::zero());
    /// assert_eq!(pricing.total, Money::from_reais(550));
    /// assert_eq!(pricing.profit, Money::from_reais(325));
    /// ```
    pub fn compute(cart: &Cart, discount: DiscountRate) -> Self {
        let subtotal = cart.subtotal();
        let discount_amount = subtotal.discount_amount(discount);
        let total = subtotal - discount_amount;
        let total_cost = cart.total_cost();

        PricingBreakdown {
            subtotal,
            discount_rate: discount,
            discount_amount,
            total,
            total_cost,
            profit: total - total_cost,
        }
    }
}
