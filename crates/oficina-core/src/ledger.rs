//! # Sale Ledger
//!
//! Completed sales of the current work session.
//!
//! Entries are snapshots: the cart lines (with the prices they were charged
//! at) and every figure of the pricing breakdown are frozen when the sale
//! completes. The ledger hands out shared references only, so an entry
//! can't change after it is appended. It grows until the session is reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::money::Money;
use crate::pricing::PricingBreakdown;
use crate::types::DiscountRate;

// =============================================================================
// Completed Sale
// =============================================================================

/// A sale as it was when the operator completed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CompletedSale {
    /// UUID v4.
    pub id: String,

    /// 1-based position within the session ("Venda #3").
    pub number: u32,

    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,

    /// Cart lines at completion time (frozen).
    pub items: Vec<CartLine>,

    pub discount_rate: DiscountRate,
    pub subtotal: Money,
    pub discount_amount: Money,
    pub total: Money,
    pub total_cost: Money,
    pub profit: Money,
}

impl CompletedSale {
    /// Sum of quantities across the sale's lines.
    pub fn items_sold(&self) -> u64 {
        self.items.iter().map(|line| line.quantity as u64).sum()
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// Append-only list of completed sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleLedger {
    sales: Vec<CompletedSale>,
}

impl SaleLedger {
    pub fn new() -> Self {
        SaleLedger::default()
    }

    /// Freezes `cart` at `discount` into a new entry and appends it.
    pub(crate) fn record(
        &mut self,
        cart: &Cart,
        discount: DiscountRate,
        id: String,
        completed_at: DateTime<Utc>,
    ) -> &CompletedSale {
        let pricing = PricingBreakdown::compute(cart, discount);
        let sale = CompletedSale {
            id,
            number: self.sales.len() as u32 + 1,
            completed_at,
            items: cart.lines().to_vec(),
            discount_rate: pricing.discount_rate,
            subtotal: pricing.subtotal,
            discount_amount: pricing.discount_amount,
            total: pricing.total,
            total_cost: pricing.total_cost,
            profit: pricing.profit,
        };

        self.sales.push(sale);
        &self.sales[self.sales.len() - 1]
    }

    /// Drops every entry. Only a full session reset does this.
    pub(crate) fn clear(&mut self) {
        self.sales.clear();
    }

    /// All sales, oldest first.
    #[inline]
    pub fn sales(&self) -> &[CompletedSale] {
        &self.sales
    }

    pub fn get(&self, id: &str) -> Option<&CompletedSale> {
        self.sales.iter().find(|sale| sale.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sales.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn kit_cart(times: usize) -> Cart {
        let catalog = Catalog::workshop().unwrap();
        let mut cart = Cart::new();
        for _ in 0..times {
            cart.add_item(catalog.get("kit").unwrap());
        }
        cart
    }

    #[test]
    fn test_record_snapshots_cart_and_totals() {
        let mut ledger = SaleLedger::new();
        let cart = kit_cart(2);
        let now = Utc::now();

        let sale = ledger
            .record(&cart, DiscountRate::from_percentage(10.0), "sale-1".to_string(), now)
            .clone();

        assert_eq!(sale.number, 1);
        assert_eq!(sale.completed_at, now);
        assert_eq!(sale.items, cart.lines().to_vec());
        assert_eq!(sale.items_sold(), 2);
        assert_eq!(sale.subtotal, Money::from_reais(1100));
        assert_eq!(sale.discount_amount, Money::from_reais(110));
        assert_eq!(sale.total, Money::from_reais(990));
        assert_eq!(sale.total_cost, Money::from_reais(450));
        assert_eq!(sale.profit, Money::from_reais(540));
        assert_eq!(sale.discount_rate, DiscountRate::from_percentage(10.0));
    }

    #[test]
    fn test_entries_survive_cart_changes() {
        let mut ledger = SaleLedger::new();
        let mut cart = kit_cart(1);

        ledger.record(&cart, DiscountRate::zero(), "a".to_string(), Utc::now());
        cart.change_quantity("kit", 5);
        cart.clear();

        let sale = ledger.get("a").unwrap();
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.total, Money::from_reais(550));
    }

    #[test]
    fn test_numbers_follow_append_order() {
        let mut ledger = SaleLedger::new();
        let cart = kit_cart(1);

        for id in ["a", "b", "c"] {
            ledger.record(&cart, DiscountRate::zero(), id.to_string(), Utc::now());
        }

        let numbers: Vec<u32> = ledger.sales().iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(ledger.sales()[2].id, "c");
        assert!(ledger.get("z").is_none());

        ledger.clear();
        assert!(ledger.is_empty());
    }
}
