//! # Cart
//!
//! The lines picked from the catalog for the sale in progress.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator Action          Operation                  Cart Change        │
//! │  ───────────────          ─────────                  ───────────        │
//! │                                                                         │
//! │  Click catalog item ────► add_item(item) ──────────► qty += 1 or push   │
//! │  Click [+] / [-] ───────► change_quantity(id, ±1) ─► max(1, qty + d)    │
//! │  Click trash ───────────► remove_item(id) ─────────► line removed       │
//! │  Click "Limpar" ────────► clear() ─────────────────► no lines           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by item id
//! - Every quantity is at least 1; the only way out is `remove_item`
//! - Totals are derived on every read, never cached

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::CatalogItem;

// =============================================================================
// Cart Line
// =============================================================================

/// One catalog item and how many of it.
///
/// The item is copied in, so a completed sale keeps the prices it was
/// charged at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub item: CatalogItem,
    pub quantity: u32,
}

impl CartLine {
    fn new(item: &CatalogItem) -> Self {
        CartLine {
            item: item.clone(),
            quantity: 1,
        }
    }

    /// price × quantity
    #[inline]
    pub fn line_total(&self) -> Money {
        self.item.price.multiply_quantity(self.quantity)
    }

    /// cost × quantity
    #[inline]
    pub fn line_cost(&self) -> Money {
        self.item.cost.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Ordered collection of cart lines, in the order items were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `item`.
    ///
    /// ## Behavior
    /// - Item already in cart: quantity + 1
    /// - Item not in cart: new line with quantity 1 at the end
    pub fn add_item(&mut self, item: &CatalogItem) {
        match self.line_mut(&item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(item)),
        }
    }

    /// Removes the line for `id`.
    ///
    /// ## Returns
    /// Whether a line was removed. Unknown ids are a no-op.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|line| line.item.id != id);
        self.lines.len() != initial_len
    }

    /// Adjusts a line's quantity by `delta`, never going below 1.
    ///
    /// ## Returns
    /// The new quantity, or `None` if `id` isn't in the cart.
    pub fn change_quantity(&mut self, id: &str, delta: i32) -> Option<u32> {
        let line = self.line_mut(id)?;
        let next = (line.quantity as i64 + delta as i64).clamp(1, u32::MAX as i64);
        line.quantity = next as u32;
        Some(line.quantity)
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart lines, in insertion order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct items.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| line.quantity as u64).sum()
    }

    /// Quantity of one item; 0 when it isn't in the cart.
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.line(id).map_or(0, |line| line.quantity)
    }

    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    /// Σ price × quantity
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ cost × quantity
    pub fn total_cost(&self) -> Money {
        self.lines.iter().map(CartLine::line_cost).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn item(catalog: &Catalog, id: &str) -> CatalogItem {
        catalog.get(id).unwrap().clone()
    }

    #[test]
    fn test_add_item() {
        let catalog = Catalog::workshop().unwrap();
        let mut cart = Cart::new();

        cart.add_item(&item(&catalog, "pneu"));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("pneu"), 1);
        assert_eq!(cart.subtotal(), Money::from_reais(275));
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let catalog = Catalog::workshop().unwrap();
        let mut cart = Cart::new();
        let kit = item(&catalog, "kit");

        cart.add_item(&kit);
        cart.add_item(&kit);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("kit"), 2);
        assert_eq!(cart.subtotal(), Money::from_reais(1100));
        assert_eq!(cart.total_cost(), Money::from_reais(450));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let catalog = Catalog::workshop().unwrap();
        let mut cart = Cart::new();

        cart.add_item(&item(&catalog, "guincho"));
        cart.add_item(&item(&catalog, "kit"));
        cart.add_item(&item(&catalog, "guincho"));

        let order: Vec<&str> = cart.lines().iter().map(|l| l.item.id.as_str()).collect();
        assert_eq!(order, vec!["guincho", "kit"]);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_change_quantity_floors_at_one() {
        let catalog = Catalog::workshop().unwrap();
        let mut cart = Cart::new();
        cart.add_item(&item(&catalog, "kit"));

        assert_eq!(cart.change_quantity("kit", 4), Some(5));
        assert_eq!(cart.change_quantity("kit", -1), Some(4));
        assert_eq!(cart.change_quantity("kit", -100), Some(1));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.change_quantity("bolsa", 1), None);
    }

    #[test]
    fn test_remove_item() {
        let catalog = Catalog::workshop().unwrap();
        let mut cart = Cart::new();
        cart.add_item(&item(&catalog, "kit"));
        cart.add_item(&item(&catalog, "pneu"));

        assert!(cart.remove_item("kit"));
        assert!(!cart.remove_item("kit"));
        assert_eq!(cart.quantity_of("kit"), 0);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_clear() {
        let catalog = Catalog::workshop().unwrap();
        let mut cart = Cart::new();
        cart.add_item(&item(&catalog, "kit"));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_line_totals() {
        let catalog = Catalog::workshop().unwrap();
        let mut cart = Cart::new();
        cart.add_item(&item(&catalog, "elevador"));
        cart.change_quantity("elevador", 2);

        let line = cart.line("elevador").unwrap();
        assert_eq!(line.line_total(), Money::from_reais(2925));
        assert_eq!(line.line_cost(), Money::from_reais(1200));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
        Change(usize, i32),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            2 => (0..10usize).prop_map(Op::Add),
            1 => (0..10usize).prop_map(Op::Remove),
            2 => (0..10usize, -5..5i32).prop_map(|(index, delta)| Op::Change(index, delta)),
        ]
    }

    proptest! {
        /// After any sequence of cart operations: no line below quantity 1,
        /// ids unique, subtotal and cost equal to the per-line sums.
        #[test]
        fn invariants_hold_for_any_operation_sequence(ops in prop::collection::vec(arb_op(), 0..200)) {
            let catalog = Catalog::workshop().unwrap();
            let mut cart = Cart::new();

            for op in ops {
                match op {
                    Op::Add(index) => cart.add_item(&catalog.items()[index]),
                    Op::Remove(index) => {
                        cart.remove_item(&catalog.items()[index].id);
                    }
                    Op::Change(index, delta) => {
                        cart.change_quantity(&catalog.items()[index].id, delta);
                    }
                }

                prop_assert!(cart.lines().iter().all(|line| line.quantity >= 1));
                let unique: HashSet<&str> = cart.lines().iter().map(|l| l.item.id.as_str()).collect();
                prop_assert_eq!(unique.len(), cart.line_count());

                let subtotal: i64 = cart
                    .lines()
                    .iter()
                    .map(|l| l.item.price.cents() * l.quantity as i64)
                    .sum();
                let cost: i64 = cart
                    .lines()
                    .iter()
                    .map(|l| l.item.cost.cents() * l.quantity as i64)
                    .sum();
                prop_assert_eq!(cart.subtotal().cents(), subtotal);
                prop_assert_eq!(cart.total_cost().cents(), cost);
            }
        }
    }
}
