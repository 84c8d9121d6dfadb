//! # Session Controller
//!
//! The one owner of every piece of mutable counter state. The presentation
//! layer reads snapshots and forwards intents; it never touches the cart,
//! timer or ledger directly.
//!
//! ## View Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────┐  complete_sale   ┌────────────────┐                     │
//! │   │          │ ───────────────► │ ConfirmingSale │                     │
//! │   │          │                  └───────┬────────┘                     │
//! │   │          │  acknowledge_sale        │  (cart + discount cleared,   │
//! │   │ Browsing │ ◄────────────────────────┘   timer + ledger untouched)  │
//! │   │          │                                                          │
//! │   │          │  stop            ┌────────────────┐                     │
//! │   │          │ ───────────────► │ ShowingSummary │                     │
//! │   │          │                  └───────┬────────┘                     │
//! │   │          │  acknowledge_summary     │  (full reset: timer, cart,   │
//! │   │          │ ◄────────────────────────┘   discount, ledger)          │
//! │   └──────────┘                                                          │
//! │                                                                         │
//! │   While ConfirmingSale / ShowingSummary is up, only its acknowledgement │
//! │   and reset do anything. Timer ticks keep counting.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sale Gate
//! A sale can only be completed while the work timer is running and the
//! cart has something in it. The timer condition is shop policy (sales are
//! booked against worked time), kept as the counter has always behaved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::ledger::{CompletedSale, SaleLedger};
use crate::pricing::PricingBreakdown;
use crate::stats::SessionSummary;
use crate::timer::{TimerState, WorkTimer};
use crate::types::DiscountRate;
use crate::validation::parse_discount_input;

// =============================================================================
// View
// =============================================================================

/// What the operator is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum View {
    /// Catalog + cart, every intent available.
    #[default]
    Browsing,
    /// The confirmation for a just-completed sale.
    ConfirmingSale { sale_id: String },
    /// The end-of-session summary, taken when the timer was stopped.
    ShowingSummary { summary: SessionSummary },
}

impl View {
    /// Whether a dialog is covering the catalog and cart.
    #[inline]
    pub fn is_modal(&self) -> bool {
        !matches!(self, View::Browsing)
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    pub cart: Vec<CartLine>,
    pub pricing: PricingBreakdown,
    pub timer_state: TimerState,
    pub elapsed_seconds: u64,
    pub view: View,
    pub sale_count: usize,
    pub can_complete_sale: bool,
    pub can_stop: bool,
}

// =============================================================================
// Session
// =============================================================================

/// Cart, discount, work timer and sale ledger for one work session.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    discount: DiscountRate,
    timer: WorkTimer,
    ledger: SaleLedger,
    view: View,
}

impl Session {
    /// Fresh session: empty cart, no discount, idle timer, empty ledger.
    pub fn new(catalog: Catalog) -> Self {
        Session {
            catalog,
            cart: Cart::new(),
            discount: DiscountRate::zero(),
            timer: WorkTimer::new(),
            ledger: SaleLedger::new(),
            view: View::Browsing,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    pub fn timer(&self) -> &WorkTimer {
        &self.timer
    }

    pub fn ledger(&self) -> &SaleLedger {
        &self.ledger
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Totals for the current cart and discount, computed now.
    pub fn pricing(&self) -> PricingBreakdown {
        PricingBreakdown::compute(&self.cart, self.discount)
    }

    /// Aggregates over the ledger so far, at the current elapsed time.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_ledger(&self.ledger, self.timer.elapsed_seconds())
    }

    /// Running timer, non-empty cart, no dialog up.
    pub fn can_complete_sale(&self) -> bool {
        !self.view.is_modal() && self.timer.is_running() && !self.cart.is_empty()
    }

    /// Timer running or paused, no dialog up.
    pub fn can_stop(&self) -> bool {
        !self.view.is_modal()
            && matches!(self.timer.state(), TimerState::Running | TimerState::Paused)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cart: self.cart.lines().to_vec(),
            pricing: self.pricing(),
            timer_state: self.timer.state(),
            elapsed_seconds: self.timer.elapsed_seconds(),
            view: self.view.clone(),
            sale_count: self.ledger.len(),
            can_complete_sale: self.can_complete_sale(),
            can_stop: self.can_stop(),
        }
    }

    // -------------------------------------------------------------------------
    // Cart intents
    // -------------------------------------------------------------------------

    /// Adds one unit of catalog item `id`.
    ///
    /// ## Returns
    /// - `Ok(true)` when the cart changed
    /// - `Ok(false)` while a dialog is up
    /// - `Err(ItemNotFound)` for an id that isn't on the price list
    pub fn add_item(&mut self, id: &str) -> CoreResult<bool> {
        let item = self.catalog.require(id)?;
        if self.view.is_modal() {
            return Ok(false);
        }
        self.cart.add_item(item);
        Ok(true)
    }

    /// Removes the line for `id`. No-op if absent or while a dialog is up.
    pub fn remove_item(&mut self, id: &str) -> bool {
        if self.view.is_modal() {
            return false;
        }
        self.cart.remove_item(id)
    }

    /// Adjusts a line by `delta`, flooring at 1. Returns the new quantity.
    pub fn change_quantity(&mut self, id: &str, delta: i32) -> Option<u32> {
        if self.view.is_modal() {
            return None;
        }
        self.cart.change_quantity(id, delta)
    }

    /// Empties the cart and drops the discount.
    pub fn clear_cart(&mut self) -> bool {
        if self.view.is_modal() {
            return false;
        }
        self.cart.clear();
        self.discount = DiscountRate::zero();
        true
    }

    // -------------------------------------------------------------------------
    // Discount intents
    // -------------------------------------------------------------------------

    /// Sets the discount. The rate is already clamped by construction.
    pub fn set_discount(&mut self, rate: DiscountRate) -> bool {
        if self.view.is_modal() {
            return false;
        }
        self.discount = rate;
        true
    }

    /// Sets the discount from a percentage, clamped to `[0, 100]`.
    pub fn set_discount_percentage(&mut self, pct: f64) -> bool {
        self.set_discount(DiscountRate::from_percentage(pct))
    }

    /// Sets the discount from the operator's text input.
    ///
    /// ## Returns
    /// The rate now in effect (unchanged while a dialog is up).
    pub fn set_discount_input(&mut self, input: &str) -> CoreResult<DiscountRate> {
        let rate = parse_discount_input(input)?;
        self.set_discount(rate);
        Ok(self.discount)
    }

    // -------------------------------------------------------------------------
    // Timer intents
    // -------------------------------------------------------------------------

    pub fn start_timer(&mut self) -> bool {
        if self.view.is_modal() {
            return false;
        }
        self.timer.start()
    }

    pub fn pause_timer(&mut self) -> bool {
        if self.view.is_modal() {
            return false;
        }
        self.timer.pause()
    }

    /// One second of wall-clock time passed.
    pub fn tick(&mut self) -> bool {
        self.timer.tick()
    }

    /// Stops the timer and opens the session summary.
    ///
    /// The session is wiped once the summary is acknowledged.
    pub fn stop(&mut self) -> Option<SessionSummary> {
        if !self.can_stop() {
            return None;
        }
        self.timer.stop();
        let summary = self.summary();
        self.view = View::ShowingSummary { summary };
        Some(summary)
    }

    /// Closes the summary and resets the session.
    pub fn acknowledge_summary(&mut self) -> bool {
        if !matches!(self.view, View::ShowingSummary { .. }) {
            return false;
        }
        self.reset();
        true
    }

    /// Full wipe from any state: timer, cart, discount and ledger.
    pub fn reset(&mut self) {
        self.timer.reset();
        self.cart.clear();
        self.discount = DiscountRate::zero();
        self.ledger.clear();
        self.view = View::Browsing;
    }

    // -------------------------------------------------------------------------
    // Sale intents
    // -------------------------------------------------------------------------

    /// Books the cart as a sale, timestamped now.
    pub fn complete_sale(&mut self) -> Option<&CompletedSale> {
        self.complete_sale_at(Utc::now())
    }

    /// Books the cart as a sale at `completed_at`.
    ///
    /// ## Returns
    /// The new ledger entry, or `None` when [`Session::can_complete_sale`]
    /// is false (nothing changes in that case).
    pub fn complete_sale_at(&mut self, completed_at: DateTime<Utc>) -> Option<&CompletedSale> {
        if !self.can_complete_sale() {
            return None;
        }

        let id = Uuid::new_v4().to_string();
        self.view = View::ConfirmingSale { sale_id: id.clone() };
        Some(self.ledger.record(&self.cart, self.discount, id, completed_at))
    }

    /// Closes the sale confirmation, clearing cart and discount for the
    /// next customer.
    pub fn acknowledge_sale(&mut self) -> bool {
        if !matches!(self.view, View::ConfirmingSale { .. }) {
            return false;
        }
        self.cart.clear();
        self.discount = DiscountRate::zero();
        self.view = View::Browsing;
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
