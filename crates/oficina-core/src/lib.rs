//! # oficina-core: Pure Business Logic for the Workshop Counter
//!
//! Everything the Blackouts Mecânica counter knows how to do, as plain data
//! and deterministic operations. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Oficina Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (terminal front end)                  │   │
//! │  │    Catalog ──► Cart ──► Confirm Sale ──► Session Summary        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        SessionState (Arc<Mutex<Session>>) + timer driver        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ oficina-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌────────┐ ┌─────────┐ ┌────────┐ ┌──────────┐   │   │
//! │  │   │ catalog │ │  cart  │ │ pricing │ │ timer  │ │  ledger  │   │   │
//! │  │   └─────────┘ └────────┘ └─────────┘ └────────┘ └──────────┘   │   │
//! │  │                  ▲ all owned by ▲                               │   │
//! │  │              ┌───┴──────────────┴───┐                           │   │
//! │  │              │       session        │                           │   │
//! │  │              └──────────────────────┘                           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Category, DiscountRate, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The fixed price list and its queries
//! - [`cart`] - Cart lines and the cart manager operations
//! - [`pricing`] - Subtotal / discount / total / cost / profit derivation
//! - [`timer`] - Work timer state machine
//! - [`ledger`] - Completed sales of the current session
//! - [`stats`] - Aggregate statistics over the ledger
//! - [`session`] - The controller that owns all of the above
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use oficina_core::{Catalog, Session};
//!
//! let mut session = Session::new(Catalog::workshop().unwrap());
//! session.add_item("kit").unwrap();
//! session.add_item("kit").unwrap();
//! session.set_discount_percentage(10.0);
//!
//! let pricing = session.pricing();
//! assert_eq!(pricing.subtotal.reais(), 1100);
//! assert_eq!(pricing.total.reais(), 990);
//! assert_eq!(pricing.profit.reais(), 540);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod money;
pub mod pricing;
pub mod session;
pub mod stats;
pub mod timer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CategoryFilter};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{CompletedSale, SaleLedger};
pub use money::Money;
pub use pricing::PricingBreakdown;
pub use session::{Session, SessionSnapshot, View};
pub use stats::SessionSummary;
pub use timer::{TimerState, WorkTimer};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Shop name shown on every screen.
pub const SHOP_NAME: &str = "Blackouts Mecânica";

/// Fractional digits of a percent a discount keeps exactly.
pub const DISCOUNT_DECIMALS: u32 = 7;

/// Upper bound of a discount in stored units (100% at 10⁻⁷ % per unit).
pub const MAX_DISCOUNT_UNITS: u32 = 100 * 10_u32.pow(DISCOUNT_DECIMALS);
