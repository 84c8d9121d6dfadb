//! # Cart Commands
//!
//! Cart and discount intents.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐     ┌──────────┐   │
//! │  │  Empty   │────►│ In Cart  │────►│ Confirmation │────►│  Empty   │   │
//! │  │  Cart    │     │          │     │   (sale.rs)  │     │  Cart    │   │
//! │  └──────────┘     └──────────┘     └──────────────┘     └──────────┘   │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   change_quantity                                       │
//! │                   remove_from_cart                                      │
//! │                   set_discount                                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────► (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use oficina_core::SessionSnapshot;
use tracing::debug;

use super::CommandResponse;
use crate::error::ApiError;
use crate::state::SessionState;

/// Gets the current session: cart, totals, timer, view.
pub fn get_session(session: &SessionState) -> SessionSnapshot {
    debug!("get_session command");
    session.with_session(|s| s.snapshot())
}

/// Adds one unit of a catalog item.
///
/// ## Behavior
/// - Already in cart: quantity goes up by one
/// - Not in cart: appended as a new line with quantity 1
///
/// ## Errors
/// `NOT_FOUND` if the id isn't on the price list.
pub fn add_to_cart(session: &SessionState, item_id: &str) -> Result<CommandResponse, ApiError> {
    debug!(item_id = %item_id, "add_to_cart command");

    session.with_session_mut(|s| -> Result<CommandResponse, ApiError> {
        let applied = s.add_item(item_id)?;
        Ok(CommandResponse::new(applied, s))
    })
}

/// Moves a line's quantity by `delta`.
///
/// The quantity never drops below 1; use [`remove_from_cart`] to drop a
/// line.
pub fn change_quantity(session: &SessionState, item_id: &str, delta: i32) -> CommandResponse {
    debug!(item_id = %item_id, delta, "change_quantity command");

    session.with_session_mut(|s| {
        let applied = s.change_quantity(item_id, delta).is_some();
        CommandResponse::new(applied, s)
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(session: &SessionState, item_id: &str) -> CommandResponse {
    debug!(item_id = %item_id, "remove_from_cart command");

    session.with_session_mut(|s| {
        let applied = s.remove_item(item_id);
        CommandResponse::new(applied, s)
    })
}

/// Empties the cart and drops the discount.
pub fn clear_cart(session: &SessionState) -> CommandResponse {
    debug!("clear_cart command");

    session.with_session_mut(|s| {
        let applied = s.clear_cart();
        CommandResponse::new(applied, s)
    })
}

/// Sets the discount from the operator's text (`"10"`, `"12,5%"`).
///
/// Out-of-range numbers are clamped to `[0, 100]`.
///
/// ## Errors
/// `VALIDATION_ERROR` if the input isn't a number.
pub fn set_discount(session: &SessionState, input: &str) -> Result<CommandResponse, ApiError> {
    debug!(input = %input, "set_discount command");

    session.with_session_mut(|s| -> Result<CommandResponse, ApiError> {
        let applied = !s.view().is_modal();
        s.set_discount_input(input)?;
        Ok(CommandResponse::new(applied, s))
    })
}
