//! # Commands Module
//!
//! Every operation the front end can ask of the counter.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, CommandResponse)
//! ├── catalog.rs  ◄─── Price list, category tabs, search
//! ├── cart.rs     ◄─── Cart and discount
//! ├── sale.rs     ◄─── Sale completion, history
//! ├── timer.rs    ◄─── Work timer, session summary, reset
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Terminal: "add kit"                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(                                           │
//! │      session: &SessionState,   ◄── Only the state it needs             │
//! │      item_id: &str,            ◄── From the parsed intent              │
//! │  ) -> Result<CommandResponse, ApiError>                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  { applied: true, session: SessionSnapshot }  (serde, camelCase)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An intent the current view doesn't allow comes back with
//! `applied: false` and an unchanged snapshot rather than an error.

use oficina_core::{Session, SessionSnapshot};
use serde::{Deserialize, Serialize};

pub mod cart;
pub mod catalog;
pub mod config;
pub mod sale;
pub mod timer;

/// Result of a state-changing command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    /// Whether the intent changed anything.
    pub applied: bool,

    /// Session as it is after the command.
    pub session: SessionSnapshot,
}

impl CommandResponse {
    pub(crate) fn new(applied: bool, session: &Session) -> Self {
        CommandResponse {
            applied,
            session: session.snapshot(),
        }
    }
}
