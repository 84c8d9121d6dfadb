//! # State Module
//!
//! Application state for the console front end.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────────────┬──────────────────────┐            │
//! │          ▼                          ▼                      │            │
//! │  ┌──────────────────────┐  ┌──────────────────┐            │            │
//! │  │    SessionState      │  │   ConfigState    │            │            │
//! │  │                      │  │                  │            │            │
//! │  │  Arc<Mutex<Session>> │  │  shop_name       │            │            │
//! │  │  timer driver task   │  │  currency format │            │            │
//! │  │                      │  │  tick interval   │            │            │
//! │  └──────────────────────┘  └──────────────────┘            │            │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SessionState: one lock, held for one operation at a time            │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the state they need.

mod config;
mod session;

pub use config::ConfigState;
pub use session::SessionState;
