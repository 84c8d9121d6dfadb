//! # Oficina Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Oficina Console                                  │
//! │                                                                         │
//! │  stdin ──► console.rs ──► commands/ ──► SessionState ──► oficina-core  │
//! │                 │                            ▲                          │
//! │                 ▼                            │ tick (1/s)               │
//! │              stdout                    timer driver task                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs.

#[tokio::main]
async fn main() {
    if let Err(err) = oficina_console_lib::run().await {
        tracing::error!(%err, "Console exited with an error");
        std::process::exit(1);
    }
}
