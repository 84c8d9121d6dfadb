//! # Oficina Console Library
//!
//! The workshop counter as a terminal application: configuration,
//! logging, the shared session with its timer driver, the command layer
//! and the front end that reads intents from stdin.
//!
//! ## Module Organization
//! ```text
//! oficina_console_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── session.rs  ◄─── Shared session + timer driver
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports, CommandResponse
//! │   ├── catalog.rs  ◄─── Price list and search
//! │   ├── cart.rs     ◄─── Cart and discount
//! │   ├── sale.rs     ◄─── Sale completion and history
//! │   ├── timer.rs    ◄─── Work timer and session summary
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── console.rs      ◄─── Intent parsing and text views
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use oficina_core::{Catalog, Session};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use state::{ConfigState, SessionState};

/// Runs the console until the operator quits or stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info (debug for oficina crates), RUST_LOG overrides      │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults, then OFICINA_* environment variables                    │
/// │                                                                         │
/// │  3. Initialize State ─────────────────────────────────────────────────► │
/// │     • SessionState: workshop catalog, empty cart, idle timer            │
/// │                                                                         │
/// │  4. Read Intents ─────────────────────────────────────────────────────► │
/// │     • stdin lines → commands → views on stdout                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), ApiError> {
    init_tracing();

    let config = ConfigState::from_env();
    info!(
        shop = %config.shop_name,
        tick_ms = config.tick_interval_ms,
        "Starting Oficina console"
    );

    let session = SessionState::new(Session::new(Catalog::workshop()?), config.tick_interval());
    info!("State initialized");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    console::run(&session, &config, stdin, &mut stdout).await?;

    info!("Console closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=oficina=trace` - Also show every timer tick
/// - Default: INFO, DEBUG for the oficina crates
///
/// Logs go to stderr so they never interleave with the views on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,oficina=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
