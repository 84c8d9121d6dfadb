//! # Session State
//!
//! The shared, lockable home of the one [`Session`], plus the task that
//! ticks its work timer.
//!
//! ## Timer Driver
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  start_timer ──► sync_ticker() ──► timer running, no task?             │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                    Handle::spawn( interval(1s) ─► lock ─► tick() )      │
//! │                                                                         │
//! │  pause / stop / reset ──► sync_ticker() ──► timer not running?         │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │                                          abort the task                 │
//! │                                                                         │
//! │  No task ever runs while the timer isn't, so a paused timer can't be   │
//! │  advanced by a late tick.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The session sits in `Arc<Mutex<Session>>`: commands and the ticker each
//! hold the lock for one operation, so every mutation is atomic with
//! respect to the others. Cart math is quick; a plain std mutex is enough.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use oficina_core::Session;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, trace, warn};

/// Shared session plus its ticker.
#[derive(Debug)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
    ticker: Mutex<Option<JoinHandle<()>>>,
    tick_interval: Duration,
}

impl SessionState {
    /// Wraps `session`, ticking every `tick_interval` while its timer runs.
    pub fn new(session: Session, tick_interval: Duration) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
            ticker: Mutex::new(None),
            tick_interval,
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = session_state.with_session(|s| s.snapshot());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = lock(&self.session);
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// Timer transitions made inside `f` are picked up by
    /// [`SessionState::sync_ticker`] afterwards.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let result = {
            let mut session = lock(&self.session);
            f(&mut session)
        };
        self.sync_ticker();
        result
    }

    /// Whether a ticker task is alive.
    pub fn is_ticking(&self) -> bool {
        lock(&self.ticker)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Starts or stops the ticker to match the timer state.
    ///
    /// Outside a tokio runtime no ticker can start; the timer then runs
    /// without advancing until a call from inside one picks it up.
    fn sync_ticker(&self) {
        let running = lock(&self.session).timer().is_running();
        let mut ticker = lock(&self.ticker);

        if let Some(handle) = ticker.as_ref() {
            if handle.is_finished() {
                *ticker = None;
            }
        }

        match (running, ticker.is_some()) {
            (true, false) => match Handle::try_current() {
                Ok(handle) => {
                    debug!(interval = ?self.tick_interval, "Starting timer driver");
                    *ticker = Some(spawn_ticker(
                        &handle,
                        Arc::clone(&self.session),
                        self.tick_interval,
                    ));
                }
                Err(err) => warn!(%err, "No tokio runtime; timer driver not started"),
            },
            (false, true) => {
                debug!("Stopping timer driver");
                if let Some(handle) = ticker.take() {
                    handle.abort();
                }
            }
            _ => {}
        }
    }
}

impl Drop for SessionState {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.ticker).take() {
            handle.abort();
        }
    }
}

/// Ticks `session` once per `period` until its timer stops running.
///
/// The first tick lands one full period after the start, not immediately.
fn spawn_ticker(handle: &Handle, session: Arc<Mutex<Session>>, period: Duration) -> JoinHandle<()> {
    handle.spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            let mut session = lock(&session);
            if !session.tick() {
                break;
            }
            trace!(elapsed = session.timer().elapsed_seconds(), "Timer tick");
        }
    })
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
