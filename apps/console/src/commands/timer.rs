//! # Timer Commands
//!
//! Work timer intents. The one-second driver follows the timer state on
//! its own (see [`SessionState`]); these only move the state machine.
//!
//! ```text
//!   Idle ──start──► Running ◄──start── Paused
//!                     │  └────pause────►  │
//!                     └──stop──► Stopped ◄┘  (summary up until acknowledged)
//! ```

use oficina_core::{SessionSnapshot, SessionSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::CommandResponse;
use crate::state::SessionState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Summary taken at stop, or `None` if stopping wasn't allowed.
    pub summary: Option<SessionSummary>,
    pub session: SessionSnapshot,
}

pub fn start_timer(session: &SessionState) -> CommandResponse {
    debug!("start_timer command");

    session.with_session_mut(|s| {
        let applied = s.start_timer();
        if applied {
            info!(elapsed = s.timer().elapsed_seconds(), "Timer started");
        }
        CommandResponse::new(applied, s)
    })
}

pub fn pause_timer(session: &SessionState) -> CommandResponse {
    debug!("pause_timer command");

    session.with_session_mut(|s| {
        let applied = s.pause_timer();
        if applied {
            info!(elapsed = s.timer().elapsed_seconds(), "Timer paused");
        }
        CommandResponse::new(applied, s)
    })
}

/// Stops the timer and opens the session summary.
pub fn stop_timer(session: &SessionState) -> SummaryResponse {
    debug!("stop_timer command");

    session.with_session_mut(|s| {
        let summary = s.stop();
        if let Some(summary) = &summary {
            info!(
                elapsed = summary.elapsed_seconds,
                sales = summary.sale_count,
                revenue = %summary.revenue,
                "Session stopped"
            );
        }
        SummaryResponse {
            summary,
            session: s.snapshot(),
        }
    })
}

/// Closes the summary. This wipes the session.
pub fn acknowledge_summary(session: &SessionState) -> CommandResponse {
    debug!("acknowledge_summary command");

    session.with_session_mut(|s| {
        let applied = s.acknowledge_summary();
        if applied {
            info!("Session reset");
        }
        CommandResponse::new(applied, s)
    })
}

/// Wipes the session from any state.
pub fn reset_session(session: &SessionState) -> CommandResponse {
    debug!("reset_session command");

    session.with_session_mut(|s| {
        s.reset();
        info!("Session reset");
        CommandResponse::new(true, s)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart;
    use oficina_core::{Catalog, Session, TimerState, View};
    use std::time::Duration;

    fn state() -> SessionState {
        SessionState::new(Session::new(Catalog::workshop().unwrap()), Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_three_ticks_pause() {
        let state = state();
        assert!(start_timer(&state).applied);
        tokio::time::sleep(Duration::from_millis(3_200)).await;

        let response = pause_timer(&state);
        assert_eq!(response.session.elapsed_seconds, 3);
        assert_eq!(response.session.timer_state, TimerState::Paused);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(cart::get_session(&state).elapsed_seconds, 3);
    }

    #[test]
    fn test_stop_from_idle_is_disabled() {
        let state = state();
        let response = stop_timer(&state);
        assert!(response.summary.is_none());
        assert_eq!(response.session.view, View::Browsing);
        assert!(!pause_timer(&state).applied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_summary_then_reset() {
        let state = state();
        start_timer(&state);
        tokio::time::sleep(Duration::from_millis(2_100)).await;

        let response = stop_timer(&state);
        let summary = response.summary.unwrap();
        assert_eq!(summary.elapsed_seconds, 2);
        assert_eq!(response.session.view, View::ShowingSummary { summary });

        // Summary is up: the timer can't be restarted
        assert!(!start_timer(&state).applied);

        let response = acknowledge_summary(&state);
        assert!(response.applied);
        assert_eq!(response.session.timer_state, TimerState::Idle);
        assert_eq!(response.session.elapsed_seconds, 0);
        assert_eq!(response.session.view, View::Browsing);
    }

    #[test]
    fn test_reset_session_from_browsing() {
        let state = state();
        cart::add_to_cart(&state, "guincho").unwrap();
        let response = reset_session(&state);
        assert!(response.applied);
        assert!(response.session.cart.is_empty());
    }
}
