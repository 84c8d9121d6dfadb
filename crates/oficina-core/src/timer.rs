//! # Work Timer
//!
//! Counts the seconds worked in a session.
//!
//! ## State Machine
//! ```text
//!                 start                 pause
//!   ┌──────┐ ──────────────► ┌─────────┐ ─────────► ┌────────┐
//!   │ Idle │                 │ Running │            │ Paused │
//!   │ (0)  │                 │  (e+1/s)│ ◄───────── │  (e)   │
//!   └──────┘                 └─────────┘    start   └────────┘
//!      ▲                          │                      │
//!      │                     stop │                 stop │
//!      │                          ▼                      │
//!      │        reset        ┌─────────┐                 │
//!      └──────────────────── │ Stopped │ ◄───────────────┘
//!       (from any state)     │  (e)    │
//!                            └─────────┘
//! ```
//!
//! The timer does not know about wall-clock time. Someone else calls
//! [`WorkTimer::tick`] once per second; ticks outside `Running` are
//! ignored.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Where the work timer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Never started since the last reset.
    #[default]
    Idle,
    Running,
    Paused,
    /// Stopped; the session summary is up and waiting to be acknowledged.
    Stopped,
}

/// Elapsed-seconds counter with start/pause/stop/reset transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WorkTimer {
    state: TimerState,
    elapsed_seconds: u64,
}

impl WorkTimer {
    /// Idle timer at zero.
    pub fn new() -> Self {
        WorkTimer::default()
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[inline]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Idle/Paused → Running.
    ///
    /// ## Returns
    /// Whether the state changed. Already running, or stopped and waiting
    /// for the summary to be acknowledged, is a no-op.
    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                true
            }
            TimerState::Running | TimerState::Stopped => false,
        }
    }

    /// Running → Paused. No-op otherwise.
    pub fn pause(&mut self) -> bool {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
            true
        } else {
            false
        }
    }

    /// Running/Paused → Stopped, keeping the elapsed time for the summary.
    pub fn stop(&mut self) -> bool {
        match self.state {
            TimerState::Running | TimerState::Paused => {
                self.state = TimerState::Stopped;
                true
            }
            TimerState::Idle | TimerState::Stopped => false,
        }
    }

    /// Any state → Idle at zero.
    pub fn reset(&mut self) {
        *self = WorkTimer::default();
    }

    /// Advances one second if running.
    pub fn tick(&mut self) -> bool {
        if self.is_running() {
            self.elapsed_seconds += 1;
            true
        } else {
            false
        }
    }

    /// Elapsed time as `HH:MM:SS`.
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

/// Formats a number of seconds as `HH:MM:SS`.
///
/// Hours keep growing past 99 rather than wrapping.
///
/// ## Example
/// ```rust
/// use oficina_core::timer::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "00:00:00");
/// assert_eq!(format_elapsed(3725), "01:02:05");
/// ```
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_idle() {
        let timer = WorkTimer::new();
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn test_ticks_only_count_while_running() {
        let mut timer = WorkTimer::new();
        assert!(!timer.tick());

        timer.start();
        timer.tick();
        timer.tick();
        timer.tick();
        timer.pause();

        for _ in 0..100 {
            assert!(!timer.tick());
        }
        assert_eq!(timer.elapsed_seconds(), 3);

        timer.start();
        timer.tick();
        assert_eq!(timer.elapsed_seconds(), 4);
    }

    #[test]
    fn test_start_is_noop_when_running() {
        let mut timer = WorkTimer::new();
        assert!(timer.start());
        assert!(!timer.start());
        assert!(timer.is_running());
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut timer = WorkTimer::new();
        assert!(!timer.pause());
        timer.start();
        assert!(timer.pause());
        assert!(!timer.pause());
        assert_eq!(timer.state(), TimerState::Paused);
    }

    #[test]
    fn test_stop_keeps_elapsed_and_freezes() {
        let mut timer = WorkTimer::new();
        assert!(!timer.stop());

        timer.start();
        timer.tick();
        timer.tick();
        assert!(timer.stop());
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.elapsed_seconds(), 2);

        assert!(!timer.tick());
        assert!(!timer.start());
        assert!(!timer.stop());
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn test_stop_from_paused() {
        let mut timer = WorkTimer::new();
        timer.start();
        timer.tick();
        timer.pause();
        assert!(timer.stop());
        assert_eq!(timer.elapsed_seconds(), 1);
    }

    #[test]
    fn test_reset_from_any_state() {
        let setups: [fn(&mut WorkTimer); 4] = [
            |_: &mut WorkTimer| {},
            |t: &mut WorkTimer| {
                t.start();
            },
            |t: &mut WorkTimer| {
                t.start();
                t.pause();
            },
            |t: &mut WorkTimer| {
                t.start();
                t.stop();
            },
        ];

        for setup in setups {
            let mut timer = WorkTimer::new();
            setup(&mut timer);
            timer.tick();
            timer.reset();
            assert_eq!(timer, WorkTimer::new());
        }
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(59), "00:00:59");
        assert_eq!(format_elapsed(60), "00:01:00");
        assert_eq!(format_elapsed(360_000), "100:00:00");

        let mut timer = WorkTimer::new();
        timer.start();
        timer.tick();
        assert_eq!(timer.display(), "00:00:01");
    }
}
