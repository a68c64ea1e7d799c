//! Timer engine implementation.
//!
//! A single countdown counter measured in whole seconds. The engine does not
//! use internal threads - the caller is responsible for calling `tick()` once
//! per second while it runs (see [`super::Ticker`]).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> Completed
//!   ^________________________________________|  (reset)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(25 * 60);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::TimerCompleted) on the zero crossing
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;

/// Default focus duration: one pomodoro.
pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not running, full duration remaining.
    Idle,
    Running,
    /// Not running, part of the duration consumed.
    Paused,
    /// Not running, nothing remaining.
    Completed,
}

/// Core countdown engine.
///
/// Invariant: `0 <= current_session <= focus_time` and `focus_time > 0`.
/// Stored values that break it fail to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimerEngine")]
pub struct TimerEngine {
    /// Target duration in seconds.
    focus_time: u32,
    /// Remaining seconds in the current run.
    current_session: u32,
    is_running: bool,
}

/// Unchecked wire shape of [`TimerEngine`].
#[derive(Deserialize)]
struct RawTimerEngine {
    focus_time: u32,
    current_session: u32,
    is_running: bool,
}

impl TryFrom<RawTimerEngine> for TimerEngine {
    type Error = String;

    fn try_from(raw: RawTimerEngine) -> Result<Self, Self::Error> {
        if raw.focus_time == 0 {
            return Err("focus_time must be positive".into());
        }
        if raw.current_session > raw.focus_time {
            return Err(format!(
                "current_session {} exceeds focus_time {}",
                raw.current_session, raw.focus_time
            ));
        }
        Ok(Self {
            focus_time: raw.focus_time,
            current_session: raw.current_session,
            is_running: raw.is_running,
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS)
    }
}

impl TimerEngine {
    /// Create an idle engine. A zero duration is clamped to one second.
    pub fn new(focus_secs: u32) -> Self {
        let focus_time = focus_secs.max(1);
        Self {
            focus_time,
            current_session: focus_time,
            is_running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn focus_time(&self) -> u32 {
        self.focus_time
    }

    pub fn current_session(&self) -> u32 {
        self.current_session
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn state(&self) -> TimerState {
        if self.is_running {
            TimerState::Running
        } else if self.current_session == 0 {
            TimerState::Completed
        } else if self.current_session == self.focus_time {
            TimerState::Idle
        } else {
            TimerState::Paused
        }
    }

    /// 0.0 .. 100.0 share of the focus time already consumed.
    pub fn progress_pct(&self) -> f64 {
        if self.focus_time == 0 {
            return 0.0;
        }
        let elapsed = self.focus_time.saturating_sub(self.current_session);
        elapsed as f64 / self.focus_time as f64 * 100.0
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            focus_secs: self.focus_time,
            remaining_secs: self.current_session,
            display: format_time(self.current_session),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume counting down. No effect once nothing remains.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running || self.current_session == 0 {
            return None;
        }
        self.is_running = true;
        tracing::debug!(remaining = self.current_session, "timer started");
        Some(Event::TimerStarted {
            remaining_secs: self.current_session,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        tracing::debug!(remaining = self.current_session, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.current_session,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        self.is_running = false;
        self.current_session = self.focus_time;
        Event::TimerReset {
            focus_secs: self.focus_time,
            at: Utc::now(),
        }
    }

    /// Retarget the duration. The remaining time jumps to the new duration;
    /// the running flag is left as it was.
    pub fn set_focus_time(&mut self, secs: u32) -> Result<Event, ValidationError> {
        if secs == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        self.focus_time = secs;
        self.current_session = secs;
        Ok(Event::FocusTimeChanged {
            focus_secs: secs,
            at: Utc::now(),
        })
    }

    /// Call once per second. Returns `Some(Event::TimerCompleted)` on the tick
    /// that reaches zero; the engine stops there, so later ticks are inert.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running || self.current_session == 0 {
            return None;
        }
        self.current_session -= 1;
        if self.current_session > 0 {
            return None;
        }
        self.is_running = false;
        tracing::debug!(focus = self.focus_time, "timer completed");
        Some(Event::TimerCompleted {
            focus_secs: self.focus_time,
            at: Utc::now(),
        })
    }

    /// Apply up to `elapsed_secs` ticks at once, e.g. wall-clock time that
    /// passed between two CLI invocations.
    pub fn catch_up(&mut self, elapsed_secs: u64) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        let step = elapsed_secs.min(self.current_session as u64) as u32;
        if step == 0 {
            return None;
        }
        // Land one second short and let tick() report the crossing.
        self.current_session -= step - 1;
        self.tick()
    }
}

/// Render seconds as `MM:SS`, zero-padded.
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_pause_resume() {
        let mut engine = TimerEngine::default();
        assert_eq!(engine.state(), TimerState::Idle);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
        assert!(engine.start().is_none());

        engine.tick();
        assert!(engine.pause().is_some());
        assert_eq!(engine.state(), TimerState::Paused);

        assert!(engine.start().is_some());
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn toggle_flips_running() {
        let mut engine = TimerEngine::new(60);
        engine.toggle();
        assert!(engine.is_running());
        engine.toggle();
        assert!(!engine.is_running());
    }

    #[test]
    fn reset_restores_full_duration() {
        let mut engine = TimerEngine::new(10);
        engine.start();
        for _ in 0..4 {
            engine.tick();
        }
        engine.reset();
        assert_eq!(engine.current_session(), 10);
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn completes_exactly_once() {
        let mut engine = TimerEngine::new(1500);
        engine.start();
        let completions = (0..1500).filter_map(|_| engine.tick()).count();
        assert_eq!(completions, 1);
        assert_eq!(engine.current_session(), 0);
        assert_eq!(engine.state(), TimerState::Completed);

        for _ in 0..10 {
            assert!(engine.tick().is_none());
        }
        assert_eq!(engine.current_session(), 0);
    }

    #[test]
    fn start_at_zero_is_noop() {
        let mut engine = TimerEngine::new(1);
        engine.start();
        engine.tick();
        assert!(engine.start().is_none());
        assert!(engine.toggle().is_none());
        assert!(!engine.is_running());
    }

    #[test]
    fn set_focus_time_resets_remaining() {
        let mut engine = TimerEngine::new(600);
        engine.start();
        for _ in 0..300 {
            engine.tick();
        }
        assert_eq!(engine.current_session(), 300);
        engine.set_focus_time(900).unwrap();
        assert_eq!(engine.current_session(), 900);
        assert_eq!(engine.focus_time(), 900);
        assert!(engine.is_running());
    }

    #[test]
    fn set_focus_time_rejects_zero() {
        let mut engine = TimerEngine::default();
        assert_eq!(
            engine.set_focus_time(0),
            Err(ValidationError::NonPositiveDuration)
        );
        assert_eq!(engine.focus_time(), DEFAULT_FOCUS_SECS);
    }

    #[test]
    fn catch_up_reports_completion() {
        let mut engine = TimerEngine::new(30);
        engine.start();
        assert!(engine.catch_up(10).is_none());
        assert_eq!(engine.current_session(), 20);
        assert!(matches!(engine.catch_up(500), Some(Event::TimerCompleted { .. })));
        assert_eq!(engine.current_session(), 0);
        assert!(engine.catch_up(5).is_none());
    }

    #[test]
    fn catch_up_ignored_while_paused() {
        let mut engine = TimerEngine::new(30);
        assert!(engine.catch_up(10).is_none());
        assert_eq!(engine.current_session(), 30);
    }

    #[test]
    fn deserialize_rejects_broken_invariant() {
        let over = r#"{"focus_time":10,"current_session":20,"is_running":false}"#;
        assert!(serde_json::from_str::<TimerEngine>(over).is_err());
        let zero = r#"{"focus_time":0,"current_session":0,"is_running":false}"#;
        assert!(serde_json::from_str::<TimerEngine>(zero).is_err());

        let ok = r#"{"focus_time":10,"current_session":4,"is_running":true}"#;
        let engine: TimerEngine = serde_json::from_str(ok).unwrap();
        assert_eq!(engine.state(), TimerState::Running);
        assert!((engine.progress_pct() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn format_time_pads() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(7200), "120:00");
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let engine = TimerEngine::default();
        match engine.snapshot() {
            Event::StateSnapshot {
                state,
                remaining_secs,
                display,
                ..
            } => {
                assert_eq!(state, TimerState::Idle);
                assert_eq!(remaining_secs, 1500);
                assert_eq!(display, "25:00");
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
