use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        focus_secs: u32,
        at: DateTime<Utc>,
    },
    FocusTimeChanged {
        focus_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown crossed zero. Fires once per crossing.
    TimerCompleted {
        focus_secs: u32,
        at: DateTime<Utc>,
    },
    /// A focus session finished and was written to the session log.
    SessionCompleted {
        session_id: String,
        duration_secs: u32,
        subject: String,
        topic: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        focus_secs: u32,
        remaining_secs: u32,
        display: String,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
    StreakIncremented {
        streak_count: u32,
        date: NaiveDate,
    },
    StreakReset {
        previous: u32,
    },
    DayRolledOver {
        from: Option<NaiveDate>,
        to: NaiveDate,
        streak_count: u32,
    },
}
