mod engine;
mod session;
mod ticker;

pub use engine::{format_time, TimerEngine, TimerState, DEFAULT_FOCUS_SECS};
pub use session::{
    preset_label, AmbientSound, FocusSession, SessionLog, DURATION_PRESETS_MIN, SESSION_LOG_LIMIT,
};
pub use ticker::{Ticker, TICK_PERIOD};
