//! Focus session: the owner of the timer engine.
//!
//! The session turns the engine's zero crossing into exactly one
//! `SessionCompleted` event and keeps a short log of finished sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine::TimerEngine;
use crate::error::ValidationError;
use crate::events::Event;

/// Number of finished sessions kept in the log.
pub const SESSION_LOG_LIMIT: usize = 10;

/// Selectable session lengths in minutes.
pub const DURATION_PRESETS_MIN: [u32; 7] = [15, 25, 30, 45, 60, 90, 120];

/// Label shown for a preset duration.
pub fn preset_label(minutes: u32) -> String {
    match minutes {
        25 => "25 minutes (Pomodoro)".to_string(),
        60 => "1 hour".to_string(),
        90 => "1.5 hours".to_string(),
        m if m % 60 == 0 => format!("{} hours", m / 60),
        m => format!("{m} minutes"),
    }
}

/// Background sound picked for a session. Only the choice is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbientSound {
    #[default]
    None,
    Rain,
    Forest,
    Cafe,
    Library,
    Ocean,
}

impl AmbientSound {
    pub const ALL: [AmbientSound; 6] = [
        AmbientSound::None,
        AmbientSound::Rain,
        AmbientSound::Forest,
        AmbientSound::Cafe,
        AmbientSound::Library,
        AmbientSound::Ocean,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AmbientSound::None => "No Sound",
            AmbientSound::Rain => "Rain Sounds",
            AmbientSound::Forest => "Forest Ambience",
            AmbientSound::Cafe => "Coffee Shop",
            AmbientSound::Library => "Library Whispers",
            AmbientSound::Ocean => "Ocean Waves",
        }
    }
}

impl std::str::FromStr for AmbientSound {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(AmbientSound::None),
            "rain" => Ok(AmbientSound::Rain),
            "forest" => Ok(AmbientSound::Forest),
            "cafe" => Ok(AmbientSound::Cafe),
            "library" => Ok(AmbientSound::Library),
            "ocean" => Ok(AmbientSound::Ocean),
            other => Err(ValidationError::InvalidValue {
                field: "ambient".into(),
                message: format!("unknown sound '{other}'"),
            }),
        }
    }
}

/// One finished focus session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLog {
    pub id: String,
    pub duration_secs: u32,
    pub subject: String,
    pub topic: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    engine: TimerEngine,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default)]
    pub ambient: AmbientSound,
    /// Newest first.
    #[serde(default)]
    sessions: Vec<SessionLog>,
    /// Set between the completion and the user's acknowledgement.
    #[serde(default)]
    awaiting_ack: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FocusSession {
    fn default() -> Self {
        Self::new(TimerEngine::default())
    }
}

impl FocusSession {
    pub fn new(engine: TimerEngine) -> Self {
        Self {
            engine,
            subject: String::new(),
            topic: String::new(),
            sound_enabled: true,
            ambient: AmbientSound::None,
            sessions: Vec::new(),
            awaiting_ack: false,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TimerEngine {
        &mut self.engine
    }

    pub fn sessions(&self) -> &[SessionLog] {
        &self.sessions
    }

    /// True after a completion until [`FocusSession::acknowledge`].
    pub fn is_awaiting_ack(&self) -> bool {
        self.awaiting_ack
    }

    /// Pick a new length. Changing duration while configuring always pauses.
    pub fn change_duration(&mut self, secs: u32) -> Result<Event, ValidationError> {
        let event = self.engine.set_focus_time(secs)?;
        self.engine.pause();
        self.awaiting_ack = false;
        Ok(event)
    }

    /// Stop and restore the full duration, clearing any completion notice.
    pub fn reset(&mut self) -> Event {
        self.awaiting_ack = false;
        self.engine.reset()
    }

    /// Retarget the duration and keep the running flag, clearing any
    /// completion notice.
    pub fn set_focus_time(&mut self, secs: u32) -> Result<Event, ValidationError> {
        let event = self.engine.set_focus_time(secs)?;
        self.awaiting_ack = false;
        Ok(event)
    }

    /// Forward one second to the engine. Returns the engine's completion
    /// event followed by the session log event, once per zero crossing.
    pub fn tick(&mut self) -> Vec<Event> {
        match self.engine.tick() {
            Some(done) => self.complete(done),
            None => Vec::new(),
        }
    }

    /// Apply wall-clock seconds that passed while nobody was ticking.
    pub fn catch_up(&mut self, elapsed_secs: u64) -> Vec<Event> {
        match self.engine.catch_up(elapsed_secs) {
            Some(done) => self.complete(done),
            None => Vec::new(),
        }
    }

    /// Dismiss the completion notice and ready the timer for another run.
    pub fn acknowledge(&mut self) -> Event {
        self.reset()
    }

    fn complete(&mut self, done: Event) -> Vec<Event> {
        let at = Utc::now();
        let entry = SessionLog {
            id: Uuid::new_v4().to_string(),
            duration_secs: self.engine.focus_time(),
            subject: self.subject.clone(),
            topic: self.topic.clone(),
            completed_at: at,
        };
        tracing::info!(
            duration = entry.duration_secs,
            subject = %entry.subject,
            "focus session completed"
        );
        self.sessions.insert(0, entry.clone());
        self.sessions.truncate(SESSION_LOG_LIMIT);
        self.awaiting_ack = true;

        vec![
            done,
            Event::SessionCompleted {
                session_id: entry.id,
                duration_secs: entry.duration_secs,
                subject: entry.subject,
                topic: entry.topic,
                at,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(session: &mut FocusSession) -> Vec<Event> {
        session.engine_mut().start();
        let secs = session.engine().focus_time();
        (0..secs).flat_map(|_| session.tick()).collect()
    }

    #[test]
    fn completion_logs_one_session() {
        let mut session = FocusSession::new(TimerEngine::new(5));
        session.subject = "Polity".into();
        let events = run_to_end(&mut session);

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::TimerCompleted { .. }));
        assert!(matches!(events[1], Event::SessionCompleted { duration_secs: 5, .. }));
        assert_eq!(session.sessions().len(), 1);
        assert_eq!(session.sessions()[0].subject, "Polity");
        assert!(session.is_awaiting_ack());

        assert!(session.tick().is_empty());
        assert_eq!(session.sessions().len(), 1);
    }

    #[test]
    fn acknowledge_resets_timer() {
        let mut session = FocusSession::new(TimerEngine::new(3));
        run_to_end(&mut session);
        session.acknowledge();
        assert_eq!(session.engine().current_session(), 3);
        assert!(!session.is_awaiting_ack());
    }

    #[test]
    fn change_duration_pauses() {
        let mut session = FocusSession::default();
        session.engine_mut().start();
        session.change_duration(45 * 60).unwrap();
        assert!(!session.engine().is_running());
        assert_eq!(session.engine().current_session(), 45 * 60);
    }

    #[test]
    fn log_is_capped() {
        let mut session = FocusSession::new(TimerEngine::new(1));
        for _ in 0..(SESSION_LOG_LIMIT + 3) {
            run_to_end(&mut session);
            session.acknowledge();
        }
        assert_eq!(session.sessions().len(), SESSION_LOG_LIMIT);
    }

    #[test]
    fn reset_and_retarget_clear_completion_notice() {
        let mut session = FocusSession::new(TimerEngine::new(2));
        run_to_end(&mut session);
        assert!(session.is_awaiting_ack());
        session.reset();
        assert!(!session.is_awaiting_ack());

        run_to_end(&mut session);
        session.engine_mut().start();
        session.set_focus_time(120).unwrap();
        assert!(!session.is_awaiting_ack());
        assert_eq!(session.engine().current_session(), 120);
        assert!(session.set_focus_time(0).is_err());
    }

    #[test]
    fn stored_session_with_broken_engine_loads_default() {
        use crate::storage::{self, keys, KvStore, MemoryStore};

        let store = MemoryStore::new();
        for engine in [
            r#"{"focus_time":10,"current_session":20,"is_running":false}"#,
            r#"{"focus_time":0,"current_session":0,"is_running":false}"#,
        ] {
            let raw = format!(r#"{{"engine":{engine},"subject":"Polity"}}"#);
            store.set_raw(keys::FOCUS_SESSION, &raw).unwrap();

            let session = storage::load(&store, keys::FOCUS_SESSION, FocusSession::default());
            assert_eq!(session, FocusSession::default());
            let pct = session.engine().progress_pct();
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn preset_labels() {
        assert_eq!(preset_label(15), "15 minutes");
        assert_eq!(preset_label(25), "25 minutes (Pomodoro)");
        assert_eq!(preset_label(90), "1.5 hours");
        assert_eq!(preset_label(120), "2 hours");
    }

    #[test]
    fn ambient_parses_case_insensitively() {
        assert_eq!("Rain".parse::<AmbientSound>().unwrap(), AmbientSound::Rain);
        assert!("thunder".parse::<AmbientSound>().is_err());
    }
}
