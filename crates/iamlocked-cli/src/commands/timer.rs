use std::io::Write;

use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use iamlocked_core::storage::{self, keys};
use iamlocked_core::timer::{format_time, AmbientSound, FocusSession, Ticker, TimerEngine};
use iamlocked_core::{Config, Database, Event};

use super::{open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Start if paused, pause if running
    Toggle,
    /// Stop and restore the full duration
    Reset,
    /// Change the focus duration; the running state is kept
    Set {
        /// New duration (minutes unless --seconds)
        value: u32,
        /// Interpret VALUE as seconds
        #[arg(long)]
        seconds: bool,
    },
    /// Print current timer state as JSON
    Status,
    /// Dismiss a completed session and ready the next one
    Ack,
    /// Run the countdown in the foreground until it completes
    Run,
}

/// The focus session plus the wall-clock instant its countdown was last
/// brought up to date. Between invocations a running countdown is advanced
/// by the seconds that passed since then.
pub struct TimerStore<'a> {
    db: &'a Database,
    pub session: FocusSession,
    synced_at: Option<DateTime<Utc>>,
    /// Session JSON as last read from or written to the store.
    seen: Option<String>,
    /// Events produced by catching up on load.
    pub events: Vec<Event>,
}

fn default_session() -> FocusSession {
    let config = Config::load_or_default();
    let mut session = FocusSession::new(TimerEngine::new(config.focus_secs()));
    session.sound_enabled = config.timer.sound_enabled;
    session.ambient = config
        .timer
        .ambient_sound
        .parse::<AmbientSound>()
        .unwrap_or_default();
    session
}

impl<'a> TimerStore<'a> {
    pub fn load(db: &'a Database) -> Self {
        let seen = db.kv_get(keys::FOCUS_SESSION).ok().flatten();
        let mut session = match seen {
            Some(_) => storage::load(db, keys::FOCUS_SESSION, FocusSession::default()),
            None => default_session(),
        };
        let mut synced_at: Option<DateTime<Utc>> = storage::load(db, keys::TIMER, None);
        let mut events = Vec::new();

        if let (true, Some(at)) = (session.engine().is_running(), synced_at) {
            let elapsed = (Utc::now() - at).num_seconds().max(0);
            events = session.catch_up(elapsed as u64);
            synced_at = Some(at + Duration::seconds(elapsed));
            tracing::debug!(elapsed, "timer caught up");
        }

        Self {
            db,
            session,
            synced_at,
            seen,
            events,
        }
    }

    /// The countdown is accurate as of now.
    pub fn mark_synced(&mut self) {
        self.synced_at = Some(Utc::now());
    }

    pub fn save(&mut self) -> CmdResult {
        if !self.session.engine().is_running() {
            self.synced_at = None;
        } else if self.synced_at.is_none() {
            self.mark_synced();
        }
        let raw = serde_json::to_string(&self.session)?;
        self.db.kv_set(keys::FOCUS_SESSION, &raw)?;
        storage::save(self.db, keys::TIMER, &self.synced_at)?;
        self.seen = Some(raw);
        Ok(())
    }

    /// True when another invocation wrote the session after this one last
    /// read or wrote it.
    pub fn changed_elsewhere(&self) -> bool {
        match self.db.kv_get(keys::FOCUS_SESSION) {
            Ok(current) => current != self.seen,
            Err(e) => {
                tracing::warn!(error = %e, "could not re-read focus session");
                false
            }
        }
    }
}

fn print_events(events: &[Event]) -> CmdResult {
    for event in events {
        print_json(event)?;
    }
    Ok(())
}

pub fn run(action: TimerAction) -> CmdResult {
    let db = open_store()?;
    let mut store = TimerStore::load(&db);
    print_events(&store.events)?;

    match action {
        TimerAction::Start => {
            let event = store.session.engine_mut().start();
            store.mark_synced();
            print_json(&event.unwrap_or_else(|| store.session.engine().snapshot()))?;
        }
        TimerAction::Pause => {
            let event = store.session.engine_mut().pause();
            print_json(&event.unwrap_or_else(|| store.session.engine().snapshot()))?;
        }
        TimerAction::Toggle => {
            let event = store.session.engine_mut().toggle();
            store.mark_synced();
            print_json(&event.unwrap_or_else(|| store.session.engine().snapshot()))?;
        }
        TimerAction::Reset => {
            print_json(&store.session.reset())?;
        }
        TimerAction::Set { value, seconds } => {
            let secs = if seconds { value } else { value.saturating_mul(60) };
            let event = store.session.set_focus_time(secs)?;
            store.mark_synced();
            print_json(&event)?;
        }
        TimerAction::Status => {
            print_json(&store.session.engine().snapshot())?;
        }
        TimerAction::Ack => {
            print_json(&store.session.acknowledge())?;
        }
        TimerAction::Run => {
            return run_foreground(store);
        }
    }

    store.save()
}

fn run_foreground(mut store: TimerStore<'_>) -> CmdResult {
    if !store.session.engine().is_running() {
        if let Some(event) = store.session.engine_mut().start() {
            print_json(&event)?;
        }
    }
    store.mark_synced();
    store.save()?;
    if !store.session.engine().is_running() {
        // Nothing left to count down.
        return print_json(&store.session.engine().snapshot());
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    rt.block_on(async {
        let mut ticker = Ticker::start();
        while ticker.next().await.is_some() {
            // Another command (pause, reset, set) owns the timer now.
            if store.changed_elsewhere() {
                eprintln!();
                tracing::info!("timer changed by another command, leaving foreground run");
                let current = TimerStore::load(store.db);
                print_json(&current.session.engine().snapshot())?;
                break;
            }

            let events = store.session.tick();
            store.mark_synced();
            store.save()?;

            let engine = store.session.engine();
            eprint!("\r{} ", format_time(engine.current_session()));
            std::io::stderr().flush()?;

            if !events.is_empty() {
                eprintln!();
                print_events(&events)?;
                break;
            }
            if !engine.is_running() {
                break;
            }
        }
        ticker.cancel();
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
