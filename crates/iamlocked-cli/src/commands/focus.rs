//! Focus session settings: labels, duration presets, sounds and the log.

use clap::Subcommand;
use iamlocked_core::timer::{preset_label, AmbientSound, DURATION_PRESETS_MIN};
use serde_json::json;

use super::timer::TimerStore;
use super::{open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum FocusAction {
    /// Show labels, sound settings and the timer
    Show,
    /// Set the subject being studied
    Subject { name: String },
    /// Set the topic being studied
    Topic { name: String },
    /// Pick a new duration in minutes (pauses the timer)
    Duration { minutes: u32 },
    /// List the duration presets
    Presets,
    /// Turn the completion sound on or off
    Sound {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Pick an ambient sound: none, rain, forest, cafe, library, ocean
    Ambient { sound: AmbientSound },
    /// Recent completed sessions, newest first
    Log,
}

pub fn run(action: FocusAction) -> CmdResult {
    let db = open_store()?;
    let mut store = TimerStore::load(&db);
    for event in &store.events {
        print_json(event)?;
    }

    match action {
        FocusAction::Show => {
            let s = &store.session;
            print_json(&json!({
                "subject": s.subject,
                "topic": s.topic,
                "sound_enabled": s.sound_enabled,
                "ambient": s.ambient,
                "ambient_label": s.ambient.label(),
                "awaiting_ack": s.is_awaiting_ack(),
                "timer": s.engine().snapshot(),
            }))?;
        }
        FocusAction::Subject { name } => {
            store.session.subject = name;
            println!("ok");
        }
        FocusAction::Topic { name } => {
            store.session.topic = name;
            println!("ok");
        }
        FocusAction::Duration { minutes } => {
            let event = store.session.change_duration(minutes.saturating_mul(60))?;
            print_json(&event)?;
        }
        FocusAction::Presets => {
            let presets: Vec<_> = DURATION_PRESETS_MIN
                .iter()
                .map(|&m| json!({ "minutes": m, "label": preset_label(m) }))
                .collect();
            print_json(&presets)?;
        }
        FocusAction::Sound { enabled } => {
            store.session.sound_enabled = enabled;
            println!("ok");
        }
        FocusAction::Ambient { sound } => {
            store.session.ambient = sound;
            println!("{}", sound.label());
        }
        FocusAction::Log => {
            print_json(store.session.sessions())?;
        }
    }

    store.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        action: FocusAction,
    }

    #[test]
    fn parses_ambient_names() {
        let h = Harness::try_parse_from(["x", "ambient", "Rain"]).unwrap();
        assert!(matches!(h.action, FocusAction::Ambient { sound: AmbientSound::Rain }));
        assert!(Harness::try_parse_from(["x", "ambient", "thunder"]).is_err());
    }

    #[test]
    fn parses_sound_flag() {
        let h = Harness::try_parse_from(["x", "sound", "false"]).unwrap();
        assert!(matches!(h.action, FocusAction::Sound { enabled: false }));
    }
}
