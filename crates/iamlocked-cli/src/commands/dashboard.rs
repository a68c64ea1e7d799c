use chrono::Local;
use clap::Subcommand;
use iamlocked_core::dashboard::{self, DashboardInputs};
use iamlocked_core::planner::DailyPlanner;
use iamlocked_core::timer::{format_time, Ticker};
use iamlocked_core::{AuthProvider, Config, Dashboard, Database, LocalAuthProvider};

use super::timer::TimerStore;
use super::{load_syllabus, open_store, print_json, today, CmdResult};

#[derive(Subcommand)]
pub enum DashboardAction {
    /// Greeting, today's progress, timer, syllabus and a quote
    Show {
        /// Name used in the greeting (defaults to config, then the signed-in user)
        #[arg(long)]
        name: Option<String>,
    },
    /// Set today's focus text
    Focus { text: String },
    /// Print the clock and the countdown once per second
    Watch {
        /// Stop after this many ticks
        #[arg(long)]
        ticks: Option<u32>,
    },
}

/// Greeting name: explicit flag, then config, then the signed-in user.
fn greeting_name(flag: Option<String>, db: &Database) -> Option<String> {
    let non_empty = |s: String| {
        let s = s.trim().to_string();
        (!s.is_empty()).then_some(s)
    };
    flag.and_then(non_empty)
        .or_else(|| non_empty(Config::load_or_default().dashboard.display_name))
        .or_else(|| {
            LocalAuthProvider::new(db)
                .current_user()
                .and_then(|u| u.display_name)
                .and_then(non_empty)
        })
}

pub fn run(action: DashboardAction) -> CmdResult {
    let db = open_store()?;

    match action {
        DashboardAction::Show { name } => {
            let name = greeting_name(name, &db);
            let planner = DailyPlanner::load(&db, today());
            let syllabus = load_syllabus(&db);
            let mut timer = TimerStore::load(&db);
            let focus_text = dashboard::load_focus_text(&db);

            let view = Dashboard::build(DashboardInputs {
                now: Local::now().naive_local(),
                name: name.as_deref(),
                focus_text: &focus_text,
                planner: &planner,
                syllabus: &syllabus,
                engine: timer.session.engine(),
                quote: dashboard::random_quote(),
            });
            print_json(&view)?;

            // Keep rollover and catch-up results.
            planner.save(&db)?;
            timer.save()
        }
        DashboardAction::Focus { text } => {
            dashboard::save_focus_text(&db, text.trim())?;
            println!("ok");
            Ok(())
        }
        DashboardAction::Watch { ticks } => watch(&db, ticks),
    }
}

/// One line per tick. The timer is read, never written, so a foreground
/// `timer run` keeps ownership of it.
fn watch(db: &Database, ticks: Option<u32>) -> CmdResult {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    rt.block_on(async {
        let mut ticker = Ticker::start();
        let mut seen = 0u32;
        while ticks.map_or(true, |n| seen < n) {
            if ticker.next().await.is_none() {
                break;
            }
            seen += 1;

            let timer = TimerStore::load(db);
            let engine = timer.session.engine();
            println!(
                "{}  {} {}",
                dashboard::clock(Local::now().naive_local()),
                format_time(engine.current_session()),
                format!("{:?}", engine.state()).to_lowercase(),
            );
        }
        ticker.cancel();
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
