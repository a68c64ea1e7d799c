//! Dashboard view: a read-only snapshot assembled from the other modules.

use chrono::{NaiveDateTime, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::error::Result;
use crate::planner::{DailyPlanner, TodayProgress};
use crate::storage::{self, keys, KvStore};
use crate::syllabus::Syllabus;
use crate::timer::{format_time, TimerEngine, TimerState};

pub const DEFAULT_FOCUS_TEXT: &str = "The core principles of Indian foreign policy.";

pub const MOTIVATIONAL_QUOTES: [&str; 5] = [
    "Success is not final, failure is not fatal: it is the courage to continue that counts.",
    "The civil service is about serving the people and making a positive impact.",
    "Every small step you take today brings you closer to your IAS dream.",
    "Consistency beats intensity. Keep moving forward.",
    "Your future self will thank you for the effort you put in today.",
];

pub const CURRENT_AFFAIRS: [&str; 5] = [
    "India's G20 Presidency: Key Outcomes and Initiatives",
    "New Education Policy Implementation Progress",
    "Digital India Mission: Latest Developments",
    "Climate Change Action Plan Updates",
    "Economic Survey Highlights 2024",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
}

impl DayPart {
    pub fn of_hour(hour: u32) -> Self {
        match hour {
            h if h < 12 => DayPart::Morning,
            h if h < 17 => DayPart::Afternoon,
            _ => DayPart::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPart::Morning => "Morning",
            DayPart::Afternoon => "Afternoon",
            DayPart::Evening => "Evening",
        }
    }
}

/// "Good Morning, Asha!" or "Good Morning!" without a name.
pub fn greeting(hour: u32, name: Option<&str>) -> String {
    let part = DayPart::of_hour(hour).as_str();
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Good {part}, {name}!"),
        None => format!("Good {part}!"),
    }
}

pub fn pick_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    MOTIVATIONAL_QUOTES
        .choose(rng)
        .copied()
        .unwrap_or(MOTIVATIONAL_QUOTES[0])
}

/// Wall-clock display, `HH:MM:SS`.
pub fn clock(now: NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// One quote per page load.
pub fn random_quote() -> &'static str {
    pick_quote(&mut rand::thread_rng())
}

pub fn load_focus_text<S: KvStore + ?Sized>(store: &S) -> String {
    storage::load(store, keys::FOCUS_TASK, DEFAULT_FOCUS_TEXT.to_string())
}

pub fn save_focus_text<S: KvStore + ?Sized>(store: &S, text: &str) -> Result<()> {
    storage::save(store, keys::FOCUS_TASK, text)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSummary {
    pub state: TimerState,
    pub display: String,
    pub progress_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperPercent {
    pub id: String,
    pub name: String,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub greeting: String,
    pub clock: String,
    pub focus_text: String,
    pub today: TodayProgress,
    pub timer: TimerSummary,
    pub papers: Vec<PaperPercent>,
    pub overall_percent: u8,
    pub quote: &'static str,
    pub current_affairs: &'static [&'static str],
}

/// Inputs the dashboard reads.
pub struct DashboardInputs<'a> {
    pub now: NaiveDateTime,
    pub name: Option<&'a str>,
    pub focus_text: &'a str,
    pub planner: &'a DailyPlanner,
    pub syllabus: &'a Syllabus,
    pub engine: &'a TimerEngine,
    pub quote: &'static str,
}

impl Dashboard {
    pub fn build(inputs: DashboardInputs<'_>) -> Self {
        let DashboardInputs {
            now,
            name,
            focus_text,
            planner,
            syllabus,
            engine,
            quote,
        } = inputs;

        Self {
            greeting: greeting(now.hour(), name),
            clock: clock(now),
            focus_text: focus_text.to_string(),
            today: planner.today_progress(),
            timer: TimerSummary {
                state: engine.state(),
                display: format_time(engine.current_session()),
                progress_pct: engine.progress_pct(),
            },
            papers: syllabus
                .papers()
                .iter()
                .map(|p| PaperPercent {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    percent: syllabus.paper_progress(&p.id).map_or(0, |pr| pr.percent),
                })
                .collect(),
            overall_percent: syllabus.overall_progress().percent,
            quote,
            current_affairs: &CURRENT_AFFAIRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::catalog::TemplateCatalog;
    use crate::storage::MemoryStore;

    #[test]
    fn greeting_boundaries() {
        assert_eq!(greeting(0, None), "Good Morning!");
        assert_eq!(greeting(11, Some("Asha")), "Good Morning, Asha!");
        assert_eq!(greeting(12, None), "Good Afternoon!");
        assert_eq!(greeting(16, Some("  ")), "Good Afternoon!");
        assert_eq!(greeting(17, None), "Good Evening!");
        assert_eq!(greeting(23, None), "Good Evening!");
    }

    #[test]
    fn quotes_come_from_the_list() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(MOTIVATIONAL_QUOTES.contains(&pick_quote(&mut rng)));
        }
    }

    #[test]
    fn focus_text_defaults_and_persists() {
        let store = MemoryStore::new();
        assert_eq!(load_focus_text(&store), DEFAULT_FOCUS_TEXT);
        save_focus_text(&store, "Monetary policy tools").unwrap();
        assert_eq!(load_focus_text(&store), "Monetary policy tools");
    }

    #[test]
    fn build_rolls_up_every_source() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut planner = DailyPlanner::new();
        let id = planner.add_task(today);
        planner.add_task(today);
        planner.toggle_completion(today, id);

        let mut syllabus = Syllabus::from_papers(TemplateCatalog.select("python").unwrap());
        syllabus.toggle_topic("python-basics", "fundamentals", "syntax");

        let engine = TimerEngine::default();
        let dash = Dashboard::build(DashboardInputs {
            now: today.and_hms_opt(18, 5, 0).unwrap(),
            name: Some("Asha"),
            focus_text: DEFAULT_FOCUS_TEXT,
            planner: &planner,
            syllabus: &syllabus,
            engine: &engine,
            quote: MOTIVATIONAL_QUOTES[3],
        });

        assert_eq!(dash.greeting, "Good Evening, Asha!");
        assert_eq!(dash.clock, "18:05:00");
        assert_eq!((dash.today.completed, dash.today.total), (1, 2));
        assert_eq!(dash.timer.display, "25:00");
        assert_eq!(dash.papers[0].percent, 33);
        assert_eq!(dash.overall_percent, 33);
    }
}
