//! Daily plan and streak commands for CLI.

use clap::Subcommand;
use iamlocked_core::planner::DailyPlanner;
use iamlocked_core::TaskPatch;

use super::{open_store, print_json, today, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Append a one-hour slot after the last one
    Add {
        /// Task text (default "New Task")
        #[arg(long)]
        task: Option<String>,
        /// Subject (default "Subject")
        #[arg(long)]
        subject: Option<String>,
    },
    /// List today's slots
    List,
    /// Update a slot
    Update {
        /// Slot ID
        id: i64,
        /// Start time (HH:mm)
        #[arg(long)]
        start: Option<String>,
        /// End time (HH:mm)
        #[arg(long)]
        end: Option<String>,
        /// Task text
        #[arg(long)]
        task: Option<String>,
        /// Subject
        #[arg(long)]
        subject: Option<String>,
        /// Set completed status
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Delete a slot
    Delete {
        /// Slot ID
        id: i64,
    },
    /// Flip a slot between done and not done
    Toggle {
        /// Slot ID
        id: i64,
    },
    /// Completed/total for today
    Progress,
}

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show the streak count and last credited day
    Show,
    /// Zero the streak
    Reset,
}

fn finish(db: &iamlocked_core::Database, planner: &mut DailyPlanner) -> CmdResult {
    for event in planner.take_events() {
        tracing::debug!(?event, "planner event");
        if matches!(event, iamlocked_core::Event::StreakIncremented { .. }) {
            print_json(&event)?;
        }
    }
    planner.save(db)?;
    Ok(())
}

pub fn run(action: TaskAction) -> CmdResult {
    let db = open_store()?;
    let today = today();
    let mut planner = DailyPlanner::load(&db, today);

    match action {
        TaskAction::Add { task, subject } => {
            let id = planner.add_task(today);
            if task.is_some() || subject.is_some() {
                let patch = TaskPatch {
                    task,
                    subject,
                    ..TaskPatch::default()
                };
                planner.update_task(today, id, patch)?;
            }
            if let Some(slot) = planner.task(id) {
                print_json(slot)?;
            }
        }
        TaskAction::List => {
            print_json(planner.tasks())?;
        }
        TaskAction::Update {
            id,
            start,
            end,
            task,
            subject,
            completed,
        } => {
            let patch = TaskPatch {
                start_time: start,
                end_time: end,
                task,
                subject,
                completed,
            };
            if patch.is_empty() {
                return Err("nothing to update: pass at least one field".into());
            }
            if !planner.update_task(today, id, patch)? {
                return Err(format!("no task with id {id}").into());
            }
            if let Some(slot) = planner.task(id) {
                print_json(slot)?;
            }
        }
        TaskAction::Delete { id } => {
            if !planner.delete_task(today, id) {
                return Err(format!("no task with id {id}").into());
            }
            println!("deleted {id}");
        }
        TaskAction::Toggle { id } => {
            if !planner.toggle_completion(today, id) {
                return Err(format!("no task with id {id}").into());
            }
            if let Some(slot) = planner.task(id) {
                print_json(slot)?;
            }
        }
        TaskAction::Progress => {
            print_json(&planner.today_progress())?;
        }
    }

    finish(&db, &mut planner)
}

pub fn run_streak(action: StreakAction) -> CmdResult {
    let db = open_store()?;
    let mut planner = DailyPlanner::load(&db, today());

    match action {
        StreakAction::Show => print_json(&planner.streak())?,
        StreakAction::Reset => {
            planner.reset_streak();
            println!("streak reset");
        }
    }

    finish(&db, &mut planner)
}
