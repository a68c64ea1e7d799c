//! Daily plan and completion streak.
//!
//! The completion flags on the task list belong to one calendar day, the
//! plan date. Before any read or change on a later day the plan rolls over:
//! the streak survives only if the last credited day was yesterday (or
//! today), and every task starts the new day incomplete.
//!
//! A day is credited at most once, when a non-empty list is fully complete.

mod slot;

pub use slot::{format_hhmm, parse_hhmm, TaskPatch, TimeSlot, FIRST_SLOT_START};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::storage::{self, keys, KvStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub count: u32,
    pub last_completed_date: Option<NaiveDate>,
}

/// Completed/total counts for today's plan plus the current streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayProgress {
    pub completed: usize,
    pub total: usize,
    pub streak_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailyPlanner {
    tasks: Vec<TimeSlot>,
    streak: Streak,
    plan_date: Option<NaiveDate>,
    events: Vec<Event>,
}

impl DailyPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble from stored parts. No rollover is applied here.
    pub fn from_parts(tasks: Vec<TimeSlot>, streak: Streak, plan_date: Option<NaiveDate>) -> Self {
        Self {
            tasks,
            streak,
            plan_date,
            events: Vec::new(),
        }
    }

    /// Load from the store and roll over to `today`.
    pub fn load<S: KvStore + ?Sized>(store: &S, today: NaiveDate) -> Self {
        let tasks = storage::load(store, keys::DAILY_TASKS, Vec::new());
        let count = storage::load(store, keys::STREAK_COUNT, 0u32);
        let last: Option<String> = storage::load(store, keys::LAST_COMPLETED_DATE, None);
        let plan: Option<String> = storage::load(store, keys::PLAN_DATE, None);

        let mut planner = Self::from_parts(
            tasks,
            Streak {
                count,
                last_completed_date: last.as_deref().and_then(parse_date),
            },
            plan.as_deref().and_then(parse_date),
        );
        planner.roll_over(today);
        planner
    }

    pub fn save<S: KvStore + ?Sized>(&self, store: &S) -> Result<()> {
        let iso = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        storage::save(store, keys::DAILY_TASKS, &self.tasks)?;
        storage::save(store, keys::STREAK_COUNT, &self.streak.count)?;
        storage::save(store, keys::LAST_COMPLETED_DATE, &iso(self.streak.last_completed_date))?;
        storage::save(store, keys::PLAN_DATE, &iso(self.plan_date))?;
        Ok(())
    }

    pub fn tasks(&self) -> &[TimeSlot] {
        &self.tasks
    }

    pub fn task(&self, id: i64) -> Option<&TimeSlot> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn streak(&self) -> Streak {
        self.streak
    }

    pub fn plan_date(&self) -> Option<NaiveDate> {
        self.plan_date
    }

    /// Events produced since the last call.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Non-empty and every task completed.
    pub fn is_day_complete(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.completed)
    }

    pub fn today_progress(&self) -> TodayProgress {
        TodayProgress {
            completed: self.tasks.iter().filter(|t| t.completed).count(),
            total: self.tasks.len(),
            streak_count: self.streak.count,
        }
    }

    /// Move the plan to `today` if it belongs to an earlier (or unknown) day.
    /// Returns true when a rollover happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.plan_date == Some(today) {
            return false;
        }

        let last = self.streak.last_completed_date.unwrap_or(today);
        let yesterday = today.pred_opt();
        if last != today && Some(last) != yesterday && self.streak.count > 0 {
            let previous = self.streak.count;
            self.streak.count = 0;
            tracing::debug!(previous, %today, "streak broken");
            self.events.push(Event::StreakReset { previous });
        }

        for task in &mut self.tasks {
            task.completed = false;
        }

        let from = self.plan_date.replace(today);
        self.events.push(Event::DayRolledOver {
            from,
            to: today,
            streak_count: self.streak.count,
        });
        tracing::debug!(?from, %today, "plan rolled over");
        true
    }

    /// Credit `today` if the list is complete and the day is not yet credited.
    fn on_tasks_changed(&mut self, today: NaiveDate) {
        if self.is_day_complete() && self.streak.last_completed_date != Some(today) {
            self.streak.count += 1;
            self.streak.last_completed_date = Some(today);
            tracing::info!(streak = self.streak.count, %today, "day completed");
            self.events.push(Event::StreakIncremented {
                streak_count: self.streak.count,
                date: today,
            });
        }
    }

    /// Append a new one-hour slot after the last one. Returns its id.
    pub fn add_task(&mut self, today: NaiveDate) -> i64 {
        self.roll_over(today);
        let mut id = Utc::now().timestamp_millis();
        while self.task(id).is_some() {
            id += 1;
        }
        let slot = TimeSlot::after(id, self.tasks.last());
        self.tasks.push(slot);
        self.on_tasks_changed(today);
        id
    }

    /// Merge `patch` into the task. Unknown ids are a no-op (`Ok(false)`).
    pub fn update_task(
        &mut self,
        today: NaiveDate,
        id: i64,
        patch: TaskPatch,
    ) -> Result<bool, ValidationError> {
        let patch = patch.validated()?;
        self.roll_over(today);
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        patch.apply_to(slot);
        self.on_tasks_changed(today);
        Ok(true)
    }

    pub fn delete_task(&mut self, today: NaiveDate, id: i64) -> bool {
        self.roll_over(today);
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            self.on_tasks_changed(today);
        }
        removed
    }

    pub fn toggle_completion(&mut self, today: NaiveDate, id: i64) -> bool {
        self.roll_over(today);
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        slot.completed = !slot.completed;
        self.on_tasks_changed(today);
        true
    }

    /// Zero the streak and forget the last credited day.
    pub fn reset_streak(&mut self) {
        let previous = self.streak.count;
        self.streak = Streak::default();
        self.events.push(Event::StreakReset { previous });
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    match s.parse() {
        Ok(d) => Some(d),
        Err(e) => {
            tracing::warn!(value = s, error = %e, "ignoring malformed stored date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn planner_with(n: usize, today: NaiveDate) -> (DailyPlanner, Vec<i64>) {
        let mut p = DailyPlanner::new();
        let ids = (0..n).map(|_| p.add_task(today)).collect();
        p.take_events();
        (p, ids)
    }

    #[test]
    fn empty_list_never_increments() {
        let mut p = DailyPlanner::new();
        p.roll_over(day(1));
        assert!(!p.is_day_complete());
        p.on_tasks_changed(day(1));
        assert_eq!(p.streak().count, 0);
    }

    #[test]
    fn completing_all_tasks_increments_once_per_day() {
        let today = day(10);
        let (mut p, ids) = planner_with(3, today);
        for id in &ids {
            p.toggle_completion(today, *id);
        }
        assert_eq!(p.streak().count, 1);
        assert_eq!(p.streak().last_completed_date, Some(today));

        p.toggle_completion(today, ids[0]);
        p.toggle_completion(today, ids[0]);
        assert_eq!(p.streak().count, 1);

        let events = p.take_events();
        let increments = events
            .iter()
            .filter(|e| matches!(e, Event::StreakIncremented { .. }))
            .count();
        assert_eq!(increments, 1);
    }

    #[test]
    fn yesterday_keeps_streak_and_clears_flags() {
        let today = day(10);
        let (mut p, ids) = planner_with(2, day(9));
        p.toggle_completion(day(9), ids[0]);
        p.streak = Streak {
            count: 5,
            last_completed_date: Some(day(9)),
        };

        assert!(p.roll_over(today));
        assert_eq!(p.streak().count, 5);
        assert!(p.tasks().iter().all(|t| !t.completed));
        assert_eq!(p.plan_date(), Some(today));
    }

    #[test]
    fn gap_of_two_days_breaks_streak() {
        let (mut p, _) = planner_with(1, day(7));
        p.streak = Streak {
            count: 4,
            last_completed_date: Some(day(7)),
        };
        p.roll_over(day(10));
        assert_eq!(p.streak().count, 0);
        assert!(p
            .take_events()
            .iter()
            .any(|e| matches!(e, Event::StreakReset { previous: 4 })));
    }

    #[test]
    fn same_day_rollover_is_noop() {
        let today = day(10);
        let (mut p, ids) = planner_with(2, today);
        p.toggle_completion(today, ids[0]);
        assert!(!p.roll_over(today));
        assert!(p.task(ids[0]).unwrap().completed);
    }

    #[test]
    fn credited_yesterday_can_be_credited_again_today() {
        let (mut p, ids) = planner_with(1, day(9));
        p.toggle_completion(day(9), ids[0]);
        assert_eq!(p.streak().count, 1);

        // Flags reset on the new day; completing again credits day 10.
        p.toggle_completion(day(10), ids[0]);
        assert_eq!(p.streak().count, 2);
        assert_eq!(p.streak().last_completed_date, Some(day(10)));
    }

    #[test]
    fn adding_to_a_complete_day_does_not_uncredit() {
        let today = day(10);
        let (mut p, ids) = planner_with(1, today);
        p.toggle_completion(today, ids[0]);
        p.add_task(today);
        assert!(!p.is_day_complete());
        assert_eq!(p.streak().count, 1);
    }

    #[test]
    fn deleting_the_last_open_task_completes_the_day() {
        let today = day(10);
        let (mut p, ids) = planner_with(2, today);
        p.toggle_completion(today, ids[0]);
        assert!(p.delete_task(today, ids[1]));
        assert_eq!(p.streak().count, 1);
    }

    #[test]
    fn unknown_ids_are_noops() {
        let today = day(10);
        let (mut p, _) = planner_with(1, today);
        let before = p.clone();
        assert!(!p.toggle_completion(today, 42));
        assert!(!p.delete_task(today, 42));
        assert!(!p.update_task(today, 42, TaskPatch::default()).unwrap());
        assert_eq!(p.tasks(), before.tasks());
    }

    #[test]
    fn ids_are_unique_even_when_added_quickly() {
        let (p, ids) = planner_with(20, day(1));
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 20);
        assert_eq!(p.tasks().len(), 20);
    }

    #[test]
    fn slots_chain_from_nine() {
        let (p, _) = planner_with(3, day(1));
        let starts: Vec<_> = p.tasks().iter().map(|t| t.start_time.as_str()).collect();
        assert_eq!(starts, ["09:00", "10:00", "11:00"]);
    }

    #[test]
    fn update_merges_partial_fields() {
        let today = day(1);
        let (mut p, ids) = planner_with(1, today);
        let patch = TaskPatch {
            task: Some("Read Laxmikanth ch. 4".into()),
            end_time: Some("9:45".into()),
            ..TaskPatch::default()
        };
        assert!(p.update_task(today, ids[0], patch).unwrap());
        let slot = p.task(ids[0]).unwrap();
        assert_eq!(slot.task, "Read Laxmikanth ch. 4");
        assert_eq!(slot.end_time, "09:45");
        assert_eq!(slot.subject, "Subject");
    }

    #[test]
    fn update_rejects_bad_time() {
        let today = day(1);
        let (mut p, ids) = planner_with(1, today);
        let patch = TaskPatch {
            start_time: Some("9am".into()),
            ..TaskPatch::default()
        };
        assert_eq!(
            p.update_task(today, ids[0], patch),
            Err(ValidationError::InvalidTime("9am".into()))
        );
    }

    #[test]
    fn reset_streak_zeroes_and_clears_date() {
        let today = day(10);
        let (mut p, ids) = planner_with(1, today);
        p.toggle_completion(today, ids[0]);
        p.reset_streak();
        assert_eq!(p.streak(), Streak::default());
    }

    #[test]
    fn store_round_trip_rolls_over_on_load() {
        let store = MemoryStore::new();
        let (mut p, ids) = planner_with(2, day(9));
        p.toggle_completion(day(9), ids[0]);
        p.toggle_completion(day(9), ids[1]);
        p.save(&store).unwrap();

        let same_day = DailyPlanner::load(&store, day(9));
        assert_eq!(same_day.streak().count, 1);
        assert!(same_day.is_day_complete());

        let next_day = DailyPlanner::load(&store, day(10));
        assert_eq!(next_day.streak().count, 1);
        assert_eq!(next_day.today_progress().completed, 0);
    }

    #[test]
    fn empty_stored_dates_load_as_none() {
        let store = MemoryStore::new();
        storage::save(&store, keys::LAST_COMPLETED_DATE, "").unwrap();
        storage::save(&store, keys::STREAK_COUNT, &3u32).unwrap();
        let p = DailyPlanner::load(&store, day(10));
        // No last date counts as today, so the streak is kept.
        assert_eq!(p.streak().count, 3);
        assert_eq!(p.streak().last_completed_date, None);
    }
}
