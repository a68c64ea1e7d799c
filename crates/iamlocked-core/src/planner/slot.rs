use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Start time of the first slot of an empty plan.
pub const FIRST_SLOT_START: &str = "09:00";
pub const NEW_SLOT_TASK: &str = "New Task";
pub const NEW_SLOT_SUBJECT: &str = "Subject";

/// One entry in the day's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Creation time in milliseconds, unique within the plan.
    pub id: i64,
    #[serde(default = "default_start")]
    pub start_time: String,
    #[serde(default = "default_start")]
    pub end_time: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub completed: bool,
}

fn default_start() -> String {
    FIRST_SLOT_START.to_string()
}

impl TimeSlot {
    /// A one-hour slot starting where `previous` ends, or at 09:00.
    pub(crate) fn after(id: i64, previous: Option<&TimeSlot>) -> Self {
        let start = previous
            .and_then(|p| parse_hhmm(&p.end_time).ok())
            .unwrap_or_else(|| NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default());
        let (end, _) = start.overflowing_add_signed(Duration::hours(1));
        Self {
            id,
            start_time: format_hhmm(start),
            end_time: format_hhmm(end),
            task: NEW_SLOT_TASK.to_string(),
            subject: NEW_SLOT_SUBJECT.to_string(),
            completed: false,
        }
    }

    fn apply(&mut self, patch: TaskPatch) {
        if let Some(v) = patch.start_time {
            self.start_time = v;
        }
        if let Some(v) = patch.end_time {
            self.end_time = v;
        }
        if let Some(v) = patch.task {
            self.task = v;
        }
        if let Some(v) = patch.subject {
            self.subject = v;
        }
        if let Some(v) = patch.completed {
            self.completed = v;
        }
    }
}

/// Partial update for a slot; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub task: Option<String>,
    pub subject: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    /// Check time fields and normalise them to zero-padded `HH:mm`.
    pub(crate) fn validated(mut self) -> Result<Self, ValidationError> {
        for field in [&mut self.start_time, &mut self.end_time].into_iter().flatten() {
            *field = format_hhmm(parse_hhmm(field)?);
        }
        Ok(self)
    }

    pub(crate) fn apply_to(self, slot: &mut TimeSlot) {
        slot.apply(self)
    }
}

/// Parse `H:mm` or `HH:mm` on a 24-hour clock.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidTime(s.to_string()))
}

pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_slot_starts_at_nine() {
        let slot = TimeSlot::after(1, None);
        assert_eq!(slot.start_time, "09:00");
        assert_eq!(slot.end_time, "10:00");
        assert_eq!(slot.task, "New Task");
        assert_eq!(slot.subject, "Subject");
        assert!(!slot.completed);
    }

    #[test]
    fn next_slot_follows_previous_end() {
        let mut prev = TimeSlot::after(1, None);
        prev.end_time = "14:30".into();
        let slot = TimeSlot::after(2, Some(&prev));
        assert_eq!(slot.start_time, "14:30");
        assert_eq!(slot.end_time, "15:30");
    }

    #[test]
    fn late_slot_wraps_past_midnight() {
        let mut prev = TimeSlot::after(1, None);
        prev.end_time = "23:15".into();
        let slot = TimeSlot::after(2, Some(&prev));
        assert_eq!(slot.end_time, "00:15");
    }

    #[test]
    fn times_are_validated_and_padded() {
        assert!(parse_hhmm("25:00").is_err());
        assert!(parse_hhmm("noon").is_err());
        let patch = TaskPatch {
            start_time: Some("7:05".into()),
            ..TaskPatch::default()
        }
        .validated()
        .unwrap();
        assert_eq!(patch.start_time.as_deref(), Some("07:05"));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(TimeSlot::after(5, None)).unwrap();
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:00");
        assert_eq!(json["id"], 5);
    }
}
