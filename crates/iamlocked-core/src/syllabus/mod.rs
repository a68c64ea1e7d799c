//! Syllabus tracker: the paper → subject → topic tree, its progress
//! rollups, and the draft editor used to create or rework it.

mod editor;
mod model;
mod progress;

pub use editor::SyllabusDraft;
pub use model::{Paper, ReplaceOrigin, Subject, Syllabus, Topic, TopicStatus};
pub use progress::{calculate_progress, PaperSummary, Progress, SubjectSummary, SyllabusSummary};
