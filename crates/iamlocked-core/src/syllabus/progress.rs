//! Progress derivations over the syllabus tree.
//!
//! All of these are computed on read; nothing here is cached on the tree.

use serde::Serialize;

use super::model::{Paper, Syllabus, Topic};

/// `round(100 * completed / total)`, or 0 for an empty list.
pub fn calculate_progress<'a>(topics: impl IntoIterator<Item = &'a Topic>) -> u8 {
    Progress::of(topics).percent
}

/// Counts and hour totals for one node of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
    pub estimated_hours: f64,
    pub completed_hours: f64,
}

impl Progress {
    pub fn of<'a>(topics: impl IntoIterator<Item = &'a Topic>) -> Self {
        let mut p = Progress::default();
        for topic in topics {
            let hours = topic.estimated_hours.unwrap_or(0.0);
            p.total += 1;
            p.estimated_hours += hours;
            if topic.is_completed() {
                p.completed += 1;
                p.completed_hours += hours;
            }
        }
        p.percent = percent(p.completed, p.total);
        p
    }

    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }
}

fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as u8
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSummary {
    pub id: String,
    pub name: String,
    pub is_open: bool,
    pub progress: Progress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaperSummary {
    pub id: String,
    pub name: String,
    pub is_open: bool,
    pub progress: Progress,
    pub subjects: Vec<SubjectSummary>,
}

impl PaperSummary {
    pub fn of(paper: &Paper) -> Self {
        Self {
            id: paper.id.clone(),
            name: paper.name.clone(),
            is_open: paper.is_open,
            progress: Progress::of(paper.topics()),
            subjects: paper
                .subjects
                .iter()
                .map(|s| SubjectSummary {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    is_open: s.is_open,
                    progress: Progress::of(&s.topics),
                })
                .collect(),
        }
    }
}

/// Bottom-up rollup of the whole tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyllabusSummary {
    pub overall: Progress,
    pub papers: Vec<PaperSummary>,
}

impl Syllabus {
    pub fn overall_progress(&self) -> Progress {
        Progress::of(self.topics())
    }

    /// Progress of one paper, or `None` if no paper has that id.
    pub fn paper_progress(&self, paper_id: &str) -> Option<Progress> {
        self.paper(paper_id).map(|p| Progress::of(p.topics()))
    }

    pub fn summary(&self) -> SyllabusSummary {
        SyllabusSummary {
            overall: self.overall_progress(),
            papers: self.papers().iter().map(PaperSummary::of).collect(),
        }
    }
}
