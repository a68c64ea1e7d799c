//! Draft editor for building or reworking a syllabus.
//!
//! A draft never patches the live tree. It is seeded empty (create) or from
//! a copy of the live tree (edit), and `commit()` hands back a complete new
//! tree for [`Syllabus::replace`].

use chrono::Utc;

use super::model::{Paper, ReplaceOrigin, Subject, Syllabus, Topic};
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq)]
pub struct SyllabusDraft {
    papers: Vec<Paper>,
    origin: ReplaceOrigin,
}

impl Default for SyllabusDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl SyllabusDraft {
    /// Start from scratch.
    pub fn new() -> Self {
        Self {
            papers: Vec::new(),
            origin: ReplaceOrigin::Fresh,
        }
    }

    /// Start from the live tree, keeping its open/closed state.
    pub fn edit(syllabus: &Syllabus) -> Self {
        Self {
            papers: syllabus.papers().to_vec(),
            origin: ReplaceOrigin::Edit,
        }
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn origin(&self) -> ReplaceOrigin {
        self.origin
    }

    pub fn add_paper(&mut self, name: impl Into<String>) -> String {
        let id = fresh_id("paper", self.papers.iter().map(|p| p.id.as_str()));
        self.papers.push(Paper::new(id.clone(), name, Vec::new()));
        id
    }

    pub fn remove_paper(&mut self, paper_id: &str) -> bool {
        let before = self.papers.len();
        self.papers.retain(|p| p.id != paper_id);
        self.papers.len() != before
    }

    pub fn rename_paper(&mut self, paper_id: &str, name: impl Into<String>) -> bool {
        match self.paper_mut(paper_id) {
            Some(p) => {
                p.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn add_subject(&mut self, paper_id: &str, name: impl Into<String>) -> Option<String> {
        let paper = self.paper_mut(paper_id)?;
        let id = fresh_id("subject", paper.subjects.iter().map(|s| s.id.as_str()));
        paper.subjects.push(Subject::new(id.clone(), name, Vec::new()));
        Some(id)
    }

    pub fn remove_subject(&mut self, paper_id: &str, subject_id: &str) -> bool {
        match self.paper_mut(paper_id) {
            Some(p) => {
                let before = p.subjects.len();
                p.subjects.retain(|s| s.id != subject_id);
                p.subjects.len() != before
            }
            None => false,
        }
    }

    pub fn rename_subject(
        &mut self,
        paper_id: &str,
        subject_id: &str,
        name: impl Into<String>,
    ) -> bool {
        match self.subject_mut(paper_id, subject_id) {
            Some(s) => {
                s.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn add_topic(
        &mut self,
        paper_id: &str,
        subject_id: &str,
        name: impl Into<String>,
        estimated_hours: f64,
    ) -> Option<String> {
        let subject = self.subject_mut(paper_id, subject_id)?;
        let id = fresh_id("topic", subject.topics.iter().map(|t| t.id.as_str()));
        subject
            .topics
            .push(Topic::new(id.clone(), name).with_hours(estimated_hours));
        Some(id)
    }

    pub fn remove_topic(&mut self, paper_id: &str, subject_id: &str, topic_id: &str) -> bool {
        match self.subject_mut(paper_id, subject_id) {
            Some(s) => {
                let before = s.topics.len();
                s.topics.retain(|t| t.id != topic_id);
                s.topics.len() != before
            }
            None => false,
        }
    }

    /// Change a topic's name and estimated hours together.
    pub fn update_topic(
        &mut self,
        paper_id: &str,
        subject_id: &str,
        topic_id: &str,
        name: impl Into<String>,
        estimated_hours: f64,
    ) -> bool {
        match self
            .subject_mut(paper_id, subject_id)
            .and_then(|s| s.topic_mut(topic_id))
        {
            Some(t) => {
                t.name = name.into();
                t.estimated_hours = Some(estimated_hours);
                true
            }
            None => false,
        }
    }

    /// Finish editing. Every node needs a non-blank name.
    pub fn commit(self) -> Result<(Vec<Paper>, ReplaceOrigin), ValidationError> {
        for paper in &self.papers {
            require_name("Paper", &paper.id, &paper.name)?;
            for subject in &paper.subjects {
                require_name("Subject", &subject.id, &subject.name)?;
                for topic in &subject.topics {
                    require_name("Topic", &topic.id, &topic.name)?;
                }
            }
        }
        Ok((self.papers, self.origin))
    }

    fn paper_mut(&mut self, paper_id: &str) -> Option<&mut Paper> {
        self.papers.iter_mut().find(|p| p.id == paper_id)
    }

    fn subject_mut(&mut self, paper_id: &str, subject_id: &str) -> Option<&mut Subject> {
        self.paper_mut(paper_id)?.subject_mut(subject_id)
    }
}

fn require_name(kind: &'static str, id: &str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

/// `kind-<millis>`, bumped until no sibling uses it.
fn fresh_id<'a>(kind: &str, siblings: impl Iterator<Item = &'a str>) -> String {
    let taken: Vec<&str> = siblings.collect();
    let mut stamp = Utc::now().timestamp_millis();
    loop {
        let id = format!("{kind}-{stamp}");
        if !taken.contains(&id.as_str()) {
            return id;
        }
        stamp += 1;
    }
}
