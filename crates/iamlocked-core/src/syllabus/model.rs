//! Syllabus tree: papers contain subjects, subjects contain topics.
//!
//! Nodes are addressed by a path of ids (paper, subject, topic). Ids are
//! opaque; the only contract is uniqueness among siblings. Updates walk the
//! path and touch only the addressed node; an unresolved path is a no-op.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicStatus {
    Completed,
    #[default]
    NotStarted,
}

impl TopicStatus {
    pub fn toggled(self) -> Self {
        match self {
            TopicStatus::Completed => TopicStatus::NotStarted,
            TopicStatus::NotStarted => TopicStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: TopicStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
}

impl Topic {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: TopicStatus::NotStarted,
            estimated_hours: None,
        }
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == TopicStatus::Completed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default = "default_open")]
    pub is_open: bool,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>, topics: Vec<Topic>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            topics,
            is_open: true,
        }
    }

    pub fn topic_mut(&mut self, topic_id: &str) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.id == topic_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default = "default_open")]
    pub is_open: bool,
}

impl Paper {
    pub fn new(id: impl Into<String>, name: impl Into<String>, subjects: Vec<Subject>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subjects,
            is_open: true,
        }
    }

    pub fn subject_mut(&mut self, subject_id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == subject_id)
    }

    /// Every topic of every subject, in order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.subjects.iter().flat_map(|s| s.topics.iter())
    }
}

fn default_open() -> bool {
    true
}

/// Where a replacement tree comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceOrigin {
    /// Template or scratch build: every node opens expanded.
    Fresh,
    /// Edit-in-place: the editor's open/closed flags are kept.
    Edit,
}

/// The whole tree. Serializes as a bare array of papers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Syllabus {
    papers: Vec<Paper>,
}

impl Syllabus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a syllabus from an already-prepared tree, as loaded from storage.
    pub fn from_papers(papers: Vec<Paper>) -> Self {
        Self { papers }
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn paper(&self, paper_id: &str) -> Option<&Paper> {
        self.papers.iter().find(|p| p.id == paper_id)
    }

    pub fn topic(&self, paper_id: &str, subject_id: &str, topic_id: &str) -> Option<&Topic> {
        self.paper(paper_id)?
            .subjects
            .iter()
            .find(|s| s.id == subject_id)?
            .topics
            .iter()
            .find(|t| t.id == topic_id)
    }

    /// Every topic in the tree, in order.
    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.papers.iter().flat_map(|p| p.topics())
    }

    fn paper_mut(&mut self, paper_id: &str) -> Option<&mut Paper> {
        self.papers.iter_mut().find(|p| p.id == paper_id)
    }

    fn topic_mut(
        &mut self,
        paper_id: &str,
        subject_id: &str,
        topic_id: &str,
    ) -> Option<&mut Topic> {
        self.paper_mut(paper_id)?
            .subject_mut(subject_id)?
            .topic_mut(topic_id)
    }

    /// Flip a topic between completed and not started.
    /// Returns false (and changes nothing) when the path does not resolve.
    pub fn toggle_topic(&mut self, paper_id: &str, subject_id: &str, topic_id: &str) -> bool {
        match self.topic_mut(paper_id, subject_id, topic_id) {
            Some(topic) => {
                topic.status = topic.status.toggled();
                tracing::debug!(
                    paper_id,
                    subject_id,
                    topic_id,
                    status = ?topic.status,
                    "topic toggled"
                );
                true
            }
            None => false,
        }
    }

    pub fn toggle_subject_open(&mut self, paper_id: &str, subject_id: &str) -> bool {
        match self
            .paper_mut(paper_id)
            .and_then(|p| p.subject_mut(subject_id))
        {
            Some(subject) => {
                subject.is_open = !subject.is_open;
                true
            }
            None => false,
        }
    }

    pub fn toggle_paper_open(&mut self, paper_id: &str) -> bool {
        match self.paper_mut(paper_id) {
            Some(paper) => {
                paper.is_open = !paper.is_open;
                true
            }
            None => false,
        }
    }

    /// Swap in a whole new tree. Every topic starts over as not started.
    /// Duplicate sibling ids in the incoming tree are renamed with a
    /// numeric suffix so paths stay unambiguous.
    pub fn replace(&mut self, papers: Vec<Paper>, origin: ReplaceOrigin) {
        let mut papers = papers;
        for paper in &mut papers {
            if origin == ReplaceOrigin::Fresh {
                paper.is_open = true;
            }
            for subject in &mut paper.subjects {
                if origin == ReplaceOrigin::Fresh {
                    subject.is_open = true;
                }
                for topic in &mut subject.topics {
                    topic.status = TopicStatus::NotStarted;
                }
                dedupe_ids(subject.topics.iter_mut().map(|t| &mut t.id));
            }
            dedupe_ids(paper.subjects.iter_mut().map(|s| &mut s.id));
        }
        dedupe_ids(papers.iter_mut().map(|p| &mut p.id));

        tracing::debug!(papers = papers.len(), ?origin, "syllabus replaced");
        self.papers = papers;
    }

    pub fn delete(&mut self) {
        self.papers.clear();
    }
}

fn dedupe_ids<'a>(ids: impl Iterator<Item = &'a mut String>) {
    let mut ids: Vec<&mut String> = ids.collect();
    let mut taken: HashSet<String> = ids.iter().map(|id| id.to_string()).collect();
    let mut seen = HashSet::new();
    for id in ids.iter_mut() {
        if seen.insert(id.to_string()) {
            continue;
        }
        let mut n = 2;
        let mut candidate = format!("{id}-{n}");
        while taken.contains(&candidate) {
            n += 1;
            candidate = format!("{id}-{n}");
        }
        taken.insert(candidate.clone());
        seen.insert(candidate.clone());
        **id = candidate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Syllabus {
        let mut s = Syllabus::new();
        s.replace(
            vec![Paper::new(
                "p1",
                "Prelims",
                vec![
                    Subject::new(
                        "s1",
                        "History",
                        vec![Topic::new("t1", "Ancient"), Topic::new("t2", "Modern")],
                    ),
                    Subject::new("s2", "Polity", vec![Topic::new("t1", "Constitution")]),
                ],
            )],
            ReplaceOrigin::Fresh,
        );
        s
    }

    #[test]
    fn toggle_topic_twice_restores_status() {
        let mut s = sample();
        assert!(s.toggle_topic("p1", "s1", "t2"));
        assert!(s.topic("p1", "s1", "t2").unwrap().is_completed());
        assert!(s.toggle_topic("p1", "s1", "t2"));
        assert_eq!(
            s.topic("p1", "s1", "t2").unwrap().status,
            TopicStatus::NotStarted
        );
    }

    #[test]
    fn toggle_topic_only_touches_addressed_node() {
        let mut s = sample();
        s.toggle_topic("p1", "s2", "t1");
        assert!(s.topic("p1", "s2", "t1").unwrap().is_completed());
        assert!(!s.topic("p1", "s1", "t1").unwrap().is_completed());
    }

    #[test]
    fn unresolved_path_is_noop() {
        let mut s = sample();
        let before = s.clone();
        assert!(!s.toggle_topic("p1", "s1", "missing"));
        assert!(!s.toggle_topic("nope", "s1", "t1"));
        assert!(!s.toggle_subject_open("p1", "missing"));
        assert!(!s.toggle_paper_open("missing"));
        assert_eq!(s, before);
    }

    #[test]
    fn open_flags_are_independent_of_completion() {
        let mut s = sample();
        s.toggle_topic("p1", "s1", "t1");
        s.toggle_paper_open("p1");
        s.toggle_subject_open("p1", "s1");
        let paper = s.paper("p1").unwrap();
        assert!(!paper.is_open);
        assert!(!paper.subjects[0].is_open);
        assert!(s.topic("p1", "s1", "t1").unwrap().is_completed());
    }

    #[test]
    fn fresh_replace_resets_status_and_opens() {
        let mut s = sample();
        s.toggle_topic("p1", "s1", "t1");
        let mut papers = s.papers().to_vec();
        papers[0].is_open = false;
        s.replace(papers, ReplaceOrigin::Fresh);
        assert!(s.paper("p1").unwrap().is_open);
        assert!(s.topics().all(|t| !t.is_completed()));
    }

    #[test]
    fn edit_replace_keeps_open_flags() {
        let mut s = sample();
        s.toggle_topic("p1", "s1", "t1");
        let mut papers = s.papers().to_vec();
        papers[0].subjects[1].is_open = false;
        s.replace(papers, ReplaceOrigin::Edit);
        assert!(!s.paper("p1").unwrap().subjects[1].is_open);
        assert!(s.topics().all(|t| !t.is_completed()));
    }

    #[test]
    fn replace_dedupes_sibling_ids() {
        let mut s = Syllabus::new();
        s.replace(
            vec![
                Paper::new("p", "A", vec![]),
                Paper::new("p", "B", vec![]),
                Paper::new("p-2", "C", vec![]),
            ],
            ReplaceOrigin::Fresh,
        );
        let ids: Vec<_> = s.papers().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p", "p-3", "p-2"]);
    }

    #[test]
    fn delete_empties_tree() {
        let mut s = sample();
        s.delete();
        assert!(s.is_empty());
    }

    #[test]
    fn serializes_with_wire_names() {
        let s = sample();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json[0]["isOpen"], serde_json::Value::Bool(true));
        assert_eq!(json[0]["subjects"][0]["topics"][0]["status"], "not-started");
    }
}
