use std::path::PathBuf;

use clap::Subcommand;
use iamlocked_core::storage::keys;
use iamlocked_core::{Paper, ReplaceOrigin, Syllabus, SyllabusDraft};

use super::{load_syllabus, open_store, print_json, save_syllabus, CmdResult};

#[derive(Subcommand)]
pub enum SyllabusAction {
    /// Print the whole tree as JSON
    Show,
    /// Per-paper and per-subject progress
    Progress {
        /// Only this paper
        #[arg(long)]
        paper: Option<String>,
    },
    /// Mark a topic completed or not started
    ToggleTopic {
        paper: String,
        subject: String,
        topic: String,
    },
    /// Expand or collapse a paper
    TogglePaper { paper: String },
    /// Expand or collapse a subject
    ToggleSubject { paper: String, subject: String },
    /// Replace the syllabus with a tree read from a JSON file
    Import {
        file: PathBuf,
        /// Keep the file's open/closed flags
        #[arg(long)]
        keep_open_state: bool,
    },
    /// Add a paper (saving an edit resets all topic progress)
    AddPaper { name: String },
    /// Add a subject to a paper
    AddSubject { paper: String, name: String },
    /// Add a topic to a subject
    AddTopic {
        paper: String,
        subject: String,
        name: String,
        /// Estimated hours
        #[arg(long, default_value = "0")]
        hours: f64,
    },
    /// Rename a paper, or a subject with --subject
    Rename {
        paper: String,
        #[arg(long)]
        subject: Option<String>,
        name: String,
    },
    /// Change a topic's name and estimated hours
    UpdateTopic {
        paper: String,
        subject: String,
        topic: String,
        name: String,
        #[arg(long, default_value = "0")]
        hours: f64,
    },
    /// Remove a paper, subject or topic
    Remove {
        paper: String,
        subject: Option<String>,
        topic: Option<String>,
    },
    /// Delete the whole syllabus
    Delete,
}

/// Run one edit against a draft of the live tree and save the result.
fn edit<T>(
    syllabus: &mut Syllabus,
    f: impl FnOnce(&mut SyllabusDraft) -> Option<T>,
) -> Result<T, Box<dyn std::error::Error>> {
    let mut draft = SyllabusDraft::edit(syllabus);
    let out = f(&mut draft).ok_or("no such paper, subject or topic")?;
    let (papers, origin) = draft.commit()?;
    syllabus.replace(papers, origin);
    Ok(out)
}

pub fn run(action: SyllabusAction) -> CmdResult {
    let db = open_store()?;
    let mut syllabus = load_syllabus(&db);

    match action {
        SyllabusAction::Show => {
            print_json(&syllabus)?;
            return Ok(());
        }
        SyllabusAction::Progress { paper } => {
            match paper {
                Some(id) => match syllabus.summary().papers.into_iter().find(|p| p.id == id) {
                    Some(p) => print_json(&p)?,
                    None => return Err(format!("no paper with id '{id}'").into()),
                },
                None => print_json(&syllabus.summary())?,
            }
            return Ok(());
        }
        SyllabusAction::ToggleTopic {
            paper,
            subject,
            topic,
        } => {
            if !syllabus.toggle_topic(&paper, &subject, &topic) {
                eprintln!("no topic at {paper}/{subject}/{topic}");
            }
            if let Some(t) = syllabus.topic(&paper, &subject, &topic) {
                print_json(t)?;
            }
        }
        SyllabusAction::TogglePaper { paper } => {
            if !syllabus.toggle_paper_open(&paper) {
                eprintln!("no paper '{paper}'");
            }
        }
        SyllabusAction::ToggleSubject { paper, subject } => {
            if !syllabus.toggle_subject_open(&paper, &subject) {
                eprintln!("no subject at {paper}/{subject}");
            }
        }
        SyllabusAction::Import {
            file,
            keep_open_state,
        } => {
            let content = std::fs::read_to_string(&file)?;
            let papers: Vec<Paper> = serde_json::from_str(&content)?;
            let origin = if keep_open_state {
                ReplaceOrigin::Edit
            } else {
                ReplaceOrigin::Fresh
            };
            let (papers, _) = SyllabusDraft::edit(&Syllabus::from_papers(papers)).commit()?;
            syllabus.replace(papers, origin);
            println!("imported {} papers", syllabus.papers().len());
        }
        SyllabusAction::AddPaper { name } => {
            let id = edit(&mut syllabus, |d| Some(d.add_paper(name)))?;
            println!("{id}");
        }
        SyllabusAction::AddSubject { paper, name } => {
            let id = edit(&mut syllabus, |d| d.add_subject(&paper, name))?;
            println!("{id}");
        }
        SyllabusAction::AddTopic {
            paper,
            subject,
            name,
            hours,
        } => {
            let id = edit(&mut syllabus, |d| d.add_topic(&paper, &subject, name, hours))?;
            println!("{id}");
        }
        SyllabusAction::Rename {
            paper,
            subject,
            name,
        } => {
            edit(&mut syllabus, |d| {
                let found = match &subject {
                    Some(s) => d.rename_subject(&paper, s, name),
                    None => d.rename_paper(&paper, name),
                };
                found.then_some(())
            })?;
            println!("ok");
        }
        SyllabusAction::UpdateTopic {
            paper,
            subject,
            topic,
            name,
            hours,
        } => {
            edit(&mut syllabus, |d| {
                d.update_topic(&paper, &subject, &topic, name, hours)
                    .then_some(())
            })?;
            println!("ok");
        }
        SyllabusAction::Remove {
            paper,
            subject,
            topic,
        } => {
            edit(&mut syllabus, |d| {
                let found = match (&subject, &topic) {
                    (Some(s), Some(t)) => d.remove_topic(&paper, s, t),
                    (Some(s), None) => d.remove_subject(&paper, s),
                    _ => d.remove_paper(&paper),
                };
                found.then_some(())
            })?;
            println!("ok");
        }
        SyllabusAction::Delete => {
            syllabus.delete();
            println!("syllabus deleted");
        }
    }

    tracing::debug!(key = keys::SYLLABUS, "saving syllabus");
    save_syllabus(&db, &syllabus)
}
