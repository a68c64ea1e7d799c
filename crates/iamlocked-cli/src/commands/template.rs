use clap::Subcommand;
use iamlocked_core::{ReplaceOrigin, TemplateCatalog};

use super::{load_syllabus, open_store, print_json, save_syllabus, CmdResult};

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List templates grouped by category
    List,
    /// Print a template's tree without applying it
    Show { id: String },
    /// Replace the syllabus with a fresh copy of a template
    Use { id: String },
}

pub fn run(action: TemplateAction) -> CmdResult {
    match action {
        TemplateAction::List => print_json(&TemplateCatalog.categories()),
        TemplateAction::Show { id } => match TemplateCatalog.select(&id) {
            Some(papers) => print_json(&papers),
            None => Err(format!("unknown template: {id}").into()),
        },
        TemplateAction::Use { id } => {
            let papers = TemplateCatalog
                .select(&id)
                .ok_or_else(|| format!("unknown template: {id}"))?;
            let db = open_store()?;
            let mut syllabus = load_syllabus(&db);
            syllabus.replace(papers, ReplaceOrigin::Fresh);
            save_syllabus(&db, &syllabus)?;
            tracing::info!(template = %id, "template applied");
            println!("syllabus replaced with template '{id}'");
            Ok(())
        }
    }
}
