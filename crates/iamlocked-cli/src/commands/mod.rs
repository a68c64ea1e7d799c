pub mod auth;
pub mod config;
pub mod dashboard;
pub mod focus;
pub mod syllabus;
pub mod task;
pub mod template;
pub mod timer;

use chrono::{Local, NaiveDate};
use iamlocked_core::storage::{self, keys};
use iamlocked_core::{Config, Database, Syllabus, TemplateCatalog};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// The store under the data directory.
pub fn open_store() -> Result<Database, Box<dyn std::error::Error>> {
    Ok(Database::open()?)
}

/// Calendar days follow the local clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The stored syllabus, or the configured default template on first use.
pub fn load_syllabus(db: &Database) -> Syllabus {
    if let Ok(Some(_)) = db.kv_get(keys::SYLLABUS) {
        return storage::load(db, keys::SYLLABUS, Syllabus::new());
    }
    let config = Config::load_or_default();
    let papers = TemplateCatalog
        .select(&config.syllabus.default_template)
        .unwrap_or_default();
    Syllabus::from_papers(papers)
}

pub fn save_syllabus(db: &Database, syllabus: &Syllabus) -> CmdResult {
    storage::save(db, keys::SYLLABUS, syllabus)?;
    Ok(())
}
