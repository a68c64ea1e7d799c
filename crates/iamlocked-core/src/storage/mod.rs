//! Persistent key-value store adapter.
//!
//! Every piece of app state lives under one named key as a JSON document.
//! Reads never fail: a missing or corrupt value falls back to the caller's
//! default and is logged at warn level.

mod config;
mod database;
mod memory;

pub use config::{Config, DashboardConfig, SyllabusConfig, TimerConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StorageError};

/// Well-known store keys.
pub mod keys {
    pub const DAILY_TASKS: &str = "dailyTasks";
    pub const STREAK_COUNT: &str = "streakCount";
    pub const LAST_COMPLETED_DATE: &str = "lastCompletedDate";
    pub const PLAN_DATE: &str = "planDate";
    pub const FOCUS_TASK: &str = "focusTask";
    pub const TIMER: &str = "timer";
    pub const SYLLABUS: &str = "syllabus";
    pub const FOCUS_SESSION: &str = "focusSession";
    pub const AUTH_ACCOUNTS: &str = "auth.accounts";
    pub const AUTH_CURRENT_USER: &str = "auth.currentUser";
}

/// Raw string storage keyed by name.
pub trait KvStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read `key` as JSON, or `default` when it is absent, unreadable or malformed.
pub fn load<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let raw = match store.get_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed, using default");
            return default;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value is malformed, using default");
            default
        }
    }
}

/// Write `value` under `key` as JSON.
pub fn save<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KvStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set_raw(key, &raw)?;
    Ok(())
}

/// Returns the data directory, creating it if needed.
///
/// `IAMLOCKED_DATA_DIR` wins when set. Otherwise `~/.config/iamlocked/`,
/// or `~/.config/iamlocked-dev/` when `IAMLOCKED_ENV=dev`.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("IAMLOCKED_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("IAMLOCKED_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("iamlocked-dev")
            } else {
                base_dir.join("iamlocked")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_key_gives_default() {
        let store = MemoryStore::new();
        assert_eq!(load(&store, keys::STREAK_COUNT, 0u32), 0);
    }

    #[test]
    fn load_malformed_value_gives_default() {
        let store = MemoryStore::new();
        store.set_raw(keys::STREAK_COUNT, "{not json").unwrap();
        assert_eq!(load(&store, keys::STREAK_COUNT, 7u32), 7);
    }

    #[test]
    fn load_wrong_shape_gives_default() {
        let store = MemoryStore::new();
        store.set_raw(keys::DAILY_TASKS, "\"a string\"").unwrap();
        let tasks: Vec<u32> = load(&store, keys::DAILY_TASKS, vec![1]);
        assert_eq!(tasks, vec![1]);
    }

    #[test]
    fn save_then_load() {
        let store = MemoryStore::new();
        save(&store, keys::FOCUS_TASK, "Polity revision").unwrap();
        let text: String = load(&store, keys::FOCUS_TASK, String::new());
        assert_eq!(text, "Polity revision");
    }
}
