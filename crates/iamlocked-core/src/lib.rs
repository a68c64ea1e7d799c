//! # I Am Locked Core Library
//!
//! Business logic for the I Am Locked study planner. Every operation is
//! available through the standalone `iamlocked` CLI, which is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a seconds-based countdown engine driven by `tick()`, the
//!   focus session that owns it, and a tokio `Ticker` that feeds it
//! - **Syllabus**: the paper → subject → topic tree, its progress rollups
//!   and the draft editor
//! - **Catalog**: built-in syllabus templates
//! - **Planner**: the day's time slots and the completion streak
//! - **Storage**: SQLite or in-memory key-value store plus TOML configuration
//! - **Auth**: the sign-in seam and an offline account provider
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: countdown state machine
//! - [`Syllabus`]: the study tree
//! - [`DailyPlanner`]: tasks and streak
//! - [`Database`]: persistent key-value store
//! - [`Config`]: application configuration

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod planner;
pub mod storage;
pub mod syllabus;
pub mod timer;

pub use auth::{AuthProvider, FederatedProvider, LocalAuthProvider, Profile, User};
pub use catalog::{TemplateCatalog, TemplateCategory, TemplateInfo};
pub use dashboard::Dashboard;
pub use error::{AuthError, ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use planner::{DailyPlanner, Streak, TaskPatch, TimeSlot};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use syllabus::{Paper, ReplaceOrigin, Subject, Syllabus, SyllabusDraft, Topic, TopicStatus};
pub use timer::{FocusSession, Ticker, TimerEngine, TimerState};
