//! # Note Progress Core Library
//!
//! This library provides the core logic for the Note Progress tracker: a
//! daily note-taking streak, badges at fixed streak lengths, and progress
//! summaries. It follows a CLI-first layout where the host (the CLI binary,
//! or an editor integration) is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak**: A pure state machine over calendar dates; no I/O
//! - **Storage**: JSON progress record and TOML configuration
//! - **Notify**: Fire-and-forget message sink supplied by the host
//! - **Plugin**: Ties the three together behind the host's command and
//!   settings entry points
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: Streak and badge state machine
//! - [`ProgressStore`]: Progress record persistence
//! - [`NoteProgressPlugin`]: Command handler owning tracker, store and notifier
//! - [`Config`]: Application configuration management

pub mod error;
pub mod notify;
pub mod plugin;
pub mod storage;
pub mod streak;

pub use error::{ConfigError, CoreError, CorruptStateError, PersistenceError};
pub use notify::{Notifier, RecordingNotifier, SilentNotifier};
pub use plugin::{NoteProgressPlugin, SettingField};
pub use storage::{Config, JsonFileStore, MemoryStore, ProgressStore};
pub use streak::{
    today_local, BadgeKind, ProgressSnapshot, ProgressState, StreakOutcome, StreakTracker,
};
