//! Persistence for the progress record.
//!
//! The host hands plugins an opaque key-value blob; here that blob is a flat
//! JSON object in `<data_dir>/data.json`. Stores return the raw value so the
//! caller can validate it field by field.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::PersistenceError;
use crate::streak::ProgressState;

/// Load/save collaborator for [`ProgressState`].
pub trait ProgressStore {
    /// Read the persisted record. `Ok(None)` means nothing was saved yet.
    fn load(&self) -> Result<Option<Value>, PersistenceError>;

    /// Write the record. Completes before returning.
    fn save(&mut self, state: &ProgressState) -> Result<(), PersistenceError>;
}

/// Stores the record as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/<file_name>`.
    pub fn in_data_dir(file_name: &str) -> Result<Self, PersistenceError> {
        let dir = super::data_dir().map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
        Ok(Self::new(dir.join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>, PersistenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| PersistenceError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&mut self, state: &ProgressState) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(state)?;
        let write_failed = |source| PersistenceError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_failed)?;
            }
        }
        // Write a sibling and rename so a crash never leaves a torn record.
        let tmp = self.tmp_path();
        fs::write(&tmp, content).map_err(write_failed)?;
        fs::rename(&tmp, &self.path).map_err(write_failed)?;
        Ok(())
    }
}

/// In-memory store, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Option<Value>,
    fail_saves: bool,
    save_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already persisted raw record.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail until switched off.
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<Value>, PersistenceError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, state: &ProgressState) -> Result<(), PersistenceError> {
        if self.fail_saves {
            return Err(PersistenceError::Unavailable("memory store is failing saves".into()));
        }
        self.data = Some(serde_json::to_value(state)?);
        self.save_count += 1;
        Ok(())
    }
}
