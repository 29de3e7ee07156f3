mod config;
mod progress_store;

pub use config::{Config, NotificationsConfig, StorageConfig};
pub use progress_store::{JsonFileStore, MemoryStore, ProgressStore};

use std::path::PathBuf;

/// Returns `~/.config/noteprogress[-dev]/` based on NOTEPROGRESS_ENV.
///
/// Set NOTEPROGRESS_ENV=dev to use the development data directory, or
/// NOTEPROGRESS_DATA_DIR to use an explicit directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("NOTEPROGRESS_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("NOTEPROGRESS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("noteprogress-dev")
            } else {
                base_dir.join("noteprogress")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
