//! Host glue: wires the core plugin to the terminal and the data directory.

use std::io::Write;

use noteprogress_core::{Config, JsonFileStore, NoteProgressPlugin, Notifier, SilentNotifier};

/// Prints each notification as its own block.
///
/// When stdout carries JSON, notifications go to stderr instead.
pub struct TerminalNotifier {
    to_stderr: bool,
}

impl TerminalNotifier {
    pub fn new(to_stderr: bool) -> Self {
        Self { to_stderr }
    }
}

impl Notifier for TerminalNotifier {
    fn show(&mut self, message: &str) {
        let result = if self.to_stderr {
            writeln!(std::io::stderr(), "{message}")
        } else {
            writeln!(std::io::stdout(), "{message}")
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "could not print notification");
        }
    }
}

pub type Plugin = NoteProgressPlugin<JsonFileStore, Box<dyn Notifier>>;

/// Load the plugin the way the host does on startup.
///
/// Each command runs in its own process, so a failed save cannot be retried
/// later; commands report it through `ensure_saved` instead.
pub fn open_plugin(json_output: bool) -> Result<Plugin, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = JsonFileStore::in_data_dir(&config.storage.data_file)?;
    let notifier: Box<dyn Notifier> = if config.notifications.enabled {
        Box::new(TerminalNotifier::new(json_output))
    } else {
        Box::new(SilentNotifier)
    };
    Ok(NoteProgressPlugin::load(store, notifier)
        .with_summary(config.notifications.show_summary)
        .with_retry_failed_saves(false))
}
