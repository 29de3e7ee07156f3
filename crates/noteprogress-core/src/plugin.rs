//! The host-facing plugin session.
//!
//! [`NoteProgressPlugin`] owns the tracker together with its persistence and
//! notification collaborators. It exposes the two things the host can do:
//! run the "Track Note Progress" command and edit a counter from the
//! settings panel.
//!
//! Failures never escape to the host as fatal errors:
//! - corrupt persisted fields are replaced by defaults and announced;
//! - a failed save keeps the in-memory state, is announced, and is retried by
//!   the next command.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CorruptStateError, PersistenceError, Result};
use crate::notify::Notifier;
use crate::storage::ProgressStore;
use crate::streak::{
    ProgressSnapshot, ProgressState, StreakOutcome, StreakTracker, BADGE_COUNT_KEY,
    STREAK_COUNT_KEY,
};

/// Counters the settings panel lets the user overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingField {
    StreakCount,
    BadgeCount,
}

impl SettingField {
    pub const ALL: [SettingField; 2] = [SettingField::StreakCount, SettingField::BadgeCount];

    /// Accepts the persisted key (`streakCount`) or its snake_case spelling.
    pub fn parse(name: &str) -> Result<Self, CorruptStateError> {
        match name.trim() {
            STREAK_COUNT_KEY | "streak_count" => Ok(SettingField::StreakCount),
            BADGE_COUNT_KEY | "badge_count" => Ok(SettingField::BadgeCount),
            other => Err(CorruptStateError::UnknownField(other.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SettingField::StreakCount => STREAK_COUNT_KEY,
            SettingField::BadgeCount => BADGE_COUNT_KEY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SettingField::StreakCount => "Current Streak",
            SettingField::BadgeCount => "Badge Count",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SettingField::StreakCount => "Your consecutive days of note-taking.",
            SettingField::BadgeCount => "The total number of badges you have earned.",
        }
    }

    pub fn value(&self, state: &ProgressState) -> u32 {
        match self {
            SettingField::StreakCount => state.streak_count,
            SettingField::BadgeCount => state.badge_count,
        }
    }

    fn slot<'a>(&self, state: &'a mut ProgressState) -> &'a mut u32 {
        match self {
            SettingField::StreakCount => &mut state.streak_count,
            SettingField::BadgeCount => &mut state.badge_count,
        }
    }
}

/// A loaded plugin instance.
pub struct NoteProgressPlugin<S, N> {
    tracker: StreakTracker,
    store: S,
    notifier: N,
    /// In-memory state has changes the store has not accepted yet.
    dirty: bool,
    /// Why the last save failed, while `dirty`.
    save_error: Option<PersistenceError>,
    /// The host keeps this instance alive across commands.
    retry_failed_saves: bool,
    show_summary: bool,
    load_warnings: Vec<CorruptStateError>,
}

impl<S: ProgressStore, N: Notifier> NoteProgressPlugin<S, N> {
    /// Load persisted progress, falling back to defaults field by field.
    ///
    /// Every corrupt field produces one warning notification. A store that
    /// cannot be read at all yields a default state.
    pub fn load(store: S, mut notifier: N) -> Self {
        let (state, load_warnings) = match store.load() {
            Ok(Some(raw)) => ProgressState::from_raw(&raw),
            Ok(None) => (ProgressState::default(), Vec::new()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read progress data; starting from defaults");
                notifier.show(&format!("⚠️ Note progress could not be read ({e}); starting fresh."));
                (ProgressState::default(), Vec::new())
            }
        };

        for warning in &load_warnings {
            tracing::warn!(%warning, "corrupt progress field replaced by default");
            notifier.show(&format!("⚠️ Note progress: {warning}; using the default value."));
        }

        Self {
            tracker: StreakTracker::new(state),
            store,
            notifier,
            dirty: false,
            save_error: None,
            retry_failed_saves: true,
            show_summary: true,
            load_warnings,
        }
    }

    /// Whether [`track_note`](Self::track_note) ends with the progress summary.
    pub fn with_summary(mut self, show_summary: bool) -> Self {
        self.show_summary = show_summary;
        self
    }

    /// Whether a failed save is kept pending for the next command.
    ///
    /// Hosts that drop the instance after one command should pass `false`
    /// and check [`ensure_saved`](Self::ensure_saved) instead.
    pub fn with_retry_failed_saves(mut self, retry: bool) -> Self {
        self.retry_failed_saves = retry;
        self
    }

    /// The "Track Note Progress" command.
    ///
    /// Updates the streak, saves (or retries an earlier failed save), then
    /// shows one message per new badge followed by the summary. The save has
    /// completed or failed by the time this returns.
    pub fn track_note(&mut self, today: NaiveDate) -> ProgressSnapshot {
        let snapshot = self.tracker.record_note_taken(today);
        if snapshot.outcome != StreakOutcome::Unchanged {
            self.dirty = true;
        }
        self.flush();

        for badge in &snapshot.new_badges {
            self.notifier.show(&badge.award_message());
        }
        if self.show_summary {
            self.notifier.show(&snapshot.summary());
        }
        snapshot
    }

    /// Overwrite a counter from the settings panel.
    ///
    /// `raw` must parse as a non-negative integer; anything else is rejected
    /// before the state is touched. Badge logic does not run on manual edits.
    pub fn edit_setting(&mut self, field: &str, raw: &str) -> Result<ProgressSnapshot> {
        let field = SettingField::parse(field)?;
        let value = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| CorruptStateError::InvalidSetting {
                field: field.key().to_string(),
                value: raw.to_string(),
            })?;

        *field.slot(self.tracker.state_mut()) = value;
        tracing::debug!(field = field.key(), value, "setting edited");
        self.dirty = true;
        self.flush();
        Ok(self.tracker.snapshot())
    }

    /// Show the summary without changing anything.
    pub fn status(&mut self) -> ProgressSnapshot {
        let snapshot = self.tracker.snapshot();
        self.notifier.show(&snapshot.summary());
        snapshot
    }

    /// Save pending changes. Returns `true` when nothing is left unsaved.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return true;
        }
        match self.store.save(self.tracker.state()) {
            Ok(()) => {
                self.dirty = false;
                self.save_error = None;
                true
            }
            Err(e) => {
                if self.retry_failed_saves {
                    tracing::warn!(error = %e, "saving progress failed; will retry on next update");
                    self.notifier.show(&format!(
                        "⚠️ Note progress could not be saved ({e}). It will be retried next time."
                    ));
                } else {
                    tracing::warn!(error = %e, "saving progress failed");
                    self.notifier
                        .show(&format!("⚠️ Note progress could not be saved ({e})."));
                }
                self.save_error = Some(e);
                false
            }
        }
    }

    /// Fails with the last save error if changes are still unsaved.
    pub fn ensure_saved(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let err = self.save_error.take().unwrap_or_else(|| {
            PersistenceError::Unavailable("progress has unsaved changes".into())
        });
        Err(err.into())
    }

    pub fn state(&self) -> &ProgressState {
        self.tracker.state()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Fields that were replaced by defaults during [`load`](Self::load).
    pub fn load_warnings(&self) -> &[CorruptStateError] {
        &self.load_warnings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::notify::RecordingNotifier;
    use crate::storage::MemoryStore;
    use crate::streak::{parse_day, BadgeKind};
    use serde_json::json;

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn plugin_with(raw: serde_json::Value) -> NoteProgressPlugin<MemoryStore, RecordingNotifier> {
        NoteProgressPlugin::load(MemoryStore::with_data(raw), RecordingNotifier::new())
    }

    #[test]
    fn fresh_plugin_tracks_first_day() {
        let mut plugin = NoteProgressPlugin::load(MemoryStore::new(), RecordingNotifier::new());
        let snap = plugin.track_note(day("2024-01-01"));
        assert_eq!(snap.streak_count, 1);
        assert_eq!(plugin.store().save_count(), 1);
        assert_eq!(plugin.store().data().unwrap()["lastNoteDate"], "2024-01-01");
        assert_eq!(
            plugin.notifier().messages(),
            ["🔥 Streak: 1 days\n🏅 Badges: 0\n🎯 Milestones: 0"]
        );
    }

    #[test]
    fn same_day_does_not_resave() {
        let mut plugin = NoteProgressPlugin::load(MemoryStore::new(), RecordingNotifier::new());
        plugin.track_note(day("2024-01-01"));
        plugin.track_note(day("2024-01-01"));
        assert_eq!(plugin.store().save_count(), 1);
        assert_eq!(plugin.notifier().messages().len(), 2);
    }

    #[test]
    fn badge_message_precedes_summary() {
        let mut plugin = plugin_with(json!({ "streakCount": 6, "lastNoteDate": "2024-01-06" }));
        let snap = plugin.track_note(day("2024-01-07"));
        assert_eq!(snap.new_badges, vec![BadgeKind::WeekStreak]);
        let messages = plugin.notifier().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "🥳 You earned the 1 Week Streak Badge!");
        assert!(messages[1].starts_with("🔥 Streak: 7 days"));
    }

    #[test]
    fn corrupt_fields_warn_and_default() {
        let plugin = plugin_with(json!({ "streakCount": null, "badgeCount": 3 }));
        assert_eq!(plugin.state().streak_count, 0);
        assert_eq!(plugin.state().badge_count, 3);
        assert_eq!(plugin.load_warnings().len(), 1);
        assert_eq!(plugin.notifier().messages().len(), 1);
        assert!(plugin.notifier().messages()[0].contains("streakCount"));
    }

    #[test]
    fn failed_save_keeps_state_and_retries() {
        let mut store = MemoryStore::new();
        store.set_fail_saves(true);
        let mut plugin = NoteProgressPlugin::load(store, RecordingNotifier::new()).with_summary(false);

        let snap = plugin.track_note(day("2024-01-01"));
        assert_eq!(snap.streak_count, 1);
        assert_eq!(plugin.state().streak_count, 1);
        assert!(plugin.is_dirty());
        assert!(plugin.store().data().is_none());
        assert!(plugin.notifier().messages()[0].contains("could not be saved"));

        plugin.store_mut().set_fail_saves(false);
        // Same day: no streak change, but the pending save goes through.
        plugin.track_note(day("2024-01-01"));
        assert!(!plugin.is_dirty());
        assert_eq!(plugin.store().data().unwrap()["streakCount"], 1);
    }

    #[test]
    fn single_command_host_gets_save_error() {
        let mut store = MemoryStore::new();
        store.set_fail_saves(true);
        let mut plugin = NoteProgressPlugin::load(store, RecordingNotifier::new())
            .with_summary(false)
            .with_retry_failed_saves(false);

        plugin.track_note(day("2024-01-01"));
        let messages = plugin.notifier().messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("could not be saved"));
        assert!(!messages[0].contains("retried"));
        assert!(matches!(
            plugin.ensure_saved(),
            Err(CoreError::Persistence(PersistenceError::Unavailable(_)))
        ));
    }

    #[test]
    fn ensure_saved_is_ok_after_successful_save() {
        let mut plugin = NoteProgressPlugin::load(MemoryStore::new(), RecordingNotifier::new());
        plugin.track_note(day("2024-01-01"));
        assert!(plugin.ensure_saved().is_ok());
    }

    #[test]
    fn edit_setting_writes_through() {
        let mut plugin = NoteProgressPlugin::load(MemoryStore::new(), RecordingNotifier::new());
        let snap = plugin.edit_setting("streakCount", " 12 ").unwrap();
        assert_eq!(snap.streak_count, 12);
        assert_eq!(plugin.store().data().unwrap()["streakCount"], 12);

        plugin.edit_setting("badge_count", "4").unwrap();
        assert_eq!(plugin.state().badge_count, 4);
    }

    #[test]
    fn edit_setting_rejects_non_numeric() {
        let mut plugin = plugin_with(json!({ "streakCount": 5 }));
        let err = plugin.edit_setting("streakCount", "five").unwrap_err();
        assert!(matches!(
            err,
            CoreError::CorruptState(CorruptStateError::InvalidSetting { .. })
        ));
        assert!(plugin.edit_setting("streakCount", "-1").is_err());
        assert_eq!(plugin.state().streak_count, 5);
        assert_eq!(plugin.store().save_count(), 0);
    }

    #[test]
    fn edit_setting_rejects_unknown_field() {
        let mut plugin = plugin_with(json!({}));
        assert!(matches!(
            plugin.edit_setting("milestones", "1"),
            Err(CoreError::CorruptState(CorruptStateError::UnknownField(_)))
        ));
    }

    #[test]
    fn status_does_not_mutate() {
        let mut plugin = plugin_with(json!({ "streakCount": 2, "lastNoteDate": "2024-01-02" }));
        let snap = plugin.status();
        assert_eq!(snap.streak_count, 2);
        assert_eq!(plugin.store().save_count(), 0);
        assert_eq!(plugin.notifier().messages().len(), 1);
    }

    #[test]
    fn setting_field_metadata() {
        assert_eq!(SettingField::parse("streak_count").unwrap(), SettingField::StreakCount);
        assert_eq!(SettingField::BadgeCount.key(), "badgeCount");
        assert_eq!(SettingField::StreakCount.name(), "Current Streak");
    }
}
