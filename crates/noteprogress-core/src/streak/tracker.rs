//! Daily streak state machine.
//!
//! [`StreakTracker::record_note_taken`] is the only transition:
//!
//! ```text
//! never tracked  --(any day)------------>  streak = 1
//! last = D       --(D)------------------>  unchanged
//! last = D       --(D + 1)-------------->  streak + 1
//! last = D       --(D + n, n > 1)------->  streak = 1
//! last = D       --(before D)----------->  unchanged, date not rewound
//! ```
//!
//! After every streak update each badge whose threshold equals the new
//! streak is awarded. The tracker does no I/O; persisting and announcing the
//! result is the caller's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::badge::BadgeKind;
use super::state::ProgressState;

/// What a call to [`StreakTracker::record_note_taken`] did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    /// First tracked day ever.
    Started,
    /// Consecutive day.
    Extended,
    /// Gap of two or more days; the streak starts over.
    Reset,
    /// Same day, or a day before the last tracked one.
    Unchanged,
}

/// Progress after a tracking call.
///
/// Serialized with the same camelCase keys as [`ProgressState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub streak_count: u32,
    pub badge_count: u32,
    pub milestone_count: u32,
    pub last_note_date: Option<NaiveDate>,
    pub outcome: StreakOutcome,
    /// Badges earned by this call.
    pub new_badges: Vec<BadgeKind>,
}

impl ProgressSnapshot {
    fn of(state: &ProgressState, outcome: StreakOutcome, new_badges: Vec<BadgeKind>) -> Self {
        Self {
            streak_count: state.streak_count,
            badge_count: state.badge_count,
            milestone_count: state.milestone_count,
            last_note_date: state.last_note_date,
            outcome,
            new_badges,
        }
    }

    /// Three-line progress summary shown after every tracking command.
    pub fn summary(&self) -> String {
        format!(
            "🔥 Streak: {} days\n🏅 Badges: {}\n🎯 Milestones: {}",
            self.streak_count, self.badge_count, self.milestone_count
        )
    }
}

/// Owns the progress state and applies daily tracking to it.
#[derive(Debug, Clone, Default)]
pub struct StreakTracker {
    state: ProgressState,
}

impl StreakTracker {
    pub fn new(state: ProgressState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Mutable access for manual settings edits. Streak tracking must go
    /// through [`record_note_taken`](Self::record_note_taken).
    pub(crate) fn state_mut(&mut self) -> &mut ProgressState {
        &mut self.state
    }

    /// Current progress without changing anything.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::of(&self.state, StreakOutcome::Unchanged, Vec::new())
    }

    /// Record that a note was taken on `today`.
    pub fn record_note_taken(&mut self, today: NaiveDate) -> ProgressSnapshot {
        let outcome = match self.state.last_note_date {
            None => {
                self.state.streak_count = 1;
                StreakOutcome::Started
            }
            Some(last) => {
                let diff_days = (today - last).num_days();
                if diff_days == 1 {
                    self.state.streak_count = self.state.streak_count.saturating_add(1);
                    StreakOutcome::Extended
                } else if diff_days > 1 {
                    self.state.streak_count = 1;
                    StreakOutcome::Reset
                } else {
                    if diff_days < 0 {
                        tracing::warn!(
                            %today,
                            last_note_date = %last,
                            "note date is before the last tracked day; ignoring"
                        );
                    }
                    return self.snapshot();
                }
            }
        };

        self.state.last_note_date = Some(today);
        tracing::debug!(?outcome, streak = self.state.streak_count, %today, "streak updated");

        let new_badges = self.award_badges();
        ProgressSnapshot::of(&self.state, outcome, new_badges)
    }

    fn award_badges(&mut self) -> Vec<BadgeKind> {
        let earned: Vec<BadgeKind> = BadgeKind::earned_at(self.state.streak_count).collect();
        for badge in &earned {
            self.state.badge_count = self.state.badge_count.saturating_add(1);
            tracing::info!(badge = badge.label(), total = self.state.badge_count, "badge earned");
        }
        earned
    }
}
