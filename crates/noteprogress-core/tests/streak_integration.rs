//! Integration tests for daily streak tracking and badge awards.

use chrono::{Duration, NaiveDate};
use noteprogress_core::{
    BadgeKind, MemoryStore, NoteProgressPlugin, ProgressState, RecordingNotifier, StreakOutcome,
    StreakTracker,
};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_first_week_scenario() {
    let mut tracker = StreakTracker::default();
    assert_eq!(tracker.state(), &ProgressState::default());

    let snap = tracker.record_note_taken(day("2024-01-01"));
    assert_eq!((snap.streak_count, snap.badge_count, snap.milestone_count), (1, 0, 0));
    assert_eq!(tracker.state().last_note_date, Some(day("2024-01-01")));

    let snap = tracker.record_note_taken(day("2024-01-02"));
    assert_eq!((snap.streak_count, snap.badge_count, snap.milestone_count), (2, 0, 0));
    assert_eq!(tracker.state().last_note_date, Some(day("2024-01-02")));

    let mut week_badges = 0;
    for offset in 2..7 {
        let snap = tracker.record_note_taken(day("2024-01-01") + Duration::days(offset));
        week_badges += snap
            .new_badges
            .iter()
            .filter(|b| **b == BadgeKind::WeekStreak)
            .count();
    }
    assert_eq!(tracker.state().streak_count, 7);
    assert_eq!(tracker.state().badge_count, 1);
    assert_eq!(week_badges, 1);

    // Three days skipped: streak starts over, badge stays.
    let snap = tracker.record_note_taken(day("2024-01-10"));
    assert_eq!(snap.outcome, StreakOutcome::Reset);
    assert_eq!(snap.streak_count, 1);
    assert_eq!(snap.badge_count, 1);
}

#[test]
fn test_thirty_day_run_through_plugin() {
    let mut plugin = NoteProgressPlugin::load(MemoryStore::new(), RecordingNotifier::new())
        .with_summary(false);
    let start = day("2024-03-01");

    let mut awarded = Vec::new();
    for offset in 0..31 {
        let snap = plugin.track_note(start + Duration::days(offset));
        awarded.extend(snap.new_badges);
    }

    assert_eq!(awarded, vec![BadgeKind::WeekStreak, BadgeKind::MonthStreak]);
    assert_eq!(plugin.state().streak_count, 31);
    assert_eq!(plugin.state().badge_count, 2);
    assert_eq!(
        plugin.notifier().messages(),
        [
            "🥳 You earned the 1 Week Streak Badge!",
            "🎉 You earned the 1 Month Streak Badge!",
        ]
    );
    assert_eq!(plugin.store().save_count(), 31);
}

#[test]
fn test_streak_restart_can_earn_week_badge_again() {
    let mut tracker = StreakTracker::default();
    let start = day("2024-06-01");
    for offset in 0..7 {
        tracker.record_note_taken(start + Duration::days(offset));
    }
    assert_eq!(tracker.state().badge_count, 1);

    let restart = start + Duration::days(20);
    for offset in 0..7 {
        tracker.record_note_taken(restart + Duration::days(offset));
    }
    assert_eq!(tracker.state().streak_count, 7);
    assert_eq!(tracker.state().badge_count, 2);
}

#[test]
fn test_repeated_invocations_same_day() {
    let mut plugin = NoteProgressPlugin::load(MemoryStore::new(), RecordingNotifier::new());
    let today = day("2024-02-10");
    let first = plugin.track_note(today);
    for _ in 0..5 {
        let again = plugin.track_note(today);
        assert_eq!(again.streak_count, first.streak_count);
        assert_eq!(again.badge_count, first.badge_count);
        assert_eq!(again.outcome, StreakOutcome::Unchanged);
    }
    assert_eq!(plugin.state().last_note_date, Some(today));
}
