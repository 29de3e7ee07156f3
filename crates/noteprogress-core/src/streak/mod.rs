mod badge;
mod state;
mod tracker;

pub use badge::BadgeKind;
pub use state::{
    parse_day, ProgressState, BADGE_COUNT_KEY, LAST_NOTE_DATE_KEY, MILESTONES_KEY,
    STREAK_COUNT_KEY,
};
pub use tracker::{ProgressSnapshot, StreakOutcome, StreakTracker};

/// Today's calendar date in the local timezone.
pub fn today_local() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
