//! Streak badges.

use serde::{Deserialize, Serialize};

/// Badges awarded when the streak reaches a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    /// Seven consecutive days.
    WeekStreak,
    /// Thirty consecutive days.
    MonthStreak,
}

impl BadgeKind {
    /// Every badge, in award-check order.
    pub const ALL: [BadgeKind; 2] = [BadgeKind::WeekStreak, BadgeKind::MonthStreak];

    /// Streak length at which this badge is awarded.
    pub fn threshold(&self) -> u32 {
        match self {
            BadgeKind::WeekStreak => 7,
            BadgeKind::MonthStreak => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BadgeKind::WeekStreak => "1 Week Streak",
            BadgeKind::MonthStreak => "1 Month Streak",
        }
    }

    /// Notification text shown when the badge is earned.
    pub fn award_message(&self) -> String {
        let emoji = match self {
            BadgeKind::WeekStreak => "🥳",
            BadgeKind::MonthStreak => "🎉",
        };
        format!("{emoji} You earned the {} Badge!", self.label())
    }

    /// Badges whose threshold is exactly `streak`.
    ///
    /// Thresholds are matched by equality, so a streak that runs past a
    /// threshold never re-awards it.
    pub fn earned_at(streak: u32) -> impl Iterator<Item = BadgeKind> {
        Self::ALL.into_iter().filter(move |b| b.threshold() == streak)
    }
}
