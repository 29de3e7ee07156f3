//! The persisted progress record.
//!
//! On disk this is the host's flat key-value blob:
//!
//! ```text
//! {"streakCount": 3, "badgeCount": 0, "milestones": 0, "lastNoteDate": "2024-01-03"}
//! ```
//!
//! Loading never trusts the blob's shape. Each field is validated on its own;
//! a bad field falls back to its default and is reported as a
//! [`CorruptStateError`] while the rest of the record is kept.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CorruptStateError;

pub const STREAK_COUNT_KEY: &str = "streakCount";
pub const BADGE_COUNT_KEY: &str = "badgeCount";
pub const MILESTONES_KEY: &str = "milestones";
pub const LAST_NOTE_DATE_KEY: &str = "lastNoteDate";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Note-taking progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Consecutive days with at least one tracked note.
    #[serde(rename = "streakCount")]
    pub streak_count: u32,
    /// Badges awarded so far. Never decreases through tracking.
    #[serde(rename = "badgeCount")]
    pub badge_count: u32,
    /// Reserved; nothing increments it.
    #[serde(rename = "milestones")]
    pub milestone_count: u32,
    /// Day of the last tracked note. `None` until the first one.
    #[serde(rename = "lastNoteDate", with = "date_or_empty")]
    pub last_note_date: Option<NaiveDate>,
}

impl ProgressState {
    /// Build a state from a raw persisted record.
    ///
    /// Missing keys keep their defaults silently. Present but invalid keys
    /// keep their defaults and are returned as warnings. Unknown keys are
    /// ignored.
    pub fn from_raw(raw: &Value) -> (Self, Vec<CorruptStateError>) {
        let mut state = Self::default();
        let mut warnings = Vec::new();

        let Some(obj) = raw.as_object() else {
            warnings.push(CorruptStateError::NotAnObject);
            return (state, warnings);
        };

        let counters: [(&str, &mut u32); 3] = [
            (STREAK_COUNT_KEY, &mut state.streak_count),
            (BADGE_COUNT_KEY, &mut state.badge_count),
            (MILESTONES_KEY, &mut state.milestone_count),
        ];
        for (key, slot) in counters {
            if let Some(value) = obj.get(key) {
                match parse_counter(value) {
                    Ok(n) => *slot = n,
                    Err(reason) => warnings.push(CorruptStateError::InvalidField {
                        field: key.to_string(),
                        reason,
                    }),
                }
            }
        }

        if let Some(value) = obj.get(LAST_NOTE_DATE_KEY) {
            match parse_date(value) {
                Ok(date) => state.last_note_date = date,
                Err(reason) => warnings.push(CorruptStateError::InvalidField {
                    field: LAST_NOTE_DATE_KEY.to_string(),
                    reason,
                }),
            }
        }

        (state, warnings)
    }

    /// The record as the host persists it.
    pub fn to_raw(&self) -> Value {
        serde_json::json!({
            STREAK_COUNT_KEY: self.streak_count,
            BADGE_COUNT_KEY: self.badge_count,
            MILESTONES_KEY: self.milestone_count,
            LAST_NOTE_DATE_KEY: date_or_empty::format(self.last_note_date),
        })
    }
}

/// Parse a non-negative integer counter.
///
/// Numeric strings are accepted because the settings panel historically
/// stored the text field contents verbatim.
fn parse_counter(value: &Value) -> Result<u32, String> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u32::try_from(u).map_err(|_| format!("{u} is out of range"))
            } else if let Some(i) = n.as_i64() {
                Err(format!("{i} is negative"))
            } else {
                Err(format!("{n} is not an integer"))
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("'{s}' is not a non-negative integer")),
        Value::Null => Err("value is null (NaN)".to_string()),
        other => Err(format!("expected an integer, got {}", type_name(other))),
    }
}

/// Parse `lastNoteDate`. Empty string means "never tracked".
///
/// Full timestamps are truncated to their calendar day.
fn parse_date(value: &Value) -> Result<Option<NaiveDate>, String> {
    match value {
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
                return Ok(Some(date));
            }
            DateTime::parse_from_rfc3339(s)
                .map(|dt| Some(dt.date_naive()))
                .map_err(|_| format!("'{s}' is not a YYYY-MM-DD date"))
        }
        other => Err(format!("expected a date string, got {}", type_name(other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a user-supplied `YYYY-MM-DD` date.
pub fn parse_day(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

mod date_or_empty {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn format(date: Option<NaiveDate>) -> String {
        date.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let s = String::deserialize(d)?;
        if s.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&s, DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
