//! Sparse task durations.
//!
//! A duration keeps whatever unit it was expressed in: 4 hours stays
//! 4 hours and is never rewritten into days or minutes. A value with no
//! components at all is the sentinel for "unresolved".

use serde::{Deserialize, Serialize};

/// A duration as a combination of day/hour/minute components.
///
/// The serialized shape (`{"minutes": n, "hours": n, "days": n}`, fields
/// sparse) is exactly what the duration stage of the natural-language
/// resolver receives back from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
}

impl Duration {
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            minutes: Some(minutes),
            ..Self::default()
        }
    }

    pub fn from_hours(hours: u32) -> Self {
        Self {
            hours: Some(hours),
            ..Self::default()
        }
    }

    pub fn from_days(days: u32) -> Self {
        Self {
            days: Some(days),
            ..Self::default()
        }
    }

    /// Whether any component is present.
    pub fn is_resolved(&self) -> bool {
        self.minutes.is_some() || self.hours.is_some() || self.days.is_some()
    }

    /// Total length in minutes, or `None` when no component is present.
    pub fn total_minutes(&self) -> Option<i64> {
        if !self.is_resolved() {
            return None;
        }
        let minutes = i64::from(self.minutes.unwrap_or(0));
        let hours = i64::from(self.hours.unwrap_or(0));
        let days = i64::from(self.days.unwrap_or(0));
        Some(minutes + hours * 60 + days * 60 * 24)
    }
}

/// Render a total minute count in the largest unit that divides it evenly:
/// days, then hours, then minutes. Never mixes units.
pub fn minutes_to_words(minutes: i64) -> String {
    let days = minutes / (60 * 24);
    if days * 60 * 24 == minutes {
        return if days == 1 {
            "1 day".to_string()
        } else {
            format!("{days} days")
        };
    }
    let hours = minutes / 60;
    if hours * 60 == minutes {
        return if hours == 1 {
            "1 hour".to_string()
        } else {
            format!("{hours} hours")
        };
    }
    format!("{minutes} minutes")
}
