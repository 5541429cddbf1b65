//! Garden weather: a mood indicator derived from recent journaling.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::journal::Entry;

/// Trailing window used to measure recent activity.
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Weather {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Stormy,
    Rainbow,
}

impl Weather {
    /// Gameplay multiplier for this weather.
    pub fn bonus(&self) -> f64 {
        match self {
            Weather::Rainbow => 1.5,
            Weather::Sunny => 1.3,
            Weather::PartlyCloudy => 1.1,
            Weather::Cloudy => 1.0,
            Weather::Rainy => 0.9,
            Weather::Stormy => 0.8,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Weather::Sunny => "☀️",
            Weather::PartlyCloudy => "⛅",
            Weather::Cloudy => "☁️",
            Weather::Rainy => "🌧️",
            Weather::Stormy => "⛈️",
            Weather::Rainbow => "🌈",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::PartlyCloudy => "Partly cloudy",
            Weather::Cloudy => "Cloudy",
            Weather::Rainy => "Rainy",
            Weather::Stormy => "Stormy",
            Weather::Rainbow => "Rainbow",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entries recorded within the trailing window, inclusive of the cutoff.
pub fn recent_entry_count(entries: &[Entry], now: DateTime<Utc>) -> usize {
    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    entries.iter().filter(|e| e.created_at >= cutoff).count()
}

/// Derive the weather from recent entry frequency and the current streak.
///
/// Rules are checked in order and the first match wins. A journal with no
/// entries at all is cloudy rather than stormy.
pub fn calculate_weather(entries: &[Entry], streak: u32, now: DateTime<Utc>) -> Weather {
    if entries.is_empty() {
        return Weather::Cloudy;
    }

    let recent = recent_entry_count(entries, now);
    let frequency = recent as f64 / RECENT_WINDOW_DAYS as f64;

    if streak >= 30 && recent >= 7 {
        Weather::Rainbow
    } else if streak >= 14 && recent >= 5 {
        Weather::Sunny
    } else if frequency >= 0.7 {
        Weather::PartlyCloudy
    } else if frequency >= 0.4 {
        Weather::Cloudy
    } else if recent == 0 {
        Weather::Stormy
    } else {
        Weather::Rainy
    }
}

/// Multiplier lookup, for callers that only hold the weather value.
pub fn weather_bonus(weather: Weather) -> f64 {
    weather.bonus()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries_days_ago(now: DateTime<Utc>, days: &[i64]) -> Vec<Entry> {
        days.iter()
            .map(|d| Entry::new("note", now - Duration::days(*d)).unwrap())
            .collect()
    }

    #[test]
    fn no_entries_is_cloudy() {
        assert_eq!(calculate_weather(&[], 0, Utc::now()), Weather::Cloudy);
    }

    #[test]
    fn long_streak_with_daily_entries_is_rainbow() {
        let now = Utc::now();
        let entries = entries_days_ago(now, &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(calculate_weather(&entries, 30, now), Weather::Rainbow);
    }

    #[test]
    fn two_week_streak_with_five_recent_is_sunny() {
        let now = Utc::now();
        let entries = entries_days_ago(now, &[0, 1, 2, 3, 4]);
        assert_eq!(calculate_weather(&entries, 14, now), Weather::Sunny);
    }

    #[test]
    fn frequency_bands() {
        let now = Utc::now();
        // 5/7 ~ 0.71
        assert_eq!(
            calculate_weather(&entries_days_ago(now, &[0, 1, 2, 3, 4]), 0, now),
            Weather::PartlyCloudy
        );
        // 3/7 ~ 0.43
        assert_eq!(
            calculate_weather(&entries_days_ago(now, &[0, 1, 2]), 0, now),
            Weather::Cloudy
        );
        // 1/7
        assert_eq!(
            calculate_weather(&entries_days_ago(now, &[3]), 0, now),
            Weather::Rainy
        );
    }

    #[test]
    fn old_entries_only_is_stormy() {
        let now = Utc::now();
        let entries = entries_days_ago(now, &[8, 20]);
        assert_eq!(calculate_weather(&entries, 0, now), Weather::Stormy);
    }

    #[test]
    fn cutoff_is_inclusive() {
        let now = Utc::now();
        let entries = entries_days_ago(now, &[7]);
        assert_eq!(recent_entry_count(&entries, now), 1);
    }

    #[test]
    fn bonus_table() {
        assert_eq!(weather_bonus(Weather::Rainbow), 1.5);
        assert_eq!(weather_bonus(Weather::Stormy), 0.8);
        assert_eq!(weather_bonus(Weather::Cloudy), 1.0);
    }

    #[test]
    fn serializes_like_the_stored_ids() {
        assert_eq!(
            serde_json::to_string(&Weather::PartlyCloudy).unwrap(),
            "\"partlyCloudy\""
        );
    }
}
