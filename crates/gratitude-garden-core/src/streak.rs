//! Consecutive-day journaling streaks.
//!
//! Entries are bucketed by calendar day in the time zone of the `now` passed
//! in, so callers decide whether day boundaries are local or UTC. A streak
//! stays alive through the current day: if nothing has been written today the
//! count starts from yesterday.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::journal::Entry;
use crate::profile::Profile;

/// A streak that was alive at the last refresh and has since lapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakBreak {
    pub previous_streak: u32,
}

fn entry_days<Tz: TimeZone>(entries: &[Entry], tz: &Tz) -> BTreeSet<NaiveDate> {
    entries
        .iter()
        .map(|e| e.created_at.with_timezone(tz).date_naive())
        .collect()
}

/// Number of consecutive days, ending today or yesterday, with an entry.
///
/// Several entries on one day count once.
pub fn calculate_streak<Tz: TimeZone>(entries: &[Entry], now: DateTime<Tz>) -> u32 {
    if entries.is_empty() {
        return 0;
    }

    let days = entry_days(entries, &now.timezone());
    let today = now.date_naive();
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    for day in days.iter().rev() {
        if *day > cursor {
            // future-dated entry
            continue;
        }
        if *day < cursor {
            break;
        }
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

/// Recompute the profile's streak and entry counters.
///
/// Returns the current streak. Persisting the profile is up to the caller.
pub fn update_streak_state<Tz: TimeZone>(
    profile: &mut Profile,
    entries: &[Entry],
    now: DateTime<Tz>,
) -> u32 {
    let current = calculate_streak(entries, now);
    profile.current_streak = current;
    profile.longest_streak = profile.longest_streak.max(current);
    profile.total_entries = u32::try_from(entries.len()).unwrap_or(u32::MAX);
    debug!(
        current,
        longest = profile.longest_streak,
        total = profile.total_entries,
        "streak updated"
    );
    current
}

/// Detect a streak that lapsed since the profile was last updated.
pub fn check_streak_break<Tz: TimeZone>(
    profile: &Profile,
    entries: &[Entry],
    now: DateTime<Tz>,
) -> Option<StreakBreak> {
    if profile.current_streak > 0 && calculate_streak(entries, now) == 0 {
        Some(StreakBreak {
            previous_streak: profile.current_streak,
        })
    } else {
        None
    }
}

/// Reward multiplier for a streak length.
pub fn streak_bonus(streak: u32) -> f64 {
    match streak {
        30.. => 3.0,
        14.. => 2.5,
        7.. => 2.0,
        3.. => 1.5,
        _ => 1.0,
    }
}
