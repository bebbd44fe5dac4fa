//! Habit statistics.
//!
//! Pure aggregate functions over a habit's entry collection. Every function
//! takes the reference clock as an explicit `now` argument so results are
//! deterministic; calendar-day arithmetic is done in UTC throughout.
//!
//! All functions are total for well-formed input: an empty collection
//! yields zeros, `None`, and [`TrendDirection::Stable`] rather than errors.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::model::Entry;
use crate::types::TrendDirection;

/// Window used for the weekly average, in days.
const AVERAGE_WINDOW_DAYS: i64 = 28;

/// Minimum entry count before a trend is classified.
const TREND_MIN_ENTRIES: usize = 4;

/// Computed statistics for one habit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitStats {
    /// Total number of entries ever logged.
    pub total_count: usize,

    /// Entries in the trailing 7-day window.
    pub entries_this_week: usize,

    /// Entries in the trailing 30-day window.
    pub entries_this_month: usize,

    /// Entries per week over the trailing 28-day window.
    pub average_per_week: f64,

    /// Whole days since the most recent entry, by UTC calendar-day
    /// truncation. `None` when no entries exist.
    pub days_since_last: Option<i64>,

    /// Longest run of consecutive UTC calendar days with at least one
    /// entry each.
    pub longest_streak: i64,

    /// Direction of recent activity.
    pub trend: TrendDirection,
}

impl HabitStats {
    /// Statistics for a habit with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_count: 0,
            entries_this_week: 0,
            entries_this_month: 0,
            average_per_week: 0.0,
            days_since_last: None,
            longest_streak: 0,
            trend: TrendDirection::Stable,
        }
    }
}

/// Counts entries with a timestamp at or after `now - days`.
#[must_use]
pub fn count_since(entries: &[Entry], now: DateTime<Utc>, days: i64) -> usize {
    let cutoff = now - Duration::days(days);
    entries.iter().filter(|e| e.timestamp >= cutoff).count()
}

/// Computes all statistics for one habit's entries.
///
/// The entries need not be sorted; ordering is handled internally.
#[must_use]
pub fn compute_stats(entries: &[Entry], now: DateTime<Utc>) -> HabitStats {
    if entries.is_empty() {
        return HabitStats::empty();
    }

    HabitStats {
        total_count: entries.len(),
        entries_this_week: count_since(entries, now, 7),
        entries_this_month: count_since(entries, now, 30),
        average_per_week: average_per_week(entries, now),
        days_since_last: days_since_last(entries, now),
        longest_streak: longest_streak(entries),
        trend: trend(entries, now),
    }
}

/// Entries per week over the trailing 28-day window.
///
/// Divides by `max(1, whole_weeks)` so a window spanning under one week
/// never divides by zero.
#[expect(
    clippy::cast_precision_loss,
    reason = "entry counts are far below f64 precision limits"
)]
fn average_per_week(entries: &[Entry], now: DateTime<Utc>) -> f64 {
    let recent = count_since(entries, now, AVERAGE_WINDOW_DAYS);
    let whole_weeks = (AVERAGE_WINDOW_DAYS / 7).max(1);
    recent as f64 / whole_weeks as f64
}

/// Whole days between `now` and the most recent entry.
///
/// Uses calendar-day truncation, so an entry late last night counts as one
/// day ago this morning. Future-dated entries clamp to zero.
fn days_since_last(entries: &[Entry], now: DateTime<Utc>) -> Option<i64> {
    let last = entries.iter().map(|e| e.timestamp).max()?;
    let days = (now.date_naive() - last.date_naive()).num_days();
    Some(days.max(0))
}

/// Longest run of consecutive UTC calendar days with at least one entry.
///
/// Multiple entries on the same day count once. A single entry is a streak
/// of one.
fn longest_streak(entries: &[Entry]) -> i64 {
    let mut days: Vec<_> = entries.iter().map(|e| e.timestamp.date_naive()).collect();
    days.sort_unstable();
    days.dedup();

    let mut longest: i64 = 0;
    let mut current: i64 = 0;
    let mut previous = None;
    for day in days {
        current = match previous {
            Some(prev) if day == prev + Duration::days(1) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }
    longest
}

/// Classifies the recent trend by comparing the two most recent weeks.
///
/// Compares entry counts in `[now-14d, now-7d)` against `[now-7d, now)`.
/// Fewer than four total entries is too little signal, so the result
/// defaults to [`TrendDirection::Stable`].
fn trend(entries: &[Entry], now: DateTime<Utc>) -> TrendDirection {
    if entries.len() < TREND_MIN_ENTRIES {
        return TrendDirection::Stable;
    }

    let two_weeks_ago = now - Duration::days(14);
    let one_week_ago = now - Duration::days(7);
    let previous_week = entries
        .iter()
        .filter(|e| e.timestamp >= two_weeks_ago && e.timestamp < one_week_ago)
        .count();
    let this_week = entries
        .iter()
        .filter(|e| e.timestamp >= one_week_ago && e.timestamp < now)
        .count();

    match this_week.cmp(&previous_week) {
        std::cmp::Ordering::Greater => TrendDirection::Increasing,
        std::cmp::Ordering::Less => TrendDirection::Decreasing,
        std::cmp::Ordering::Equal => TrendDirection::Stable,
    }
}
