//! Day-bucketed entry counts for charting.
//!
//! Buckets a habit's entries into fixed-width calendar-day bins over a
//! trailing window, producing a dense (zero-filled) sequence suitable for
//! a bar chart.
//!
//! # Time zone
//!
//! The grouping key is the **UTC** calendar day of each entry's timestamp.
//! UTC is deliberate and fixed: it matches the storage format, and using
//! the ambient local zone would make chart output depend on where the
//! query runs.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::model::Entry;

/// Entry count for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Buckets entries into per-day counts over a trailing window.
///
/// Produces one [`DayCount`] per UTC calendar day from `now - window_days`
/// to `now` inclusive, ordered oldest to newest, so the output length is
/// always `window_days + 1`. Days with no entries appear with a zero
/// count. Entries outside the window are ignored.
#[must_use]
pub fn bin_by_day(entries: &[Entry], window_days: u32, now: DateTime<Utc>) -> Vec<DayCount> {
    let today = now.date_naive();
    let first_day = today - Duration::days(i64::from(window_days));

    let mut bins: Vec<DayCount> = (0..=i64::from(window_days))
        .map(|offset| DayCount {
            day: first_day + Duration::days(offset),
            count: 0,
        })
        .collect();

    for entry in entries {
        let day = entry.timestamp.date_naive();
        if day < first_day || day > today {
            continue;
        }
        // The window check above bounds the offset to 0..=window_days
        if let Ok(index) = usize::try_from((day - first_day).num_days()) {
            bins[index].count += 1;
        }
    }

    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HabitId;

    fn at(day: NaiveDate, hour: u32) -> DateTime<Utc> {
        day.and_hms_opt(hour, 0, 0).unwrap().and_utc()
    }

    fn entry_at(timestamp: DateTime<Utc>) -> Entry {
        Entry::new(HabitId::new("habit-1").unwrap(), timestamp, None, None)
    }

    fn day(ordinal: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, ordinal).unwrap()
    }

    #[test]
    fn output_length_is_window_plus_one() {
        let now = at(day(10), 12);
        for window in [0, 1, 7, 30] {
            let bins = bin_by_day(&[], window, now);
            assert_eq!(bins.len(), window as usize + 1);
        }
    }

    #[test]
    fn bins_are_ordered_oldest_to_newest_and_zero_filled() {
        let now = at(day(10), 12);
        let bins = bin_by_day(&[], 7, now);
        let days: Vec<_> = bins.iter().map(|b| b.day).collect();
        assert_eq!(days, (3..=10).map(day).collect::<Vec<_>>());
        assert!(bins.iter().all(|b| b.count == 0));
    }

    #[test]
    fn bins_entries_by_utc_day() {
        // Entries 1, 1, 2, and 5 days before now = June 10
        let now = at(day(10), 12);
        let entries = vec![
            entry_at(at(day(9), 8)),
            entry_at(at(day(9), 20)),
            entry_at(at(day(8), 13)),
            entry_at(at(day(5), 2)),
        ];

        let bins = bin_by_day(&entries, 7, now);
        let counts: Vec<_> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![0, 0, 1, 0, 0, 1, 2, 0]);
        assert_eq!(counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn sum_of_counts_equals_entries_in_window() {
        let now = at(day(20), 12);
        let entries = vec![
            entry_at(at(day(20), 1)),
            entry_at(at(day(18), 1)),
            entry_at(at(day(13), 23)), // oldest day still inside window
            entry_at(at(day(12), 23)), // outside the window
            entry_at(now + Duration::days(1)), // future, outside the window
        ];

        let bins = bin_by_day(&entries, 7, now);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn binning_is_idempotent_over_binned_input() {
        // One entry per day already - rebinning reproduces the counts
        let now = at(day(10), 12);
        let entries: Vec<_> = (4..=10).map(|d| entry_at(at(day(d), 9))).collect();

        let first = bin_by_day(&entries, 7, now);
        let rebinned: Vec<_> = first
            .iter()
            .filter(|b| b.count > 0)
            .map(|b| entry_at(at(b.day, 9)))
            .collect();
        let second = bin_by_day(&rebinned, 7, now);
        assert_eq!(first, second);
    }

    #[test]
    fn day_boundary_is_utc_midnight() {
        // 23:59 and 00:01 around midnight land in different bins
        let now = at(day(10), 12);
        let entries = vec![
            entry_at(day(8).and_hms_opt(23, 59, 0).unwrap().and_utc()),
            entry_at(day(9).and_hms_opt(0, 1, 0).unwrap().and_utc()),
        ];

        let bins = bin_by_day(&entries, 2, now);
        let counts: Vec<_> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 0]);
    }

    #[test]
    fn zero_window_counts_today_only() {
        let now = at(day(10), 12);
        let entries = vec![entry_at(at(day(10), 1)), entry_at(at(day(9), 1))];
        let bins = bin_by_day(&entries, 0, now);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].day, day(10));
        assert_eq!(bins[0].count, 1);
    }
}
