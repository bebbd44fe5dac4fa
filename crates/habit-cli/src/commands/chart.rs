//! Chart command for per-day entry counts.
//!
//! Renders the day-bucketed counts as one bar per calendar day, oldest at
//! the top, or emits them as JSON for other frontends.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use habit_core::{DayCount, User, bin_by_day};
use habit_db::Database;

use super::resolve_habit;

/// Generates a 10-character progress bar.
/// Values <5% of max get a single block for visibility.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "bar widths are tiny integers, well within f64 and usize range"
)]
pub fn progress_bar(value: usize, max: usize) -> String {
    if max == 0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value as f64 / max as f64;
    let filled = if ratio < 0.05 && value > 0 {
        // Minimum 1 for visibility
        1
    } else {
        (ratio * 10.0).round().min(10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Formats binned day counts for terminal output.
pub fn format_chart(habit_name: &str, days: u32, bins: &[DayCount]) -> String {
    let mut output = String::new();
    writeln!(output, "CHART: {habit_name} (last {days} days)").unwrap();

    let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in bins {
        let bar = progress_bar(bin.count, max);
        writeln!(output, "{}  {bar}  {:>3}", bin.day.format("%Y-%m-%d"), bin.count).unwrap();
    }
    output
}

/// JSON chart structure.
#[derive(Debug, Serialize)]
struct JsonChart<'a> {
    habit: &'a str,
    window_days: u32,
    /// Day bucketing time zone. Always UTC.
    timezone: &'static str,
    days: &'a [DayCount],
}

/// Runs the chart command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    user: &User,
    habit_name: &str,
    days: u32,
    json: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let habit = resolve_habit(db, user, habit_name)?;
    let entries = db.list_entries(&habit.id)?;
    let bins = bin_by_day(&entries, days, now);

    if json {
        let chart = JsonChart {
            habit: &habit.name,
            window_days: days,
            timezone: "UTC",
            days: &bins,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&chart)?)?;
    } else {
        write!(writer, "{}", format_chart(&habit.name, days, &bins))?;
    }
    Ok(())
}
