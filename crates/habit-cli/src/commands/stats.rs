//! Stats command for habit statistics.
//!
//! `habit stats <name>` shows one habit's aggregate numbers; omitting the
//! name shows the all-habits overview. Both have JSON variants.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use habit_core::{HabitStats, TrendDirection, User, compute_stats, count_since};
use habit_db::Database;

use super::chart::progress_bar;
use super::resolve_habit;

/// Overview line for one habit.
#[derive(Debug, Serialize)]
pub struct OverviewHabit {
    pub name: String,
    pub total_entries: usize,
    pub entries_this_week: usize,
}

/// Computed overview across all of a user's habits.
#[derive(Debug, Serialize)]
pub struct Overview {
    pub email: String,
    pub habit_count: usize,
    pub total_entries: usize,
    pub entries_this_week: usize,
    pub habits: Vec<OverviewHabit>,
}

/// Gathers the all-habits overview.
pub fn overview(db: &Database, user: &User, now: DateTime<Utc>) -> Result<Overview> {
    let habits = db.list_habits(&user.id)?;
    let mut rows = Vec::with_capacity(habits.len());
    for habit in &habits {
        let entries = db.list_entries(&habit.id)?;
        rows.push(OverviewHabit {
            name: habit.name.clone(),
            total_entries: entries.len(),
            entries_this_week: count_since(&entries, now, 7),
        });
    }
    Ok(Overview {
        email: user.email.clone(),
        habit_count: rows.len(),
        total_entries: rows.iter().map(|r| r.total_entries).sum(),
        entries_this_week: rows.iter().map(|r| r.entries_this_week).sum(),
        habits: rows,
    })
}

fn trend_word(trend: TrendDirection) -> &'static str {
    trend.as_str()
}

/// Formats one habit's statistics for terminal output.
pub fn format_habit_stats(name: &str, stats: &HabitStats) -> String {
    let mut output = String::new();
    let title = format!("STATS: {name}");
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", "─".repeat(title.chars().count())).unwrap();
    writeln!(output, "Total entries:    {}", stats.total_count).unwrap();
    writeln!(output, "This week:        {}", stats.entries_this_week).unwrap();
    writeln!(output, "This month:       {}", stats.entries_this_month).unwrap();
    writeln!(output, "Average/week:     {:.1}", stats.average_per_week).unwrap();
    match stats.days_since_last {
        Some(days) => writeln!(output, "Days since last:  {days}").unwrap(),
        None => writeln!(output, "Days since last:  -").unwrap(),
    }
    let day_word = if stats.longest_streak == 1 { "day" } else { "days" };
    writeln!(
        output,
        "Longest streak:   {} {day_word}",
        stats.longest_streak
    )
    .unwrap();
    writeln!(output, "Trend:            {}", trend_word(stats.trend)).unwrap();
    output
}

/// Formats the all-habits overview for terminal output.
pub fn format_overview(overview: &Overview) -> String {
    let mut output = String::new();
    let title = format!("OVERVIEW: {}", overview.email);
    writeln!(output, "{title}").unwrap();
    writeln!(output, "{}", "─".repeat(title.chars().count())).unwrap();

    if overview.habits.is_empty() {
        writeln!(output, "No habits yet. Run 'habit habit add <name>'.").unwrap();
        return output;
    }

    writeln!(output, "Habits:             {}", overview.habit_count).unwrap();
    writeln!(output, "Total entries:      {}", overview.total_entries).unwrap();
    writeln!(output, "Entries this week:  {}", overview.entries_this_week).unwrap();
    writeln!(output).unwrap();

    let name_width = overview
        .habits
        .iter()
        .map(|h| h.name.chars().count())
        .max()
        .unwrap_or(0);
    let max_entries = overview
        .habits
        .iter()
        .map(|h| h.total_entries)
        .max()
        .unwrap_or(0);
    for habit in &overview.habits {
        let bar = progress_bar(habit.total_entries, max_entries);
        writeln!(
            output,
            "{:<name_width$}  {:>4} entries  {bar}",
            habit.name, habit.total_entries
        )
        .unwrap();
    }
    output
}

/// JSON structure for one habit's statistics.
#[derive(Debug, Serialize)]
struct JsonHabitStats<'a> {
    habit: &'a str,
    generated_at: String,
    stats: &'a HabitStats,
}

/// Runs the stats command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    user: &User,
    habit_name: Option<&str>,
    json: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    match habit_name {
        Some(name) => {
            let habit = resolve_habit(db, user, name)?;
            let entries = db.list_entries(&habit.id)?;
            let stats = compute_stats(&entries, now);
            if json {
                let report = JsonHabitStats {
                    habit: &habit.name,
                    generated_at: now.to_rfc3339(),
                    stats: &stats,
                };
                writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                write!(writer, "{}", format_habit_stats(&habit.name, &stats))?;
            }
        }
        None => {
            let overview = overview(db, user, now)?;
            if json {
                writeln!(writer, "{}", serde_json::to_string_pretty(&overview)?)?;
            } else {
                write!(writer, "{}", format_overview(&overview))?;
            }
        }
    }
    Ok(())
}
