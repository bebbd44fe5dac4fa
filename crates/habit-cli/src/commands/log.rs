//! Log command for recording an entry against a habit.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};

use habit_core::{Entry, Intensity, User};
use habit_db::Database;

use super::resolve_habit;

/// Runs the log command.
///
/// The timestamp defaults to `now`; `--at` accepts RFC 3339.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    user: &User,
    habit_name: &str,
    note: Option<String>,
    intensity: Option<i64>,
    at: Option<&str>,
    now: DateTime<Utc>,
) -> Result<()> {
    let habit = resolve_habit(db, user, habit_name)?;

    let intensity = match intensity {
        Some(value) => match Intensity::new(value) {
            Ok(intensity) => Some(intensity),
            Err(err) => bail!("{err}"),
        },
        None => None,
    };

    let timestamp = match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .with_context(|| format!("invalid --at timestamp: {raw}"))?,
        None => now,
    };

    let entry = Entry::new(habit.id, timestamp, note, intensity);
    db.insert_entry(&entry)?;
    tracing::debug!(habit = habit_name, entry = %entry.id, "logged entry");

    writeln!(
        writer,
        "Logged '{}' at {}",
        habit.name,
        timestamp.format("%Y-%m-%d %H:%M")
    )?;
    Ok(())
}
