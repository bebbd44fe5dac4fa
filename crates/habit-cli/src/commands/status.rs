//! Status command showing where data lives and who is signed in.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};

use habit_db::Database;

/// Runs the status command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    db_path: &Path,
    session_email: Option<&str>,
    now: DateTime<Utc>,
) -> Result<()> {
    writeln!(writer, "Database:  {}", db_path.display())?;

    let Some(email) = session_email else {
        writeln!(writer, "Signed in: no (run 'habit login <email>')")?;
        return Ok(());
    };
    writeln!(writer, "Signed in: {email}")?;

    let Some(user) = db.find_user_by_email(email)? else {
        writeln!(writer, "Warning:   no account for {email}")?;
        return Ok(());
    };

    let last_entries = db.last_entry_times(&user.id)?;
    if last_entries.is_empty() {
        writeln!(writer, "Habits:    none yet")?;
        return Ok(());
    }

    writeln!(writer)?;
    let name_width = last_entries
        .iter()
        .map(|h| h.habit_name.len())
        .max()
        .unwrap_or(0);
    for habit in &last_entries {
        let last = match habit.last_entry {
            Some(timestamp) => {
                let days = (now.date_naive() - timestamp.date_naive()).num_days();
                match days {
                    days if days <= 0 => "last logged today".to_string(),
                    1 => "last logged yesterday".to_string(),
                    days => format!("last logged {days} days ago"),
                }
            }
            None => "no entries".to_string(),
        };
        writeln!(writer, "{:<name_width$}  {last}", habit.habit_name)?;
    }
    Ok(())
}
