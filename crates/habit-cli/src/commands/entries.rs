//! Entries command for listing a habit's logged entries.

use std::io::Write;

use anyhow::Result;

use habit_core::User;
use habit_db::Database;

use super::resolve_habit;

/// Runs the entries command, newest first.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    user: &User,
    habit_name: &str,
    limit: usize,
) -> Result<()> {
    let habit = resolve_habit(db, user, habit_name)?;
    let entries = db.list_entries(&habit.id)?;

    if entries.is_empty() {
        writeln!(writer, "No entries for '{}'.", habit.name)?;
        return Ok(());
    }

    let shown = limit.min(entries.len());
    writeln!(writer, "ENTRIES: {} ({shown} of {})", habit.name, entries.len())?;

    // Storage order is oldest first; display newest first
    for entry in entries.iter().rev().take(limit) {
        let mut line = format!("{}", entry.timestamp.format("%Y-%m-%d %H:%M"));
        if let Some(intensity) = entry.intensity {
            line.push_str(&format!("  intensity {intensity}"));
        }
        if let Some(note) = &entry.note {
            line.push_str(&format!("  {note}"));
        }
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use habit_core::{Entry, Habit, Intensity};

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn setup(db: &Database) -> (User, Habit) {
        let user = db
            .find_or_create_user("alex@example.com", None, at("2025-06-01T00:00:00Z"))
            .unwrap();
        let habit = Habit::new(
            user.id.clone(),
            "coffee",
            None,
            None,
            at("2025-06-01T00:00:00Z"),
        )
        .unwrap();
        db.create_habit(&habit).unwrap();
        (user, habit)
    }

    #[test]
    fn lists_entries_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let (user, habit) = setup(&db);
        db.insert_entry(&Entry::new(
            habit.id.clone(),
            at("2025-06-01T08:00:00Z"),
            None,
            None,
        ))
        .unwrap();
        db.insert_entry(&Entry::new(
            habit.id.clone(),
            at("2025-06-01T10:30:00Z"),
            Some("double".to_string()),
            Some(Intensity::new(6).unwrap()),
        ))
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &db, &user, "coffee", 20).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(
            output,
            "ENTRIES: coffee (2 of 2)\n\
             2025-06-01 10:30  intensity 6  double\n\
             2025-06-01 08:00\n"
        );
    }

    #[test]
    fn respects_limit() {
        let db = Database::open_in_memory().unwrap();
        let (user, habit) = setup(&db);
        for hour in 6..=10 {
            db.insert_entry(&Entry::new(
                habit.id.clone(),
                at(&format!("2025-06-01T{hour:02}:00:00Z")),
                None,
                None,
            ))
            .unwrap();
        }

        let mut output = Vec::new();
        run(&mut output, &db, &user, "coffee", 2).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("ENTRIES: coffee (2 of 5)\n"));
        assert_eq!(output.lines().count(), 3);
        assert!(output.contains("2025-06-01 10:00"));
        assert!(!output.contains("2025-06-01 06:00"));
    }

    #[test]
    fn empty_habit_prints_hint() {
        let db = Database::open_in_memory().unwrap();
        let (user, _habit) = setup(&db);

        let mut output = Vec::new();
        run(&mut output, &db, &user, "coffee", 20).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No entries for 'coffee'.\n"
        );
    }
}
