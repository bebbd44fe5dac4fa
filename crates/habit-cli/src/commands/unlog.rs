//! Unlog command for removing a mistakenly logged entry.
//!
//! Deletes the habit's most recent entry, mirroring how entries were
//! removed one at a time on the detail screen.

use std::io::Write;

use anyhow::{Result, bail};

use habit_core::User;
use habit_db::Database;

use super::resolve_habit;

/// Runs the unlog command.
pub fn run<W: Write>(writer: &mut W, db: &Database, user: &User, habit_name: &str) -> Result<()> {
    let habit = resolve_habit(db, user, habit_name)?;
    let entries = db.list_entries(&habit.id)?;
    let Some(last) = entries.last() else {
        bail!("no entries for '{}'", habit.name);
    };

    db.delete_entry(&last.id)?;
    tracing::debug!(habit = habit_name, entry = %last.id, "removed entry");

    writeln!(
        writer,
        "Removed entry for '{}' at {}",
        habit.name,
        last.timestamp.format("%Y-%m-%d %H:%M")
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use habit_core::{Entry, Habit};

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
    fn removes_only_the_most_recent_entry() {
        let db = Database::open_in_memory().unwrap();
        let (user, habit) = setup(&db);
        let kept = Entry::new(habit.id.clone(), at("2025-06-01T08:00:00Z"), None, None);
        db.insert_entry(&kept).unwrap();
        db.insert_entry(&Entry::new(
            habit.id.clone(),
            at("2025-06-01T10:30:00Z"),
            None,
            None,
        ))
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &db, &user, "coffee").unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Removed entry for 'coffee' at 2025-06-01 10:30\n"
        );
        assert_eq!(db.list_entries(&habit.id).unwrap(), vec![kept]);
    }

    #[test]
    fn unlog_with_no_entries_fails() {
        let db = Database::open_in_memory().unwrap();
        let (user, _habit) = setup(&db);

        let mut output = Vec::new();
        let err = run(&mut output, &db, &user, "coffee").unwrap_err();
        assert!(err.to_string().contains("no entries for 'coffee'"));
    }

    #[test]
    fn unlog_unknown_habit_fails() {
        let db = Database::open_in_memory().unwrap();
        let (user, _habit) = setup(&db);

        let mut output = Vec::new();
        let err = run(&mut output, &db, &user, "running").unwrap_err();
        assert!(err.to_string().contains("no habit named 'running'"));
    }
}
