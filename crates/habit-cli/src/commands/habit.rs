//! Habit management commands: add, list, delete.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::Serialize;

use habit_core::{Habit, User};
use habit_db::Database;

use super::resolve_habit;

/// Adds a new habit for the signed-in user.
pub fn add<W: Write>(
    writer: &mut W,
    db: &Database,
    user: &User,
    name: &str,
    description: Option<String>,
    color: Option<String>,
    now: DateTime<Utc>,
) -> Result<()> {
    if db.find_habit_by_name(&user.id, name)?.is_some() {
        bail!("you already track a habit named '{name}'");
    }
    let habit = Habit::new(user.id.clone(), name, description, color, now)?;
    db.create_habit(&habit)?;
    writeln!(writer, "Added habit '{}'", habit.name)?;
    Ok(())
}

/// One habit in the JSON listing.
#[derive(Debug, Serialize)]
struct JsonHabit {
    id: String,
    name: String,
    description: Option<String>,
    color: String,
    created_at: String,
    entry_count: usize,
}

/// Lists the user's habits, newest first.
pub fn list<W: Write>(writer: &mut W, db: &Database, user: &User, json: bool) -> Result<()> {
    let habits = db.list_habits(&user.id)?;

    if json {
        let mut rows = Vec::with_capacity(habits.len());
        for habit in &habits {
            rows.push(JsonHabit {
                id: habit.id.to_string(),
                name: habit.name.clone(),
                description: habit.description.clone(),
                color: habit.color.clone(),
                created_at: habit.created_at.to_rfc3339(),
                entry_count: db.list_entries(&habit.id)?.len(),
            });
        }
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    if habits.is_empty() {
        writeln!(writer, "No habits yet. Run 'habit habit add <name>'.")?;
        return Ok(());
    }

    for habit in &habits {
        let count = db.list_entries(&habit.id)?.len();
        let noun = if count == 1 { "entry" } else { "entries" };
        match &habit.description {
            Some(description) => {
                writeln!(writer, "{}  ({count} {noun})  - {description}", habit.name)?;
            }
            None => writeln!(writer, "{}  ({count} {noun})", habit.name)?,
        }
    }
    Ok(())
}

/// Deletes a habit and all its entries.
pub fn delete<W: Write>(writer: &mut W, db: &mut Database, user: &User, name: &str) -> Result<()> {
    let habit = resolve_habit(db, user, name)?;
    let entry_count = db.list_entries(&habit.id)?.len();
    db.delete_habit(&habit.id)?;
    writeln!(
        writer,
        "Deleted habit '{}' and {entry_count} entries",
        habit.name
    )?;
    Ok(())
}
