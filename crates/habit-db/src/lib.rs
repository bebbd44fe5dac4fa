//! Storage layer for the habit tracker.
//!
//! Provides persistence for users, habits, and entries using `rusqlite`.
//! The core crate never writes; it consumes owned collections returned by
//! the read methods here.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send`
//! but not `Sync`. A `Database` instance can be moved between threads but
//! cannot be shared without external synchronization.
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in RFC 3339 format (e.g.,
//! `2025-01-15T10:30:00.000Z`). This is the `chrono::DateTime<Utc>`
//! serialization and ensures:
//! - Lexicographic ordering matches chronological ordering
//! - Human-readable values in the database
//! - Timezone-aware (always UTC)
//!
//! ## Ownership
//!
//! `users` → `habits` → `entries` is a strict ownership tree. Foreign keys
//! are declared without `ON DELETE CASCADE`: deleting a parent is an
//! explicit multi-statement transaction that removes children first, so
//! every delete path is visible in this file.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use habit_core::{Entry, Habit, HabitId, Intensity, User, UserId};
use habit_core::types::ValidationError;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A user with this email already exists.
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp for {kind} {id}: {timestamp}")]
    TimestampParse {
        kind: &'static str,
        id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored value failed domain validation.
    #[error("invalid stored value: {0}")]
    Validation(#[from] ValidationError),
    /// The referenced row does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Latest entry timestamp for one habit, for the status screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitLastEntry {
    pub habit_id: HabitId,
    pub habit_name: String,
    pub last_entry: Option<DateTime<Utc>>,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS habits (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                color TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            );

            CREATE INDEX IF NOT EXISTS idx_habits_user ON habits(user_id);

            -- Entries table: timestamps in RFC 3339 so text ordering is
            -- chronological ordering
            CREATE TABLE IF NOT EXISTS entries (
                id TEXT PRIMARY KEY,
                habit_id TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                note TEXT,
                intensity INTEGER,
                FOREIGN KEY (habit_id) REFERENCES habits(id)
            );

            CREATE INDEX IF NOT EXISTS idx_entries_habit ON entries(habit_id);
            CREATE INDEX IF NOT EXISTS idx_entries_timestamp ON entries(timestamp);
            ",
        )?;
        Ok(())
    }

    // ========== Users ==========

    /// Inserts a new user.
    ///
    /// Fails with [`DbError::DuplicateEmail`] if the email is taken; at
    /// most one user exists per email.
    pub fn create_user(&self, user: &User) -> Result<(), DbError> {
        if self.find_user_by_email(&user.email)?.is_some() {
            return Err(DbError::DuplicateEmail(user.email.clone()));
        }
        self.conn.execute(
            "INSERT INTO users (id, email, name, created_at) VALUES (?, ?, ?, ?)",
            params![
                user.id.as_str(),
                user.email,
                user.name,
                format_timestamp(user.created_at),
            ],
        )?;
        Ok(())
    }

    /// Looks a user up by email, the unique sign-in key.
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, email, name, created_at FROM users WHERE email = ?",
                [email],
                |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        email: row.get(1)?,
                        name: row.get(2)?,
                        created_at: row.get(3)?,
                    })
                },
            )
            .optional()?;
        row.map(UserRow::into_user).transpose()
    }

    /// Returns the user for this email, creating one if none exists.
    ///
    /// This is the sign-in primitive: the flow is local-only, so a first
    /// sign-in doubles as sign-up.
    pub fn find_or_create_user(
        &self,
        email: &str,
        name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<User, DbError> {
        if let Some(existing) = self.find_user_by_email(email)? {
            return Ok(existing);
        }
        let user = User::new(email, name.map(str::to_string), now)?;
        self.create_user(&user)?;
        tracing::debug!(email, "created user");
        Ok(user)
    }

    /// Deletes a user and everything it owns.
    ///
    /// Entries, habits, and the user row are removed in one transaction.
    pub fn delete_user(&mut self, user_id: &UserId) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        let entries = tx.execute(
            "DELETE FROM entries WHERE habit_id IN (SELECT id FROM habits WHERE user_id = ?)",
            [user_id.as_str()],
        )?;
        let habits = tx.execute("DELETE FROM habits WHERE user_id = ?", [user_id.as_str()])?;
        let users = tx.execute("DELETE FROM users WHERE id = ?", [user_id.as_str()])?;
        if users == 0 {
            return Err(DbError::NotFound {
                kind: "user",
                id: user_id.to_string(),
            });
        }
        tx.commit()?;
        tracing::debug!(user = %user_id, habits, entries, "deleted user");
        Ok(())
    }

    // ========== Habits ==========

    /// Inserts a new habit.
    pub fn create_habit(&self, habit: &Habit) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO habits (id, user_id, name, description, color, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ",
            params![
                habit.id.as_str(),
                habit.user_id.as_str(),
                habit.name,
                habit.description,
                habit.color,
                format_timestamp(habit.created_at),
            ],
        )?;
        Ok(())
    }

    /// Lists a user's habits, newest first.
    pub fn list_habits(&self, user_id: &UserId) -> Result<Vec<Habit>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, user_id, name, description, color, created_at
            FROM habits
            WHERE user_id = ?
            ORDER BY created_at DESC, id ASC
            ",
        )?;
        let rows = stmt.query_map([user_id.as_str()], habit_row)?;
        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?.into_habit()?);
        }
        Ok(habits)
    }

    /// Fetches a habit by ID.
    pub fn get_habit(&self, habit_id: &HabitId) -> Result<Option<Habit>, DbError> {
        let row = self
            .conn
            .query_row(
                "
                SELECT id, user_id, name, description, color, created_at
                FROM habits
                WHERE id = ?
                ",
                [habit_id.as_str()],
                habit_row,
            )
            .optional()?;
        row.map(HabitRow::into_habit).transpose()
    }

    /// Finds a user's habit by name.
    ///
    /// Names are the human handle on the CLI, so lookup is scoped to one
    /// user and exact-match.
    pub fn find_habit_by_name(
        &self,
        user_id: &UserId,
        name: &str,
    ) -> Result<Option<Habit>, DbError> {
        let row = self
            .conn
            .query_row(
                "
                SELECT id, user_id, name, description, color, created_at
                FROM habits
                WHERE user_id = ? AND name = ?
                ",
                params![user_id.as_str(), name],
                habit_row,
            )
            .optional()?;
        row.map(HabitRow::into_habit).transpose()
    }

    /// Deletes a habit and its entries in one transaction.
    pub fn delete_habit(&mut self, habit_id: &HabitId) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        let entries = tx.execute(
            "DELETE FROM entries WHERE habit_id = ?",
            [habit_id.as_str()],
        )?;
        let habits = tx.execute("DELETE FROM habits WHERE id = ?", [habit_id.as_str()])?;
        if habits == 0 {
            return Err(DbError::NotFound {
                kind: "habit",
                id: habit_id.to_string(),
            });
        }
        tx.commit()?;
        tracing::debug!(habit = %habit_id, entries, "deleted habit");
        Ok(())
    }

    // ========== Entries ==========

    /// Inserts a new entry.
    pub fn insert_entry(&self, entry: &Entry) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO entries (id, habit_id, timestamp, note, intensity)
            VALUES (?, ?, ?, ?, ?)
            ",
            params![
                entry.id.as_str(),
                entry.habit_id.as_str(),
                format_timestamp(entry.timestamp),
                entry.note,
                entry.intensity.map(Intensity::value),
            ],
        )?;
        Ok(())
    }

    /// Lists a habit's entries ordered by timestamp then ID.
    ///
    /// Ascending order is what the statistics functions expect; display
    /// layers reverse it for newest-first listings.
    pub fn list_entries(&self, habit_id: &HabitId) -> Result<Vec<Entry>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, habit_id, timestamp, note, intensity
            FROM entries
            WHERE habit_id = ?
            ORDER BY timestamp ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([habit_id.as_str()], |row| {
            Ok(EntryRow {
                id: row.get(0)?,
                habit_id: row.get(1)?,
                timestamp: row.get(2)?,
                note: row.get(3)?,
                intensity: row.get(4)?,
            })
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry()?);
        }
        Ok(entries)
    }

    /// Deletes a single entry by ID.
    pub fn delete_entry(&self, entry_id: &habit_core::EntryId) -> Result<(), DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?", [entry_id.as_str()])?;
        if deleted == 0 {
            return Err(DbError::NotFound {
                kind: "entry",
                id: entry_id.to_string(),
            });
        }
        Ok(())
    }

    /// Lists the last entry timestamp per habit for one user.
    ///
    /// Habits with no entries appear with `None`, ordered most recent
    /// first, then by name.
    pub fn last_entry_times(&self, user_id: &UserId) -> Result<Vec<HabitLastEntry>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT habits.id, habits.name, MAX(entries.timestamp) AS last_entry
            FROM habits
            LEFT JOIN entries ON entries.habit_id = habits.id
            WHERE habits.user_id = ?
            GROUP BY habits.id
            ORDER BY last_entry DESC, habits.name ASC
            ",
        )?;
        let rows = stmt.query_map([user_id.as_str()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;
        let mut habits = Vec::new();
        for row in rows {
            let (id, name, last_entry) = row?;
            let last_entry = last_entry
                .map(|raw| parse_timestamp(&raw, "habit", &id))
                .transpose()?;
            habits.push(HabitLastEntry {
                habit_id: HabitId::new(id)?,
                habit_name: name,
                last_entry,
            });
        }
        Ok(habits)
    }
}

/// Raw user row before domain conversion.
struct UserRow {
    id: String,
    email: String,
    name: Option<String>,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, DbError> {
        let created_at = parse_timestamp(&self.created_at, "user", &self.id)?;
        Ok(User {
            id: UserId::new(self.id)?,
            email: self.email,
            name: self.name,
            created_at,
        })
    }
}

/// Raw habit row before domain conversion.
struct HabitRow {
    id: String,
    user_id: String,
    name: String,
    description: Option<String>,
    color: String,
    created_at: String,
}

fn habit_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HabitRow> {
    Ok(HabitRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        color: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl HabitRow {
    fn into_habit(self) -> Result<Habit, DbError> {
        let created_at = parse_timestamp(&self.created_at, "habit", &self.id)?;
        Ok(Habit {
            id: HabitId::new(self.id)?,
            user_id: UserId::new(self.user_id)?,
            name: self.name,
            description: self.description,
            color: self.color,
            created_at,
        })
    }
}

/// Raw entry row before domain conversion.
struct EntryRow {
    id: String,
    habit_id: String,
    timestamp: String,
    note: Option<String>,
    intensity: Option<i64>,
}

impl EntryRow {
    fn into_entry(self) -> Result<Entry, DbError> {
        let timestamp = parse_timestamp(&self.timestamp, "entry", &self.id)?;
        Ok(Entry {
            id: habit_core::EntryId::new(self.id)?,
            habit_id: HabitId::new(self.habit_id)?,
            timestamp,
            note: self.note,
            // Clamp rather than fail: lenient with hand-edited databases
            intensity: self.intensity.map(Intensity::clamped),
        })
    }
}

fn parse_timestamp(
    timestamp: &str,
    kind: &'static str,
    id: &str,
) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            kind,
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
