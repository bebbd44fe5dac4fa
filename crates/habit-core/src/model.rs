//! Entity definitions.
//!
//! Ownership is strictly tree-shaped: a [`User`] owns [`Habit`]s, and a
//! [`Habit`] owns [`Entry`]s. There are no cycles and no shared ownership;
//! deleting a parent deletes its children (the storage layer implements
//! this as an explicit multi-step transaction).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EntryId, HabitId, Intensity, UserId, ValidationError};

/// Default display color for new habits.
pub const DEFAULT_COLOR: &str = "#007AFF";

/// A signed-in person. Looked up by email, which is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with a fresh ID.
    ///
    /// The email must be non-empty and contain an '@'.
    pub fn new(
        email: impl Into<String>,
        name: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        crate::types::validate_email(&email)?;
        Ok(Self {
            id: UserId::generate(),
            email,
            name,
            created_at,
        })
    }
}

/// A tracked habit, owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    /// Display token for the UI layer (hex color).
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Creates a habit with a fresh ID.
    ///
    /// The name must be non-empty. A missing color falls back to
    /// [`DEFAULT_COLOR`].
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        description: Option<String>,
        color: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::Empty { field: "habit name" });
        }
        Ok(Self {
            id: HabitId::generate(),
            user_id,
            name,
            description,
            color: color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
            created_at,
        })
    }
}

/// A single logged occurrence against a habit.
///
/// Immutable once created; the only mutation is deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub habit_id: HabitId,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
    pub intensity: Option<Intensity>,
}

impl Entry {
    /// Creates an entry with a fresh ID.
    #[must_use]
    pub fn new(
        habit_id: HabitId,
        timestamp: DateTime<Utc>,
        note: Option<String>,
        intensity: Option<Intensity>,
    ) -> Self {
        Self {
            id: EntryId::generate(),
            habit_id,
            timestamp,
            note,
            intensity,
        }
    }
}
