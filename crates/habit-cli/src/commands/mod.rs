//! CLI subcommand implementations.

pub mod chart;
pub mod entries;
pub mod habit;
pub mod log;
pub mod login;
pub mod stats;
pub mod status;
pub mod unlog;

use anyhow::{Context, Result};
use habit_core::{Habit, User};
use habit_db::Database;

/// Resolves the signed-in user from a session email.
pub fn current_user(db: &Database, session_email: Option<&str>) -> Result<User> {
    let email = session_email.context("not signed in; run 'habit login <email>'")?;
    db.find_user_by_email(email)?
        .with_context(|| format!("no account for {email}; run 'habit login {email}'"))
}

/// Resolves one of the user's habits by name.
pub fn resolve_habit(db: &Database, user: &User, name: &str) -> Result<Habit> {
    db.find_habit_by_name(&user.id, name)?
        .with_context(|| format!("no habit named '{name}'; run 'habit habit list'"))
}
