//! Login and logout commands.
//!
//! Sign-in is local-only: first login with a new email creates the
//! account, and the session is remembered in a state file until logout.

use std::io::Write;
use std::path::Path;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};

use habit_db::Database;

use crate::session;

/// Runs the login command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    session_path: &Path,
    email: &str,
    name: Option<&str>,
    now: DateTime<Utc>,
) -> Result<()> {
    if let Err(err) = habit_core::types::validate_email(email) {
        bail!("{err}");
    }

    let existed = db.find_user_by_email(email)?.is_some();
    let user = db.find_or_create_user(email, name, now)?;
    session::save_to(session_path, &user.email)?;

    if existed {
        writeln!(writer, "Signed in as {}", user.email)?;
    } else {
        writeln!(writer, "Welcome! Created account for {}", user.email)?;
    }
    Ok(())
}

/// Runs the logout command.
pub fn logout<W: Write>(writer: &mut W, session_path: &Path) -> Result<()> {
    session::clear_at(session_path)?;
    writeln!(writer, "Signed out.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn login_creates_account_and_session() {
        let db = Database::open_in_memory().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let session_path = temp.path().join("session");

        let mut output = Vec::new();
        run(
            &mut output,
            &db,
            &session_path,
            "alex@example.com",
            Some("Alex"),
            now(),
        )
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "Welcome! Created account for alex@example.com\n");
        assert_eq!(
            session::load_from(&session_path).unwrap(),
            Some("alex@example.com".to_string())
        );
        assert!(db.find_user_by_email("alex@example.com").unwrap().is_some());
    }

    #[test]
    fn login_reuses_existing_account() {
        let db = Database::open_in_memory().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let session_path = temp.path().join("session");
        let first = db
            .find_or_create_user("alex@example.com", None, now())
            .unwrap();

        let mut output = Vec::new();
        run(&mut output, &db, &session_path, "alex@example.com", None, now()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "Signed in as alex@example.com\n");
        let user = db
            .find_user_by_email("alex@example.com")
            .unwrap()
            .expect("user exists");
        assert_eq!(user.id, first.id);
    }

    #[test]
    fn login_rejects_invalid_email() {
        let db = Database::open_in_memory().unwrap();
        let temp = tempfile::tempdir().unwrap();
        let session_path = temp.path().join("session");

        let mut output = Vec::new();
        let err = run(&mut output, &db, &session_path, "not-an-email", None, now()).unwrap_err();
        assert!(err.to_string().contains("invalid email"));
        assert_eq!(session::load_from(&session_path).unwrap(), None);
    }

    #[test]
    fn logout_clears_session() {
        let temp = tempfile::tempdir().unwrap();
        let session_path = temp.path().join("session");
        session::save_to(&session_path, "alex@example.com").unwrap();

        let mut output = Vec::new();
        logout(&mut output, &session_path).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "Signed out.\n");
        assert_eq!(session::load_from(&session_path).unwrap(), None);
    }
}
