//! Signed-in session persistence.
//!
//! The sign-in flow is local-only: "signing in" records which email is
//! active so subsequent commands know whose habits to operate on. The
//! email lives in a plain file under the platform state directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::state_dir;

/// Returns the default session file path.
pub fn session_file() -> Option<PathBuf> {
    state_dir().map(|p| p.join("session"))
}

/// Records the signed-in email, creating parent directories as needed.
pub fn save_to(path: &Path, email: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, email)
        .with_context(|| format!("failed to write session file {}", path.display()))?;
    Ok(())
}

/// Reads the signed-in email, if any.
pub fn load_from(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let email = contents.trim().to_string();
            Ok(if email.is_empty() { None } else { Some(email) })
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read session file {}", path.display()))
        }
    }
}

/// Removes the session file. Missing file is not an error.
pub fn clear_at(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to remove session file {}", path.display()))
        }
    }
}

/// Reads the signed-in email from the default location.
pub fn load() -> Result<Option<String>> {
    let Some(path) = session_file() else {
        return Ok(None);
    };
    load_from(&path)
}
