//! File-backed session storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::{default_session_path, SessionStore};

/// A persisted login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Account the token belongs to.
    pub user: String,
    /// Bearer token; an empty token is not a login.
    pub token: String,
    /// When the login happened.
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
            created_at: Utc::now(),
        }
    }
}

/// Session stored as JSON in a single file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session, if any.
    ///
    /// A corrupt file counts as no session.
    pub fn load(&self) -> Result<Option<Session>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&json) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::debug!("Ignoring corrupt session at {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Save a session, creating the parent directory.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(session)
            .context("Failed to serialize session")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))?;
        Ok(())
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new(default_session_path())
    }
}

impl SessionStore for FileSessionStore {
    fn is_logged_in(&self) -> Result<bool> {
        Ok(self.load()?.is_some_and(|s| !s.token.is_empty()))
    }

    fn logout(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed session at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(temp: &TempDir) -> FileSessionStore {
        FileSessionStore::new(temp.path().join(".remedy").join("session.json"))
    }

    #[test]
    fn missing_file_is_logged_out() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        assert!(!store.is_logged_in().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_and_load() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let session = Session::new("dev@example.com", "tok");

        store.save(&session).unwrap();

        assert_eq!(store.load().unwrap(), Some(session));
        assert!(store.is_logged_in().unwrap());
    }

    #[test]
    fn empty_token_is_not_a_login() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.save(&Session::new("dev@example.com", "")).unwrap();

        assert!(!store.is_logged_in().unwrap());
    }

    #[test]
    fn logout_removes_session_and_is_repeatable() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        store.save(&Session::new("dev@example.com", "tok")).unwrap();

        store.logout().unwrap();
        assert!(!store.is_logged_in().unwrap());
        store.logout().unwrap();
    }

    #[test]
    fn corrupt_session_is_ignored() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(!store.is_logged_in().unwrap());
    }
}
