//! Login session persistence.
//!
//! The doctor itself never needs a session; `remedy logout` clears the one
//! left behind by other tooling in `~/.remedy/session.json`.

mod store;

pub use store::{FileSessionStore, Session};

use std::path::PathBuf;

use crate::error::Result;

/// Access to the user's login session.
pub trait SessionStore {
    /// Whether a usable session exists.
    fn is_logged_in(&self) -> Result<bool>;

    /// Discard the session. Logging out twice is not an error.
    fn logout(&self) -> Result<()>;
}

/// Get the default session file path.
pub fn default_session_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".remedy")
        .join("session.json")
}
