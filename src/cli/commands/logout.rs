//! The `remedy logout` command.

use crate::error::Result;
use crate::session::SessionStore;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Clears the stored login session.
pub struct LogoutCommand<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> LogoutCommand<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: SessionStore> Command for LogoutCommand<S> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.store.is_logged_in()? {
            ui.message("You are already logged out.");
            return Ok(CommandResult::success());
        }

        self.store.logout()?;
        tracing::info!("Session cleared");
        ui.success("You are logged out.");
        Ok(CommandResult::success())
    }
}
