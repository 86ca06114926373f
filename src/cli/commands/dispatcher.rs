//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, DoctorAction};
use crate::doctor::CancellationToken;
use crate::error::Result;
use crate::session::{default_session_path, FileSessionStore};
use crate::ui::UserInterface;

/// Exit code for an unhealthy project or a failed treatment.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a request remedy cannot act on, such as an unknown id.
pub const EXIT_USAGE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    cancel: CancellationToken,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            cancel: CancellationToken::new(),
        }
    }

    /// Share `token` with the commands that honor cancellation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Route the CLI subcommand to its implementation and execute it.
    ///
    /// Without a subcommand, `doctor check` runs.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let concurrency = cli.concurrency.map(usize::from);

        match &cli.command {
            Some(Commands::Doctor(args)) => {
                let action = args.action.clone().unwrap_or_default();
                let cmd = super::doctor::DoctorCommand::new(&self.project_root, action)
                    .with_concurrency(concurrency)
                    .with_cancellation(self.cancel.clone());
                cmd.execute(ui)
            }
            Some(Commands::Info) => {
                let cmd = super::info::InfoCommand::new(&self.project_root);
                cmd.execute(ui)
            }
            Some(Commands::Logout) => {
                let store = FileSessionStore::new(default_session_path());
                let cmd = super::logout::LogoutCommand::new(store);
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::doctor::DoctorCommand::new(&self.project_root, DoctorAction::Check)
                    .with_concurrency(concurrency)
                    .with_cancellation(self.cancel.clone());
                cmd.execute(ui)
            }
        }
    }
}
