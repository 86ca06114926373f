//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`remedy doctor check`, `remedy info`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod completions;
pub mod dispatcher;
pub mod doctor;
pub mod info;
pub mod logout;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_FAILURE, EXIT_USAGE};
