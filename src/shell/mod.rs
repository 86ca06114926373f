//! Process execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{display_command, ShellRunner};
pub use platform::is_ci;
