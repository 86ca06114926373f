//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Remedy - health checks and guided fixes for Ionic and Angular projects.
#[derive(Debug, Parser)]
#[command(name = "remedy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; use defaults and REMEDY_PROMPT_* answers
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Maximum number of checks run at once
    #[arg(long, global = true, env = "REMEDY_CONCURRENCY", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect and treat common project issues (default: `doctor check`)
    Doctor(DoctorArgs),

    /// Print system, runtime and project information
    Info,

    /// Log out of the current session
    Logout,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `doctor` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DoctorArgs {
    #[command(subcommand)]
    pub action: Option<DoctorAction>,
}

/// What `doctor` should do.
#[derive(Debug, Clone, Default, Subcommand)]
pub enum DoctorAction {
    /// Detect issues and print a report
    #[default]
    Check,

    /// List every issue remedy knows how to detect for this project
    List,

    /// Detect issues, then fix the selected ones
    Treat(TreatArgs),
}

/// Arguments for `doctor treat`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TreatArgs {
    /// Issue ids to treat (default: every treatable issue detected)
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_treat_with_ids() {
        let cli = Cli::try_parse_from([
            "remedy",
            "doctor",
            "treat",
            "missing-lockfile",
            "git-not-used",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Doctor(DoctorArgs {
                action: Some(DoctorAction::Treat(args)),
            })) => assert_eq!(args.ids, vec!["missing-lockfile", "git-not-used"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn doctor_without_action() {
        let cli = Cli::try_parse_from(["remedy", "doctor"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Doctor(DoctorArgs { action: None }))
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "remedy",
            "doctor",
            "check",
            "--concurrency",
            "2",
            "--non-interactive",
            "--project",
            "/tmp/app",
        ])
        .unwrap();

        assert_eq!(cli.concurrency, Some(2));
        assert!(cli.non_interactive);
        assert_eq!(cli.project, Some(PathBuf::from("/tmp/app")));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(Cli::try_parse_from(["remedy", "--concurrency", "0", "info"]).is_err());
    }
}
