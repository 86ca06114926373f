//! Output verbosity.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything, including debug-level detail from commands.
    Verbose,
    /// Progress and status.
    #[default]
    Normal,
    /// Spinners and final status only.
    Quiet,
    /// Nothing except errors.
    Silent,
}

impl OutputMode {
    /// Mode selected by the `--verbose` / `--quiet` flags.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    pub fn shows_spinners(&self) -> bool {
        !matches!(self, Self::Silent)
    }

    /// Whether ordinary messages are printed. Quiet mode keeps only
    /// headers, final status and errors.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    pub fn shows_summary(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}
