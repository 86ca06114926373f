//! Node package manager detection.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::files::file_exists;

/// Every lockfile the doctor recognizes.
pub const LOCKFILES: &[&str] = &["package-lock.json", "yarn.lock", "pnpm-lock.yaml"];

/// A Node package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Detect the package manager from the lockfile present, defaulting to npm.
    pub fn detect(project_root: &Path) -> Self {
        if file_exists(project_root, "yarn.lock") {
            Self::Yarn
        } else if file_exists(project_root, "pnpm-lock.yaml") {
            Self::Pnpm
        } else {
            Self::Npm
        }
    }

    /// Executable name.
    pub fn program(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Lockfile this manager writes.
    pub fn lockfile(&self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Arguments that install everything the manifest declares.
    pub fn install_args(&self) -> Vec<String> {
        vec!["install".to_string()]
    }

    /// Arguments that add (or upgrade) a development dependency.
    pub fn add_dev_args(&self, spec: &str) -> Vec<String> {
        match self {
            Self::Npm => vec!["install".into(), "-D".into(), spec.into()],
            Self::Yarn => vec!["add".into(), "-D".into(), spec.into()],
            Self::Pnpm => vec!["add".into(), "-D".into(), spec.into()],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            _ => Err(format!("unknown package manager: {}", s)),
        }
    }
}
