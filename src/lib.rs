//! Remedy - project health diagnostics and guided remediation.
//!
//! Remedy inspects an Ionic or Angular project, works out which kind of
//! project it is, runs a set of health checks ("ailments") against it and
//! offers step-by-step automated fixes for the ones it can treat.
//!
//! # Modules
//!
//! - [`ailments`] - The ailment trait, built-in ailments and the registry
//! - [`archetype`] - Project kinds and how they are detected
//! - [`cli`] - Command-line interface and argument parsing
//! - [`client`] - npm registry client for version lookups
//! - [`config`] - Project configuration loading
//! - [`doctor`] - Detection, reporting and treatment
//! - [`error`] - Error types and result aliases
//! - [`probe`] - Read-only filesystem and process probes
//! - [`session`] - Login session storage
//! - [`shell`] - External command execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use remedy::archetype::{Archetype, ArchetypeResolver};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("package.json"),
//!     r#"{"dependencies": {"ionic-angular": "3.9.2"}}"#,
//! ).unwrap();
//!
//! let archetype = ArchetypeResolver::new().resolve(temp.path());
//! assert_eq!(archetype, Archetype::IonicAngular);
//! ```

pub mod ailments;
pub mod archetype;
pub mod cli;
pub mod client;
pub mod config;
pub mod doctor;
pub mod error;
pub mod probe;
pub mod session;
pub mod shell;
pub mod ui;

pub use error::{RemedyError, Result};
