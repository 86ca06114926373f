//! The doctor: detection, reporting and treatment of project ailments.
//!
//! This module provides:
//! - [`ProjectContext`] for the project under examination
//! - [`Doctor`], the run state machine
//! - [`detect_all`] for bounded concurrent detection
//! - [`TreatmentExecutor`] for running treatment steps
//! - The info report ([`gather_info`])
//!
//! # Example
//!
//! ```
//! use remedy::doctor::{Doctor, DoctorOptions, DoctorState, ProjectContext};
//! use remedy::ailments::AilmentRegistry;
//! use remedy::archetype::Archetype;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let ctx = ProjectContext::new(temp.path(), Archetype::Custom);
//! let registry = AilmentRegistry::new(Archetype::Custom);
//!
//! let mut doctor = Doctor::new(registry, ctx, DoctorOptions::default());
//! let report = doctor.detect();
//!
//! assert!(report.is_clean());
//! assert_eq!(doctor.state(), DoctorState::Clean);
//! ```

pub mod context;
pub mod detect;
pub mod info;
pub mod orchestrator;
pub mod report;
pub mod summary;
pub mod treatment;

pub use context::ProjectContext;
pub use detect::{detect_all, detect_one, CancellationToken, Detection};
pub use info::{gather_info, render_info, InfoCategory, InfoItem};
pub use orchestrator::{Doctor, DoctorOptions, DoctorState, DEFAULT_CONCURRENCY};
pub use report::{DiagnosticReport, Finding, UnknownProbe};
pub use summary::TreatmentSummary;
pub use treatment::{SkipReason, TreatmentExecutor, TreatmentOutcome};
