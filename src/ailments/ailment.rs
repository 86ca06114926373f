//! Ailment definitions.
//!
//! This module provides the core types for describing a project problem:
//!
//! - [`Ailment`] - The trait every ailment implements
//! - [`AilmentId`] - Stable identifier, unique within a registry
//! - [`Severity`] - How urgent an applicable ailment is
//! - [`TreatmentStep`] - One ordered action of an automated fix

use std::fmt;

use crate::archetype::Archetype;
use crate::doctor::ProjectContext;

/// Unique identifier for an ailment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AilmentId(pub String);

impl AilmentId {
    /// Create a new ailment ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AilmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AilmentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Severity of an ailment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Worth knowing, nothing is broken.
    Hint,
    /// Likely to cause trouble soon.
    Warning,
    /// The project is broken until this is fixed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A detectable project condition, optionally paired with an automated fix.
///
/// Ailments are registered once and never mutated. `detect` may read the
/// filesystem, spawn read-only processes or call a remote API, but it must
/// not change the project: the doctor runs many detections concurrently and
/// re-runs them after treatment.
pub trait Ailment: Send + Sync {
    /// Unique identifier for this ailment.
    fn id(&self) -> AilmentId;

    /// One-line summary shown in reports.
    fn summary(&self) -> &str;

    /// Severity when the ailment applies.
    fn severity(&self) -> Severity;

    /// Archetypes this ailment can be registered for.
    fn archetypes(&self) -> &[Archetype] {
        &Archetype::ALL
    }

    /// Whether the ailment currently applies to the project.
    ///
    /// An `Err` means the probe itself failed; the doctor reports the
    /// result as unknown rather than aborting the pass.
    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool>;

    /// Explanation and manual instructions shown when the ailment applies.
    fn guidance(&self, ctx: &ProjectContext) -> String;

    /// Whether [`Ailment::treatment_steps`] yields an automated fix.
    fn treatable(&self) -> bool {
        false
    }

    /// Ordered steps of the automated fix.
    fn treatment_steps(&self) -> Vec<TreatmentStep> {
        Vec::new()
    }

    /// Whether the ailment may be registered for `archetype`.
    fn applies_to(&self, archetype: Archetype) -> bool {
        self.archetypes().contains(&archetype)
    }
}

type StepAction = Box<dyn Fn(&ProjectContext) -> anyhow::Result<()> + Send + Sync>;
type StepCheck = Box<dyn Fn(&ProjectContext) -> bool + Send + Sync>;

/// One ordered action of a treatment.
///
/// Steps of one ailment run in order and may rely on the effect of the
/// step before them. Each step must be idempotent: a treatment that
/// stopped part-way is retried from its first step.
pub struct TreatmentStep {
    description: String,
    action: StepAction,
    check: Option<StepCheck>,
}

impl TreatmentStep {
    /// Create a step from a description and an action.
    pub fn new<F>(description: impl Into<String>, action: F) -> Self
    where
        F: Fn(&ProjectContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            action: Box::new(action),
            check: None,
        }
    }

    /// Attach a post-condition evaluated after the action.
    pub fn with_verify<F>(mut self, check: F) -> Self
    where
        F: Fn(&ProjectContext) -> bool + Send + Sync + 'static,
    {
        self.check = Some(Box::new(check));
        self
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run the action.
    pub fn apply(&self, ctx: &ProjectContext) -> anyhow::Result<()> {
        (self.action)(ctx)
    }

    /// Evaluate the post-condition, if the step has one.
    pub fn verify(&self, ctx: &ProjectContext) -> Option<bool> {
        self.check.as_ref().map(|check| check(ctx))
    }

    /// Whether the step carries a post-condition.
    pub fn has_verify(&self) -> bool {
        self.check.is_some()
    }
}

impl fmt::Debug for TreatmentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreatmentStep")
            .field("description", &self.description)
            .field("has_verify", &self.has_verify())
            .finish()
    }
}
