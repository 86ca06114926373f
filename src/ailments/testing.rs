//! Fakes shared by unit tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::archetype::Archetype;
use crate::doctor::ProjectContext;
use crate::error::{RemedyError, Result};
use crate::probe::Version;

use super::ailment::{Ailment, AilmentId, Severity, TreatmentStep};
use super::deps::{AilmentDeps, CommandRunner, VersionLookup};

/// Answers every lookup with a fixed version, or fails when there is none.
pub(crate) struct FakeVersions {
    latest: Option<Version>,
}

impl VersionLookup for FakeVersions {
    fn latest_version(&self, package: &str) -> Result<Version> {
        self.latest.clone().ok_or_else(|| {
            RemedyError::Other(anyhow::anyhow!("registry unavailable for {}", package))
        })
    }
}

/// Records every command instead of running it.
#[derive(Default)]
pub(crate) struct RecordingRunner {
    calls: Mutex<Vec<String>>,
}

impl RecordingRunner {
    /// Commands run so far, as `program arg...`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, _dir: &Path, program: &str, args: &[String]) -> anyhow::Result<()> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.calls.lock().unwrap().push(line);
        Ok(())
    }
}

pub(crate) fn fake_deps(latest: Option<Version>, runner: Arc<RecordingRunner>) -> AilmentDeps {
    AilmentDeps::new(Arc::new(FakeVersions { latest }), runner)
}

/// What a [`FixedAilment`] probe does.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Probe {
    Returns(bool),
    Fails,
    Panics,
    /// Applies on the first probe, fails on every later one.
    FailsAfterFirst,
}

/// An ailment with a scripted probe and no treatment.
pub(crate) struct FixedAilment {
    id: String,
    severity: Severity,
    archetypes: Vec<Archetype>,
    probe: Probe,
    treatable: bool,
    pub(crate) detections: Arc<AtomicUsize>,
}

impl FixedAilment {
    pub(crate) fn new(id: &str, applies: bool) -> Self {
        Self::probing(id, Probe::Returns(applies))
    }

    pub(crate) fn probing(id: &str, probe: Probe) -> Self {
        Self {
            id: id.to_string(),
            severity: Severity::Warning,
            archetypes: Archetype::ALL.to_vec(),
            probe,
            treatable: false,
            detections: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn for_archetypes(mut self, archetypes: &[Archetype]) -> Self {
        self.archetypes = archetypes.to_vec();
        self
    }

    pub(crate) fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Claim an automated fix with no steps.
    pub(crate) fn with_treatment(mut self) -> Self {
        self.treatable = true;
        self
    }
}

impl Ailment for FixedAilment {
    fn id(&self) -> AilmentId {
        AilmentId::new(self.id.as_str())
    }

    fn summary(&self) -> &str {
        "fixed"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    fn detect(&self, _ctx: &ProjectContext) -> anyhow::Result<bool> {
        let earlier = self.detections.fetch_add(1, Ordering::SeqCst);
        match self.probe {
            Probe::Returns(applies) => Ok(applies),
            Probe::Fails => anyhow::bail!("probe exploded"),
            Probe::Panics => panic!("probe panicked"),
            Probe::FailsAfterFirst if earlier == 0 => Ok(true),
            Probe::FailsAfterFirst => anyhow::bail!("probe failed on re-check"),
        }
    }

    fn guidance(&self, _ctx: &ProjectContext) -> String {
        format!("fix {}", self.id)
    }

    fn treatable(&self) -> bool {
        self.treatable
    }
}

/// Applies while `marker` is absent from the project; its steps come from
/// the caller.
pub(crate) struct MarkerAilment {
    id: String,
    marker: String,
    severity: Severity,
    steps: Box<dyn Fn() -> Vec<TreatmentStep> + Send + Sync>,
}

impl MarkerAilment {
    pub(crate) fn new<F>(id: &str, marker: &str, steps: F) -> Self
    where
        F: Fn() -> Vec<TreatmentStep> + Send + Sync + 'static,
    {
        Self {
            id: id.to_string(),
            marker: marker.to_string(),
            severity: Severity::Error,
            steps: Box::new(steps),
        }
    }

    pub(crate) fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// A step that creates `file` in the project.
pub(crate) fn touch_step(file: &str) -> TreatmentStep {
    let file = file.to_string();
    TreatmentStep::new(format!("create {}", file), move |ctx| {
        std::fs::write(ctx.dir().join(&file), "")?;
        Ok(())
    })
}

impl Ailment for MarkerAilment {
    fn id(&self) -> AilmentId {
        AilmentId::new(self.id.as_str())
    }

    fn summary(&self) -> &str {
        "marker missing"
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        Ok(!ctx.dir().join(&self.marker).exists())
    }

    fn guidance(&self, _ctx: &ProjectContext) -> String {
        format!("create {}", self.marker)
    }

    fn treatable(&self) -> bool {
        true
    }

    fn treatment_steps(&self) -> Vec<TreatmentStep> {
        (self.steps)()
    }
}
