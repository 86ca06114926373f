//! Archetype resolution.

use std::path::Path;

use crate::probe::{read_manifest, Manifest};

use super::Archetype;

/// Resolves the archetype of a project directory.
///
/// Candidates are evaluated sequentially in priority order and evaluation
/// stops at the first match. Resolution is total: when nothing matches,
/// [`Archetype::Custom`] is returned.
#[derive(Debug, Clone)]
pub struct ArchetypeResolver {
    candidates: Vec<Archetype>,
}

impl ArchetypeResolver {
    /// Resolver with the default priority order.
    pub fn new() -> Self {
        Self {
            candidates: Archetype::PRIORITY.to_vec(),
        }
    }

    /// Resolver with an explicit priority order.
    pub fn with_candidates(candidates: Vec<Archetype>) -> Self {
        Self { candidates }
    }

    /// The candidates in evaluation order.
    pub fn candidates(&self) -> &[Archetype] {
        &self.candidates
    }

    /// Resolve the archetype of `dir`, reading its manifest.
    pub fn resolve(&self, dir: &Path) -> Archetype {
        let manifest = read_manifest(dir);
        self.resolve_with(dir, manifest.as_ref())
    }

    /// Resolve using an already-read manifest.
    pub fn resolve_with(&self, dir: &Path, manifest: Option<&Manifest>) -> Archetype {
        let resolved = self
            .candidates
            .iter()
            .copied()
            .find(|candidate| candidate.detect(dir, manifest))
            .unwrap_or(Archetype::Custom);

        tracing::debug!("Resolved {} as {} project", dir.display(), resolved);
        resolved
    }
}

impl Default for ArchetypeResolver {
    fn default() -> Self {
        Self::new()
    }
}
