//! The project a doctor run examines.

use std::fs;
use std::path::{Path, PathBuf};

use crate::archetype::{Archetype, ArchetypeResolver};
use crate::error::{RemedyError, Result};
use crate::probe::{read_manifest, Manifest};

/// Snapshot of the project directory shared by every probe of a run.
///
/// The manifest is read once; treatment steps that rewrite it must be
/// followed by [`ProjectContext::reload_manifest`] so later verification
/// sees the new content.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    dir: PathBuf,
    archetype: Archetype,
    manifest: Option<Manifest>,
}

impl ProjectContext {
    /// Build a context for a known archetype.
    pub fn new(dir: impl Into<PathBuf>, archetype: Archetype) -> Self {
        let dir = dir.into();
        let manifest = read_manifest(&dir);
        Self {
            dir,
            archetype,
            manifest,
        }
    }

    /// Build a context, resolving the archetype with the default resolver.
    pub fn resolve(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::resolve_with(dir, &ArchetypeResolver::new())
    }

    /// Build a context with an explicit resolver.
    ///
    /// Fails with [`RemedyError::ProjectUnreadable`] if `dir` is not a
    /// readable directory.
    pub fn resolve_with(dir: impl Into<PathBuf>, resolver: &ArchetypeResolver) -> Result<Self> {
        let dir = dir.into();
        if fs::read_dir(&dir).is_err() {
            return Err(RemedyError::ProjectUnreadable { path: dir });
        }

        let manifest = read_manifest(&dir);
        let archetype = resolver.resolve_with(&dir, manifest.as_ref());
        Ok(Self {
            dir,
            archetype,
            manifest,
        })
    }

    /// Project root.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The archetype active for this run.
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// The manifest as last read, if present and parseable.
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    /// Re-read the manifest from disk.
    pub fn reload_manifest(&mut self) {
        self.manifest = read_manifest(&self.dir);
    }
}
