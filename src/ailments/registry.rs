//! Ailment registry.
//!
//! The [`AilmentRegistry`] holds the ailments of one run, keyed by id and
//! kept in registration order. Registration order is the tie-breaker in
//! reports, so unlike a plain map the registry never reorders entries.

use std::collections::HashMap;

use crate::archetype::Archetype;
use crate::error::{RemedyError, Result};

use super::ailment::{Ailment, AilmentId};
use super::base;
use super::deps::AilmentDeps;

/// The ailments registered for one archetype.
pub struct AilmentRegistry {
    archetype: Archetype,
    ailments: Vec<Box<dyn Ailment>>,
    index: HashMap<AilmentId, usize>,
}

impl AilmentRegistry {
    /// Create an empty registry for an archetype.
    pub fn new(archetype: Archetype) -> Self {
        Self {
            archetype,
            ailments: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The base set followed by the archetype's extension.
    ///
    /// Fails if the extension reuses an id already registered.
    pub fn for_archetype(archetype: Archetype, deps: &AilmentDeps) -> Result<Self> {
        let mut registry = Self::new(archetype);
        registry.register_all(base::ailments(deps))?;
        registry.register_all(archetype.contribute_ailments(deps))?;
        tracing::debug!(
            "Registered {} ailments for {} project",
            registry.len(),
            archetype
        );
        Ok(registry)
    }

    /// Register an ailment.
    ///
    /// Returns `Ok(false)` if the ailment does not apply to this registry's
    /// archetype and was skipped.
    pub fn register(&mut self, ailment: Box<dyn Ailment>) -> Result<bool> {
        let id = ailment.id();
        if self.index.contains_key(&id) {
            return Err(RemedyError::DuplicateAilment { id: id.0 });
        }
        if !ailment.applies_to(self.archetype) {
            tracing::debug!("Skipping {}: not applicable to {}", id, self.archetype);
            return Ok(false);
        }
        self.index.insert(id, self.ailments.len());
        self.ailments.push(ailment);
        Ok(true)
    }

    /// Register several ailments in order.
    pub fn register_all(&mut self, ailments: Vec<Box<dyn Ailment>>) -> Result<()> {
        for ailment in ailments {
            self.register(ailment)?;
        }
        Ok(())
    }

    /// The archetype this registry was composed for.
    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    /// Get an ailment by id.
    pub fn get(&self, id: &AilmentId) -> Option<&dyn Ailment> {
        self.index.get(id).map(|&i| self.ailments[i].as_ref())
    }

    /// Position of an ailment in registration order.
    pub fn position(&self, id: &AilmentId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Ailment> {
        self.ailments.iter().map(|a| a.as_ref())
    }

    /// Resolve requested ids, failing on the first unknown one.
    pub fn select(&self, ids: &[String]) -> Result<Vec<&dyn Ailment>> {
        ids.iter()
            .map(|id| {
                self.get(&AilmentId::new(id.as_str()))
                    .ok_or_else(|| RemedyError::UnknownAilment { id: id.clone() })
            })
            .collect()
    }

    /// Number of registered ailments.
    pub fn len(&self) -> usize {
        self.ailments.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.ailments.is_empty()
    }
}

impl std::fmt::Debug for AilmentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AilmentRegistry")
            .field("archetype", &self.archetype)
            .field(
                "ailments",
                &self.iter().map(|a| a.id().0).collect::<Vec<_>>(),
            )
            .finish()
    }
}
