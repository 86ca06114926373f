//! Ailments: detectable project problems and their treatments.
//!
//! Every run registers the [base set](base::ailments) followed by the
//! extension of the resolved [`Archetype`]. Extensions are looked up in a
//! static table by [`extension_for`]; an archetype without one contributes
//! nothing.

pub mod ailment;
pub mod angular;
pub mod base;
pub mod deps;
pub mod ionic1;
pub mod ionic_angular;
pub mod registry;
pub mod steps;

#[cfg(test)]
pub(crate) mod testing;

pub use ailment::{Ailment, AilmentId, Severity, TreatmentStep};
pub use deps::{AilmentDeps, CommandRunner, VersionLookup};
pub use registry::AilmentRegistry;
pub use steps::{install_step, manifest_step};

use crate::archetype::Archetype;

/// Builds the ailments an archetype adds to the base set.
pub type ExtensionFn = fn(&AilmentDeps) -> Vec<Box<dyn Ailment>>;

/// The extension registered for an archetype.
pub fn extension_for(archetype: Archetype) -> ExtensionFn {
    match archetype {
        Archetype::Angular => angular::ailments,
        Archetype::IonicAngular => ionic_angular::ailments,
        Archetype::Ionic1 => ionic1::ailments,
        Archetype::Custom => no_extension,
    }
}

fn no_extension(_deps: &AilmentDeps) -> Vec<Box<dyn Ailment>> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use testing::{fake_deps, RecordingRunner};

    #[test]
    fn custom_has_no_extension() {
        let deps = fake_deps(None, Arc::new(RecordingRunner::default()));
        assert!(extension_for(Archetype::Custom)(&deps).is_empty());
    }

    #[test]
    fn extensions_apply_to_their_archetype() {
        let deps = fake_deps(None, Arc::new(RecordingRunner::default()));
        for archetype in Archetype::PRIORITY {
            let extension = extension_for(archetype)(&deps);
            assert!(!extension.is_empty(), "{} has no extension", archetype);
            assert!(extension.iter().all(|a| a.applies_to(archetype)));
        }
    }

    #[test]
    fn ids_are_unique_across_all_sets() {
        let deps = fake_deps(None, Arc::new(RecordingRunner::default()));
        let mut seen = HashSet::new();
        let all = base::ailments(&deps)
            .into_iter()
            .chain(Archetype::ALL.into_iter().flat_map(|a| extension_for(a)(&deps)));

        for ailment in all {
            assert!(seen.insert(ailment.id()), "duplicate id {}", ailment.id());
        }
    }

    #[test]
    fn treatable_ailments_have_steps() {
        let deps = fake_deps(None, Arc::new(RecordingRunner::default()));
        let all = base::ailments(&deps)
            .into_iter()
            .chain(Archetype::ALL.into_iter().flat_map(|a| extension_for(a)(&deps)));

        for ailment in all {
            assert_eq!(
                ailment.treatable(),
                !ailment.treatment_steps().is_empty(),
                "{}",
                ailment.id()
            );
        }
    }
}
