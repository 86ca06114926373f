//! Ailments specific to Ionic 1 projects.

use crate::archetype::Archetype;
use crate::doctor::ProjectContext;
use crate::probe::dir_exists;

use super::ailment::{Ailment, AilmentId, Severity};
use super::deps::AilmentDeps;

const VENDOR_DIR: &str = "www/lib/ionic";

pub fn ailments(_deps: &AilmentDeps) -> Vec<Box<dyn Ailment>> {
    vec![Box::new(MissingLib)]
}

/// The vendored framework directory is gone.
pub struct MissingLib;

impl Ailment for MissingLib {
    fn id(&self) -> AilmentId {
        AilmentId::new("ionic1-missing-lib")
    }

    fn summary(&self) -> &str {
        "Vendored Ionic library is missing"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn archetypes(&self) -> &[Archetype] {
        &[Archetype::Ionic1]
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        Ok(!dir_exists(ctx.dir(), VENDOR_DIR))
    }

    fn guidance(&self, _ctx: &ProjectContext) -> String {
        format!(
            "Ionic 1 apps load the framework from {}. Reinstall it with 'bower install' \
             or copy it back from version control.",
            VENDOR_DIR
        )
    }
}
