//! Ailments specific to Ionic 4+ projects on the Angular CLI.

use crate::archetype::Archetype;
use crate::doctor::ProjectContext;
use crate::probe::file_exists;

use super::ailment::{Ailment, AilmentId, Severity, TreatmentStep};
use super::deps::AilmentDeps;
use super::steps::{install_step, manifest_step};

const BUILD_DEVKIT: &str = "@angular-devkit/build-angular";
const BUILD_DEVKIT_RANGE: &str = "^0.13.0";
const WORKSPACE_CONFIG: &str = "angular.json";

pub fn ailments(deps: &AilmentDeps) -> Vec<Box<dyn Ailment>> {
    vec![
        Box::new(MissingBuildDevkit { deps: deps.clone() }),
        Box::new(MissingWorkspaceConfig),
    ]
}

/// The Angular build builder is not declared.
pub struct MissingBuildDevkit {
    deps: AilmentDeps,
}

impl Ailment for MissingBuildDevkit {
    fn id(&self) -> AilmentId {
        AilmentId::new("angular-missing-build-devkit")
    }

    fn summary(&self) -> &str {
        "Angular build builder is not installed"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn archetypes(&self) -> &[Archetype] {
        &[Archetype::Angular]
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        Ok(ctx.manifest().is_some_and(|m| !m.declares(BUILD_DEVKIT)))
    }

    fn guidance(&self, ctx: &ProjectContext) -> String {
        let pm = self.deps.package_manager_for(ctx.dir());
        format!(
            "{} builds the app for the Angular CLI. Install it with: {} {}",
            BUILD_DEVKIT,
            pm.program(),
            pm.add_dev_args(&format!("{}@{}", BUILD_DEVKIT, BUILD_DEVKIT_RANGE))
                .join(" ")
        )
    }

    fn treatable(&self) -> bool {
        true
    }

    fn treatment_steps(&self) -> Vec<TreatmentStep> {
        vec![
            manifest_step(
                format!("Add {} to devDependencies", BUILD_DEVKIT),
                |m| {
                    if !m.declares(BUILD_DEVKIT) {
                        m.set_declared_version(BUILD_DEVKIT, BUILD_DEVKIT_RANGE);
                    }
                },
                |m| m.declares(BUILD_DEVKIT),
            ),
            install_step(&self.deps),
        ]
    }
}

/// The Angular CLI workspace file is missing.
pub struct MissingWorkspaceConfig;

impl Ailment for MissingWorkspaceConfig {
    fn id(&self) -> AilmentId {
        AilmentId::new("angular-missing-workspace-config")
    }

    fn summary(&self) -> &str {
        "angular.json is missing"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn archetypes(&self) -> &[Archetype] {
        &[Archetype::Angular]
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        Ok(!file_exists(ctx.dir(), WORKSPACE_CONFIG))
    }

    fn guidance(&self, _ctx: &ProjectContext) -> String {
        format!(
            "The Angular CLI needs {} at the project root. Restore it from version \
             control or regenerate it from a fresh starter.",
            WORKSPACE_CONFIG
        )
    }
}
