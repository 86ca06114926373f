//! Ailments specific to Ionic 2/3 projects built with `@ionic/app-scripts`.

use crate::archetype::Archetype;
use crate::doctor::ProjectContext;
use crate::probe::{dependency_version, Version};

use super::ailment::{Ailment, AilmentId, Severity, TreatmentStep};
use super::deps::AilmentDeps;
use super::steps::{install_step, manifest_step};

const BUILD_TOOL: &str = "@ionic/app-scripts";
const FRAMEWORK: &str = "ionic-angular";
const DEFAULT_BUILD_SCRIPT: &str = "ionic-app-scripts build";

/// Oldest build tool release that is still supported.
const MIN_BUILD_TOOL: Version = Version::new(3, 2, 0);
/// Range written by the build tool treatment.
const BUILD_TOOL_RANGE: &str = "^3.2.4";
/// Last framework release of the 3.x line.
const LATEST_FRAMEWORK: Version = Version::new(3, 9, 2);

pub fn ailments(deps: &AilmentDeps) -> Vec<Box<dyn Ailment>> {
    vec![
        Box::new(DeprecatedBuildTool { deps: deps.clone() }),
        Box::new(DefaultBuildScript),
        Box::new(OutdatedFramework),
    ]
}

/// The declared `@ionic/app-scripts` predates the supported line.
pub struct DeprecatedBuildTool {
    deps: AilmentDeps,
}

impl Ailment for DeprecatedBuildTool {
    fn id(&self) -> AilmentId {
        AilmentId::new("ionic-angular-deprecated-build-tool")
    }

    fn summary(&self) -> &str {
        "Build tooling is deprecated"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn archetypes(&self) -> &[Archetype] {
        &[Archetype::IonicAngular]
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        let declared = ctx
            .manifest()
            .and_then(|m| m.declared_version(BUILD_TOOL))
            .and_then(Version::from_range);
        Ok(declared.is_some_and(|v| v.is_older_than(&MIN_BUILD_TOOL)))
    }

    fn guidance(&self, ctx: &ProjectContext) -> String {
        format!(
            "{} releases before {} are no longer supported. Set its range to \"{}\" \
             in package.json and run '{} install'.",
            BUILD_TOOL,
            MIN_BUILD_TOOL,
            BUILD_TOOL_RANGE,
            self.deps.package_manager_for(ctx.dir())
        )
    }

    fn treatable(&self) -> bool {
        true
    }

    fn treatment_steps(&self) -> Vec<TreatmentStep> {
        vec![
            manifest_step(
                format!("Set {} to {} in package.json", BUILD_TOOL, BUILD_TOOL_RANGE),
                |m| m.set_declared_version(BUILD_TOOL, BUILD_TOOL_RANGE),
                |m| m.declared_version(BUILD_TOOL) == Some(BUILD_TOOL_RANGE),
            ),
            install_step(&self.deps),
        ]
    }
}

/// The build script merely repeats what the CLI already runs.
pub struct DefaultBuildScript;

impl Ailment for DefaultBuildScript {
    fn id(&self) -> AilmentId {
        AilmentId::new("ionic-angular-default-build-script")
    }

    fn summary(&self) -> &str {
        "Redundant default build script"
    }

    fn severity(&self) -> Severity {
        Severity::Hint
    }

    fn archetypes(&self) -> &[Archetype] {
        &[Archetype::IonicAngular]
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        Ok(ctx
            .manifest()
            .and_then(|m| m.scripts.get("build"))
            .is_some_and(|script| script.trim() == DEFAULT_BUILD_SCRIPT))
    }

    fn guidance(&self, _ctx: &ProjectContext) -> String {
        format!(
            "The \"build\" script \"{}\" is the default the CLI already runs. \
             Remove it from package.json so custom build hooks are not shadowed.",
            DEFAULT_BUILD_SCRIPT
        )
    }

    fn treatable(&self) -> bool {
        true
    }

    fn treatment_steps(&self) -> Vec<TreatmentStep> {
        vec![manifest_step(
            "Remove the default build script from package.json",
            |m| {
                m.remove_script("build");
            },
            |m| !m.scripts.contains_key("build"),
        )]
    }
}

/// The installed framework is behind the last 3.x release.
pub struct OutdatedFramework;

impl Ailment for OutdatedFramework {
    fn id(&self) -> AilmentId {
        AilmentId::new("ionic-angular-outdated-framework")
    }

    fn summary(&self) -> &str {
        "Framework is out of date"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn archetypes(&self) -> &[Archetype] {
        &[Archetype::IonicAngular]
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        Ok(dependency_version(ctx.dir(), FRAMEWORK)
            .is_some_and(|installed| installed.is_older_than(&LATEST_FRAMEWORK)))
    }

    fn guidance(&self, _ctx: &ProjectContext) -> String {
        format!(
            "{} {} contains many fixes. Upgrading may require code changes; \
             follow the changelog before bumping the dependency.",
            FRAMEWORK, LATEST_FRAMEWORK
        )
    }
}
