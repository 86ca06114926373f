//! Archetype-agnostic ailments registered for every project.

use crate::doctor::ProjectContext;
use crate::probe::package_manager::LOCKFILES;
use crate::probe::{any_file_exists, dependency_version, dir_exists};

use super::ailment::{Ailment, AilmentId, Severity, TreatmentStep};
use super::deps::AilmentDeps;
use super::steps::install_step;

/// Package name of the locally installable CLI.
pub const CLI_PACKAGE: &str = "@ionic/cli";

/// The base set, in registration order.
pub fn ailments(deps: &AilmentDeps) -> Vec<Box<dyn Ailment>> {
    vec![
        Box::new(OutdatedLocalCli { deps: deps.clone() }),
        Box::new(MissingLockfile { deps: deps.clone() }),
        Box::new(MissingNodeModules { deps: deps.clone() }),
        Box::new(GitNotUsed),
    ]
}

/// The locally installed CLI is older than the published `latest`.
pub struct OutdatedLocalCli {
    deps: AilmentDeps,
}

impl Ailment for OutdatedLocalCli {
    fn id(&self) -> AilmentId {
        AilmentId::new("outdated-local-cli")
    }

    fn summary(&self) -> &str {
        "Local CLI tooling is out of date"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        // A CLI that is not installed locally cannot be outdated locally.
        let Some(installed) = dependency_version(ctx.dir(), CLI_PACKAGE) else {
            return Ok(false);
        };
        let latest = self.deps.versions.latest_version(CLI_PACKAGE)?;
        tracing::debug!("{}: installed {}, latest {}", CLI_PACKAGE, installed, latest);
        Ok(installed.is_older_than(&latest))
    }

    fn guidance(&self, ctx: &ProjectContext) -> String {
        let pm = self.deps.package_manager_for(ctx.dir());
        format!(
            "The {} installed in this project is older than the latest release. \
             Update it with: {} {}",
            CLI_PACKAGE,
            pm.program(),
            pm.add_dev_args(&format!("{}@latest", CLI_PACKAGE)).join(" ")
        )
    }

    fn treatable(&self) -> bool {
        true
    }

    fn treatment_steps(&self) -> Vec<TreatmentStep> {
        let deps = self.deps.clone();
        vec![TreatmentStep::new(
            format!("Install the latest {} as a dev dependency", CLI_PACKAGE),
            move |ctx| {
                let pm = deps.package_manager_for(ctx.dir());
                let args = pm.add_dev_args(&format!("{}@latest", CLI_PACKAGE));
                deps.runner.run(ctx.dir(), pm.program(), &args)
            },
        )
        .with_verify(|ctx| dependency_version(ctx.dir(), CLI_PACKAGE).is_some())]
    }
}

/// The manifest exists but no lockfile pins the dependency tree.
pub struct MissingLockfile {
    deps: AilmentDeps,
}

impl Ailment for MissingLockfile {
    fn id(&self) -> AilmentId {
        AilmentId::new("missing-lockfile")
    }

    fn summary(&self) -> &str {
        "No lockfile found"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        Ok(ctx.manifest().is_some() && any_file_exists(ctx.dir(), LOCKFILES).is_none())
    }

    fn guidance(&self, ctx: &ProjectContext) -> String {
        let pm = self.deps.package_manager_for(ctx.dir());
        format!(
            "Without a lockfile every install may resolve different dependency versions. \
             Run '{} install' and commit {}.",
            pm.program(),
            pm.lockfile()
        )
    }

    fn treatable(&self) -> bool {
        true
    }

    fn treatment_steps(&self) -> Vec<TreatmentStep> {
        vec![install_step(&self.deps)
            .with_verify(|ctx| any_file_exists(ctx.dir(), LOCKFILES).is_some())]
    }
}

/// Dependencies are declared but were never installed.
pub struct MissingNodeModules {
    deps: AilmentDeps,
}

impl Ailment for MissingNodeModules {
    fn id(&self) -> AilmentId {
        AilmentId::new("missing-node-modules")
    }

    fn summary(&self) -> &str {
        "Dependencies are not installed"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        let declared = ctx.manifest().map(|m| m.has_dependencies()).unwrap_or(false);
        Ok(declared && !dir_exists(ctx.dir(), "node_modules"))
    }

    fn guidance(&self, ctx: &ProjectContext) -> String {
        format!(
            "package.json declares dependencies but node_modules is missing. Run '{} install'.",
            self.deps.package_manager_for(ctx.dir())
        )
    }

    fn treatable(&self) -> bool {
        true
    }

    fn treatment_steps(&self) -> Vec<TreatmentStep> {
        vec![install_step(&self.deps).with_verify(|ctx| dir_exists(ctx.dir(), "node_modules"))]
    }
}

/// The project is not under git version control.
pub struct GitNotUsed;

impl Ailment for GitNotUsed {
    fn id(&self) -> AilmentId {
        AilmentId::new("git-not-used")
    }

    fn summary(&self) -> &str {
        "Project is not tracked by git"
    }

    fn severity(&self) -> Severity {
        Severity::Hint
    }

    fn detect(&self, ctx: &ProjectContext) -> anyhow::Result<bool> {
        Ok(!ctx.dir().ancestors().any(|p| p.join(".git").exists()))
    }

    fn guidance(&self, _ctx: &ProjectContext) -> String {
        "Version control makes every treatment reversible. Run 'git init' and commit \
         before applying fixes."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ailments::testing::{fake_deps, RecordingRunner};
    use crate::archetype::Archetype;
    use crate::probe::Version;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn project(manifest: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), manifest).unwrap();
        temp
    }

    fn install(root: &std::path::Path, package: &str, version: &str) {
        let dir = root.join("node_modules").join(package);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("package.json"),
            format!(r#"{{"version": "{}"}}"#, version),
        )
        .unwrap();
    }

    fn ctx(temp: &TempDir) -> ProjectContext {
        ProjectContext::new(temp.path(), Archetype::Custom)
    }

    #[test]
    fn base_set_ids_are_stable() {
        let deps = fake_deps(None, Arc::new(RecordingRunner::default()));
        let ids: Vec<String> = ailments(&deps).iter().map(|a| a.id().0).collect();
        assert_eq!(
            ids,
            vec![
                "outdated-local-cli",
                "missing-lockfile",
                "missing-node-modules",
                "git-not-used"
            ]
        );
    }

    #[test]
    fn outdated_cli_detected_against_latest() {
        let temp = project("{}");
        install(temp.path(), CLI_PACKAGE, "4.0.0");
        let deps = fake_deps(Some(Version::new(4, 1, 0)), Arc::new(RecordingRunner::default()));
        let ailment = OutdatedLocalCli { deps };

        assert!(ailment.detect(&ctx(&temp)).unwrap());
    }

    #[test]
    fn current_cli_not_detected() {
        let temp = project("{}");
        install(temp.path(), CLI_PACKAGE, "4.1.0");
        let deps = fake_deps(Some(Version::new(4, 1, 0)), Arc::new(RecordingRunner::default()));

        assert!(!OutdatedLocalCli { deps }.detect(&ctx(&temp)).unwrap());
    }

    #[test]
    fn cli_not_installed_is_not_applicable() {
        let temp = project("{}");
        let deps = fake_deps(None, Arc::new(RecordingRunner::default()));

        assert!(!OutdatedLocalCli { deps }.detect(&ctx(&temp)).unwrap());
    }

    #[test]
    fn registry_failure_surfaces_as_probe_error() {
        let temp = project("{}");
        install(temp.path(), CLI_PACKAGE, "4.0.0");
        let deps = fake_deps(None, Arc::new(RecordingRunner::default()));

        assert!(OutdatedLocalCli { deps }.detect(&ctx(&temp)).is_err());
    }

    #[test]
    fn outdated_cli_treatment_uses_package_manager() {
        let temp = project("{}");
        let runner = Arc::new(RecordingRunner::default());
        let ailment = OutdatedLocalCli {
            deps: fake_deps(None, runner.clone()),
        };

        ailment.treatment_steps()[0].apply(&ctx(&temp)).unwrap();

        assert_eq!(runner.calls(), vec!["npm install -D @ionic/cli@latest"]);
    }

    #[test]
    fn missing_lockfile_detection() {
        let temp = project("{}");
        let ailment = MissingLockfile {
            deps: fake_deps(None, Arc::new(RecordingRunner::default())),
        };
        assert!(ailment.detect(&ctx(&temp)).unwrap());

        fs::write(temp.path().join("package-lock.json"), "{}").unwrap();
        assert!(!ailment.detect(&ctx(&temp)).unwrap());
    }

    #[test]
    fn missing_lockfile_needs_manifest() {
        let temp = TempDir::new().unwrap();
        let ailment = MissingLockfile {
            deps: fake_deps(None, Arc::new(RecordingRunner::default())),
        };
        assert!(!ailment.detect(&ctx(&temp)).unwrap());
    }

    #[test]
    fn missing_node_modules_detection() {
        let temp = project(r#"{"dependencies": {"ionic-angular": "3.9.2"}}"#);
        let ailment = MissingNodeModules {
            deps: fake_deps(None, Arc::new(RecordingRunner::default())),
        };
        assert!(ailment.detect(&ctx(&temp)).unwrap());

        fs::create_dir(temp.path().join("node_modules")).unwrap();
        assert!(!ailment.detect(&ctx(&temp)).unwrap());
    }

    #[test]
    fn no_dependencies_means_no_node_modules_needed() {
        let temp = project(r#"{"name": "bare"}"#);
        let ailment = MissingNodeModules {
            deps: fake_deps(None, Arc::new(RecordingRunner::default())),
        };
        assert!(!ailment.detect(&ctx(&temp)).unwrap());
    }

    #[test]
    fn git_detection_checks_ancestors() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let nested = temp.path().join("app");
        fs::create_dir(&nested).unwrap();

        let ctx = ProjectContext::new(&nested, Archetype::Custom);
        assert!(!GitNotUsed.detect(&ctx).unwrap());
        assert!(!GitNotUsed.treatable());
    }
}
