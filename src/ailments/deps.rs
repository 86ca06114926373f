//! Capabilities ailments are constructed with.
//!
//! Ailments never reach for global state. Whatever they need beyond the
//! [`ProjectContext`](crate::doctor::ProjectContext) (a registry lookup, a
//! way to run the package manager) is injected through [`AilmentDeps`],
//! which tests replace with fakes.

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::probe::{PackageManager, Version};

/// Looks up the latest published version of a package.
pub trait VersionLookup: Send + Sync {
    /// The version tagged `latest` for `package`.
    fn latest_version(&self, package: &str) -> Result<Version>;
}

/// Runs an external program inside the project directory.
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` in `dir`, failing on a non-zero exit.
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> anyhow::Result<()>;
}

/// Dependencies shared by every ailment of a registry.
#[derive(Clone)]
pub struct AilmentDeps {
    /// Remote version lookup.
    pub versions: Arc<dyn VersionLookup>,
    /// Process runner used by treatment steps.
    pub runner: Arc<dyn CommandRunner>,
    /// Package manager override; detected from the lockfile when `None`.
    pub package_manager: Option<PackageManager>,
}

impl AilmentDeps {
    /// Create dependencies with lockfile-based package manager detection.
    pub fn new(versions: Arc<dyn VersionLookup>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            versions,
            runner,
            package_manager: None,
        }
    }

    /// Force a package manager.
    pub fn with_package_manager(mut self, package_manager: Option<PackageManager>) -> Self {
        self.package_manager = package_manager;
        self
    }

    /// The package manager to use for `dir`.
    pub fn package_manager_for(&self, dir: &Path) -> PackageManager {
        self.package_manager
            .unwrap_or_else(|| PackageManager::detect(dir))
    }
}

impl std::fmt::Debug for AilmentDeps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AilmentDeps")
            .field("package_manager", &self.package_manager)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct NoVersions;

    impl VersionLookup for NoVersions {
        fn latest_version(&self, package: &str) -> Result<Version> {
            Err(anyhow::anyhow!("no registry for {}", package).into())
        }
    }

    struct NoopRunner;

    impl CommandRunner for NoopRunner {
        fn run(&self, _dir: &Path, _program: &str, _args: &[String]) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn package_manager_detected_when_not_forced() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("yarn.lock"), "").unwrap();
        let deps = AilmentDeps::new(Arc::new(NoVersions), Arc::new(NoopRunner));

        assert_eq!(deps.package_manager_for(temp.path()), PackageManager::Yarn);
    }

    #[test]
    fn package_manager_override_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("yarn.lock"), "").unwrap();
        let deps = AilmentDeps::new(Arc::new(NoVersions), Arc::new(NoopRunner))
            .with_package_manager(Some(PackageManager::Pnpm));

        assert_eq!(deps.package_manager_for(temp.path()), PackageManager::Pnpm);
    }

    #[test]
    fn lookup_errors_are_typed() {
        assert!(NoVersions.latest_version("@ionic/cli").is_err());
    }
}
