//! Installed package resolution.
//!
//! Mirrors Node's lookup: a package required from `dir` is searched for in
//! `dir/node_modules`, then in the `node_modules` of every ancestor. A
//! dependency hoisted into a parent workspace is therefore still found.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::version::Version;

#[derive(Deserialize)]
struct InstalledPackage {
    version: Option<String>,
}

/// The `node_modules` directories searched from `dir`, nearest first.
///
/// Directories that are themselves named `node_modules` are skipped so a
/// lookup never produces `node_modules/node_modules`.
pub fn node_modules_paths(dir: &Path) -> Vec<PathBuf> {
    dir.ancestors()
        .filter(|p| p.file_name().map(|n| n != "node_modules").unwrap_or(true))
        .map(|p| p.join("node_modules"))
        .collect()
}

/// Locate `<package>/package.json` along the resolution path.
pub fn resolve_package_manifest(dir: &Path, package: &str) -> Option<PathBuf> {
    node_modules_paths(dir)
        .into_iter()
        .map(|modules| modules.join(package).join("package.json"))
        .find(|candidate| candidate.is_file())
}

/// The installed version of `package` as seen from `dir`.
///
/// Returns `None` when the package is not installed or its manifest has no
/// readable version.
pub fn dependency_version(dir: &Path, package: &str) -> Option<Version> {
    let path = resolve_package_manifest(dir, package)?;
    let content = fs::read_to_string(&path).ok()?;
    let installed: InstalledPackage = match serde_json::from_str(&content) {
        Ok(p) => p,
        Err(e) => {
            tracing::debug!("Error with {}: {}", path.display(), e);
            return None;
        }
    };
    let version = installed.version.as_deref().and_then(Version::parse);
    tracing::debug!("Resolved {} to {:?} via {}", package, version, path.display());
    version
}
