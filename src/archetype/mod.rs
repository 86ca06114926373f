//! Project archetypes.
//!
//! An [`Archetype`] is the kind of project a directory holds, recognized by
//! its framework signature. Exactly one archetype is active for a run; it
//! decides which ailments are registered and which framework details the
//! info report shows.
//!
//! Archetypes are not mutually exclusive by their dependencies alone, so
//! [`ArchetypeResolver`] tries them in a fixed priority order and the first
//! match wins. [`Archetype::Custom`] matches anything and is always the
//! fallback.

pub mod resolver;

pub use resolver::ArchetypeResolver;

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::ailments::{extension_for, Ailment, AilmentDeps};
use crate::doctor::info::{InfoCategory, InfoItem};
use crate::probe::{dependency_version, file_exists, Manifest, Version};

/// A recognized category of project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// Ionic 4+ on Angular (`@ionic/angular`).
    Angular,
    /// Ionic 2/3 (`ionic-angular` built with `@ionic/app-scripts`).
    IonicAngular,
    /// Ionic 1 (AngularJS, vendored under `www/lib/ionic`).
    Ionic1,
    /// Anything else.
    Custom,
}

impl Archetype {
    /// Candidates in priority order, most specific first. `Custom` is the
    /// implicit fallback and is not listed.
    pub const PRIORITY: [Archetype; 3] = [
        Archetype::Angular,
        Archetype::IonicAngular,
        Archetype::Ionic1,
    ];

    /// Every archetype, fallback included.
    pub const ALL: [Archetype; 4] = [
        Archetype::Angular,
        Archetype::IonicAngular,
        Archetype::Ionic1,
        Archetype::Custom,
    ];

    /// Stable tag used in output and logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Archetype::Angular => "angular",
            Archetype::IonicAngular => "ionic-angular",
            Archetype::Ionic1 => "ionic1",
            Archetype::Custom => "custom",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Archetype::Angular => "Ionic Angular",
            Archetype::IonicAngular => "Ionic 2/3",
            Archetype::Ionic1 => "Ionic 1",
            Archetype::Custom => "Custom",
        }
    }

    /// Whether the project in `dir` looks like this archetype.
    ///
    /// Read-only: consults the manifest and marker files only.
    pub fn detect(&self, dir: &Path, manifest: Option<&Manifest>) -> bool {
        let declares = |package: &str| manifest.map(|m| m.declares(package)).unwrap_or(false);

        match self {
            Archetype::Angular => declares("@ionic/angular"),
            Archetype::IonicAngular => declares("ionic-angular"),
            Archetype::Ionic1 => {
                file_exists(dir, "www/lib/ionic/version.json") || bower_declares(dir, "ionic")
            }
            Archetype::Custom => true,
        }
    }

    /// The ailments only this archetype contributes.
    pub fn contribute_ailments(&self, deps: &AilmentDeps) -> Vec<Box<dyn Ailment>> {
        extension_for(*self)(deps)
    }

    /// Framework details for the info report.
    pub fn contribute_info(&self, dir: &Path) -> Vec<InfoItem> {
        let local = |key: &str, value: String| InfoItem::new(InfoCategory::LocalPackages, key, value);
        let installed = |package: &str| {
            dependency_version(dir, package)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "not installed".to_string())
        };

        match self {
            Archetype::Angular => vec![
                local(
                    "Ionic Framework",
                    dependency_version(dir, "@ionic/angular")
                        .map(|v| format!("@ionic/angular {}", v))
                        .unwrap_or_else(|| "not installed".to_string()),
                ),
                local("@angular/core", installed("@angular/core")),
                local(
                    "@angular-devkit/build-angular",
                    installed("@angular-devkit/build-angular"),
                ),
            ],
            Archetype::IonicAngular => vec![
                local(
                    "Ionic Framework",
                    dependency_version(dir, "ionic-angular")
                        .map(|v| format!("ionic-angular {}", v))
                        .unwrap_or_else(|| "not installed".to_string()),
                ),
                local("@ionic/app-scripts", installed("@ionic/app-scripts")),
            ],
            Archetype::Ionic1 => vec![
                local(
                    "Ionic Framework",
                    ionic1_version(dir)
                        .map(|v| format!("ionic1 {}", v))
                        .unwrap_or_else(|| "unknown".to_string()),
                ),
                local("@ionic/v1-toolkit", installed("@ionic/v1-toolkit")),
            ],
            Archetype::Custom => Vec::new(),
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

fn bower_declares(dir: &Path, package: &str) -> bool {
    let Ok(content) = fs::read_to_string(dir.join("bower.json")) else {
        return false;
    };
    let Ok(bower) = serde_json::from_str::<Value>(&content) else {
        tracing::debug!("Ignoring unparseable bower.json in {}", dir.display());
        return false;
    };
    ["dependencies", "devDependencies"]
        .iter()
        .any(|section| bower[section].get(package).is_some())
}

/// The vendored Ionic 1 version from `www/lib/ionic/version.json`.
fn ionic1_version(dir: &Path) -> Option<Version> {
    let content = fs::read_to_string(dir.join("www/lib/ionic/version.json")).ok()?;
    let value: Value = serde_json::from_str(&content).ok()?;
    value["version"].as_str().and_then(Version::parse)
}
