//! `package.json` reading and rewriting.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{RemedyError, Result};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// The typed subset of `package.json` the doctor cares about.
#[derive(Debug, Clone, Default, Deserialize)]
struct ManifestFields {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    scripts: BTreeMap<String, String>,
}

/// A parsed project manifest.
///
/// The full JSON document is kept alongside the typed fields so that
/// [`Manifest::write`] preserves keys the doctor does not model, in their
/// original order.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub scripts: BTreeMap<String, String>,
    raw: Map<String, Value>,
}

/// Read the manifest in `dir`, or `None` if it is absent or unparseable.
pub fn read_manifest(dir: &Path) -> Option<Manifest> {
    Manifest::read(dir)
}

impl Manifest {
    /// Read `package.json` from a directory.
    pub fn read(dir: &Path) -> Option<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).ok()?;
        match Self::parse(&content) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::debug!("Ignoring unparseable {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Parse manifest JSON.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let raw: Map<String, Value> = serde_json::from_str(content)?;
        let fields: ManifestFields = serde_json::from_value(Value::Object(raw.clone()))?;

        Ok(Self {
            name: fields.name,
            version: fields.version,
            dependencies: fields.dependencies,
            dev_dependencies: fields.dev_dependencies,
            scripts: fields.scripts,
            raw,
        })
    }

    /// Whether a package is declared in dependencies or devDependencies.
    pub fn declares(&self, package: &str) -> bool {
        self.declared_version(package).is_some()
    }

    /// The declared range for a package, checking dependencies first.
    pub fn declared_version(&self, package: &str) -> Option<&str> {
        self.dependencies
            .get(package)
            .or_else(|| self.dev_dependencies.get(package))
            .map(|s| s.as_str())
    }

    /// Whether the manifest declares any dependency at all.
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty() || !self.dev_dependencies.is_empty()
    }

    /// Set a package's declared range.
    ///
    /// Updates the entry wherever it is already declared; a new package is
    /// added to devDependencies.
    pub fn set_declared_version(&mut self, package: &str, range: &str) {
        let section = if self.dependencies.contains_key(package) {
            self.dependencies
                .insert(package.to_string(), range.to_string());
            "dependencies"
        } else {
            self.dev_dependencies
                .insert(package.to_string(), range.to_string());
            "devDependencies"
        };

        let entry = self
            .raw
            .entry(section)
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(map) = entry {
            map.insert(package.to_string(), Value::String(range.to_string()));
        }
    }

    /// Remove a script entry. Returns whether it was present.
    pub fn remove_script(&mut self, name: &str) -> bool {
        let removed = self.scripts.remove(name).is_some();
        if let Some(Value::Object(scripts)) = self.raw.get_mut("scripts") {
            scripts.remove(name);
        }
        removed
    }

    /// Write the manifest back to `dir/package.json`.
    pub fn write(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE);
        let mut content = serde_json::to_string_pretty(&self.raw).map_err(|e| {
            RemedyError::Other(anyhow::anyhow!(
                "Failed to serialize {}: {}",
                path.display(),
                e
            ))
        })?;
        content.push('\n');
        fs::write(&path, content)?;
        Ok(())
    }
}
