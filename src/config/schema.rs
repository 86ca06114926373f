//! Shape of `.remedy/config.yml`.

use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_REGISTRY;
use crate::doctor::DEFAULT_CONCURRENCY;
use crate::probe::PackageManager;

/// Project-level doctor configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoctorConfig {
    /// Maximum probes run at once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Ailment ids that are never probed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// npm-compatible registry used for version lookups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,

    /// Package manager used by treatments; detected from the lockfile when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManager>,
}

impl DoctorConfig {
    /// Concurrency after applying a command-line override. Never below 1.
    pub fn effective_concurrency(&self, flag: Option<usize>) -> usize {
        flag.or(self.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY)
            .max(1)
    }

    pub fn registry_url(&self) -> &str {
        self.registry_url.as_deref().unwrap_or(DEFAULT_REGISTRY)
    }

    pub fn is_ignored(&self, id: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let config = DoctorConfig::default();
        assert_eq!(config.effective_concurrency(None), DEFAULT_CONCURRENCY);
        assert_eq!(config.registry_url(), DEFAULT_REGISTRY);
        assert!(config.ignore.is_empty());
        assert!(config.package_manager.is_none());
    }

    #[test]
    fn flag_overrides_file() {
        let config = DoctorConfig {
            concurrency: Some(8),
            ..Default::default()
        };
        assert_eq!(config.effective_concurrency(None), 8);
        assert_eq!(config.effective_concurrency(Some(2)), 2);
    }

    #[test]
    fn zero_concurrency_clamps_to_one() {
        let config = DoctorConfig {
            concurrency: Some(0),
            ..Default::default()
        };
        assert_eq!(config.effective_concurrency(None), 1);
    }

    #[test]
    fn ignore_matches_exact_ids() {
        let config = DoctorConfig {
            ignore: vec!["git-not-used".to_string()],
            ..Default::default()
        };
        assert!(config.is_ignored("git-not-used"));
        assert!(!config.is_ignored("git"));
    }

    #[test]
    fn package_manager_deserializes_lowercase() {
        let config: DoctorConfig = serde_yaml::from_str("package_manager: yarn").unwrap();
        assert_eq!(config.package_manager, Some(PackageManager::Yarn));
    }
}
