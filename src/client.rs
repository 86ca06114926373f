//! npm registry client.

use std::time::Duration;

use serde_json::Value;

use crate::ailments::VersionLookup;
use crate::error::{RemedyError, Result};
use crate::probe::Version;

/// Public npm registry.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// Looks up `latest` dist-tags on an npm-compatible registry.
///
/// # Example
///
/// ```no_run
/// use remedy::ailments::VersionLookup;
/// use remedy::client::{NpmRegistryClient, DEFAULT_REGISTRY};
///
/// let client = NpmRegistryClient::new(DEFAULT_REGISTRY).unwrap();
/// let latest = client.latest_version("@ionic/cli").unwrap();
/// println!("{}", latest);
/// ```
#[derive(Debug, Clone)]
pub struct NpmRegistryClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl NpmRegistryClient {
    /// Create a client for the registry at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(10))
    }

    /// Create a client with a request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("remedy/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// URL of the `latest` document for a package.
    pub fn latest_url(&self, package: &str) -> String {
        // Scoped names keep the `@` but escape the separator.
        format!("{}/{}/latest", self.base_url, package.replace('/', "%2F"))
    }
}

impl VersionLookup for NpmRegistryClient {
    fn latest_version(&self, package: &str) -> Result<Version> {
        let url = self.latest_url(package);
        tracing::debug!("Fetching {}", url);

        let text = self.client.get(&url).send()?.error_for_status()?.text()?;
        let body: Value = serde_json::from_str(&text).map_err(|e| RemedyError::ApiFormat {
            url: url.clone(),
            message: format!("invalid JSON: {}", e),
        })?;

        let raw = body["version"].as_str().ok_or_else(|| RemedyError::ApiFormat {
            url: url.clone(),
            message: "missing \"version\" field".to_string(),
        })?;

        Version::parse(raw).ok_or_else(|| RemedyError::ApiFormat {
            url,
            message: format!("unparseable version \"{}\"", raw),
        })
    }
}
