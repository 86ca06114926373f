//! Finding and loading the project configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::DoctorConfig;
use crate::error::{RemedyError, Result};

/// Directory holding remedy's per-project files.
pub const CONFIG_DIR: &str = ".remedy";

/// Location of the config file for a project root.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.yml")
}

/// Load the project config, falling back to defaults when there is none.
///
/// # Errors
///
/// Returns `ConfigParseError` if the file exists but is not valid config,
/// and `Io` if it exists but cannot be read.
pub fn load_config(project_root: &Path) -> Result<DoctorConfig> {
    let path = config_path(project_root);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(DoctorConfig::default());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!("Loading config from {}", path.display());
    parse_config(&content, &path)
}

/// Parse config content. `source_path` is only used in error messages.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DoctorConfig> {
    // An empty file deserializes as YAML null.
    if content.trim().is_empty() {
        return Ok(DoctorConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| RemedyError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
