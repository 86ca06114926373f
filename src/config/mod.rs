//! Project configuration.
//!
//! Remedy reads one optional file, `.remedy/config.yml`, from the project
//! root. A missing file means defaults.
//!
//! # Example
//!
//! ```
//! use remedy::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::create_dir_all(temp.path().join(".remedy")).unwrap();
//! fs::write(temp.path().join(".remedy/config.yml"), "ignore: [git-not-used]").unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! assert!(config.is_ignored("git-not-used"));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{config_path, load_config, parse_config, CONFIG_DIR};
pub use schema::DoctorConfig;
