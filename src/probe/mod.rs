//! Read-only probes of a project directory.
//!
//! Everything in this module answers questions about the project without
//! mutating it (the one exception is [`Manifest::write`], which only
//! treatment steps call). Lookups that find nothing return `None` rather
//! than an error so that "not installed" is ordinary data for callers.
//!
//! # Example
//!
//! ```
//! use remedy::probe::{read_manifest, Version};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("package.json"),
//!     r#"{"name": "app", "devDependencies": {"@ionic/app-scripts": "~3.1.0"}}"#,
//! ).unwrap();
//!
//! let manifest = read_manifest(temp.path()).unwrap();
//! let declared = manifest.declared_version("@ionic/app-scripts").unwrap();
//! assert_eq!(Version::from_range(declared), Version::parse("3.1.0"));
//! ```

pub mod command;
pub mod files;
pub mod manifest;
pub mod package_manager;
pub mod resolution;
pub mod version;

pub use command::{extract_version, tool_version};
pub use files::{any_file_exists, dir_exists, file_exists};
pub use manifest::{read_manifest, Manifest, MANIFEST_FILE};
pub use package_manager::PackageManager;
pub use resolution::{dependency_version, node_modules_paths, resolve_package_manifest};
pub use version::Version;
