//! Tool version probing via `--version`.

use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use super::version::Version;

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+(?:\.\d+)?)").expect("valid regex"));

/// Run `<program> --version` and extract the reported version.
///
/// Returns `None` if the program is missing, exits non-zero, or prints
/// nothing version-like.
pub fn tool_version(program: &str) -> Option<Version> {
    let output = Command::new(program).arg("--version").output().ok()?;
    if !output.status.success() {
        tracing::debug!("{} --version exited with {}", program, output.status);
        return None;
    }
    extract_version(&String::from_utf8_lossy(&output.stdout))
}

/// Extract the first version-looking token from command output.
pub fn extract_version(output: &str) -> Option<Version> {
    VERSION_TOKEN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Version::parse(m.as_str()))
}
