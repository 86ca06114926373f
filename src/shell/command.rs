//! External process execution for treatment steps.

use std::path::Path;
use std::process::{Command, Output};

use anyhow::{anyhow, Context};

use crate::ailments::CommandRunner;

/// Lines of stderr kept in a failure message.
const STDERR_TAIL: usize = 10;

/// Runs programs with `std::process`, capturing their output.
///
/// Output is captured rather than inherited so it does not interleave with
/// the spinner; it is logged at debug level and the tail of stderr is
/// attached to the error when the program fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

fn command(program: &str) -> Command {
    if cfg!(target_os = "windows") {
        // npm, yarn and pnpm are batch shims on Windows.
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(program);
        cmd
    } else {
        Command::new(program)
    }
}

/// Format `program args...` for messages.
pub fn display_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn stderr_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL);
    lines[start..].join("\n")
}

impl CommandRunner for ShellRunner {
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> anyhow::Result<()> {
        let shown = display_command(program, args);
        tracing::debug!("Running '{}' in {}", shown, dir.display());

        let output = command(program)
            .args(args)
            .current_dir(dir)
            .output()
            .with_context(|| format!("Failed to start '{}'", shown))?;

        tracing::debug!("{}", String::from_utf8_lossy(&output.stdout));

        if output.status.success() {
            return Ok(());
        }

        let code = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        let tail = stderr_tail(&output);
        if tail.is_empty() {
            Err(anyhow!("'{}' exited with code {}", shown, code))
        } else {
            Err(anyhow!("'{}' exited with code {}:\n{}", shown, code, tail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn display_joins_program_and_args() {
        assert_eq!(
            display_command("npm", &args(&["install", "-D", "x"])),
            "npm install -D x"
        );
        assert_eq!(display_command("yarn", &[]), "yarn");
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_directory() {
        let temp = TempDir::new().unwrap();

        ShellRunner::new()
            .run(temp.path(), "sh", &args(&["-c", "touch ran"]))
            .unwrap();

        assert!(temp.path().join("ran").exists());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_error_with_stderr() {
        let temp = TempDir::new().unwrap();

        let err = ShellRunner::new()
            .run(temp.path(), "sh", &args(&["-c", "echo broken >&2; exit 3"]))
            .unwrap_err()
            .to_string();

        assert!(err.contains("exited with code 3"), "{}", err);
        assert!(err.contains("broken"), "{}", err);
    }

    #[test]
    fn missing_program_is_error() {
        let temp = TempDir::new().unwrap();
        let result = ShellRunner::new().run(temp.path(), "remedy-no-such-program", &[]);
        assert!(result.is_err());
    }
}
