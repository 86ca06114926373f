//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use super::{OutputMode, Prompt, PromptResult, SpinnerHandle, UserInterface};
use crate::error::Result;

/// Prefix of environment variables that answer prompts by key.
///
/// The prompt key is upper-cased with `.` and `-` replaced by `_`, so
/// `treat.select` is answered by `REMEDY_PROMPT_TREAT_SELECT`.
pub const PROMPT_ENV_PREFIX: &str = "REMEDY_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `REMEDY_PROMPT_*` variables or the prompt's
/// default, never from the terminal. Spinners print their message once.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }

    /// Environment variable that answers the prompt `key`.
    pub fn env_key(key: &str) -> String {
        let normalized: String = key
            .chars()
            .map(|c| match c {
                '.' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        format!("{}{}", PROMPT_ENV_PREFIX, normalized)
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_summary() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_summary() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let answer = self
            .env_overrides
            .get(&Self::env_key(&prompt.key))
            .or(prompt.default.as_ref())
            .cloned()
            .unwrap_or_default();

        tracing::debug!("Answering prompt '{}' with '{}'", prompt.key, answer);
        Ok(PromptResult::from_answer(&prompt.prompt_type, &answer))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_status() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            mode: self.mode,
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_summary() {
            println!("\n{}\n", title);
        }
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        if self.mode.shows_status() {
            println!("[{}/{}]", current, total);
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            for line in hint.lines() {
                println!("    {}", line);
            }
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that prints only its final status.
struct NoopSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("  ✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("  ✗ {}", msg);
    }

    fn finish_clear(&mut self) {}
}
