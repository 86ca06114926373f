//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use remedy::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("treat.select", "missing-lockfile");
//!
//! // Use ui in code under test...
//! ui.message("Checking project");
//! ui.success("No issues detected");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Checking"));
//! assert_eq!(ui.successes(), &["No issues detected"]);
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Supports single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked more than once.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    progress: Vec<(usize, usize)>,
    spinners: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
    /// Used for any key without a configured response.
    default_prompt_response: Option<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue responses for a key asked several times. Once the queue is
    /// empty, the single response or defaults apply.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Set a response for any prompt key not explicitly configured.
    pub fn set_default_prompt_response(&mut self, response: &str) {
        self.default_prompt_response = Some(response.to_string());
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn progress(&self) -> &[(usize, usize)] {
        &self.progress
    }

    /// Messages of every spinner started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Keys of every prompt shown, in order.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if any message contains `msg`.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions. Configured responses are kept.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.headers.clear();
        self.hints.clear();
        self.progress.clear();
        self.spinners.clear();
        self.prompts_shown.clear();
    }

    fn scripted_answer(&mut self, prompt: &Prompt) -> Option<String> {
        if let Some(answer) = self
            .prompt_queues
            .get_mut(&prompt.key)
            .and_then(|queue| queue.pop_front())
        {
            return Some(answer);
        }
        self.prompt_responses
            .get(&prompt.key)
            .or(self.default_prompt_response.as_ref())
            .or(prompt.default.as_ref())
            .cloned()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        // Unanswered prompts get a type-appropriate empty answer.
        let answer = self.scripted_answer(prompt).unwrap_or_default();
        Ok(PromptResult::from_answer(&prompt.prompt_type, &answer))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        self.progress.push((current, total));
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
    Cleared,
}

impl MockSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages set while spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Error);
    }

    fn finish_clear(&mut self) {
        self.status = Some(SpinnerStatus::Cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn confirm(key: &str, default: Option<&str>) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Proceed?".to_string(),
            prompt_type: PromptType::Confirm,
            default: default.map(String::from),
        }
    }

    fn select(key: &str, default: Option<&str>) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Pick".to_string(),
            prompt_type: PromptType::MultiSelect {
                options: vec![
                    PromptOption {
                        label: "A".into(),
                        value: "a".into(),
                    },
                    PromptOption {
                        label: "B".into(),
                        value: "b".into(),
                    },
                ],
            },
            default: default.map(String::from),
        }
    }

    #[test]
    fn captures_output() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("broken");
        ui.show_header("Title");
        ui.show_hint("try this");
        ui.show_progress(1, 3);

        assert_eq!(ui.messages(), &["hello"]);
        assert!(ui.has_warning("care"));
        assert!(ui.has_error("broken"));
        assert_eq!(ui.headers(), &["Title"]);
        assert!(ui.has_hint("try"));
        assert_eq!(ui.progress(), &[(1, 3)]);
    }

    #[test]
    fn configured_response_wins_over_default() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("go", "no");

        let result = ui.prompt(&confirm("go", Some("true"))).unwrap();

        assert_eq!(result, PromptResult::Bool(false));
        assert_eq!(ui.prompts_shown(), &["go"]);
    }

    #[test]
    fn falls_back_to_prompt_default() {
        let mut ui = MockUI::new();
        assert_eq!(
            ui.prompt(&confirm("go", Some("true"))).unwrap(),
            PromptResult::Bool(true)
        );
        assert_eq!(
            ui.prompt(&select("pick", Some("a,b"))).unwrap(),
            PromptResult::Strings(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn unanswered_prompts_are_empty() {
        let mut ui = MockUI::new();
        assert_eq!(
            ui.prompt(&confirm("go", None)).unwrap(),
            PromptResult::Bool(false)
        );
        assert_eq!(
            ui.prompt(&select("pick", None)).unwrap(),
            PromptResult::Strings(vec![])
        );
    }

    #[test]
    fn queued_responses_are_returned_in_order() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("go", vec!["yes", "no"]);
        ui.set_prompt_response("go", "yes");

        let answers: Vec<_> = (0..3)
            .map(|_| ui.prompt(&confirm("go", None)).unwrap())
            .collect();

        assert_eq!(
            answers,
            vec![
                PromptResult::Bool(true),
                PromptResult::Bool(false),
                PromptResult::Bool(true)
            ]
        );
    }

    #[test]
    fn default_response_applies_to_any_key() {
        let mut ui = MockUI::new();
        ui.set_default_prompt_response("b");
        assert_eq!(
            ui.prompt(&select("pick", Some("a"))).unwrap(),
            PromptResult::Strings(vec!["b".into()])
        );
    }

    #[test]
    fn clear_keeps_responses() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("go", "yes");
        ui.message("x");
        ui.clear();

        assert!(ui.messages().is_empty());
        assert_eq!(
            ui.prompt(&confirm("go", None)).unwrap(),
            PromptResult::Bool(true)
        );
    }

    #[test]
    fn spinner_records_status() {
        let mut spinner = MockSpinner::new();
        spinner.set_message("working");
        spinner.finish_error("failed");

        assert_eq!(spinner.messages(), &["working"]);
        assert_eq!(spinner.finish_message(), Some("failed"));
        assert_eq!(spinner.status(), Some(SpinnerStatus::Error));
    }

    #[test]
    fn output_mode_can_change() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        ui.set_output_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
        assert!(!ui.is_interactive());
    }
}
