//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use vetted::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Checking project");
//! ui.warning("No CI/CD configuration found");
//!
//! assert!(ui.messages().contains(&"Checking project".to_string()));
//! assert!(ui.has_warning("CI/CD"));
//! ```

use std::sync::{Arc, Mutex};

use crate::checker::CheckResult;

use super::{OutputMode, ProgressHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    results: Vec<(CheckResult, Option<String>)>,
    progress: Arc<Mutex<Vec<String>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
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

    /// Results shown, with the suggestion passed alongside each.
    pub fn results(&self) -> &[(CheckResult, Option<String>)] {
        &self.results
    }

    /// Messages passed to progress handles, in order.
    pub fn progress_messages(&self) -> Vec<String> {
        self.progress.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Check if any message contains the given text.
    pub fn has_message(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m.contains(text))
    }

    /// Check if any warning contains the given text.
    pub fn has_warning(&self, text: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(text))
    }

    /// Check if any error contains the given text.
    pub fn has_error(&self, text: &str) -> bool {
        self.errors.iter().any(|e| e.contains(text))
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

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_result(&mut self, result: &CheckResult, suggestion: Option<&str>) {
        self.results
            .push((result.clone(), suggestion.map(str::to_string)));
    }

    fn start_progress(&mut self, _total: usize) -> Box<dyn ProgressHandle> {
        Box::new(MockProgress {
            log: Arc::clone(&self.progress),
        })
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Progress handle that records advances into its parent [`MockUI`].
#[derive(Debug)]
pub struct MockProgress {
    log: Arc<Mutex<Vec<String>>>,
}

impl ProgressHandle for MockProgress {
    fn advance(&mut self, msg: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.push(msg.to_string());
        }
    }

    fn finish(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Language, ResultBuilder};

    #[test]
    fn captures_messages() {
        let mut ui = MockUI::new();
        ui.message("one");
        ui.success("two");
        ui.error("three");
        assert!(ui.has_message("one"));
        assert_eq!(ui.successes(), &["two".to_string()]);
        assert!(ui.has_error("thr"));
    }

    #[test]
    fn captures_results_with_suggestions() {
        let mut ui = MockUI::new();
        let result = ResultBuilder::new("common:ci", "CI Pipeline", Language::Common)
            .warn("No CI/CD configuration found");
        ui.show_result(&result, Some("Add a workflow"));

        assert_eq!(ui.results().len(), 1);
        assert_eq!(ui.results()[0].1.as_deref(), Some("Add a workflow"));
    }

    #[test]
    fn progress_handles_report_back() {
        let mut ui = MockUI::new();
        let mut progress = ui.start_progress(2);
        progress.advance("a");
        progress.advance("b");
        progress.finish();
        assert_eq!(ui.progress_messages(), vec!["a", "b"]);
    }
}
