//! Terminal output for check runs.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] for asserting on output in tests
//! - Theme, output modes and a progress bar
//!
//! # Example
//!
//! ```
//! use vetted::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("vetted");
//! ui.success("All checks passed");
//! assert_eq!(ui.successes(), &["All checks passed".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use progress::{format_duration, CheckProgress};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, VettedTheme};

use crate::checker::CheckResult;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Set the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show one check's outcome, with a suggestion when it did not pass.
    fn show_result(&mut self, result: &CheckResult, suggestion: Option<&str>);

    /// Start a progress bar over `total` checks.
    fn start_progress(&mut self, total: usize) -> Box<dyn ProgressHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a progress bar.
pub trait ProgressHandle {
    /// Count one more finished check.
    fn advance(&mut self, msg: &str);

    /// Remove the bar.
    fn finish(&mut self);
}
