//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::checker::{CheckResult, Status};

use super::{CheckProgress, OutputMode, ProgressHandle, UserInterface, VettedTheme};

/// Terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: VettedTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_theme(mode, VettedTheme::detect())
    }

    /// Create a terminal UI with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: VettedTheme) -> Self {
        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_result(&mut self, result: &CheckResult, suggestion: Option<&str>) {
        if !self.mode.shows_status() || (result.passed() && !self.mode.shows_passes()) {
            return;
        }

        let icon = match result.status() {
            Status::Pass => self.theme.success.apply_to("✓"),
            Status::Warn => self.theme.warning.apply_to("⚠"),
            Status::Fail => self.theme.error.apply_to("✗"),
        };
        writeln!(
            self.term,
            "{} {} {} {}",
            icon,
            self.theme.format_status(result.status()),
            self.theme.highlight.apply_to(result.name()),
            self.theme.dim.apply_to(format!("({})", result.id()))
        )
        .ok();

        if !result.passed() || self.mode == OutputMode::Verbose {
            writeln!(self.term, "    {}", result.message()).ok();
        }
        if let (false, Some(suggestion)) = (result.passed(), suggestion) {
            writeln!(
                self.term,
                "    {} {}",
                self.theme.key.apply_to("Suggestion:"),
                suggestion
            )
            .ok();
        }
    }

    fn start_progress(&mut self, total: usize) -> Box<dyn ProgressHandle> {
        if self.mode.shows_progress() && self.is_interactive() {
            Box::new(CheckProgress::new(total))
        } else {
            Box::new(CheckProgress::hidden())
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the UI for the current terminal.
///
/// `no_color` forces the plain theme even on a color-capable terminal.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    let theme = if no_color {
        VettedTheme::plain()
    } else {
        VettedTheme::detect()
    };
    Box::new(TerminalUI::with_theme(mode, theme))
}
