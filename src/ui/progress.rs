//! Run progress display.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::ProgressHandle;

const BAR_TEMPLATE: &str = "{spinner:.magenta} [{bar:30.cyan/blue}] {pos}/{len} {msg}";

/// Progress bar tracking checks as they complete.
pub struct CheckProgress {
    bar: ProgressBar,
}

impl CheckProgress {
    /// Create a visible progress bar for `total` checks.
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .progress_chars("=> "),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Create a hidden progress bar (for quiet mode or pipes).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Checks counted so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressHandle for CheckProgress {
    fn advance(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
        self.bar.inc(1);
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Format a duration for display.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}
