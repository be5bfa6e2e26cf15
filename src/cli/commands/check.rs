//! Check command implementation.
//!
//! The `vetted check` command runs every applicable check against the
//! project and reports the score, the maturity level and the critical gate.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checker::{CheckRegistration, Language};
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::{is_disabled, Config};
use crate::detection::detect_for_config;
use crate::error::{Result, VettedError};
use crate::registry::CheckRegistry;
use crate::report::Report;
use crate::runner::{CancellationToken, Orchestrator, RunOptions, SuiteResult};
use crate::score::Scorecard;
use crate::ui::{format_duration, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::{load_project_config, EXIT_CANCELLED};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
    cancellation: CancellationToken,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            args,
            cancellation: CancellationToken::new(),
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Fold command-line overrides into the loaded config.
    fn apply_overrides(&self, config: &mut Config) {
        if self.args.sequential {
            config.execution.parallel = false;
        }
        if let Some(workers) = self.args.workers {
            config.execution.workers = workers;
        }
        if let Some(secs) = self.args.timeout {
            config.execution.check_timeout_secs = secs;
        }
        if self.args.fail_fast {
            config.execution.fail_fast = true;
        }
    }

    fn selected(&self, registry: &CheckRegistry, languages: &[Language]) -> Vec<CheckRegistration> {
        registry
            .for_languages(languages)
            .into_iter()
            .filter(|reg| {
                let skipped = is_disabled(reg.id(), &self.args.skip);
                if skipped {
                    debug!(check = reg.id(), "skipped by --skip");
                }
                !skipped
            })
            .collect()
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut config = load_project_config(&self.project_root, self.config_path.as_deref())?;
        self.apply_overrides(&mut config);
        let detection = detect_for_config(&self.project_root, &config)?;
        let registry = CheckRegistry::from_config(&config)?;
        let registrations = self.selected(&registry, &detection.languages);
        let json = self.args.format == OutputFormat::Json;

        if !json {
            ui.show_header(&format!("vetted · {}", self.project_root.display()));
            if detection.languages.is_empty() {
                ui.message("No languages detected");
            } else {
                let names: Vec<&str> = detection.languages.iter().map(|l| l.as_str()).collect();
                ui.message(&format!("Languages: {}", names.join(", ")));
            }
            if registrations.is_empty() {
                ui.warning("No checks apply to this project");
            }
        }

        let orchestrator = Orchestrator::new(
            RunOptions::from_config(&config.execution).with_cancellation(self.cancellation.clone()),
        );
        let mut progress = (!json).then(|| ui.start_progress(registrations.len()));
        let suite = orchestrator.run_with_progress(&self.project_root, &registrations, |event| {
            if let Some(bar) = progress.as_mut() {
                bar.advance(event.result.id());
            }
        });
        if let Some(bar) = progress.as_mut() {
            bar.finish();
        }

        let scorecard = Scorecard::compute(&suite.results, &registry.critical_ids());
        let report = Report::new(&self.project_root, &detection.languages, &suite, &scorecard);

        if json {
            let output = report.to_json().map_err(|e| VettedError::Other(e.into()))?;
            ui.message(&output);
        } else {
            render_text(ui, &registry, &suite, &scorecard);
        }

        if report.success(self.args.strict) {
            Ok(CommandResult::success())
        } else if report.cancelled {
            Ok(CommandResult::failure(EXIT_CANCELLED))
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

fn render_text(
    ui: &mut dyn UserInterface,
    registry: &CheckRegistry,
    suite: &SuiteResult,
    scorecard: &Scorecard,
) {
    for result in &suite.results {
        let suggestion = registry
            .get(result.id())
            .and_then(|reg| reg.meta.suggestion.as_deref());
        ui.show_result(result, suggestion);
    }

    if let Some(id) = &suite.stopped_by {
        ui.warning(&format!(
            "Stopped after critical check {} failed, {} check(s) skipped: {}",
            id,
            suite.skipped.len(),
            suite.skipped.join(", ")
        ));
    } else if suite.cancelled {
        ui.warning(&format!(
            "Run cancelled, {} check(s) skipped: {}",
            suite.skipped.len(),
            suite.skipped.join(", ")
        ));
    }

    ui.message("");
    ui.message(&format!(
        "Score: {:.0}% ({} passed, {} warnings, {} failed of {}) in {}",
        scorecard.score,
        scorecard.passed,
        scorecard.warnings,
        scorecard.failed,
        scorecard.total,
        format_duration(suite.duration)
    ));
    ui.message(&format!(
        "Maturity: {} - {}",
        scorecard.level,
        scorecard.level.description()
    ));
    for suggestion in &scorecard.suggestions {
        ui.message(&format!("  • {}", suggestion));
    }

    if scorecard.gate_passed() {
        ui.success("No critical checks failed");
    } else {
        ui.error(&format!(
            "Critical checks failed: {}",
            scorecard.critical_failures.join(", ")
        ));
    }
}
