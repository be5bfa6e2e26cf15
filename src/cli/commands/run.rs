//! Run command implementation.
//!
//! The `vetted run <CHECK_ID>` command runs one check, whether or not it
//! applies to the detected languages.

use std::path::{Path, PathBuf};

use crate::checker::Status;
use crate::cli::args::RunArgs;
use crate::error::{Result, VettedError};
use crate::registry::CheckRegistry;
use crate::runner::{CancellationToken, Orchestrator, RunOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::{load_project_config, EXIT_CANCELLED};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
    cancellation: CancellationToken,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, args: RunArgs) -> Self {
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
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut config = load_project_config(&self.project_root, self.config_path.as_deref())?;
        if let Some(secs) = self.args.timeout {
            config.execution.check_timeout_secs = secs;
        }
        config.execution.parallel = false;
        let registry = CheckRegistry::from_config(&config)?;
        let registration = registry
            .get(&self.args.check_id)
            .cloned()
            .ok_or_else(|| VettedError::UnknownCheck {
                id: self.args.check_id.clone(),
            })?;

        let options = RunOptions::from_config(&config.execution)
            .with_cancellation(self.cancellation.clone());

        let suite = Orchestrator::new(options).run(&self.project_root, &[registration.clone()]);
        let Some(result) = suite.results.first() else {
            ui.warning(&format!("{} cancelled", self.args.check_id));
            return Ok(CommandResult::failure(EXIT_CANCELLED));
        };

        ui.show_result(result, registration.meta.suggestion.as_deref());

        if result.status() == Status::Fail {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
