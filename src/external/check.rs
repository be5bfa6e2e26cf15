//! [`ExternalCheck`]: a project-declared command wrapped as a [`Checker`].

use std::sync::Arc;
use std::time::Duration;

use super::exec::{CommandOutput, CommandRunner, Invocation, Termination};
use super::protocol::{
    parse_output, select_output, status_from_exit, status_from_severity,
};
use super::spec::ExternalCheckSpec;
use super::validate::validate_command;
use crate::checker::{CheckContext, CheckResult, Checker, Language, ResultBuilder};
use crate::error::{Result, VettedError};
use crate::safepath::safe_join;

/// Default wall-clock budget for one external command.
pub const DEFAULT_EXTERNAL_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs an external command and maps its output onto a [`CheckResult`].
///
/// Misconfiguration (empty, unsafe or unresolvable command) becomes a Warn
/// result without spawning anything. Cancellation is the only `Err`.
pub struct ExternalCheck {
    spec: ExternalCheckSpec,
    runner: Arc<dyn CommandRunner>,
    timeout: Duration,
}

impl ExternalCheck {
    pub fn new(spec: ExternalCheckSpec, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            spec,
            runner,
            timeout: DEFAULT_EXTERNAL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn spec(&self) -> &ExternalCheckSpec {
        &self.spec
    }

    fn builder(&self) -> ResultBuilder {
        ResultBuilder::new(&self.spec.id, &self.spec.name, Language::Common)
    }

    fn interpret(&self, rb: &ResultBuilder, output: CommandOutput) -> Result<CheckResult> {
        match output.termination {
            Termination::Cancelled => return Err(VettedError::Cancelled),
            Termination::TimedOut => {
                return Ok(rb.with_status(
                    status_from_severity(self.spec.severity),
                    format!("Command timed out after {}s", self.timeout.as_secs()),
                ));
            }
            Termination::Exited(_) | Termination::Signaled => {}
        }

        let text = select_output(&output.stdout, &output.stderr);
        if let Some(payload) = parse_output(text) {
            return Ok(rb.with_status(payload.status(), payload.message.clone()));
        }

        let status = status_from_exit(output.exit_code(), self.spec.severity);
        Ok(rb.with_status(status, text))
    }
}

impl Checker for ExternalCheck {
    fn id(&self) -> &str {
        &self.spec.id
    }

    fn name(&self) -> &str {
        &self.spec.name
    }

    fn run(&self, ctx: &CheckContext) -> Result<CheckResult> {
        let rb = self.builder();

        if let Err(rejection) = validate_command(&self.spec.command) {
            tracing::warn!(check = %self.spec.id, %rejection, "external command rejected");
            return Ok(rb.warn(rejection.to_string()));
        }

        let Some(program) = self.runner.resolve(&self.spec.command) else {
            return Ok(rb.warn(format!("Command not found: {}", self.spec.command)));
        };

        let cwd = match &self.spec.source_dir {
            Some(dir) => match safe_join(ctx.project_root(), dir) {
                Ok(path) => path,
                Err(e) => return Ok(rb.warn(format!("Invalid source_dir: {}", e))),
            },
            None => ctx.project_root().to_path_buf(),
        };

        let invocation = Invocation {
            program,
            args: self.spec.args.clone(),
            cwd,
            timeout: Some(self.timeout),
        };

        tracing::debug!(check = %self.spec.id, program = %invocation.program.display(), "running external check");

        match self.runner.run(&invocation, ctx.cancellation()) {
            Ok(output) => self.interpret(&rb, output),
            Err(e) => {
                if ctx.cancellation().is_cancelled() {
                    return Err(VettedError::Cancelled);
                }
                let status = status_from_exit(None, self.spec.severity);
                Ok(rb.with_status(
                    status,
                    format!("Failed to execute {}: {}", self.spec.command, e),
                ))
            }
        }
    }
}
