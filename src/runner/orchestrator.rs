//! Check execution orchestration.
//!
//! The [`Orchestrator`] runs every registration against a project and
//! collects one result per check, ordered by `order` with the caller's
//! order breaking ties. A check that panics, errors or overruns its budget
//! is recorded as a Warn (Fail if critical) naming the check; it never
//! stops the others unless fail-fast is on.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::checker::{
    CheckContext, CheckRegistration, CheckResult, Language, ResultBuilder, Status,
};
use crate::config::ExecutionConfig;
use crate::error::VettedError;

use super::cancel::CancellationToken;

/// How often a waiting worker re-checks the cancellation token.
const CANCEL_POLL: Duration = Duration::from_millis(50);

/// How long a stopped check gets to clean up before it is abandoned.
const STOP_GRACE: Duration = Duration::from_millis(500);

/// Options for a run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Run checks on a worker pool.
    pub parallel: bool,
    /// Pool size when running in parallel.
    pub workers: usize,
    /// Budget for any single check.
    pub check_timeout: Duration,
    /// Stops the run when cancelled.
    pub cancellation: CancellationToken,
    /// Stop the remaining checks once a critical check fails.
    pub fail_fast: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            workers: default_workers(),
            check_timeout: Duration::from_secs(120),
            cancellation: CancellationToken::new(),
            fail_fast: false,
        }
    }
}

impl RunOptions {
    /// Options from the `execution` config section.
    pub fn from_config(execution: &ExecutionConfig) -> Self {
        Self {
            parallel: execution.parallel,
            workers: if execution.workers == 0 {
                default_workers()
            } else {
                execution.workers
            },
            check_timeout: Duration::from_secs(execution.check_timeout_secs),
            cancellation: CancellationToken::new(),
            fail_fast: execution.fail_fast,
        }
    }

    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn with_check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout = timeout;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

fn default_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Progress event emitted after each check completes.
#[derive(Debug)]
pub struct RunProgress<'a> {
    /// Checks finished so far, including this one.
    pub completed: usize,
    /// Checks in the run.
    pub total: usize,
    pub result: &'a CheckResult,
}

/// Result of running a suite of checks.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    /// Results in run order.
    pub results: Vec<CheckResult>,
    /// Whether the run was cancelled.
    pub cancelled: bool,
    /// Critical check whose failure stopped the run under fail-fast.
    pub stopped_by: Option<String>,
    /// Ids of checks that produced no result because the run stopped.
    pub skipped: Vec<String>,
    /// Total duration.
    pub duration: Duration,
}

impl SuiteResult {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn passed(&self) -> usize {
        self.count(Status::Pass)
    }

    pub fn warnings(&self) -> usize {
        self.count(Status::Warn)
    }

    pub fn failed(&self) -> usize {
        self.count(Status::Fail)
    }

    fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status() == status).count()
    }
}

/// Schedules checks and collects their results.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    options: RunOptions,
}

impl Orchestrator {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Run every registration against `project_root`.
    pub fn run(&self, project_root: &Path, registrations: &[CheckRegistration]) -> SuiteResult {
        self.run_with_progress(project_root, registrations, |_| {})
    }

    /// Run every registration, reporting each completed check.
    ///
    /// Checks run and report in ascending `order`; equal orders keep the
    /// order of `registrations`. Results come back in that order whether
    /// the run was sequential or parallel.
    pub fn run_with_progress<F>(
        &self,
        project_root: &Path,
        registrations: &[CheckRegistration],
        mut on_progress: F,
    ) -> SuiteResult
    where
        F: FnMut(&RunProgress<'_>),
    {
        let start = Instant::now();
        let mut planned: Vec<&CheckRegistration> = registrations.iter().collect();
        planned.sort_by_key(|registration| registration.meta.order);

        let total = planned.len();
        let run_token = self.options.cancellation.child();
        let ctx = CheckContext::new(project_root, run_token.clone());
        let workers = self.options.workers.clamp(1, total.max(1));

        debug!(
            total,
            parallel = self.options.parallel,
            workers,
            fail_fast = self.options.fail_fast,
            "starting check run"
        );

        let mut slots: Vec<Option<CheckResult>> = vec![None; total];
        let mut completed = 0;
        let mut stopped_by = None;
        let mut record = |index: usize, result: Option<CheckResult>| {
            let Some(result) = result else {
                return;
            };
            completed += 1;
            on_progress(&RunProgress {
                completed,
                total,
                result: &result,
            });
            if self.options.fail_fast
                && stopped_by.is_none()
                && planned[index].meta.critical
                && result.status() == Status::Fail
            {
                warn!(check = %result.id(), "critical check failed, stopping run");
                stopped_by = Some(result.id().to_string());
                run_token.cancel();
            }
            slots[index] = Some(result);
        };

        if self.options.parallel && workers > 1 {
            let next = AtomicUsize::new(0);
            let (tx, rx) = mpsc::channel();

            thread::scope(|scope| {
                for _ in 0..workers {
                    let tx = tx.clone();
                    let next = &next;
                    let ctx = &ctx;
                    let planned = &planned;
                    scope.spawn(move || loop {
                        if ctx.cancellation().is_cancelled() {
                            break;
                        }
                        let index = next.fetch_add(1, Ordering::SeqCst);
                        let Some(registration) = planned.get(index) else {
                            break;
                        };
                        let outcome = self.execute(registration, ctx);
                        if tx.send((index, outcome)).is_err() {
                            break;
                        }
                    });
                }
                drop(tx);

                for (index, outcome) in rx {
                    record(index, outcome);
                }
            });
        } else {
            for (index, registration) in planned.iter().enumerate() {
                if ctx.cancellation().is_cancelled() {
                    break;
                }
                let outcome = self.execute(registration, &ctx);
                record(index, outcome);
            }
        }

        let skipped: Vec<String> = planned
            .iter()
            .zip(&slots)
            .filter(|(_, slot)| slot.is_none())
            .map(|(registration, _)| registration.id().to_string())
            .collect();
        let results: Vec<CheckResult> = slots.into_iter().flatten().collect();
        let cancelled = self.options.cancellation.is_cancelled();

        if cancelled {
            warn!(
                completed = results.len(),
                skipped = skipped.len(),
                "check run cancelled"
            );
        }

        SuiteResult {
            results,
            cancelled,
            stopped_by,
            skipped,
            duration: start.elapsed(),
        }
    }

    /// Run one check in isolation. `None` means it was cancelled.
    ///
    /// The check sees its own child of the run token. When its budget runs
    /// out that token is cancelled, so a check that honours cancellation
    /// (an external command, for one) stops its work before it is abandoned.
    fn execute(&self, registration: &CheckRegistration, ctx: &CheckContext) -> Option<CheckResult> {
        let id = registration.id().to_string();
        let checker = registration.checker.clone();
        let check_token = ctx.cancellation().child();
        let check_ctx = CheckContext::new(ctx.project_root(), check_token.clone());
        let (tx, rx) = mpsc::channel();
        let started = Instant::now();

        debug!(check = %id, "running check");

        // Detached, so a check that never returns can be abandoned.
        let spawned = thread::Builder::new()
            .name(format!("check-{}", id))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| checker.run(&check_ctx)));
                let _ = tx.send(outcome);
            });
        if let Err(e) = spawned {
            return Some(fault(
                registration,
                format!("Check {} could not start: {}", id, e),
            ));
        }

        let deadline = started + self.options.check_timeout;
        let outcome = loop {
            let now = Instant::now();
            if now >= deadline {
                warn!(check = %id, timeout = ?self.options.check_timeout, "check timed out");
                check_token.cancel();
                let _ = rx.recv_timeout(STOP_GRACE);
                return Some(
                    fault(
                        registration,
                        format!(
                            "Check {} timed out after {}",
                            id,
                            format_duration(self.options.check_timeout)
                        ),
                    )
                    .with_duration(started.elapsed()),
                );
            }
            match rx.recv_timeout(CANCEL_POLL.min(deadline - now)) {
                Ok(outcome) => break outcome,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if ctx.cancellation().is_cancelled() {
                        debug!(check = %id, "abandoning check after cancellation");
                        let _ = rx.recv_timeout(STOP_GRACE);
                        return None;
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Some(fault(
                        registration,
                        format!("Check {} stopped without a result", id),
                    ));
                }
            }
        };
        let elapsed = started.elapsed();

        match outcome {
            Ok(Ok(result)) => Some(result.with_duration(elapsed)),
            Ok(Err(VettedError::Cancelled)) => {
                debug!(check = %id, "check cancelled");
                None
            }
            Ok(Err(e)) => {
                warn!(check = %id, error = %e, "check returned an error");
                Some(
                    fault(registration, format!("Check {} errored: {}", id, e))
                        .with_duration(elapsed),
                )
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(check = %id, panic = %message, "check panicked");
                Some(
                    fault(
                        registration,
                        format!("Check {} panicked: {}", id, message),
                    )
                    .with_duration(elapsed),
                )
            }
        }
    }
}

/// Result standing in for a check that could not produce its own.
fn fault(registration: &CheckRegistration, message: String) -> CheckResult {
    let meta = &registration.meta;
    let language = meta.languages.first().copied().unwrap_or(Language::Common);
    let status = if meta.critical {
        Status::Fail
    } else {
        Status::Warn
    };
    ResultBuilder::new(meta.id.clone(), meta.name.clone(), language).with_status(status, message)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn format_duration(duration: Duration) -> String {
    if duration.as_secs() > 0 && duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
