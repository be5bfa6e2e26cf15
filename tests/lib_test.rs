//! Integration tests for the library API: registry, orchestrator, scorer.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;
use vetted::checker::{
    CheckContext, CheckMetadata, CheckRegistration, CheckResult, Checker, Language, ResultBuilder,
    Status,
};
use vetted::config::Config;
use vetted::external::{
    CommandOutput, CommandRunner, ExternalCheckSpec, Invocation, Severity, Termination,
};
use vetted::registry::CheckRegistry;
use vetted::runner::{CancellationToken, Orchestrator, RunOptions};
use vetted::score::Scorecard;
use vetted::VettedError;

/// Runner that answers every command with a canned output.
struct FakeRunner {
    termination: Termination,
    stdout: String,
    invocations: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    fn exiting(code: i32, stdout: &str) -> Arc<Self> {
        Arc::new(Self {
            termination: Termination::Exited(code),
            stdout: stdout.to_string(),
            invocations: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    fn last_timeout(&self) -> Option<Duration> {
        self.invocations.lock().unwrap().last().and_then(|i| i.timeout)
    }
}

impl CommandRunner for FakeRunner {
    fn resolve(&self, command: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/fake/bin").join(command))
    }

    fn run(&self, invocation: &Invocation, _cancel: &CancellationToken) -> io::Result<CommandOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());
        Ok(CommandOutput {
            termination: self.termination,
            stdout: self.stdout.clone(),
            stderr: String::new(),
            duration: Duration::from_millis(1),
        })
    }
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README.md"), "# app").unwrap();
    fs::write(temp.path().join("LICENSE"), "MIT").unwrap();
    fs::write(temp.path().join("Dockerfile"), "FROM scratch").unwrap();
    temp
}

fn run(config: &Config, runner: Arc<FakeRunner>, root: &std::path::Path) -> (CheckRegistry, Vec<CheckResult>) {
    let registry = CheckRegistry::from_config_with_runner(config, runner).unwrap();
    let suite = Orchestrator::new(RunOptions::default()).run(root, registry.registrations());
    (registry, suite.results)
}

#[test]
fn builtins_and_critical_external_score_together() {
    let temp = project();
    let mut config = Config::default();
    config.checks.disabled = vec!["license".to_string()];
    config.external.push(
        ExternalCheckSpec::new("custom:build", "Build", "make")
            .with_args(["build"])
            .with_severity(Severity::Fail),
    );
    let runner = FakeRunner::exiting(2, "");

    let (registry, results) = run(&config, runner.clone(), temp.path());

    let ids: Vec<&str> = results.iter().map(|r| r.id()).collect();
    assert_eq!(
        ids,
        vec!["file_exists", "common:dockerfile", "common:ci", "custom:build"]
    );
    let statuses: Vec<Status> = results.iter().map(|r| r.status()).collect();
    assert_eq!(
        statuses,
        vec![Status::Pass, Status::Pass, Status::Warn, Status::Fail]
    );

    let card = Scorecard::compute(&results, &registry.critical_ids());
    assert_eq!(card.score, 50.0);
    assert_eq!(card.critical_failures, vec!["custom:build"]);
    assert!(!card.gate_passed());
    assert_eq!(runner.calls(), 1);
}

#[test]
fn shell_injection_is_rejected_before_spawning() {
    let temp = project();
    let mut config = Config::default();
    config
        .external
        .push(ExternalCheckSpec::new("custom:evil", "Evil", "rm -rf /").with_severity(Severity::Fail));
    let runner = FakeRunner::exiting(0, "");

    let (_, results) = run(&config, runner.clone(), temp.path());

    let evil = results.iter().find(|r| r.id() == "custom:evil").unwrap();
    assert_eq!(evil.status(), Status::Warn);
    assert!(evil.message().contains("invalid characters"));
    assert_eq!(runner.calls(), 0);
}

#[test]
fn json_payload_status_is_case_insensitive() {
    let temp = project();
    let mut config = Config::default();
    config
        .external
        .push(ExternalCheckSpec::new("custom:lint", "Lint", "lint"));
    let runner = FakeRunner::exiting(0, r#"{"status": "WARNING", "message": "2 issues"}"#);

    let (_, results) = run(&config, runner, temp.path());

    let lint = results.iter().find(|r| r.id() == "custom:lint").unwrap();
    assert_eq!(lint.status(), Status::Warn);
    assert_eq!(lint.message(), "2 issues");
    assert!(!lint.passed());
}

#[test]
fn registry_order_is_deterministic() {
    let mut config = Config::default();
    for id in ["custom:b", "custom:a", "custom:c"] {
        config.external.push(ExternalCheckSpec::new(id, id, "true"));
    }

    let first = CheckRegistry::from_config(&config).unwrap();
    let second = CheckRegistry::from_config(&config).unwrap();

    assert_eq!(first.ids(), second.ids());
    assert_eq!(
        format!("{:?}", first.registrations()),
        format!("{:?}", second.registrations())
    );
    assert_eq!(
        &first.ids()[4..],
        &["custom:b", "custom:a", "custom:c"]
    );
}

#[test]
fn duplicate_external_ids_are_rejected() {
    let mut config = Config::default();
    config.external.push(ExternalCheckSpec::new("custom:x", "X", "true"));
    config.external.push(ExternalCheckSpec::new("custom:x", "X again", "true"));

    let err = CheckRegistry::from_config(&config).unwrap_err();
    assert!(matches!(err, VettedError::DuplicateCheckId { ref id } if id == "custom:x"));
}

struct Exploding;

impl Checker for Exploding {
    fn id(&self) -> &str {
        "custom:explodes"
    }

    fn name(&self) -> &str {
        "Explodes"
    }

    fn run(&self, _ctx: &CheckContext) -> vetted::Result<CheckResult> {
        panic!("kaboom");
    }
}

struct Steady;

impl Checker for Steady {
    fn id(&self) -> &str {
        "custom:steady"
    }

    fn name(&self) -> &str {
        "Steady"
    }

    fn run(&self, _ctx: &CheckContext) -> vetted::Result<CheckResult> {
        Ok(ResultBuilder::for_checker(self, Language::Common).pass("fine"))
    }
}

#[test]
fn panicking_check_does_not_stop_the_run() {
    let temp = TempDir::new().unwrap();
    let mut registry = CheckRegistry::new();
    registry
        .register(CheckRegistration::new(
            Arc::new(Exploding),
            CheckMetadata::new("custom:explodes", "Explodes", 1).with_critical(true),
        ))
        .unwrap();
    registry
        .register(CheckRegistration::new(
            Arc::new(Steady),
            CheckMetadata::new("custom:steady", "Steady", 2),
        ))
        .unwrap();

    let suite = Orchestrator::new(RunOptions::default()).run(temp.path(), registry.registrations());

    assert_eq!(suite.total(), 2);
    assert_eq!(suite.results[0].status(), Status::Fail);
    assert!(suite.results[0].message().contains("kaboom"));
    assert_eq!(suite.results[1].status(), Status::Pass);

    let card = Scorecard::compute(&suite.results, &registry.critical_ids());
    assert_eq!(card.critical_failures, vec!["custom:explodes"]);
}

#[test]
fn external_timeout_never_exceeds_check_timeout() {
    let temp = project();
    let mut config = Config::default();
    config.execution.timeout_secs = 30;
    config.execution.check_timeout_secs = 5;
    config
        .external
        .push(ExternalCheckSpec::new("custom:slow", "Slow", "slow"));
    let runner = FakeRunner::exiting(0, "");

    run(&config, runner.clone(), temp.path());

    assert_eq!(runner.last_timeout(), Some(Duration::from_secs(5)));
}

struct Named(String);

impl Checker for Named {
    fn id(&self) -> &str {
        &self.0
    }

    fn name(&self) -> &str {
        &self.0
    }

    fn run(&self, _ctx: &CheckContext) -> vetted::Result<CheckResult> {
        Ok(ResultBuilder::for_checker(self, Language::Common).pass("fine"))
    }
}

#[test]
fn orchestrator_orders_unsorted_registrations() {
    let temp = TempDir::new().unwrap();
    let regs: Vec<CheckRegistration> = [("c", 3), ("a", 1), ("b", 2)]
        .into_iter()
        .map(|(id, order)| {
            CheckRegistration::new(
                Arc::new(Named(id.to_string())),
                CheckMetadata::new(id, id, order),
            )
        })
        .collect();

    for options in [RunOptions::sequential(), RunOptions::default().with_workers(3)] {
        let suite = Orchestrator::new(options).run(temp.path(), &regs);
        let ids: Vec<&str> = suite.results.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
