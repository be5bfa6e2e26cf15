//! Machine-readable run reports.
//!
//! A [`Report`] is what `vetted check --format json` prints: every result,
//! the summary counts, the maturity assessment and the critical gate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::checker::{CheckResult, Language};
use crate::runner::SuiteResult;
use crate::score::{MaturityLevel, Scorecard};

/// Counts and timing for a run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub score: f64,
    pub duration_ms: u64,
}

/// Maturity assessment for a run.
#[derive(Debug, Clone, Serialize)]
pub struct Maturity {
    pub level: MaturityLevel,
    pub label: String,
    pub description: String,
    pub suggestions: Vec<String>,
}

/// Full report of one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub project: String,
    pub languages: Vec<Language>,
    pub results: Vec<CheckResult>,
    pub summary: Summary,
    pub maturity: Maturity,
    pub critical_failures: Vec<String>,
    pub gate_passed: bool,
    pub cancelled: bool,
    /// Critical check that stopped a fail-fast run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_by: Option<String>,
    pub skipped: Vec<String>,
}

impl Report {
    /// Build a report stamped with the current time.
    pub fn new(
        project_root: &Path,
        languages: &[Language],
        suite: &SuiteResult,
        scorecard: &Scorecard,
    ) -> Self {
        Self::at(Utc::now(), project_root, languages, suite, scorecard)
    }

    /// Build a report with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        project_root: &Path,
        languages: &[Language],
        suite: &SuiteResult,
        scorecard: &Scorecard,
    ) -> Self {
        Self {
            timestamp,
            project: project_root.display().to_string(),
            languages: languages.to_vec(),
            results: suite.results.clone(),
            summary: Summary {
                total: scorecard.total,
                passed: scorecard.passed,
                warnings: scorecard.warnings,
                failed: scorecard.failed,
                score: scorecard.score,
                duration_ms: suite.duration.as_millis() as u64,
            },
            maturity: Maturity {
                level: scorecard.level,
                label: scorecard.level.to_string(),
                description: scorecard.level.description().to_string(),
                suggestions: scorecard.suggestions.clone(),
            },
            critical_failures: scorecard.critical_failures.clone(),
            gate_passed: scorecard.gate_passed(),
            cancelled: suite.cancelled,
            stopped_by: suite.stopped_by.clone(),
            skipped: suite.skipped.clone(),
        }
    }

    /// Whether the run should exit successfully.
    ///
    /// A cancelled run never succeeds. With `strict`, any failure counts,
    /// not only critical ones.
    pub fn success(&self, strict: bool) -> bool {
        if self.cancelled || !self.gate_passed {
            return false;
        }
        !strict || self.summary.failed == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{ResultBuilder, Status};
    use chrono::TimeZone;
    use std::collections::BTreeSet;
    use std::time::Duration;

    fn suite(statuses: &[(&str, Status)]) -> SuiteResult {
        SuiteResult {
            results: statuses
                .iter()
                .map(|(id, status)| {
                    ResultBuilder::new(*id, *id, Language::Common).with_status(*status, "msg")
                })
                .collect(),
            cancelled: false,
            stopped_by: None,
            skipped: Vec::new(),
            duration: Duration::from_millis(1250),
        }
    }

    fn report(suite: &SuiteResult, critical: &[&str]) -> Report {
        let critical: BTreeSet<String> = critical.iter().map(|s| s.to_string()).collect();
        let card = Scorecard::compute(&suite.results, &critical);
        let timestamp = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        Report::at(timestamp, Path::new("/work/app"), &[Language::Go], suite, &card)
    }

    #[test]
    fn json_shape() {
        let suite = suite(&[("a", Status::Pass), ("b", Status::Warn)]);
        let value = serde_json::to_value(report(&suite, &[])).unwrap();

        assert_eq!(value["timestamp"], "2026-01-02T03:04:05Z");
        assert_eq!(value["project"], "/work/app");
        assert_eq!(value["languages"], serde_json::json!(["go"]));
        assert_eq!(value["summary"]["total"], 2);
        assert_eq!(value["summary"]["score"], 50.0);
        assert_eq!(value["summary"]["duration_ms"], 1250);
        assert_eq!(value["results"][1]["status"], "warn");
        assert_eq!(value["results"][1]["passed"], false);
        assert_eq!(value["maturity"]["level"], "proof_of_concept");
        assert_eq!(value["maturity"]["label"], "Proof of Concept");
        assert_eq!(value["gate_passed"], true);
        assert!(value.get("stopped_by").is_none());
    }

    #[test]
    fn fail_fast_stop_is_reported() {
        let mut suite = suite(&[("build", Status::Fail)]);
        suite.stopped_by = Some("build".to_string());
        suite.skipped = vec!["lint".to_string()];
        let value = serde_json::to_value(report(&suite, &["build"])).unwrap();

        assert_eq!(value["stopped_by"], "build");
        assert_eq!(value["skipped"], serde_json::json!(["lint"]));
        assert_eq!(value["cancelled"], false);
        assert_eq!(value["results"][0]["duration_ms"], 0);
    }

    #[test]
    fn critical_failure_fails_run() {
        let suite = suite(&[("a", Status::Pass), ("build", Status::Fail)]);
        let report = report(&suite, &["build"]);
        assert_eq!(report.critical_failures, vec!["build"]);
        assert!(!report.success(false));
    }

    #[test]
    fn strict_fails_on_any_failure() {
        let suite = suite(&[("a", Status::Pass), ("lint", Status::Fail)]);
        let report = report(&suite, &[]);
        assert!(report.success(false));
        assert!(!report.success(true));
    }

    #[test]
    fn cancelled_run_never_succeeds() {
        let mut suite = suite(&[("a", Status::Pass)]);
        suite.cancelled = true;
        suite.skipped = vec!["b".to_string()];
        assert!(!report(&suite, &[]).success(false));
    }
}
