//! Scoring a run.
//!
//! The score is the share of passing checks. It says nothing about which
//! checks failed, so a [`Scorecard`] also lists failed critical checks as a
//! separate gate: nine passes out of ten still block a build if the tenth
//! is critical.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::checker::{CheckResult, Status};

/// How far along a project is, judged by its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    ProofOfConcept,
    Development,
    Mature,
    ProductionReady,
}

impl MaturityLevel {
    pub fn description(self) -> &'static str {
        match self {
            MaturityLevel::ProductionReady => "All checks pass, ready for production deployment",
            MaturityLevel::Mature => "Most checks pass, minor improvements recommended",
            MaturityLevel::Development => "Core functionality works, quality improvements needed",
            MaturityLevel::ProofOfConcept => "Early stage, focus on core functionality first",
        }
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaturityLevel::ProductionReady => write!(f, "Production-Ready"),
            MaturityLevel::Mature => write!(f, "Mature"),
            MaturityLevel::Development => write!(f, "Development"),
            MaturityLevel::ProofOfConcept => write!(f, "Proof of Concept"),
        }
    }
}

/// Aggregate view of a run's results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    /// Percentage of passing checks, 0 for an empty run.
    pub score: f64,
    pub passed: usize,
    pub warnings: usize,
    pub failed: usize,
    pub total: usize,
    /// Ids of failed critical checks, sorted.
    pub critical_failures: Vec<String>,
    pub level: MaturityLevel,
    pub suggestions: Vec<String>,
}

impl Scorecard {
    /// Score `results`. `critical_ids` names the checks whose failure gates.
    ///
    /// Insensitive to the order of `results`.
    pub fn compute(results: &[CheckResult], critical_ids: &BTreeSet<String>) -> Self {
        let mut passed = 0;
        let mut warnings = 0;
        let mut failed = 0;
        let mut critical_failures = BTreeSet::new();

        for result in results {
            match result.status() {
                Status::Pass => passed += 1,
                Status::Warn => warnings += 1,
                Status::Fail => {
                    failed += 1;
                    if critical_ids.contains(result.id()) {
                        critical_failures.insert(result.id().to_string());
                    }
                }
            }
        }

        let total = results.len();
        let score = if total == 0 {
            0.0
        } else {
            passed as f64 / total as f64 * 100.0
        };
        let (level, suggestions) = assess(total, score, warnings, failed);

        Self {
            score,
            passed,
            warnings,
            failed,
            total,
            critical_failures: critical_failures.into_iter().collect(),
            level,
            suggestions,
        }
    }

    /// True when no critical check failed.
    pub fn gate_passed(&self) -> bool {
        self.critical_failures.is_empty()
    }
}

fn assess(total: usize, score: f64, warnings: usize, failed: usize) -> (MaturityLevel, Vec<String>) {
    let mut suggestions = Vec::new();

    if total == 0 {
        return (MaturityLevel::ProofOfConcept, suggestions);
    }

    let level = if failed == 0 && warnings == 0 {
        MaturityLevel::ProductionReady
    } else if failed == 0 && score >= 80.0 {
        suggestions.push("Address warnings to reach production-ready status".to_string());
        MaturityLevel::Mature
    } else if failed <= 2 && score >= 60.0 {
        suggestions.push("Fix failing checks to improve maturity".to_string());
        if warnings > 0 {
            suggestions.push("Review and address warnings".to_string());
        }
        MaturityLevel::Development
    } else {
        suggestions.push("Focus on critical checks first".to_string());
        if failed > 2 {
            suggestions
                .push("Many checks failing - prioritize fixing critical failures".to_string());
        }
        MaturityLevel::ProofOfConcept
    };

    (level, suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{Language, ResultBuilder};
    use proptest::prelude::*;

    fn result(id: &str, status: Status) -> CheckResult {
        ResultBuilder::new(id, id, Language::Common).with_status(status, "msg")
    }

    fn critical(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_run_scores_zero() {
        let card = Scorecard::compute(&[], &BTreeSet::new());
        assert_eq!(card.score, 0.0);
        assert_eq!(card.total, 0);
        assert!(card.gate_passed());
        assert_eq!(card.level, MaturityLevel::ProofOfConcept);
    }

    #[test]
    fn score_is_share_of_passes() {
        let results = vec![
            result("a", Status::Pass),
            result("b", Status::Pass),
            result("c", Status::Warn),
            result("d", Status::Fail),
        ];
        let card = Scorecard::compute(&results, &BTreeSet::new());
        assert_eq!(card.score, 50.0);
        assert_eq!((card.passed, card.warnings, card.failed), (2, 1, 1));
    }

    #[test]
    fn critical_failure_gates_despite_high_score() {
        let mut results: Vec<_> = (0..9)
            .map(|i| result(&format!("ok{}", i), Status::Pass))
            .collect();
        results.push(result("build", Status::Fail));

        let card = Scorecard::compute(&results, &critical(&["build"]));
        assert_eq!(card.score, 90.0);
        assert!(!card.gate_passed());
        assert_eq!(card.critical_failures, vec!["build"]);
    }

    #[test]
    fn critical_warn_does_not_gate() {
        let results = vec![result("build", Status::Warn)];
        assert!(Scorecard::compute(&results, &critical(&["build"])).gate_passed());
    }

    #[test]
    fn critical_failures_are_sorted() {
        let results = vec![result("z", Status::Fail), result("a", Status::Fail)];
        let card = Scorecard::compute(&results, &critical(&["a", "z"]));
        assert_eq!(card.critical_failures, vec!["a", "z"]);
    }

    #[test]
    fn maturity_levels() {
        let all_pass = vec![result("a", Status::Pass); 5];
        assert_eq!(
            Scorecard::compute(&all_pass, &BTreeSet::new()).level,
            MaturityLevel::ProductionReady
        );

        let mut mature = vec![result("a", Status::Pass); 4];
        mature.push(result("w", Status::Warn));
        let card = Scorecard::compute(&mature, &BTreeSet::new());
        assert_eq!(card.level, MaturityLevel::Mature);
        assert_eq!(card.suggestions.len(), 1);

        let mut development = vec![result("a", Status::Pass); 3];
        development.push(result("f", Status::Fail));
        development.push(result("w", Status::Warn));
        assert_eq!(
            Scorecard::compute(&development, &BTreeSet::new()).level,
            MaturityLevel::Development
        );

        let poc = vec![result("f", Status::Fail); 3];
        let card = Scorecard::compute(&poc, &BTreeSet::new());
        assert_eq!(card.level, MaturityLevel::ProofOfConcept);
        assert_eq!(card.suggestions.len(), 2);
    }

    #[test]
    fn level_display_names() {
        assert_eq!(MaturityLevel::ProductionReady.to_string(), "Production-Ready");
        assert_eq!(MaturityLevel::ProofOfConcept.to_string(), "Proof of Concept");
    }

    fn status_strategy() -> impl Strategy<Value = Status> {
        prop_oneof![Just(Status::Pass), Just(Status::Warn), Just(Status::Fail)]
    }

    proptest! {
        #[test]
        fn score_ignores_result_order(
            (entries, order) in prop::collection::vec((status_strategy(), any::<bool>()), 0..40)
                .prop_flat_map(|entries| {
                    let indices: Vec<usize> = (0..entries.len()).collect();
                    (Just(entries), Just(indices).prop_shuffle())
                })
        ) {
            let mut results = Vec::new();
            let mut critical_ids = BTreeSet::new();
            for (i, (status, is_critical)) in entries.iter().enumerate() {
                let id = format!("check{}", i);
                if *is_critical {
                    critical_ids.insert(id.clone());
                }
                results.push(result(&id, *status));
            }
            let shuffled: Vec<CheckResult> = order.iter().map(|&i| results[i].clone()).collect();

            prop_assert_eq!(
                Scorecard::compute(&results, &critical_ids),
                Scorecard::compute(&shuffled, &critical_ids)
            );
        }
    }
}
