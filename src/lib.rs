//! vetted - Project maturity checks.
//!
//! vetted runs a suite of checks against a project directory, isolates
//! each one from the others, and turns the results into a score, a
//! maturity level and a pass/fail gate on critical checks. Projects can
//! add their own checks as external commands declared in `.vetted.yml`.
//!
//! # Modules
//!
//! - [`checker`] - Result and status model, the `Checker` trait
//! - [`checks`] - Built-in checks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.vetted.yml` loading, parsing, and validation
//! - [`detection`] - Project language detection
//! - [`error`] - Error types and result aliases
//! - [`external`] - Sandboxed external command checks
//! - [`registry`] - Ordered, deduplicated check registrations
//! - [`report`] - JSON run reports
//! - [`runner`] - Parallel execution with timeouts and cancellation
//! - [`score`] - Scoring and the critical gate
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use vetted::config::Config;
//! use vetted::registry::CheckRegistry;
//! use vetted::runner::{Orchestrator, RunOptions};
//! use vetted::score::Scorecard;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("README.md"), "# demo").unwrap();
//!
//! let registry = CheckRegistry::from_config(&Config::default()).unwrap();
//! let suite = Orchestrator::new(RunOptions::sequential())
//!     .run(dir.path(), registry.registrations());
//! let card = Scorecard::compute(&suite.results, &registry.critical_ids());
//!
//! assert_eq!(card.total, registry.len());
//! assert!(card.gate_passed());
//! ```

pub mod checker;
pub mod checks;
pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod external;
pub mod registry;
pub mod report;
pub mod runner;
pub mod safepath;
pub mod score;
pub mod ui;

pub use error::{Result, VettedError};
