//! The check abstraction.
//!
//! Every check, built-in or external, implements [`Checker`]. The
//! orchestrator only ever sees `dyn Checker`, paired with the policy in
//! [`CheckMetadata`] through a [`CheckRegistration`].
//!
//! - [`status`] - [`Status`] and [`Language`]
//! - [`result`] - [`CheckResult`] and [`ResultBuilder`]

pub mod result;
pub mod status;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::runner::CancellationToken;

pub use result::{CheckResult, ResultBuilder, DEFAULT_FAILURE_MESSAGE};
pub use status::{Language, Status};

/// Everything a check may read while it runs.
#[derive(Debug, Clone)]
pub struct CheckContext {
    project_root: PathBuf,
    cancellation: CancellationToken,
}

impl CheckContext {
    pub fn new(project_root: impl Into<PathBuf>, cancellation: CancellationToken) -> Self {
        Self {
            project_root: project_root.into(),
            cancellation,
        }
    }

    /// Context with a token nobody will cancel.
    pub fn detached(project_root: impl Into<PathBuf>) -> Self {
        Self::new(project_root, CancellationToken::new())
    }

    /// Root of the project under evaluation. Checks treat it as read-only.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

/// A single evaluation of a project property.
///
/// `run` reports project defects as Warn/Fail results. An `Err` is reserved
/// for faults in the check itself (misconfiguration, cancellation) and is
/// recorded by the orchestrator without aborting the run.
pub trait Checker: Send + Sync {
    /// Stable, unique, namespaced identifier (e.g. `common:ci`).
    fn id(&self) -> &str;

    /// Human-readable label.
    fn name(&self) -> &str;

    /// Evaluate the project.
    fn run(&self, ctx: &CheckContext) -> Result<CheckResult>;
}

/// Scheduling and scoring policy for a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Ecosystems this check applies to.
    pub languages: Vec<Language>,
    /// A failing critical check gates the build regardless of score.
    pub critical: bool,
    /// Lower runs and reports first.
    pub order: i32,
    pub suggestion: Option<String>,
}

impl CheckMetadata {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            languages: vec![Language::Common],
            critical: false,
            order,
            suggestion: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Whether this check should run for a project in the given ecosystems.
    pub fn applies_to(&self, detected: &[Language]) -> bool {
        self.languages
            .iter()
            .any(|lang| *lang == Language::Common || detected.contains(lang))
    }
}

/// A checker paired with its metadata.
#[derive(Clone)]
pub struct CheckRegistration {
    pub checker: Arc<dyn Checker>,
    pub meta: CheckMetadata,
}

impl CheckRegistration {
    pub fn new(checker: Arc<dyn Checker>, meta: CheckMetadata) -> Self {
        Self { checker, meta }
    }

    pub fn id(&self) -> &str {
        &self.meta.id
    }
}

impl fmt::Debug for CheckRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRegistration")
            .field("checker", &self.checker.id())
            .field("meta", &self.meta)
            .finish()
    }
}
