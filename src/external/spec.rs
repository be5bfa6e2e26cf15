//! Declarations of project-supplied external checks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an external check's ambiguous failure (exit code 1, timeout) is classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    #[serde(alias = "warning")]
    Warn,
    #[serde(alias = "error")]
    Fail,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warn => write!(f, "warn"),
            Severity::Fail => write!(f, "fail"),
        }
    }
}

/// An external check as declared in `.vetted.yml`.
///
/// ```yaml
/// external:
///   - id: custom:lint
///     name: Custom Lint
///     command: my-linter
///     args: ["--strict"]
///     severity: fail
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalCheckSpec {
    /// Unique check id.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Executable name (resolved on PATH) or absolute path.
    pub command: String,

    /// Arguments passed verbatim, never through a shell.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default)]
    pub severity: Severity,

    /// Subdirectory of the project to run the command in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
}

impl ExternalCheckSpec {
    pub fn new(id: impl Into<String>, name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            severity: Severity::Warn,
            source_dir: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_source_dir(mut self, dir: impl Into<String>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// A `fail` severity marks the check as critical.
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Fail
    }
}
