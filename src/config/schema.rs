//! Configuration schema definitions for vetted.
//!
//! These structs map onto the `.vetted.yml` file format. Every section is
//! optional; an absent file or key yields the defaults below.

use serde::{Deserialize, Serialize};

use crate::external::ExternalCheckSpec;

/// Root configuration structure for `.vetted.yml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Required-file check settings
    pub files: FilesConfig,

    /// Check selection
    pub checks: ChecksConfig,

    /// Project-declared external checks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<ExternalCheckSpec>,

    /// Scheduling and timeouts
    pub execution: ExecutionConfig,

    /// Language detection
    pub language: LanguageConfig,
}

/// Files the `file_exists` check requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub required: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            required: vec!["README.md".to_string(), "LICENSE".to_string()],
        }
    }
}

/// Which checks to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Check ids or wildcard patterns (`*`, `*:*`, `prefix:*`, `*:suffix`).
    ///
    /// Patterns starting with `*` must be quoted in YAML.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
}

/// How checks are scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Run checks on a worker pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Maximum concurrent checks (0 = available parallelism)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub workers: usize,

    /// Wall-clock budget for each external command, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Wall-clock budget for any single check, in seconds
    #[serde(default = "default_check_timeout_secs")]
    pub check_timeout_secs: u64,

    /// Stop the run at the first failing critical check
    #[serde(default, skip_serializing_if = "is_false")]
    pub fail_fast: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            workers: 0,
            timeout_secs: default_timeout_secs(),
            check_timeout_secs: default_check_timeout_secs(),
            fail_fast: false,
        }
    }
}

/// Language detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Languages to assume instead of detecting them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explicit: Vec<String>,

    /// Detect languages from marker files
    #[serde(default = "default_true")]
    pub auto_detect: bool,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            explicit: Vec::new(),
            auto_detect: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_check_timeout_secs() -> u64 {
    120
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_zero(v: &usize) -> bool {
    *v == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::Severity;

    #[test]
    fn empty_document_yields_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.files.required, vec!["README.md", "LICENSE"]);
        assert!(config.execution.parallel);
        assert_eq!(config.execution.timeout_secs, 30);
        assert_eq!(config.execution.check_timeout_secs, 120);
        assert!(!config.execution.fail_fast);
        assert!(config.language.auto_detect);
    }

    #[test]
    fn parses_full_document() {
        let yaml = r#"
files:
  required: [README.md]
checks:
  disabled: ["common:dockerfile", "*:tests"]
external:
  - id: custom:lint
    name: Custom Lint
    command: my-linter
    args: ["--strict"]
    severity: fail
    source_dir: backend
execution:
  parallel: false
  workers: 2
  timeout_secs: 10
  fail_fast: true
language:
  explicit: [go]
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.files.required, vec!["README.md"]);
        assert_eq!(config.checks.disabled.len(), 2);
        assert_eq!(config.external.len(), 1);
        assert_eq!(config.external[0].severity, Severity::Fail);
        assert_eq!(config.external[0].source_dir.as_deref(), Some("backend"));
        assert!(!config.execution.parallel);
        assert_eq!(config.execution.workers, 2);
        assert_eq!(config.execution.timeout_secs, 10);
        assert_eq!(config.execution.check_timeout_secs, 120);
        assert!(config.execution.fail_fast);
        assert_eq!(config.language.explicit, vec!["go"]);
    }

    #[test]
    fn explicit_empty_required_list_is_kept() {
        let config: Config = serde_yaml::from_str("files:\n  required: []\n").unwrap();
        assert!(config.files.required.is_empty());
    }
}
