//! Configuration loading, parsing, and validation for vetted.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - Disabled-check patterns in [`pattern`]
//!
//! # Example
//!
//! ```
//! use vetted::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".vetted.yml"), "files:\n  required: [README.md]\n").unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.files.required, vec!["README.md".to_string()]);
//! ```

pub mod loader;
pub mod pattern;
pub mod schema;
pub mod validator;

pub use loader::{
    config_path, find_project_root, load_config, load_config_file, parse_config,
    CONFIG_FILE_NAME,
};
pub use pattern::{is_disabled, matches_pattern};
pub use schema::{ChecksConfig, Config, ExecutionConfig, FilesConfig, LanguageConfig};
pub use validator::{validate, validate_config, ValidationError};

impl Config {
    /// Whether `check_id` is switched off by `checks.disabled`.
    pub fn is_check_disabled(&self, check_id: &str) -> bool {
        is_disabled(check_id, &self.checks.disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_check_disabled_uses_patterns() {
        let mut config = Config::default();
        config.checks.disabled = vec!["custom:*".into(), "ci".into()];
        assert!(config.is_check_disabled("custom:lint"));
        assert!(config.is_check_disabled("common:ci"));
        assert!(!config.is_check_disabled("common:license"));
    }
}
