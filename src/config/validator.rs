//! Configuration validation rules.
//!
//! - External checks need a non-empty id and name
//! - Timeouts must be positive
//! - Explicit languages must be recognised
//!
//! An empty or unsafe external *command* is deliberately not a validation
//! error: it surfaces as a Warn result when the check runs.

use crate::checker::Language;
use crate::config::schema::Config;
use crate::error::{Result, VettedError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, external) in config.external.iter().enumerate() {
        if external.id.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-id",
                format!("External check #{} has an empty id", index + 1),
            ));
        }
        if external.name.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-name",
                format!("External check '{}' has an empty name", external.id),
            ));
        }
    }

    if config.execution.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "execution.timeout_secs must be greater than zero",
        ));
    }
    if config.execution.check_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "zero-timeout",
            "execution.check_timeout_secs must be greater than zero",
        ));
    }

    for name in &config.language.explicit {
        if name.parse::<Language>().is_err() {
            errors.push(ValidationError::new(
                "unknown-language",
                format!("Unknown language '{}'", name),
            ));
        }
    }

    errors
}

/// Validate a configuration, failing with every problem joined together.
pub fn validate(config: &Config) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(VettedError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::ExternalCheckSpec;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn empty_external_id_and_name_are_reported() {
        let mut config = Config::default();
        config.external.push(ExternalCheckSpec::new("", "", "tool"));

        let errors = validate_config(&config);
        let rules: Vec<_> = errors.iter().map(|e| e.rule.as_str()).collect();
        assert_eq!(rules, vec!["missing-id", "missing-name"]);
    }

    #[test]
    fn empty_command_is_not_a_config_error() {
        let mut config = Config::default();
        config
            .external
            .push(ExternalCheckSpec::new("custom:x", "X", ""));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let mut config = Config::default();
        config.execution.timeout_secs = 0;
        config.execution.check_timeout_secs = 0;
        assert_eq!(validate_config(&config).len(), 2);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut config = Config::default();
        config.language.explicit = vec!["go".into(), "cobol".into()];
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("cobol"));
    }
}
