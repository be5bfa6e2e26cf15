//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`vetted check`, `vetted list`)
//! - Shared config loading
//! - Consistent global flag handling

pub mod check;
pub mod dispatcher;
pub mod list;
pub mod run;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::Path;

use crate::config::{load_config, load_config_file, validate, Config};
use crate::error::Result;

/// Exit code for a run stopped by Ctrl-C.
pub const EXIT_CANCELLED: i32 = 130;

/// Load and validate the config for a project.
///
/// An explicit `config_path` must exist. Without one, a missing
/// `.vetted.yml` means defaults.
pub(crate) fn load_project_config(project_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let config = match config_path {
        Some(path) => load_config_file(path)?,
        None => load_config(project_root)?,
    };
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VettedError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_default_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_project_config(temp.path(), None).unwrap();
        assert!(config.external.is_empty());
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        let err = load_project_config(temp.path(), Some(&path)).unwrap_err();
        assert!(matches!(err, VettedError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".vetted.yml"),
            "execution:\n  timeout_secs: 0\n",
        )
        .unwrap();
        let err = load_project_config(temp.path(), None).unwrap_err();
        assert!(matches!(err, VettedError::ConfigValidationError { .. }));
    }
}
