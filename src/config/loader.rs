//! Configuration file discovery and loading.

use crate::config::schema::Config;
use crate::error::{Result, VettedError};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = ".vetted.yml";

/// Path of the project config file, whether or not it exists.
pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}

/// Find the project root by walking up from a directory.
///
/// Looks for `.vetted.yml`, falling back to a `.git` directory.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_FILE_NAME).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load the project config, using defaults when no file exists.
pub fn load_config(project_root: &Path) -> Result<Config> {
    let path = config_path(project_root);
    match load_config_file(&path) {
        Err(VettedError::ConfigNotFound { .. }) => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
        other => other,
    }
}

/// Load a single config file and parse it into [`Config`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VettedError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VettedError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`Config`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_yaml::from_str(content).map_err(|e| {
        let mut message = e.to_string();
        if ["alias", "anchor", "alphabetic or numeric"]
            .iter()
            .any(|hint| message.contains(hint))
        {
            message.push_str(
                " (wildcard patterns in checks.disabled must be quoted, e.g. \"*:tests\")",
            );
        }
        VettedError::ConfigParseError {
            path: source_path.to_path_buf(),
            message,
        }
    })
}
