//! List command implementation.
//!
//! The `vetted list` command lists registered checks in run order.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::checker::{CheckRegistration, Language};
use crate::cli::args::ListArgs;
use crate::detection::detect_for_config;
use crate::error::{Result, VettedError};
use crate::registry::CheckRegistry;
use crate::ui::theme::VettedTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_project_config;

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ListArgs,
}

/// One check as printed by `vetted list --json`.
#[derive(Debug, Serialize)]
struct ListedCheck<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    languages: &'a [Language],
    critical: bool,
    order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'a str>,
}

impl<'a> From<&'a CheckRegistration> for ListedCheck<'a> {
    fn from(reg: &'a CheckRegistration) -> Self {
        Self {
            id: &reg.meta.id,
            name: &reg.meta.name,
            description: &reg.meta.description,
            languages: &reg.meta.languages,
            critical: reg.meta.critical,
            order: reg.meta.order,
            suggestion: reg.meta.suggestion.as_deref(),
        }
    }
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: None,
            args,
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_project_config(&self.project_root, self.config_path.as_deref())?;
        let registry = CheckRegistry::from_config(&config)?;

        let registrations = if self.args.applicable {
            let detection = detect_for_config(&self.project_root, &config)?;
            registry.for_languages(&detection.languages)
        } else {
            registry.registrations().to_vec()
        };

        if self.args.json {
            let listed: Vec<ListedCheck<'_>> = registrations.iter().map(ListedCheck::from).collect();
            let json =
                serde_json::to_string_pretty(&listed).map_err(|e| VettedError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = VettedTheme::detect();
        ui.message(&format!("  {}", theme.key.apply_to("Checks:")));
        for reg in &registrations {
            let languages: Vec<&str> = reg.meta.languages.iter().map(|l| l.as_str()).collect();
            let critical = if reg.meta.critical {
                format!(" {}", theme.error.apply_to("[critical]"))
            } else {
                String::new()
            };
            ui.message(&format!(
                "    {} {}{} {}",
                theme.highlight.apply_to(&reg.meta.id),
                theme.dim.apply_to(format!("- {}", reg.meta.name)),
                critical,
                theme.dim.apply_to(format!("({})", languages.join(", ")))
            ));
            if !reg.meta.description.is_empty() {
                ui.message(&format!("      {}", theme.dim.apply_to(&reg.meta.description)));
            }
        }

        Ok(CommandResult::success())
    }
}
