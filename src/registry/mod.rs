//! The check registry.
//!
//! [`CheckRegistry`] resolves a [`Config`] into the ordered list of checks
//! a run executes. Built-ins come first; external checks are always
//! ordered after them at [`EXTERNAL_CHECK_ORDER`], whatever their position
//! in the config file.
//!
//! Ordering is a stable sort by `order`, so registration order breaks ties
//! and building twice from the same config yields the same list.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use crate::checker::{CheckMetadata, CheckRegistration, Language};
use crate::checks::builtin_registrations;
use crate::config::Config;
use crate::error::{Result, VettedError};
use crate::external::{CommandRunner, ExternalCheck, ExternalCheckSpec, SystemCommandRunner};

/// Order shared by every external check, above all built-in orders.
pub const EXTERNAL_CHECK_ORDER: i32 = 1000;

/// Ordered, deduplicated set of check registrations.
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    registrations: Vec<CheckRegistration>,
}

impl CheckRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry for a config, running external commands as real processes.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_config_with_runner(config, Arc::new(SystemCommandRunner::new()))
    }

    /// Build the registry for a config with a custom process boundary.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCheckId` if two declared checks share an id, even
    /// when one of them is disabled.
    pub fn from_config_with_runner(
        config: &Config,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self> {
        // An external command never outlives the check that runs it.
        let timeout = Duration::from_secs(
            config
                .execution
                .timeout_secs
                .min(config.execution.check_timeout_secs),
        );

        let mut declared = builtin_registrations(config);
        declared.extend(
            config
                .external
                .iter()
                .map(|spec| external_registration(spec, Arc::clone(&runner), timeout)),
        );

        let mut seen = HashSet::new();
        for reg in &declared {
            if !seen.insert(reg.id().to_string()) {
                return Err(VettedError::DuplicateCheckId {
                    id: reg.id().to_string(),
                });
            }
        }

        let mut registry = Self::new();
        for reg in declared {
            if config.is_check_disabled(reg.id()) {
                tracing::debug!(check = %reg.id(), "check disabled by config");
                continue;
            }
            registry.register(reg)?;
        }
        Ok(registry)
    }

    /// Add a registration, keeping the list sorted by order.
    ///
    /// Equal orders keep insertion order.
    pub fn register(&mut self, registration: CheckRegistration) -> Result<()> {
        if self.get(registration.id()).is_some() {
            return Err(VettedError::DuplicateCheckId {
                id: registration.id().to_string(),
            });
        }
        let index = self
            .registrations
            .partition_point(|r| r.meta.order <= registration.meta.order);
        self.registrations.insert(index, registration);
        Ok(())
    }

    /// Look up a registration by check id.
    pub fn get(&self, id: &str) -> Option<&CheckRegistration> {
        self.registrations.iter().find(|r| r.id() == id)
    }

    /// All registrations in run order.
    pub fn registrations(&self) -> &[CheckRegistration] {
        &self.registrations
    }

    /// Check ids in run order.
    pub fn ids(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.id()).collect()
    }

    /// Registrations that apply to a project in the given ecosystems.
    pub fn for_languages(&self, detected: &[Language]) -> Vec<CheckRegistration> {
        self.registrations
            .iter()
            .filter(|r| r.meta.applies_to(detected))
            .cloned()
            .collect()
    }

    /// Ids of every critical check.
    pub fn critical_ids(&self) -> BTreeSet<String> {
        self.registrations
            .iter()
            .filter(|r| r.meta.critical)
            .map(|r| r.id().to_string())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheckRegistration> {
        self.registrations.iter()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

fn external_registration(
    spec: &ExternalCheckSpec,
    runner: Arc<dyn CommandRunner>,
    timeout: Duration,
) -> CheckRegistration {
    let mut command_line = spec.command.clone();
    for arg in &spec.args {
        command_line.push(' ');
        command_line.push_str(arg);
    }

    let meta = CheckMetadata::new(spec.id.clone(), spec.name.clone(), EXTERNAL_CHECK_ORDER)
        .with_description(format!("Runs `{}`", command_line))
        .with_critical(spec.is_critical());

    CheckRegistration::new(
        Arc::new(ExternalCheck::new(spec.clone(), runner).with_timeout(timeout)),
        meta,
    )
}
