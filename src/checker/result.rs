//! Check results and the builder checks use to produce them.

use std::time::Duration;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::status::{Language, Status};

/// Message used for a Warn/Fail result that would otherwise be empty.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Check failed";

/// The outcome of running one check.
///
/// Results are immutable once built. Whether a result passed is derived
/// from its status, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    id: String,
    name: String,
    status: Status,
    message: String,
    language: Language,
    duration: Duration,
}

impl CheckResult {
    /// Create a result. Warn and Fail results always carry a message.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: Status,
        message: impl Into<String>,
        language: Language,
    ) -> Self {
        let mut message = message.into();
        if status != Status::Pass && message.trim().is_empty() {
            message = DEFAULT_FAILURE_MESSAGE.to_string();
        }
        Self {
            id: id.into(),
            name: name.into(),
            status,
            message,
            language,
            duration: Duration::ZERO,
        }
    }

    /// The same result stamped with how long the check took.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Wall-clock time the check took, zero until the orchestrator stamps it.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// True iff the status is `Pass`.
    pub fn passed(&self) -> bool {
        self.status.is_pass()
    }
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CheckResult", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("status", &self.status)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("language", &self.language)?;
        state.serialize_field("duration_ms", &(self.duration.as_millis() as u64))?;
        state.end()
    }
}

/// Captures a check's identity so each result only names its outcome.
#[derive(Debug, Clone)]
pub struct ResultBuilder {
    id: String,
    name: String,
    language: Language,
}

impl ResultBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, language: Language) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            language,
        }
    }

    /// Builder for a checker, taking its id and name.
    pub fn for_checker(checker: &dyn super::Checker, language: Language) -> Self {
        Self::new(checker.id(), checker.name(), language)
    }

    pub fn pass(&self, message: impl Into<String>) -> CheckResult {
        self.with_status(Status::Pass, message)
    }

    pub fn warn(&self, message: impl Into<String>) -> CheckResult {
        self.with_status(Status::Warn, message)
    }

    pub fn fail(&self, message: impl Into<String>) -> CheckResult {
        self.with_status(Status::Fail, message)
    }

    pub fn with_status(&self, status: Status, message: impl Into<String>) -> CheckResult {
        CheckResult::new(
            self.id.clone(),
            self.name.clone(),
            status,
            message,
            self.language,
        )
    }
}
