//! The external check wire protocol.
//!
//! A command may print a JSON object on stdout (or stderr when stdout is
//! empty) to state its result explicitly:
//!
//! ```json
//! {"message": "2 issues", "status": "warning"}
//! ```
//!
//! Commands that know nothing about JSON are judged by exit code instead:
//! 0 passes, 1 warns, 2 and above fail.

use serde::Deserialize;

use super::spec::Severity;
use crate::checker::Status;

/// Structured payload an external command may emit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExternalOutput {
    pub message: String,
    pub status: String,
}

impl ExternalOutput {
    /// Status named by the payload. Unrecognised or absent values pass.
    pub fn status(&self) -> Status {
        match self.status.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Status::Warn,
            "fail" | "error" => Status::Fail,
            _ => Status::Pass,
        }
    }
}

/// Parse command output as an [`ExternalOutput`] object.
///
/// Only a JSON object qualifies. Key order and extra fields are irrelevant,
/// and keys match case-insensitively (`Status` reads as `status`). A key
/// already in lowercase wins over its differently-cased twins.
pub fn parse_output(output: &str) -> Option<ExternalOutput> {
    let value: serde_json::Value = serde_json::from_str(output).ok()?;
    let serde_json::Value::Object(fields) = value else {
        return None;
    };

    let mut folded = serde_json::Map::with_capacity(fields.len());
    for (key, value) in fields {
        let lower = key.to_ascii_lowercase();
        if key == lower || !folded.contains_key(&lower) {
            folded.insert(lower, value);
        }
    }
    serde_json::from_value(serde_json::Value::Object(folded)).ok()
}

/// Pick the text a command produced: stdout, or stderr when stdout is blank.
pub fn select_output<'a>(stdout: &'a str, stderr: &'a str) -> &'a str {
    let stdout = stdout.trim();
    if stdout.is_empty() {
        stderr.trim()
    } else {
        stdout
    }
}

/// Status for a command that exited without a JSON payload.
///
/// `code` is `None` when the process did not exit normally, which is
/// treated like exit code 1.
pub fn status_from_exit(code: Option<i32>, severity: Severity) -> Status {
    let code = code.unwrap_or(1);
    if code == 0 {
        return Status::Pass;
    }
    if code != 1 || severity == Severity::Fail {
        Status::Fail
    } else {
        Status::Warn
    }
}

/// Status for an ambiguous failure where no exit code is meaningful.
pub fn status_from_severity(severity: Severity) -> Status {
    match severity {
        Severity::Warn => Status::Warn,
        Severity::Fail => Status::Fail,
    }
}
