//! Status and language vocabulary shared by every check.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome severity of a single check.
///
/// `Pass` needs no follow-up, `Warn` carries a recommendation and `Fail`
/// means a requirement was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

impl Status {
    /// Whether this status counts as passing.
    pub fn is_pass(self) -> bool {
        self == Status::Pass
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "PASS"),
            Status::Warn => write!(f, "WARN"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// Ecosystem a check targets.
///
/// `Common` is the ecosystem-agnostic sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Common,
    Go,
    Python,
    Node,
    TypeScript,
    Java,
    Rust,
    Swift,
}

impl Language {
    /// Every concrete ecosystem, excluding `Common`.
    pub const ALL: [Language; 7] = [
        Language::Go,
        Language::Python,
        Language::Node,
        Language::TypeScript,
        Language::Java,
        Language::Rust,
        Language::Swift,
    ];

    /// Lowercase identifier used in config files and check ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Common => "common",
            Language::Go => "go",
            Language::Python => "python",
            Language::Node => "node",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Rust => "rust",
            Language::Swift => "swift",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(Language::Common),
            "go" | "golang" => Ok(Language::Go),
            "python" => Ok(Language::Python),
            "node" | "nodejs" | "javascript" => Ok(Language::Node),
            "typescript" | "ts" => Ok(Language::TypeScript),
            "java" => Ok(Language::Java),
            "rust" => Ok(Language::Rust),
            "swift" => Ok(Language::Swift),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}
