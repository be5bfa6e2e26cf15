//! Required file presence.

use crate::checker::{CheckContext, CheckResult, Checker, Language, ResultBuilder};
use crate::error::Result;
use crate::safepath;

/// Verifies that every configured file exists under the project root.
#[derive(Debug, Clone)]
pub struct FileExistsCheck {
    files: Vec<String>,
}

impl FileExistsCheck {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}

impl Checker for FileExistsCheck {
    fn id(&self) -> &str {
        "file_exists"
    }

    fn name(&self) -> &str {
        "Required Files"
    }

    fn run(&self, ctx: &CheckContext) -> Result<CheckResult> {
        let rb = ResultBuilder::for_checker(self, Language::Common);

        let missing: Vec<&str> = self
            .files
            .iter()
            .filter(|file| !safepath::exists(ctx.project_root(), file))
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            Ok(rb.pass("All required files present"))
        } else {
            Ok(rb.warn(format!("Missing files: {}", missing.join(", "))))
        }
    }
}
