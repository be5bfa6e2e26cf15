//! License file presence.

use crate::checker::{CheckContext, CheckResult, Checker, Language, ResultBuilder};
use crate::error::Result;
use crate::safepath;

const LICENSE_FILES: &[&str] = &[
    "LICENSE",
    "LICENSE.md",
    "LICENSE.txt",
    "LICENCE",
    "LICENCE.md",
    "COPYING",
    "UNLICENSE",
];

/// Verifies the project declares a license.
#[derive(Debug, Clone, Copy, Default)]
pub struct LicenseCheck;

impl Checker for LicenseCheck {
    fn id(&self) -> &str {
        "common:license"
    }

    fn name(&self) -> &str {
        "License"
    }

    fn run(&self, ctx: &CheckContext) -> Result<CheckResult> {
        let rb = ResultBuilder::for_checker(self, Language::Common);

        match LICENSE_FILES
            .iter()
            .find(|name| safepath::exists(ctx.project_root(), name))
        {
            Some(found) => Ok(rb.pass(format!("License file found: {}", found))),
            None => Ok(rb.warn("No LICENSE file found")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Status;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn warns_without_license() {
        let temp = TempDir::new().unwrap();
        let result = LicenseCheck.run(&CheckContext::detached(temp.path())).unwrap();
        assert_eq!(result.status(), Status::Warn);
    }

    #[test]
    fn accepts_copying() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("COPYING"), "GPL").unwrap();
        let result = LicenseCheck.run(&CheckContext::detached(temp.path())).unwrap();
        assert_eq!(result.status(), Status::Pass);
        assert_eq!(result.message(), "License file found: COPYING");
    }
}
