//! Container readiness.

use crate::checker::{CheckContext, CheckResult, Checker, Language, ResultBuilder};
use crate::error::Result;
use crate::safepath;

const CONTAINER_FILES: &[&str] = &["Dockerfile", "dockerfile", "Containerfile", "containerfile"];

/// Verifies that a Dockerfile or Containerfile exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerCheck;

impl Checker for ContainerCheck {
    fn id(&self) -> &str {
        "common:dockerfile"
    }

    fn name(&self) -> &str {
        "Container Ready"
    }

    fn run(&self, ctx: &CheckContext) -> Result<CheckResult> {
        let rb = ResultBuilder::for_checker(self, Language::Common);
        let root = ctx.project_root();

        let Some(found) = CONTAINER_FILES
            .iter()
            .find(|name| safepath::exists(root, name))
        else {
            return Ok(rb.warn("No Dockerfile or Containerfile found"));
        };

        if safepath::exists(root, ".dockerignore") {
            Ok(rb.pass(format!("{} found with .dockerignore", found)))
        } else {
            Ok(rb.pass(format!("{} found (consider adding .dockerignore)", found)))
        }
    }
}
