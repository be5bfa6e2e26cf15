//! CI/CD pipeline presence.

use std::fs;
use std::path::Path;

use crate::checker::{CheckContext, CheckResult, Checker, Language, ResultBuilder};
use crate::error::Result;
use crate::safepath;

/// A CI system and the files that mark it as configured.
struct CiSystem {
    name: &'static str,
    markers: &'static [&'static str],
}

const CI_SYSTEMS: &[CiSystem] = &[
    CiSystem {
        name: "GitLab CI",
        markers: &[".gitlab-ci.yml"],
    },
    CiSystem {
        name: "Jenkins",
        markers: &["Jenkinsfile"],
    },
    CiSystem {
        name: "CircleCI",
        markers: &[".circleci/config.yml"],
    },
    CiSystem {
        name: "Travis CI",
        markers: &[".travis.yml"],
    },
    CiSystem {
        name: "Azure Pipelines",
        markers: &["azure-pipelines.yml"],
    },
    CiSystem {
        name: "Bitbucket Pipelines",
        markers: &["bitbucket-pipelines.yml"],
    },
    CiSystem {
        name: "Drone CI",
        markers: &[".drone.yml"],
    },
    CiSystem {
        name: "Taskfile",
        markers: &["Taskfile.yml", "Taskfile.yaml"],
    },
];

/// Verifies that at least one CI/CD configuration exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct CiCheck;

impl CiCheck {
    /// Names of every CI system configured under `root`.
    pub fn detect(root: &Path) -> Vec<&'static str> {
        let mut found = Vec::new();
        if has_github_actions(root) {
            found.push("GitHub Actions");
        }
        found.extend(
            CI_SYSTEMS
                .iter()
                .filter(|ci| ci.markers.iter().any(|m| safepath::exists(root, m)))
                .map(|ci| ci.name),
        );
        found
    }
}

impl Checker for CiCheck {
    fn id(&self) -> &str {
        "common:ci"
    }

    fn name(&self) -> &str {
        "CI Pipeline"
    }

    fn run(&self, ctx: &CheckContext) -> Result<CheckResult> {
        let rb = ResultBuilder::for_checker(self, Language::Common);
        let found = Self::detect(ctx.project_root());

        if found.is_empty() {
            Ok(rb.warn("No CI/CD configuration found"))
        } else {
            Ok(rb.pass(format!("{} configured", found.join(", "))))
        }
    }
}

/// A workflow directory only counts if it holds at least one YAML file.
fn has_github_actions(root: &Path) -> bool {
    let Ok(entries) = fs::read_dir(root.join(".github").join("workflows")) else {
        return false;
    };
    entries.flatten().any(|entry| {
        let path = entry.path();
        path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "yml" || ext == "yaml")
    })
}
