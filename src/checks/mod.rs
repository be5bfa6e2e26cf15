//! Built-in checks.
//!
//! Each built-in is cheap and structural, so all of them are ordered ahead
//! of external checks.

pub mod ci;
pub mod container;
pub mod files;
pub mod license;

use std::sync::Arc;

use crate::checker::{CheckMetadata, CheckRegistration};
use crate::config::Config;

pub use ci::CiCheck;
pub use container::ContainerCheck;
pub use files::FileExistsCheck;
pub use license::LicenseCheck;

pub const FILE_EXISTS_ORDER: i32 = 900;
pub const CONTAINER_ORDER: i32 = 910;
pub const CI_ORDER: i32 = 920;
pub const LICENSE_ORDER: i32 = 950;

/// Registrations for every built-in check, in declaration order.
pub fn builtin_registrations(config: &Config) -> Vec<CheckRegistration> {
    vec![
        CheckRegistration::new(
            Arc::new(FileExistsCheck::new(config.files.required.clone())),
            CheckMetadata::new("file_exists", "Required Files", FILE_EXISTS_ORDER)
                .with_description("Checks for required documentation files like README.md.")
                .with_suggestion("Add missing documentation files (README.md, etc.)"),
        ),
        CheckRegistration::new(
            Arc::new(ContainerCheck),
            CheckMetadata::new("common:dockerfile", "Container Ready", CONTAINER_ORDER)
                .with_description("Verifies a Dockerfile or Containerfile exists.")
                .with_suggestion("Add Dockerfile for containerization"),
        ),
        CheckRegistration::new(
            Arc::new(CiCheck),
            CheckMetadata::new("common:ci", "CI Pipeline", CI_ORDER)
                .with_description(
                    "Checks for CI/CD pipeline configuration (GitHub Actions, GitLab CI, etc.).",
                )
                .with_suggestion("Add CI pipeline configuration (.github/workflows, etc.)"),
        ),
        CheckRegistration::new(
            Arc::new(LicenseCheck),
            CheckMetadata::new("common:license", "License", LICENSE_ORDER)
                .with_description("Verifies a LICENSE file exists.")
                .with_suggestion("Add LICENSE file for license compliance"),
        ),
    ]
}
