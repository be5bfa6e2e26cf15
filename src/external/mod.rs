//! Project-declared external checks.
//!
//! An external check is any command listed under `external:` in
//! `.vetted.yml`. The command name is validated before anything is spawned,
//! resolved to an absolute executable, run without a shell and judged by
//! its JSON payload or exit code.
//!
//! - [`spec`] - the declaration and its [`Severity`]
//! - [`validate`] - command-name validation
//! - [`exec`] - the [`CommandRunner`] process boundary
//! - [`protocol`] - output interpretation
//! - [`check`] - [`ExternalCheck`], the [`Checker`](crate::checker::Checker) adapter

pub mod check;
pub mod exec;
pub mod protocol;
pub mod spec;
pub mod validate;

pub use check::{ExternalCheck, DEFAULT_EXTERNAL_TIMEOUT};
pub use exec::{CommandOutput, CommandRunner, Invocation, SystemCommandRunner, Termination};
pub use protocol::ExternalOutput;
pub use spec::{ExternalCheckSpec, Severity};
pub use validate::{validate_command, CommandRejection};
