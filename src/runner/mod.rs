//! Check execution orchestration.

pub mod cancel;
pub mod orchestrator;

pub use cancel::CancellationToken;
pub use orchestrator::{Orchestrator, RunOptions, RunProgress, SuiteResult};
