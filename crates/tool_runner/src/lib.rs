//! # Tool Runner
//!
//! External-process execution seam.
//!
//! Responsibilities:
//! - Define the `ToolRunner` trait abstracting one blocking tool launch
//! - Provide the real `ProcessRunner` backed by `tokio::process`
//! - Provide `MockRunner` for tests: records invocations, scripts produced
//!   artifacts, injects exit-code failures

pub mod mock;
pub mod process;
pub mod runner;

pub use contracts::{PipelineError, ToolInvocation};
pub use mock::MockRunner;
pub use process::ProcessRunner;
pub use runner::{ToolExit, ToolRunner};

/// Result alias
pub type Result<T> = std::result::Result<T, PipelineError>;
