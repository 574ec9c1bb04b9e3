//! # Pipeline
//!
//! Stage sequencing and directory lifecycle for reconstruction runs.
//!
//! Responsibilities:
//! - Compute and create the canonical per-run output tree (`layout`)
//! - Build the fixed stage invocation tables (`stages`)
//! - Execute one (dataset, mode) run start to finish (`run`)
//! - Copy final mesh artifacts into the shared compiled folder (`compiler`)
//! - Drive the full campaign across datasets and modes (`driver`)

pub mod compiler;
pub mod driver;
pub mod layout;
pub mod run;
pub mod stages;

pub use contracts::{PipelineBlueprint, PipelineError, RunReport};
pub use driver::RunDriver;
pub use layout::RunLayout;
pub use run::{PipelineRun, RunStats};

/// Result alias
pub type Result<T> = std::result::Result<T, PipelineError>;
