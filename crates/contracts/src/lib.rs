//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Execution Model
//! - One external tool process is live at a time; the orchestrator blocks on exit
//! - Stage artifacts are located by convention name, never inspected

mod blueprint;
mod error;
mod invocation;
mod mode;
mod report;
mod stage;

pub use blueprint::*;
pub use error::*;
pub use invocation::*;
pub use mode::*;
pub use report::*;
pub use stage::*;
