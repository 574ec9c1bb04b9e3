//! Tool runner abstraction
//!
//! Defines the trait for launching external tools, supporting the real
//! process-backed implementation and mock testing.

use std::future::Future;
use std::time::Duration;

use contracts::ToolInvocation;

use crate::Result;

/// Exit information from one external tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// Exit code, None when the process was killed by a signal
    pub code: Option<i32>,
    /// Whether the process exited successfully
    pub success: bool,
    /// Wall-clock time from spawn to exit
    pub duration: Duration,
}

impl ToolExit {
    /// A clean zero exit
    pub fn success(duration: Duration) -> Self {
        Self {
            code: Some(0),
            success: true,
            duration,
        }
    }
}

/// External tool launcher trait
///
/// One invocation maps to one operating-system process; the returned future
/// resolves only after the process has exited, so at most one tool is live
/// at a time when calls are awaited sequentially.
///
/// Launch failure (executable missing or not executable) is an error; a
/// nonzero exit status is not — exit-status policy belongs to the caller.
pub trait ToolRunner: Send + Sync {
    /// Launch the tool and block until it exits
    fn run(&self, invocation: &ToolInvocation) -> impl Future<Output = Result<ToolExit>> + Send;
}
