//! Real process-backed tool runner.

use std::time::Instant;

use contracts::{PipelineError, ToolInvocation};
use tokio::process::Command;
use tracing::debug;

use crate::runner::{ToolExit, ToolRunner};
use crate::Result;

/// Launches each invocation as a child process and waits for it to exit.
///
/// Stdout and stderr are inherited from the orchestrator so tool output is
/// visible but never parsed. There is no timeout: a hung tool hangs the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit> {
        debug!(
            stage = %invocation.stage,
            command = %invocation.command_line(),
            "Launching external tool"
        );

        let started = Instant::now();
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .await
            .map_err(|source| PipelineError::ToolLaunch {
                stage: invocation.stage,
                program: invocation.program.clone(),
                source,
            })?;

        let exit = ToolExit {
            code: status.code(),
            success: status.success(),
            duration: started.elapsed(),
        };

        debug!(
            stage = %invocation.stage,
            code = ?exit.code,
            duration_secs = exit.duration.as_secs_f64(),
            "External tool exited"
        );

        Ok(exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Stage;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_launch_failure_is_tool_launch_error() {
        let runner = ProcessRunner::new();
        let invocation = ToolInvocation::new(
            Stage::IntrinsicsAnalysis,
            PathBuf::from("/nonexistent/openMVG_main_SfMInit_ImageListing"),
        );

        let result = runner.run(&invocation).await;
        assert!(matches!(
            result,
            Err(PipelineError::ToolLaunch {
                stage: Stage::IntrinsicsAnalysis,
                ..
            })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_true_exits_successfully() {
        let runner = ProcessRunner::new();
        let invocation = ToolInvocation::new(Stage::ComputeFeatures, PathBuf::from("true"));

        let exit = runner.run(&invocation).await.unwrap();
        assert!(exit.success);
        assert_eq!(exit.code, Some(0));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_false_exit_is_reported_not_raised() {
        let runner = ProcessRunner::new();
        let invocation = ToolInvocation::new(Stage::ComputeFeatures, PathBuf::from("false"));

        let exit = runner.run(&invocation).await.unwrap();
        assert!(!exit.success);
        assert_eq!(exit.code, Some(1));
    }
}
