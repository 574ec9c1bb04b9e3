//! Mock tool runner
//!
//! Mock implementation for unit and e2e tests, supporting failure injection.
//! Records every invocation in order, can create the artifact files a stage
//! would conventionally produce, and can override exit codes per stage.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use contracts::{PipelineError, Stage, ToolInvocation};

use crate::runner::{ToolExit, ToolRunner};
use crate::Result;

#[derive(Debug, Default)]
struct Inner {
    /// Every invocation, in launch order
    invocations: Vec<ToolInvocation>,
    /// Files to create when a stage runs (stands in for real tool output)
    artifacts: HashMap<Stage, Vec<PathBuf>>,
    /// Stages whose artifact creation is suppressed (simulated silent failure)
    suppressed: HashSet<Stage>,
    /// Exit-code overrides per stage
    exit_codes: HashMap<Stage, i32>,
    /// Stages that should fail to launch entirely
    launch_failures: HashSet<Stage>,
}

/// Mock tool runner
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    inner: Arc<Mutex<Inner>>,
}

impl MockRunner {
    /// Create a mock runner where every stage succeeds and produces nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Register files to create whenever `stage` runs.
    ///
    /// Parent directories are created as needed. May be called repeatedly;
    /// paths accumulate, so one runner can serve several (dataset, mode) runs.
    pub fn create_on_run(&self, stage: Stage, paths: Vec<PathBuf>) {
        self.inner
            .lock()
            .unwrap()
            .artifacts
            .entry(stage)
            .or_default()
            .extend(paths);
    }

    /// Make `stage` run without producing its registered artifacts.
    ///
    /// Models a tool that exits zero but writes nothing.
    pub fn suppress_artifacts(&self, stage: Stage) {
        self.inner.lock().unwrap().suppressed.insert(stage);
    }

    /// Make `stage` exit with the given code
    pub fn fail_stage(&self, stage: Stage, code: i32) {
        self.inner.lock().unwrap().exit_codes.insert(stage, code);
    }

    /// Make `stage` fail at launch (executable not found)
    pub fn fail_launch(&self, stage: Stage) {
        self.inner.lock().unwrap().launch_failures.insert(stage);
    }

    /// All recorded invocations, in launch order
    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.inner.lock().unwrap().invocations.clone()
    }

    /// Stages of all recorded invocations, in launch order
    pub fn stages_run(&self) -> Vec<Stage> {
        self.inner
            .lock()
            .unwrap()
            .invocations
            .iter()
            .map(|inv| inv.stage)
            .collect()
    }

    /// Number of recorded invocations
    pub fn invocation_count(&self) -> usize {
        self.inner.lock().unwrap().invocations.len()
    }
}

impl ToolRunner for MockRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolExit> {
        let mut inner = self.inner.lock().unwrap();

        if inner.launch_failures.contains(&invocation.stage) {
            return Err(PipelineError::ToolLaunch {
                stage: invocation.stage,
                program: invocation.program.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "mock launch failure",
                ),
            });
        }

        inner.invocations.push(invocation.clone());

        if !inner.suppressed.contains(&invocation.stage) {
            if let Some(paths) = inner.artifacts.get(&invocation.stage) {
                for path in paths {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, b"")?;
                }
            }
        }

        Ok(match inner.exit_codes.get(&invocation.stage).copied() {
            None | Some(0) => ToolExit::success(Duration::ZERO),
            Some(code) => ToolExit {
                code: Some(code),
                success: false,
                duration: Duration::ZERO,
            },
        })
    }
}
