//! Per-run results collected by the run driver.
//!
//! A failed run never aborts the campaign; it is recorded here with the
//! failing stage and cause so nothing is silently dropped.

use std::path::PathBuf;
use std::time::Duration;

use crate::{ReconstructionMode, Stage};

/// Result of one (dataset, mode) pipeline run
#[derive(Debug, Clone)]
pub enum RunResult {
    /// All stages and artifact copies completed
    Completed {
        /// External invocations issued
        stages_run: usize,
        /// Files placed in the compiled-outputs directory
        artifacts: Vec<PathBuf>,
    },
    /// The run stopped at a stage or at the artifact-compile step
    Failed {
        /// Stage the failure is attributable to, if known
        stage: Option<Stage>,
        /// Rendered error cause
        message: String,
    },
}

/// Outcome of one (dataset, mode) pipeline run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub dataset: String,
    pub mode: ReconstructionMode,
    pub duration: Duration,
    pub result: RunResult,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self.result, RunResult::Completed { .. })
    }
}

/// Collected outcomes for a whole campaign, in execution order
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<RunOutcome>,
}

impl RunReport {
    pub fn push(&mut self, outcome: RunOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.completed()
    }

    /// True when at least one run was attempted and none completed
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.completed() == 0
    }

    /// Total wall-clock time spent in runs
    pub fn total_duration(&self) -> Duration {
        self.outcomes.iter().map(|o| o.duration).sum()
    }
}
