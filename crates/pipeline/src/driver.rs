//! Run driver - executes the full campaign across datasets and modes.
//!
//! Datasets are processed in list order; under `both`, all sequential runs
//! complete before any global run begins. Runs are strictly sequential with
//! no interleaving.

use std::time::Instant;

use contracts::{PipelineBlueprint, RunOutcome, RunReport, RunResult};
use tool_runner::ToolRunner;
use tracing::{error, info};

use crate::run::PipelineRun;
use crate::Result;

/// Drives one pipeline run per (dataset, applicable mode) pair
pub struct RunDriver<'a, R> {
    blueprint: &'a PipelineBlueprint,
    runner: &'a R,
}

impl<'a, R: ToolRunner> RunDriver<'a, R> {
    pub fn new(blueprint: &'a PipelineBlueprint, runner: &'a R) -> Self {
        Self { blueprint, runner }
    }

    /// Execute every planned run and collect the outcomes.
    ///
    /// A failed run is logged with its failing stage and recorded in the
    /// report; subsequent datasets still execute. Only output-tree creation
    /// failure aborts the whole campaign, since nothing can be run or
    /// recorded without a workspace.
    pub async fn run_all(&self) -> Result<RunReport> {
        let mut report = RunReport::default();

        for &mode in self.blueprint.mode.modes() {
            for dataset in &self.blueprint.datasets {
                info!(dataset, mode = %mode, "Starting pipeline run");
                let started = Instant::now();

                let run = PipelineRun::new(self.blueprint, self.runner, dataset, mode)?;
                let result = match run.execute().await {
                    Ok(stats) => {
                        info!(
                            dataset,
                            mode = %mode,
                            stages_run = stats.stages_run,
                            artifacts = stats.artifacts.len(),
                            duration_secs = started.elapsed().as_secs_f64(),
                            "Pipeline run completed"
                        );
                        RunResult::Completed {
                            stages_run: stats.stages_run,
                            artifacts: stats.artifacts,
                        }
                    }
                    Err(e) => {
                        let stage = e.stage();
                        error!(
                            dataset,
                            mode = %mode,
                            stage = stage.map(|s| s.name()),
                            error = %e,
                            "Pipeline run failed, continuing with next dataset"
                        );
                        RunResult::Failed {
                            stage,
                            message: e.to_string(),
                        }
                    }
                };

                report.push(RunOutcome {
                    dataset: dataset.clone(),
                    mode,
                    duration: started.elapsed(),
                    result,
                });
            }
        }

        Ok(report)
    }
}
