//! One (dataset, mode) pipeline run.
//!
//! Strictly sequential: each stage is a single blocking external invocation,
//! and the next stage does not start until the previous process has exited.
//! There is no retry, no timeout and no inspection of tool output.

use std::path::PathBuf;

use contracts::{
    ExitPolicy, PipelineBlueprint, ReconstructionMode, Stage, ToolInvocation,
};
use tool_runner::ToolRunner;
use tracing::{info, warn};

use crate::layout::RunLayout;
use crate::{compiler, stages, Result};

/// Statistics from one completed run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// External invocations issued
    pub stages_run: usize,
    /// Files placed in the compiled-outputs directory
    pub artifacts: Vec<PathBuf>,
}

/// A single (dataset, mode) pipeline run.
///
/// Construction eagerly creates the full output tree, so every stage's
/// output directory exists before any stage runs.
pub struct PipelineRun<'a, R> {
    blueprint: &'a PipelineBlueprint,
    runner: &'a R,
    dataset: &'a str,
    mode: ReconstructionMode,
    layout: RunLayout,
}

impl<'a, R: ToolRunner> PipelineRun<'a, R> {
    /// Create the run and its output directory tree.
    ///
    /// Directory-creation failure is fatal and propagates; it is not
    /// contained per-run by the driver.
    pub fn new(
        blueprint: &'a PipelineBlueprint,
        runner: &'a R,
        dataset: &'a str,
        mode: ReconstructionMode,
    ) -> Result<Self> {
        let layout = RunLayout::new(&blueprint.paths, dataset, mode);
        layout.prepare()?;
        Ok(Self {
            blueprint,
            runner,
            dataset,
            mode,
            layout,
        })
    }

    /// Directory tree for this run
    pub fn layout(&self) -> &RunLayout {
        &self.layout
    }

    /// Execute the full stage sequence and artifact-compile steps
    pub async fn execute(&self) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let sequence = stages::main_sequence(self.blueprint, &self.layout, self.dataset, self.mode);
        let total = sequence.len();

        for (index, invocation) in sequence.iter().enumerate() {
            info!(
                dataset = self.dataset,
                mode = %self.mode,
                step = index + 1,
                total,
                stage = %invocation.stage,
                "Running stage"
            );
            self.run_stage(invocation, &mut stats).await?;

            match invocation.stage {
                Stage::Reconstruction => self.run_extras(&mut stats).await?,
                Stage::RefineMesh => self.compile(Stage::RefineMesh, "_untextured.ply", &mut stats)?,
                Stage::TextureMesh => {
                    self.compile(Stage::TextureMesh, "_textured.ply", &mut stats)?;
                    self.compile(Stage::TextureMesh, "_textured.png", &mut stats)?;
                }
                _ => {}
            }
        }

        Ok(stats)
    }

    /// Optional operations, slotted directly after the reconstruction stage
    async fn run_extras(&self, stats: &mut RunStats) -> Result<()> {
        let extras = &self.blueprint.extras;

        if extras.robust_triangulation {
            let invocation = stages::robust_triangulation(self.blueprint, &self.layout, self.mode);
            info!(dataset = self.dataset, mode = %self.mode, "Running robust triangulation");
            self.run_stage(&invocation, stats).await?;
        }

        if extras.colorize {
            for invocation in
                stages::colorize_structure(self.blueprint, &self.layout, extras.robust_triangulation)
            {
                info!(dataset = self.dataset, mode = %self.mode, "Running structure colorization");
                self.run_stage(&invocation, stats).await?;
            }
        }

        Ok(())
    }

    /// Launch one invocation and apply the configured exit policy
    async fn run_stage(&self, invocation: &ToolInvocation, stats: &mut RunStats) -> Result<()> {
        let exit = self.runner.run(invocation).await?;
        stats.stages_run += 1;

        if !exit.success {
            match self.blueprint.tools.on_nonzero_exit {
                ExitPolicy::Fail => {
                    return Err(contracts::PipelineError::ToolExit {
                        stage: invocation.stage,
                        program: invocation.program.clone(),
                        code: exit.code,
                    });
                }
                ExitPolicy::Ignore => {
                    // Historical behavior: trust the tool, let a missing
                    // artifact surface the problem downstream
                    warn!(
                        stage = %invocation.stage,
                        code = ?exit.code,
                        "Tool exited unsuccessfully, continuing per exit policy"
                    );
                }
            }
        }

        Ok(())
    }

    fn compile(&self, produced_by: Stage, suffix: &str, stats: &mut RunStats) -> Result<()> {
        let artifact =
            compiler::compile_to_folder(&self.layout, self.dataset, self.mode, produced_by, suffix)?;
        stats.artifacts.push(artifact);
        Ok(())
    }
}
