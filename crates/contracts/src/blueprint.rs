//! PipelineBlueprint - Config Loader output
//!
//! Describes a complete pipeline campaign: dataset list, reconstruction mode,
//! filesystem roots, external toolset locations and static tool parameters.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{ModeSelection, ReconstructionMode};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete pipeline configuration blueprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Dataset folder names under `paths.input_root`, evaluated in order
    pub datasets: Vec<String>,

    /// Reconstruction mode selection
    #[serde(default)]
    pub mode: ModeSelection,

    /// Filesystem roots and external tool locations
    pub paths: PathsConfig,

    /// Static parameters passed to the external tools
    #[serde(default)]
    pub tools: ToolSettings,

    /// Optional operations outside the default stage sequence
    #[serde(default)]
    pub extras: ExtraStages,
}

/// Filesystem roots and external tool locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory containing one image folder per dataset
    pub input_root: PathBuf,

    /// Root directory receiving all run output trees and `_Compiled`
    pub output_root: PathBuf,

    /// Directory containing the OpenMVG executables
    pub openmvg_bin_dir: PathBuf,

    /// Directory containing the OpenMVS executables
    pub openmvs_bin_dir: PathBuf,

    /// Camera sensor-width database consumed by the image-listing stage
    pub sensor_database: PathBuf,
}

/// Static parameters passed to the external tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Thread cap for the OpenMVS tools (0 = all available cores)
    #[serde(default)]
    pub max_threads: u32,

    /// Feature describer quality preset
    #[serde(default)]
    pub describer_preset: DescriberPreset,

    /// Images are not scaled below this resolution during densify/refine
    #[serde(default = "default_min_resolution")]
    pub min_resolution: u32,

    /// Refine the mesh using CUDA
    #[serde(default = "default_use_cuda")]
    pub use_cuda: bool,

    /// How a nonzero tool exit status is treated
    #[serde(default)]
    pub on_nonzero_exit: ExitPolicy,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            max_threads: 0,
            describer_preset: DescriberPreset::default(),
            min_resolution: default_min_resolution(),
            use_cuda: default_use_cuda(),
            on_nonzero_exit: ExitPolicy::default(),
        }
    }
}

fn default_min_resolution() -> u32 {
    640
}

fn default_use_cuda() -> bool {
    true
}

/// Feature describer quality preset (ComputeFeatures `-p`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriberPreset {
    #[default]
    Normal,
    High,
    Ultra,
}

impl DescriberPreset {
    /// Value passed on the ComputeFeatures command line
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Ultra => "ULTRA",
        }
    }
}

/// How a nonzero tool exit status is treated.
///
/// `Ignore` reproduces the historical behavior where exit codes were never
/// checked and the only failure signal was a missing artifact downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// Nonzero exit is fatal for the run (default)
    #[default]
    Fail,
    /// Log a warning and continue as if the stage succeeded
    Ignore,
}

/// Optional operations outside the default stage sequence
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ExtraStages {
    /// Structure from known poses, after the reconstruction stage
    #[serde(default)]
    pub robust_triangulation: bool,

    /// Colorized point-cloud export, after the reconstruction stage
    #[serde(default)]
    pub colorize: bool,
}

impl PipelineBlueprint {
    /// All (mode, dataset) runs in execution order.
    ///
    /// Under `both`, every sequential run completes before any global run.
    pub fn planned_runs(&self) -> Vec<(ReconstructionMode, &str)> {
        let mut runs = Vec::with_capacity(self.mode.modes().len() * self.datasets.len());
        for &mode in self.mode.modes() {
            for dataset in &self.datasets {
                runs.push((mode, dataset.as_str()));
            }
        }
        runs
    }
}
