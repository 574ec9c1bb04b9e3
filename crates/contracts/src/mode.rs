//! Reconstruction mode selection.
//!
//! A run is always either sequential or global; `both` at the configuration
//! level expands to all sequential runs followed by all global runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structure-from-motion strategy for a single pipeline run.
///
/// Determines the match-computation flags, the match-graph artifact name and
/// the reconstruction executable. Everywhere else the mode only appears as a
/// path segment and filename suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconstructionMode {
    /// Incremental SfM grown from an initial image pair
    Sequential,
    /// Global SfM solving all poses jointly
    Global,
}

impl ReconstructionMode {
    /// Path segment / filename suffix for this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Global => "global",
        }
    }

    /// Match-graph artifact written by the match-computation stage
    ///
    /// Sequential matching filters with the fundamental matrix, global
    /// matching with the essential matrix; the artifact name encodes which.
    pub fn match_graph_filename(&self) -> &'static str {
        match self {
            Self::Sequential => "matches.f.bin",
            Self::Global => "matches.e.bin",
        }
    }

    /// Reconstruction-stage executable for this mode
    pub fn reconstruction_executable(&self) -> &'static str {
        match self {
            Self::Sequential => "openMVG_main_IncrementalSfM",
            Self::Global => "openMVG_main_GlobalSfM",
        }
    }
}

impl fmt::Display for ReconstructionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured mode selection, possibly expanding to several runs per dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSelection {
    #[default]
    Sequential,
    Global,
    /// All sequential runs complete before any global run begins
    Both,
}

impl ModeSelection {
    /// Modes to run, in execution order
    pub fn modes(&self) -> &'static [ReconstructionMode] {
        match self {
            Self::Sequential => &[ReconstructionMode::Sequential],
            Self::Global => &[ReconstructionMode::Global],
            Self::Both => &[ReconstructionMode::Sequential, ReconstructionMode::Global],
        }
    }
}

impl fmt::Display for ModeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => f.write_str("sequential"),
            Self::Global => f.write_str("global"),
            Self::Both => f.write_str("both"),
        }
    }
}
