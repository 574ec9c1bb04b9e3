//! Pipeline stage identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Toolset an external executable belongs to.
///
/// Each toolset has its own configured binary root directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toolset {
    /// Structure-from-motion tools (sparse reconstruction)
    OpenMvg,
    /// Multi-view-stereo tools (dense reconstruction)
    OpenMvs,
}

/// One named stage of the reconstruction pipeline.
///
/// The first nine variants form the fixed default sequence; the last two are
/// optional operations that never run unless explicitly enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    IntrinsicsAnalysis,
    ComputeFeatures,
    ComputeMatches,
    Reconstruction,
    ConvertScene,
    DensifyPointCloud,
    ReconstructMesh,
    RefineMesh,
    TextureMesh,
    // Optional operations, outside the default sequence
    RobustTriangulation,
    ColorizeStructure,
}

impl Stage {
    /// Human-readable stage name used in logs and run reports
    pub fn name(&self) -> &'static str {
        match self {
            Self::IntrinsicsAnalysis => "intrinsics analysis",
            Self::ComputeFeatures => "compute features",
            Self::ComputeMatches => "compute matches",
            Self::Reconstruction => "reconstruction",
            Self::ConvertScene => "convert scene",
            Self::DensifyPointCloud => "densify point cloud",
            Self::ReconstructMesh => "reconstruct mesh",
            Self::RefineMesh => "refine mesh",
            Self::TextureMesh => "texture mesh",
            Self::RobustTriangulation => "robust triangulation",
            Self::ColorizeStructure => "colorize structure",
        }
    }

    /// Toolset providing this stage's executable
    pub fn toolset(&self) -> Toolset {
        match self {
            Self::IntrinsicsAnalysis
            | Self::ComputeFeatures
            | Self::ComputeMatches
            | Self::Reconstruction
            | Self::ConvertScene
            | Self::RobustTriangulation
            | Self::ColorizeStructure => Toolset::OpenMvg,
            Self::DensifyPointCloud
            | Self::ReconstructMesh
            | Self::RefineMesh
            | Self::TextureMesh => Toolset::OpenMvs,
        }
    }

    /// The default sequence, in execution order
    pub const DEFAULT_SEQUENCE: [Stage; 9] = [
        Stage::IntrinsicsAnalysis,
        Stage::ComputeFeatures,
        Stage::ComputeMatches,
        Stage::Reconstruction,
        Stage::ConvertScene,
        Stage::DensifyPointCloud,
        Stage::ReconstructMesh,
        Stage::RefineMesh,
        Stage::TextureMesh,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
