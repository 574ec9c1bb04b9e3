//! Fixed stage invocation tables.
//!
//! Every argument vector mirrors the parameters the external tools were
//! tuned with; apart from the handful of values lifted into `ToolSettings`
//! they are deliberately hard-coded. The OpenMVS tools take their scene
//! files relative to the `-w` working directory, the OpenMVG tools take
//! absolute paths.

use contracts::{
    PipelineBlueprint, ReconstructionMode, Stage, ToolInvocation,
};

use crate::layout::RunLayout;

/// Common filename stem for the named mesh artifacts of one run
pub fn artifact_stem(dataset: &str, mode: ReconstructionMode) -> String {
    format!("{dataset}_{mode}")
}

/// Build the default nine-stage sequence for one (dataset, mode) run
pub fn main_sequence(
    blueprint: &PipelineBlueprint,
    layout: &RunLayout,
    dataset: &str,
    mode: ReconstructionMode,
) -> Vec<ToolInvocation> {
    vec![
        intrinsics_analysis(blueprint, layout),
        compute_features(blueprint, layout),
        compute_matches(blueprint, layout, mode),
        reconstruction(blueprint, layout, mode),
        convert_scene(blueprint, layout),
        densify_point_cloud(blueprint, layout),
        reconstruct_mesh(blueprint, layout),
        refine_mesh(blueprint, layout, dataset, mode),
        texture_mesh(blueprint, layout, dataset, mode),
    ]
}

/// 1. Intrinsics analysis: image listing plus sensor-database lookup
fn intrinsics_analysis(blueprint: &PipelineBlueprint, layout: &RunLayout) -> ToolInvocation {
    ToolInvocation::new(
        Stage::IntrinsicsAnalysis,
        blueprint
            .paths
            .openmvg_bin_dir
            .join("openMVG_main_SfMInit_ImageListing"),
    )
    .arg("-i")
    .arg(layout.input_dir.clone())
    .arg("-o")
    .arg(layout.matches_dir.clone())
    .arg("-d")
    .arg(blueprint.paths.sensor_database.clone())
    .arg("-c")
    .arg("3")
}

/// 2. Per-image feature descriptors
fn compute_features(blueprint: &PipelineBlueprint, layout: &RunLayout) -> ToolInvocation {
    ToolInvocation::new(
        Stage::ComputeFeatures,
        blueprint
            .paths
            .openmvg_bin_dir
            .join("openMVG_main_ComputeFeatures"),
    )
    .arg("-i")
    .arg(layout.matches_dir.join("sfm_data.json"))
    .arg("-o")
    .arg(layout.matches_dir.clone())
    .arg("-m")
    .arg("SIFT")
    .arg("-f")
    .arg("1")
    .arg("-p")
    .arg(blueprint.tools.describer_preset.as_arg())
    .arg("-n")
    .arg("5")
}

/// 3. Match graph; the geometric filter and artifact name depend on the mode
fn compute_matches(
    blueprint: &PipelineBlueprint,
    layout: &RunLayout,
    mode: ReconstructionMode,
) -> ToolInvocation {
    let invocation = ToolInvocation::new(
        Stage::ComputeMatches,
        blueprint
            .paths
            .openmvg_bin_dir
            .join("openMVG_main_ComputeMatches"),
    )
    .arg("-i")
    .arg(layout.matches_dir.join("sfm_data.json"))
    .arg("-o")
    .arg(layout.matches_dir.clone())
    .arg("-f")
    .arg("1");

    match mode {
        // Fundamental-matrix filtering with approximate nearest neighbours
        ReconstructionMode::Sequential => invocation.arg("-n").arg("ANNL2").arg("-g").arg("f"),
        // Essential-matrix filtering for the global pipeline
        ReconstructionMode::Global => invocation.arg("-g").arg("e"),
    }
}

/// 4. Sparse reconstruction; the executable depends on the mode
fn reconstruction(
    blueprint: &PipelineBlueprint,
    layout: &RunLayout,
    mode: ReconstructionMode,
) -> ToolInvocation {
    ToolInvocation::new(
        Stage::Reconstruction,
        blueprint
            .paths
            .openmvg_bin_dir
            .join(mode.reconstruction_executable()),
    )
    .arg("-i")
    .arg(layout.matches_dir.join("sfm_data.json"))
    .arg("-m")
    .arg(layout.matches_dir.clone())
    .arg("-o")
    .arg(layout.point_cloud_dir.clone())
}

/// 5. Convert to the dense toolset's scene format, exporting undistorted images
fn convert_scene(blueprint: &PipelineBlueprint, layout: &RunLayout) -> ToolInvocation {
    ToolInvocation::new(
        Stage::ConvertScene,
        blueprint
            .paths
            .openmvg_bin_dir
            .join("openMVG_main_openMVG2openMVS"),
    )
    .arg("-i")
    .arg(layout.point_cloud_dir.join("sfm_data.bin"))
    .arg("-o")
    .arg(layout.mesh_dir.join("scene.mvs"))
    .arg("-d")
    .arg(layout.mesh_dir.join("scene_undistorted_images"))
    .arg("-n")
    .arg("5")
}

/// 6. Dense point cloud
fn densify_point_cloud(blueprint: &PipelineBlueprint, layout: &RunLayout) -> ToolInvocation {
    ToolInvocation::new(
        Stage::DensifyPointCloud,
        blueprint.paths.openmvs_bin_dir.join("DensifyPointCloud"),
    )
    .arg("-i")
    .arg(layout.mesh_dir.join("scene.mvs"))
    .arg("-w")
    .arg(layout.mesh_dir.clone())
    .arg("--min-resolution")
    .arg(blueprint.tools.min_resolution.to_string())
    .arg("--number-views")
    .arg("4")
    .arg("--number-views-fuse")
    .arg("3")
    .arg("--estimate-colors")
    .arg("1")
    .arg("--estimate-normals")
    .arg("0")
    .arg("--sample-mesh")
    .arg("0")
    .arg("--max-threads")
    .arg(blueprint.tools.max_threads.to_string())
}

/// 7. Surface mesh from the dense point cloud
fn reconstruct_mesh(blueprint: &PipelineBlueprint, layout: &RunLayout) -> ToolInvocation {
    ToolInvocation::new(
        Stage::ReconstructMesh,
        blueprint.paths.openmvs_bin_dir.join("ReconstructMesh"),
    )
    .arg("scene_dense.mvs")
    .arg("-w")
    .arg(layout.mesh_dir.clone())
    .arg("--min-point-distance")
    .arg("2.5")
    .arg("--constant-weight")
    .arg("1")
    .arg("--free-space-support")
    .arg("0")
    .arg("--thickness-factor")
    .arg("1")
    .arg("--quality-factor")
    .arg("1")
    .arg("--decimate")
    .arg("1")
    .arg("--remove-spurious")
    .arg("20")
    .arg("--remove-spikes")
    .arg("1")
    .arg("--close-holes")
    .arg("30")
    .arg("--smooth")
    .arg("2")
    .arg("--max-threads")
    .arg(blueprint.tools.max_threads.to_string())
}

/// 8. Mesh refinement against multi-view images; writes the named untextured mesh
fn refine_mesh(
    blueprint: &PipelineBlueprint,
    layout: &RunLayout,
    dataset: &str,
    mode: ReconstructionMode,
) -> ToolInvocation {
    ToolInvocation::new(
        Stage::RefineMesh,
        blueprint.paths.openmvs_bin_dir.join("RefineMesh"),
    )
    .arg("scene_dense_mesh.mvs")
    .arg("-w")
    .arg(layout.mesh_dir.clone())
    .arg("--export-type")
    .arg("ply")
    .arg("--min-resolution")
    .arg(blueprint.tools.min_resolution.to_string())
    .arg("--max-views")
    .arg("8")
    .arg("--decimate")
    .arg("0")
    .arg("--close-holes")
    .arg("30")
    .arg("--ensure-edge-size")
    .arg("1")
    .arg("--max-face-area")
    .arg("64")
    .arg("--scales")
    .arg("3")
    .arg("--scale-step")
    .arg("0.5")
    .arg("--reduce-memory")
    .arg("1")
    .arg("--alternate-pair")
    .arg("0")
    .arg("--regularity-weight")
    .arg("0.200000003")
    .arg("--rigidity-elasticity-ratio")
    .arg("0.899999976")
    .arg("--gradient-step")
    .arg("45.0499992")
    .arg("--planar-vertex-ratio")
    .arg("0")
    .arg("--use-cuda")
    .arg(if blueprint.tools.use_cuda { "1" } else { "0" })
    .arg("--max-threads")
    .arg(blueprint.tools.max_threads.to_string())
    .arg("-o")
    .arg(format!("{}_untextured", artifact_stem(dataset, mode)))
}

/// 9. Texture projection; writes the named textured mesh and atlas
fn texture_mesh(
    blueprint: &PipelineBlueprint,
    layout: &RunLayout,
    dataset: &str,
    mode: ReconstructionMode,
) -> ToolInvocation {
    let stem = artifact_stem(dataset, mode);
    ToolInvocation::new(
        Stage::TextureMesh,
        blueprint.paths.openmvs_bin_dir.join("TextureMesh"),
    )
    .arg(format!("{stem}_untextured.mvs"))
    .arg("-w")
    .arg(layout.mesh_dir.clone())
    .arg("--export-type")
    .arg("ply")
    .arg("--max-threads")
    .arg(blueprint.tools.max_threads.to_string())
    .arg("-o")
    .arg(format!("{stem}_textured"))
}

/// Optional: structure from known poses (robust triangulation).
///
/// Outside the default sequence; consumes the reconstruction output and the
/// mode's match-graph artifact.
pub fn robust_triangulation(
    blueprint: &PipelineBlueprint,
    layout: &RunLayout,
    mode: ReconstructionMode,
) -> ToolInvocation {
    ToolInvocation::new(
        Stage::RobustTriangulation,
        blueprint
            .paths
            .openmvg_bin_dir
            .join("openMVG_main_ComputeStructureFromKnownPoses"),
    )
    .arg("-i")
    .arg(layout.point_cloud_dir.join("sfm_data.bin"))
    .arg("-m")
    .arg(layout.matches_dir.clone())
    .arg("-f")
    .arg(layout.matches_dir.join(mode.match_graph_filename()))
    .arg("-o")
    .arg(layout.point_cloud_dir.join("robust.bin"))
}

/// Optional: colorized point-cloud export.
///
/// Always colorizes the reconstruction output; also colorizes the robust
/// structure when robust triangulation produced one.
pub fn colorize_structure(
    blueprint: &PipelineBlueprint,
    layout: &RunLayout,
    include_robust: bool,
) -> Vec<ToolInvocation> {
    let program = blueprint
        .paths
        .openmvg_bin_dir
        .join("openMVG_main_ComputeSfM_DataColor");

    let mut invocations = vec![ToolInvocation::new(Stage::ColorizeStructure, program.clone())
        .arg("-i")
        .arg(layout.point_cloud_dir.join("sfm_data.bin"))
        .arg("-o")
        .arg(layout.point_cloud_dir.join("colorized.ply"))];

    if include_robust {
        invocations.push(
            ToolInvocation::new(Stage::ColorizeStructure, program)
                .arg("-i")
                .arg(layout.point_cloud_dir.join("robust.bin"))
                .arg("-o")
                .arg(layout.point_cloud_dir.join("robust_colorized.ply")),
        );
    }

    invocations
}
