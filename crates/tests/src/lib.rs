//! # Integration Tests
//!
//! End-to-end scenarios against the mock tool runner.
//!
//! Covers:
//! - The full configuration -> driver -> report flow
//! - Invocation ordering across datasets and modes
//! - Fault injection at the artifact-compile step

#[cfg(test)]
mod e2e_tests {
    use std::path::Path;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{PipelineBlueprint, ReconstructionMode, RunResult, Stage};
    use pipeline::{stages, RunDriver, RunLayout};
    use tool_runner::MockRunner;

    /// Build a blueprint rooted in a temp directory from a TOML fragment
    fn blueprint(root: &Path, datasets: &[&str], mode: &str) -> PipelineBlueprint {
        let content = format!(
            r#"
datasets = [{}]
mode = "{mode}"

[paths]
input_root = "{root}/input"
output_root = "{root}/output"
openmvg_bin_dir = "{root}/OpenMVG"
openmvs_bin_dir = "{root}/OpenMVS"
sensor_database = "{root}/sensor_width_camera_database.txt"
"#,
            datasets
                .iter()
                .map(|d| format!("\"{d}\""))
                .collect::<Vec<_>>()
                .join(", "),
            root = root.display(),
        );
        ConfigLoader::load_from_str(&content, ConfigFormat::Toml).unwrap()
    }

    /// Register the mesh artifacts every planned run is expected to produce
    fn register_artifacts(runner: &MockRunner, bp: &PipelineBlueprint) {
        for (mode, dataset) in bp.planned_runs() {
            register_run_artifacts(runner, bp, dataset, mode);
        }
    }

    fn register_run_artifacts(
        runner: &MockRunner,
        bp: &PipelineBlueprint,
        dataset: &str,
        mode: ReconstructionMode,
    ) {
        let layout = RunLayout::new(&bp.paths, dataset, mode);
        let stem = stages::artifact_stem(dataset, mode);
        runner.create_on_run(
            Stage::RefineMesh,
            vec![layout.mesh_dir.join(format!("{stem}_untextured.ply"))],
        );
        runner.create_on_run(
            Stage::TextureMesh,
            vec![
                layout.mesh_dir.join(format!("{stem}_textured.ply")),
                layout.mesh_dir.join(format!("{stem}_textured.png")),
            ],
        );
    }

    /// dataset list = ["sampleA"], mode = sequential: exactly 9 ordered
    /// invocations, then the compiled untextured and textured artifacts.
    #[tokio::test]
    async fn test_e2e_single_dataset_sequential() {
        let dir = tempfile::tempdir().unwrap();
        let bp = blueprint(dir.path(), &["sampleA"], "sequential");
        let runner = MockRunner::new();
        register_artifacts(&runner, &bp);

        let report = RunDriver::new(&bp, &runner).run_all().await.unwrap();

        assert_eq!(report.outcomes.len(), 1);
        assert!(report.outcomes[0].is_completed());
        assert_eq!(runner.invocation_count(), 9);
        assert_eq!(runner.stages_run(), Stage::DEFAULT_SEQUENCE);

        let compiled = bp.paths.output_root.join("_Compiled");
        assert!(compiled.join("sampleA_sequential_untextured.ply").is_file());
        assert!(compiled.join("sampleA_sequential_textured.ply").is_file());
        assert!(compiled.join("sampleA_sequential_textured.png").is_file());
    }

    /// datasets = ["sampleA", "sampleB"], mode = both: A-sequential,
    /// B-sequential, A-global, B-global, strictly ordered, no interleaving.
    #[tokio::test]
    async fn test_e2e_both_mode_run_ordering() {
        let dir = tempfile::tempdir().unwrap();
        let bp = blueprint(dir.path(), &["sampleA", "sampleB"], "both");
        let runner = MockRunner::new();
        register_artifacts(&runner, &bp);

        let report = RunDriver::new(&bp, &runner).run_all().await.unwrap();

        assert_eq!(report.completed(), 4);
        assert_eq!(runner.invocation_count(), 36);

        // Each block of nine invocations belongs to one run; identify the
        // run by the refine-mesh output name it carries.
        let invocations = runner.invocations();
        let expected_runs = [
            "sampleA_sequential_untextured",
            "sampleB_sequential_untextured",
            "sampleA_global_untextured",
            "sampleB_global_untextured",
        ];
        for (block, expected) in invocations.chunks(9).zip(expected_runs) {
            let block_stages: Vec<_> = block.iter().map(|inv| inv.stage).collect();
            assert_eq!(block_stages, Stage::DEFAULT_SEQUENCE);
            let refine_out = block[7]
                .arg_after("-o")
                .map(|a| a.to_string_lossy().into_owned())
                .unwrap();
            assert_eq!(refine_out, expected);
        }
    }

    /// If refine-mesh produces no output file, the run terminates at the
    /// compile step with a missing-artifact error and the next dataset runs
    /// unaffected.
    #[tokio::test]
    async fn test_e2e_missing_refine_output_contained_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let bp = blueprint(dir.path(), &["sampleA", "sampleB"], "sequential");
        let runner = MockRunner::new();
        // Only sampleB produces its mesh artifacts
        register_run_artifacts(&runner, &bp, "sampleB", ReconstructionMode::Sequential);

        let report = RunDriver::new(&bp, &runner).run_all().await.unwrap();

        assert_eq!(report.outcomes.len(), 2);
        match &report.outcomes[0].result {
            RunResult::Failed { stage, message } => {
                assert_eq!(*stage, Some(Stage::RefineMesh));
                assert!(message.contains("missing artifact"), "got: {message}");
            }
            other => panic!("expected failed outcome, got {other:?}"),
        }
        assert!(report.outcomes[1].is_completed());

        // sampleA stopped after refine (8 invocations), sampleB ran all 9
        assert_eq!(runner.invocation_count(), 17);
        let compiled = bp.paths.output_root.join("_Compiled");
        assert!(!compiled.join("sampleA_sequential_untextured.ply").exists());
        assert!(compiled.join("sampleB_sequential_textured.ply").is_file());
    }

    /// The directory tree contract holds for every run before any stage ran
    #[tokio::test]
    async fn test_e2e_directory_tree_contract() {
        let dir = tempfile::tempdir().unwrap();
        let bp = blueprint(dir.path(), &["sampleA"], "both");
        let runner = MockRunner::new();
        register_artifacts(&runner, &bp);

        RunDriver::new(&bp, &runner).run_all().await.unwrap();

        for mode in ["sequential", "global"] {
            let run_dir = bp.paths.output_root.join("sampleA").join(mode);
            assert!(run_dir.join("[01]_Matches").is_dir());
            assert!(run_dir.join("[02]_Point_Cloud").is_dir());
            assert!(run_dir.join("[03]_Mesh").is_dir());
        }
        assert!(bp.paths.output_root.join("_Compiled").is_dir());
    }

    /// Launch failure (missing executable) is contained per run like any
    /// other stage failure
    #[tokio::test]
    async fn test_e2e_launch_failure_contained() {
        let dir = tempfile::tempdir().unwrap();
        let bp = blueprint(dir.path(), &["sampleA", "sampleB"], "sequential");
        let runner = MockRunner::new();
        register_artifacts(&runner, &bp);
        runner.fail_launch(Stage::IntrinsicsAnalysis);

        let report = RunDriver::new(&bp, &runner).run_all().await.unwrap();

        // Both runs fail at stage one, both are recorded, nothing panics
        assert_eq!(report.failed(), 2);
        for outcome in &report.outcomes {
            match &outcome.result {
                RunResult::Failed { stage, .. } => {
                    assert_eq!(*stage, Some(Stage::IntrinsicsAnalysis))
                }
                other => panic!("expected failure, got {other:?}"),
            }
        }
    }
}
