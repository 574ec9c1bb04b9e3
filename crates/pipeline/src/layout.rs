//! Per-run directory layout.
//!
//! The on-disk naming is a compatibility contract with external tooling and
//! must not change:
//!
//! ```text
//! <output_root>/<dataset>/<mode>/[01]_Matches
//!                               /[02]_Point_Cloud
//!                               /[03]_Mesh
//! <output_root>/_Compiled
//! ```

use std::path::PathBuf;

use contracts::{PathsConfig, PipelineError, ReconstructionMode};

use crate::Result;

/// Matches subfolder name
pub const MATCHES_DIR: &str = "[01]_Matches";
/// Point-cloud subfolder name
pub const POINT_CLOUD_DIR: &str = "[02]_Point_Cloud";
/// Mesh subfolder name
pub const MESH_DIR: &str = "[03]_Mesh";
/// Shared compiled-outputs folder, directly under the output root
pub const COMPILED_DIR: &str = "_Compiled";

/// Canonical directory tree for one (dataset, mode) run.
///
/// Paths are computed at construction; nothing touches the filesystem until
/// [`RunLayout::prepare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    /// Source image directory for the dataset
    pub input_dir: PathBuf,
    /// Global output root
    pub output_root: PathBuf,
    /// Per-dataset folder under the output root
    pub dataset_dir: PathBuf,
    /// Per-(dataset, mode) folder
    pub run_dir: PathBuf,
    /// Matches and feature artifacts
    pub matches_dir: PathBuf,
    /// Sparse reconstruction artifacts
    pub point_cloud_dir: PathBuf,
    /// Dense reconstruction and mesh artifacts
    pub mesh_dir: PathBuf,
    /// Shared compiled-outputs folder, written by every run
    pub compiled_dir: PathBuf,
}

impl RunLayout {
    /// Compute the layout for one (dataset, mode) run
    pub fn new(paths: &PathsConfig, dataset: &str, mode: ReconstructionMode) -> Self {
        let dataset_dir = paths.output_root.join(dataset);
        let run_dir = dataset_dir.join(mode.as_str());
        Self {
            input_dir: paths.input_root.join(dataset),
            output_root: paths.output_root.clone(),
            matches_dir: run_dir.join(MATCHES_DIR),
            point_cloud_dir: run_dir.join(POINT_CLOUD_DIR),
            mesh_dir: run_dir.join(MESH_DIR),
            compiled_dir: paths.output_root.join(COMPILED_DIR),
            dataset_dir,
            run_dir,
        }
    }

    /// Create every output directory if missing.
    ///
    /// Idempotent; never deletes or truncates existing content. Creation
    /// errors are fatal for the run and propagate to the caller.
    pub fn prepare(&self) -> Result<()> {
        let folders = [
            &self.output_root,
            &self.dataset_dir,
            &self.run_dir,
            &self.matches_dir,
            &self.point_cloud_dir,
            &self.mesh_dir,
            &self.compiled_dir,
        ];
        for folder in folders {
            std::fs::create_dir_all(folder).map_err(|source| PipelineError::WorkspaceSetup {
                path: folder.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn paths(root: &Path) -> PathsConfig {
        PathsConfig {
            input_root: root.join("input"),
            output_root: root.join("output"),
            openmvg_bin_dir: root.join("OpenMVG"),
            openmvs_bin_dir: root.join("OpenMVS"),
            sensor_database: root.join("db.txt"),
        }
    }

    #[test]
    fn test_layout_naming_contract() {
        let paths = paths(Path::new("/base"));
        let layout = RunLayout::new(&paths, "propeller_tacked", ReconstructionMode::Sequential);

        assert_eq!(
            layout.matches_dir,
            Path::new("/base/output/propeller_tacked/sequential/[01]_Matches")
        );
        assert_eq!(
            layout.point_cloud_dir,
            Path::new("/base/output/propeller_tacked/sequential/[02]_Point_Cloud")
        );
        assert_eq!(
            layout.mesh_dir,
            Path::new("/base/output/propeller_tacked/sequential/[03]_Mesh")
        );
        // _Compiled is a sibling of the dataset folders, directly under the root
        assert_eq!(layout.compiled_dir, Path::new("/base/output/_Compiled"));
        assert_eq!(layout.input_dir, Path::new("/base/input/propeller_tacked"));
    }

    #[test]
    fn test_mode_only_changes_path_segment() {
        let paths = paths(Path::new("/base"));
        let seq = RunLayout::new(&paths, "ds", ReconstructionMode::Sequential);
        let glob = RunLayout::new(&paths, "ds", ReconstructionMode::Global);

        assert_eq!(seq.run_dir, Path::new("/base/output/ds/sequential"));
        assert_eq!(glob.run_dir, Path::new("/base/output/ds/global"));
        assert_eq!(seq.compiled_dir, glob.compiled_dir);
        assert_eq!(seq.input_dir, glob.input_dir);
    }

    #[test]
    fn test_prepare_creates_full_tree() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RunLayout::new(&paths(dir.path()), "ds", ReconstructionMode::Sequential);

        layout.prepare().unwrap();

        assert!(layout.matches_dir.is_dir());
        assert!(layout.point_cloud_dir.is_dir());
        assert!(layout.mesh_dir.is_dir());
        assert!(layout.compiled_dir.is_dir());
    }

    #[test]
    fn test_prepare_is_idempotent_and_preserves_content() {
        let dir = tempfile::tempdir().unwrap();
        let layout = RunLayout::new(&paths(dir.path()), "ds", ReconstructionMode::Global);

        layout.prepare().unwrap();
        let marker = layout.matches_dir.join("sfm_data.json");
        std::fs::write(&marker, b"{}").unwrap();

        layout.prepare().unwrap();

        assert!(marker.exists());
        assert_eq!(std::fs::read(&marker).unwrap(), b"{}");
    }
}
