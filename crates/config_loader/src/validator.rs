//! Configuration validation module
//!
//! Structural rules:
//! - dataset list non-empty
//! - dataset names unique
//! - dataset names are plain folder names (no path separators, not empty)
//!
//! Path rules (`validate_paths`, checked separately so structural validation
//! stays filesystem-free):
//! - input_root, binary roots and sensor database exist
//! - every dataset folder exists under input_root

use std::collections::HashSet;
use std::path::Path;

use contracts::{PipelineBlueprint, PipelineError};

/// Validate PipelineBlueprint structure
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &PipelineBlueprint) -> Result<(), PipelineError> {
    validate_dataset_list(blueprint)?;
    validate_dataset_names(blueprint)?;
    Ok(())
}

/// Validate dataset list is non-empty
fn validate_dataset_list(blueprint: &PipelineBlueprint) -> Result<(), PipelineError> {
    if blueprint.datasets.is_empty() {
        return Err(PipelineError::config_validation(
            "datasets",
            "dataset list cannot be empty",
        ));
    }
    Ok(())
}

/// Validate dataset names are unique, non-empty folder names
fn validate_dataset_names(blueprint: &PipelineBlueprint) -> Result<(), PipelineError> {
    let mut seen = HashSet::new();
    for dataset in &blueprint.datasets {
        if dataset.is_empty() {
            return Err(PipelineError::config_validation(
                "datasets",
                "dataset name cannot be empty",
            ));
        }
        if dataset.contains('/') || dataset.contains('\\') {
            return Err(PipelineError::config_validation(
                format!("datasets[{dataset}]"),
                "dataset name must be a plain folder name, not a path",
            ));
        }
        if !seen.insert(dataset) {
            return Err(PipelineError::config_validation(
                format!("datasets[{dataset}]"),
                "duplicate dataset name",
            ));
        }
    }
    Ok(())
}

/// Validate that all configured paths exist on disk
///
/// Fatal before a real run; the `validate` CLI command reports these as
/// warnings instead so a config can be checked on a different machine.
pub fn validate_paths(blueprint: &PipelineBlueprint) -> Result<(), PipelineError> {
    require_dir(&blueprint.paths.input_root, "paths.input_root")?;
    require_dir(&blueprint.paths.openmvg_bin_dir, "paths.openmvg_bin_dir")?;
    require_dir(&blueprint.paths.openmvs_bin_dir, "paths.openmvs_bin_dir")?;

    if !blueprint.paths.sensor_database.is_file() {
        return Err(PipelineError::config_validation(
            "paths.sensor_database",
            format!(
                "sensor database not found: {}",
                blueprint.paths.sensor_database.display()
            ),
        ));
    }

    for dataset in &blueprint.datasets {
        let dir = blueprint.paths.input_root.join(dataset);
        if !dir.is_dir() {
            return Err(PipelineError::config_validation(
                format!("datasets[{dataset}]"),
                format!("dataset input directory not found: {}", dir.display()),
            ));
        }
    }

    Ok(())
}

fn require_dir(path: &Path, field: &str) -> Result<(), PipelineError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(PipelineError::config_validation(
            field,
            format!("directory not found: {}", path.display()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        ConfigVersion, ExtraStages, ModeSelection, PathsConfig, ToolSettings,
    };
    use std::path::PathBuf;

    fn minimal_blueprint() -> PipelineBlueprint {
        PipelineBlueprint {
            version: ConfigVersion::V1,
            datasets: vec!["propeller_tacked".into()],
            mode: ModeSelection::Sequential,
            paths: PathsConfig {
                input_root: PathBuf::from("/data/in"),
                output_root: PathBuf::from("/data/out"),
                openmvg_bin_dir: PathBuf::from("/opt/OpenMVG"),
                openmvs_bin_dir: PathBuf::from("/opt/OpenMVS"),
                sensor_database: PathBuf::from("/opt/db.txt"),
            },
            tools: ToolSettings::default(),
            extras: ExtraStages::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_empty_dataset_list() {
        let mut bp = minimal_blueprint();
        bp.datasets.clear();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("cannot be empty"), "got: {err}");
    }

    #[test]
    fn test_duplicate_dataset_name() {
        let mut bp = minimal_blueprint();
        bp.datasets.push("propeller_tacked".into());
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate dataset name"), "got: {err}");
    }

    #[test]
    fn test_dataset_name_with_separator() {
        let mut bp = minimal_blueprint();
        bp.datasets[0] = "nested/dataset".into();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("plain folder name"), "got: {err}");
    }

    #[test]
    fn test_validate_paths_happy_path() {
        let dir = tempfile::tempdir().unwrap();
        let input_root = dir.path().join("input");
        std::fs::create_dir_all(input_root.join("propeller_tacked")).unwrap();
        let db = dir.path().join("sensor_width_camera_database.txt");
        std::fs::write(&db, "camera;width\n").unwrap();

        let mut bp = minimal_blueprint();
        bp.paths.input_root = input_root;
        bp.paths.openmvg_bin_dir = dir.path().to_path_buf();
        bp.paths.openmvs_bin_dir = dir.path().to_path_buf();
        bp.paths.sensor_database = db;

        assert!(validate_paths(&bp).is_ok());
    }

    #[test]
    fn test_validate_paths_missing_dataset_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input_root = dir.path().join("input");
        std::fs::create_dir_all(&input_root).unwrap();
        let db = dir.path().join("db.txt");
        std::fs::write(&db, "").unwrap();

        let mut bp = minimal_blueprint();
        bp.paths.input_root = input_root;
        bp.paths.openmvg_bin_dir = dir.path().to_path_buf();
        bp.paths.openmvs_bin_dir = dir.path().to_path_buf();
        bp.paths.sensor_database = db;

        let result = validate_paths(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("dataset input directory"), "got: {err}");
    }

    #[test]
    fn test_validate_paths_missing_sensor_database() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("input/propeller_tacked")).unwrap();

        let mut bp = minimal_blueprint();
        bp.paths.input_root = dir.path().join("input");
        bp.paths.openmvg_bin_dir = dir.path().to_path_buf();
        bp.paths.openmvs_bin_dir = dir.path().to_path_buf();
        bp.paths.sensor_database = dir.path().join("missing.txt");

        let result = validate_paths(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("sensor database"), "got: {err}");
    }
}
