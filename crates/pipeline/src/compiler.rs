//! Artifact compiler - copies final mesh outputs into the shared folder.
//!
//! Filenames embed dataset and mode, so runs never collide; an existing
//! destination file is overwritten (copy semantics, not append).

use std::path::PathBuf;

use contracts::{PipelineError, ReconstructionMode, Stage};
use tracing::info;

use crate::layout::RunLayout;
use crate::stages::artifact_stem;
use crate::Result;

/// Copy `<mesh_dir>/<dataset>_<mode><suffix>` into the compiled folder.
///
/// A missing source file means the producing stage did not actually write
/// its artifact; it is reported against that stage, fatal for the run.
pub fn compile_to_folder(
    layout: &RunLayout,
    dataset: &str,
    mode: ReconstructionMode,
    produced_by: Stage,
    suffix: &str,
) -> Result<PathBuf> {
    let filename = format!("{}{suffix}", artifact_stem(dataset, mode));
    let source = layout.mesh_dir.join(&filename);
    let destination = layout.compiled_dir.join(&filename);

    if !source.is_file() {
        return Err(PipelineError::MissingArtifact {
            stage: produced_by,
            path: source,
        });
    }

    std::fs::copy(&source, &destination).map_err(|source_err| PipelineError::ArtifactCopy {
        path: destination.clone(),
        source: source_err,
    })?;

    info!(artifact = %destination.display(), "Compiled artifact");
    Ok(destination)
}
