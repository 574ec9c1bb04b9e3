//! Layered error definitions
//!
//! Categorized by source: config / workspace / tool / artifact

use std::path::PathBuf;

use thiserror::Error;

use crate::Stage;

/// Unified error type
#[derive(Debug, Error)]
pub enum PipelineError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Workspace Errors =====
    /// Output directory creation failure, fatal for the run
    #[error("workspace setup error at '{path}': {source}")]
    WorkspaceSetup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===== External Tool Errors =====
    /// Process launch failure (executable missing or not executable)
    #[error("failed to launch '{program}' for stage '{stage}': {source}")]
    ToolLaunch {
        stage: Stage,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process exited unsuccessfully (None = killed by signal)
    #[error("stage '{stage}' failed: '{program}' exited with status {code:?}")]
    ToolExit {
        stage: Stage,
        program: PathBuf,
        code: Option<i32>,
    },

    // ===== Artifact Errors =====
    /// Expected stage output not found when compiling artifacts
    #[error("missing artifact from stage '{stage}': {path}")]
    MissingArtifact { stage: Stage, path: PathBuf },

    /// Artifact copy failure
    #[error("failed to compile artifact '{path}': {source}")]
    ArtifactCopy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Stage this error is attributable to, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::ToolLaunch { stage, .. }
            | Self::ToolExit { stage, .. }
            | Self::MissingArtifact { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
