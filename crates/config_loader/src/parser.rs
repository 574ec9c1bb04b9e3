//! Configuration parsing module
//!
//! Supports TOML (primary) and JSON (secondary) formats.

use contracts::{PipelineBlueprint, PipelineError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (recommended)
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Infer format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse TOML configuration
pub fn parse_toml(content: &str) -> Result<PipelineBlueprint, PipelineError> {
    toml::from_str(content).map_err(|e| PipelineError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse JSON configuration
pub fn parse_json(content: &str) -> Result<PipelineBlueprint, PipelineError> {
    serde_json::from_str(content).map_err(|e| PipelineError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration according to format
pub fn parse(content: &str, format: ConfigFormat) -> Result<PipelineBlueprint, PipelineError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{DescriberPreset, ExitPolicy, ModeSelection};

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
datasets = ["propeller_tacked"]

[paths]
input_root = "/data/in"
output_root = "/data/out"
openmvg_bin_dir = "/opt/OpenMVG"
openmvs_bin_dir = "/opt/OpenMVS"
sensor_database = "/opt/sensor_width_camera_database.txt"
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.datasets, vec!["propeller_tacked"]);
        // Omitted sections take defaults
        assert_eq!(bp.mode, ModeSelection::Sequential);
        assert_eq!(bp.tools.describer_preset, DescriberPreset::Normal);
        assert_eq!(bp.tools.on_nonzero_exit, ExitPolicy::Fail);
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "datasets": ["propeller_tacked"],
            "mode": "global",
            "paths": {
                "input_root": "/data/in",
                "output_root": "/data/out",
                "openmvg_bin_dir": "/opt/OpenMVG",
                "openmvs_bin_dir": "/opt/OpenMVS",
                "sensor_database": "/opt/db.txt"
            },
            "extras": { "robust_triangulation": true }
        }"#;
        let result = parse_json(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let bp = result.unwrap();
        assert_eq!(bp.mode, ModeSelection::Global);
        assert!(bp.extras.robust_triangulation);
        assert!(!bp.extras.colorize);
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let content = "invalid toml [[[";
        let result = parse_toml(content);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, PipelineError::ConfigParse { .. }));
    }

    #[test]
    fn test_legacy_exit_policy() {
        let content = r#"
datasets = ["a"]

[paths]
input_root = "/i"
output_root = "/o"
openmvg_bin_dir = "/g"
openmvs_bin_dir = "/s"
sensor_database = "/d.txt"

[tools]
on_nonzero_exit = "ignore"
"#;
        let bp = parse_toml(content).unwrap();
        assert_eq!(bp.tools.on_nonzero_exit, ExitPolicy::Ignore);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ConfigFormat::from_extension("toml"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("TOML"),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_extension("json"),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_extension("yaml"), None);
    }
}
