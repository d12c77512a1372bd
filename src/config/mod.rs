//! Configuration types for the temperature logger pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the data-region row window.
///
/// Rows are 1-indexed against the raw export file and the window is
/// inclusive on both ends. Rows outside the window are dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowWindowConfig {
    /// First data row of interest (1-indexed, inclusive)
    #[serde(default = "default_start_row")]
    pub start_row: usize,

    /// Last data row of interest (1-indexed, inclusive). Must be set
    /// here or on the command line before a batch can run.
    #[serde(default)]
    pub end_row: Option<usize>,
}

fn default_start_row() -> usize {
    1
}

impl Default for RowWindowConfig {
    fn default() -> Self {
        Self {
            start_row: default_start_row(),
            end_row: None,
        }
    }
}

/// Configuration for day segmentation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// When true, each day after the first starts with a copy of the
    /// previous day's last measurement.
    #[serde(default)]
    pub repeat_last_values: bool,
}

/// Configuration for table output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Cell text used where a column has no reading. Empty by default
    /// so missing cells stay blank rather than reading as a value.
    #[serde(default = "default_missing_marker")]
    pub missing_marker: String,
}

fn default_missing_marker() -> String {
    String::new()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            missing_marker: default_missing_marker(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub rows: RowWindowConfig,

    #[serde(default)]
    pub segmentation: SegmentationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.rows.start_row, 1);
        assert_eq!(config.rows.end_row, None);
        assert!(!config.segmentation.repeat_last_values);
        assert_eq!(config.output.missing_marker, "");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: PipelineConfig =
            serde_yaml::from_str("rows:\n  start_row: 21\n  end_row: 68\n").unwrap();
        assert_eq!(config.rows.start_row, 21);
        assert_eq!(config.rows.end_row, Some(68));
        assert!(!config.segmentation.repeat_last_values);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.yaml");

        let mut config = PipelineConfig::default();
        config.rows.start_row = 15;
        config.rows.end_row = Some(110);
        config.segmentation.repeat_last_values = true;

        config.to_yaml(&path).unwrap();
        let loaded = PipelineConfig::from_yaml(&path).unwrap();

        assert_eq!(loaded.rows.start_row, 15);
        assert_eq!(loaded.rows.end_row, Some(110));
        assert!(loaded.segmentation.repeat_last_values);
    }
}
