// src/config.rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_FILE_PATTERN, DEFAULT_GAP_THRESHOLD_S, LINE_WIDTH_PLOT, PLOT_HEIGHT, PLOT_WIDTH,
};
use crate::error::AnalysisError;

/// Top-level analysis configuration. Every section falls back to its defaults
/// when omitted from the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub segmentation: SegmentationConfig,
    pub input: InputConfig,
    pub plot: PlotSettings,
    pub batch: BatchConfig,
}

/// Episode boundary detection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// A time step strictly greater than this (seconds) starts a new episode.
    /// Encodes the expected sampling interval of the collector; 0.1 s suits
    /// collectors running at 50 Hz or faster.
    pub gap_threshold_s: f64,
    /// Also treat a backward jump of the clock as an episode start.
    pub detect_time_reversal: bool,
}

/// Telemetry loading options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Derive `pitch_deg`/`roll_deg` from the radian columns when absent.
    pub derive_degrees: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Glob pattern matched against file names inside the batch directory.
    pub pattern: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            gap_threshold_s: DEFAULT_GAP_THRESHOLD_S,
            detect_time_reversal: false,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { derive_degrees: true }
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            width: PLOT_WIDTH,
            height: PLOT_HEIGHT,
            line_width: LINE_WIDTH_PLOT,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_FILE_PATTERN.to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, AnalysisError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let threshold = self.segmentation.gap_threshold_s;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(AnalysisError::ConfigValidation(format!(
                "gap_threshold_s must be a positive number, got {threshold}"
            )));
        }
        if self.plot.width == 0 || self.plot.height == 0 {
            return Err(AnalysisError::ConfigValidation(
                "Plot dimensions must be positive".to_string(),
            ));
        }
        if self.batch.pattern.trim().is_empty() {
            return Err(AnalysisError::ConfigValidation(
                "Batch file pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.segmentation.gap_threshold_s, 0.1);
        assert!(!config.segmentation.detect_time_reversal);
        assert!(config.input.derive_degrees);
        assert_eq!(config.batch.pattern, DEFAULT_FILE_PATTERN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = AnalysisConfig::from_toml_str(
            "[segmentation]\ngap_threshold_s = 0.25\n",
        )
        .unwrap();
        assert_eq!(config.segmentation.gap_threshold_s, 0.25);
        assert!(!config.segmentation.detect_time_reversal);
        assert_eq!(config.plot, PlotSettings::default());
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        let result = AnalysisConfig::from_toml_str("[segmentation]\ngap_threshold_s = 0.0\n");
        assert!(matches!(result, Err(AnalysisError::ConfigValidation(_))));
    }

    #[test]
    fn test_rejects_unparseable_toml() {
        let result = AnalysisConfig::from_toml_str("[segmentation\n");
        assert!(matches!(result, Err(AnalysisError::ConfigParse(_))));
    }
}
