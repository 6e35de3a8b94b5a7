// src/error.rs

use std::path::PathBuf;

/// Errors raised while loading, analyzing or rendering a telemetry source.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Malformed value '{value}' in column '{column}' at data row {row}")]
    MalformedValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("Cannot compute statistics over an empty record sequence")]
    EmptySequence,
    #[error("Non-finite value encountered in '{0}'")]
    NonFiniteValue(String),
    #[error("Invalid file pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    ConfigValidation(String),
    #[error("Render error: {0}")]
    Render(String),
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}
