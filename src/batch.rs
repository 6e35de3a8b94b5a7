// src/batch.rs

use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::orchestrator::{analyze_source, RenderSink};

/// Files directly inside `dir` whose names match `pattern`, sorted by path.
pub fn discover_sources(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, AnalysisError> {
    let escaped_dir = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = Path::new(&escaped_dir).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();

    let entries = glob::glob(&full_pattern).map_err(|e| AnalysisError::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable path: {e}"),
        }
    }
    files.sort();
    Ok(files)
}

/// Outcome of one source within a batch.
#[derive(Debug)]
pub struct SourceOutcome {
    pub path: PathBuf,
    pub result: Result<usize, AnalysisError>, // Episode count on success.
}

#[derive(Debug)]
pub enum BatchOutcome {
    /// Nothing matched; no analysis was attempted.
    NoSourcesFound { dir: PathBuf, pattern: String },
    Processed(Vec<SourceOutcome>),
}

impl BatchOutcome {
    pub fn failure_count(&self) -> usize {
        match self {
            BatchOutcome::NoSourcesFound { .. } => 0,
            BatchOutcome::Processed(outcomes) => {
                outcomes.iter().filter(|o| o.result.is_err()).count()
            }
        }
    }
}

/// Analyzes every matching source in order. A failing source is recorded and
/// the batch moves on to the next one.
pub fn run_batch(
    dir: &Path,
    pattern: &str,
    config: &AnalysisConfig,
    sinks: &mut [Box<dyn RenderSink>],
) -> Result<BatchOutcome, AnalysisError> {
    let files = discover_sources(dir, pattern)?;

    if files.is_empty() {
        println!("No files matching {} found in directory {}", pattern, dir.display());
        return Ok(BatchOutcome::NoSourcesFound {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    println!("Found {} files to analyze", files.len());
    let mut outcomes = Vec::with_capacity(files.len());
    for path in files {
        println!("\nAnalyzing file: {}", path.file_name().unwrap_or_default().to_string_lossy());
        let result = analyze_source(&path, config, sinks).map(|analysis| analysis.episode_count());
        match &result {
            Ok(episodes) => info!("Finished '{}' ({} episodes)", path.display(), episodes),
            Err(e) => error!("Analysis of '{}' failed: {}", path.display(), e),
        }
        outcomes.push(SourceOutcome { path, result });
    }
    Ok(BatchOutcome::Processed(outcomes))
}
