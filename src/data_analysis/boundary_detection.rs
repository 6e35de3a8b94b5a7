// src/data_analysis/boundary_detection.rs

use ndarray::{s, Array1};
use std::ops::Range;

use crate::config::SegmentationConfig;
use crate::data_input::telemetry_record::TelemetryRecord;

/// Indices into a filtered record sequence where a new episode begins.
/// Index 0 is an implicit episode start and never appears here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeBoundaries {
    pub indices: Vec<usize>,
}

impl EpisodeBoundaries {
    pub fn episode_count(&self) -> usize {
        self.indices.len() + 1
    }

    /// Half-open index ranges of every episode over a sequence of `len` records.
    pub fn episode_ranges(&self, len: usize) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(self.episode_count());
        let mut start = 0;
        for &boundary in &self.indices {
            ranges.push(start..boundary);
            start = boundary;
        }
        ranges.push(start..len);
        ranges
    }
}

/// First difference of the `time` column, `dt[i] = time[i + 1] - time[i]`.
fn time_steps(records: &[TelemetryRecord]) -> Array1<f64> {
    if records.len() < 2 {
        return Array1::zeros(0);
    }
    let times: Array1<f64> = records.iter().map(|r| r.time).collect();
    &times.slice(s![1..]) - &times.slice(s![..-1])
}

/// Marks index `i + 1` as an episode start whenever `dt[i]` is strictly greater
/// than the configured gap threshold. With `detect_time_reversal`, a negative
/// `dt[i]` also counts. Fewer than two records yields no boundaries.
pub fn detect_episode_boundaries(
    records: &[TelemetryRecord],
    config: &SegmentationConfig,
) -> EpisodeBoundaries {
    let steps = time_steps(records);
    let indices = steps
        .iter()
        .enumerate()
        .filter(|&(_, &dt)| {
            dt > config.gap_threshold_s || (config.detect_time_reversal && dt < 0.0)
        })
        .map(|(i, _)| i + 1)
        .collect();
    EpisodeBoundaries { indices }
}

/// Median of the positive time steps that stay within the gap threshold, i.e.
/// the collector's nominal sampling interval. None if no such step exists.
pub fn nominal_sample_interval(
    records: &[TelemetryRecord],
    config: &SegmentationConfig,
) -> Option<f64> {
    let mut steps: Vec<f64> = time_steps(records)
        .iter()
        .copied()
        .filter(|&dt| dt > 1e-9 && dt <= config.gap_threshold_s)
        .collect();
    if steps.is_empty() {
        return None;
    }
    steps.sort_by(|a, b| a.total_cmp(b));
    let mid = steps.len() / 2;
    if steps.len() % 2 == 0 {
        Some((steps[mid - 1] + steps[mid]) / 2.0)
    } else {
        Some(steps[mid])
    }
}
