// src/data_analysis/sentinel_filter.rs

use crate::data_input::telemetry_record::{TelemetryRecord, TelemetryRow};

/// Returns the samples of `rows` in their original order, dropping every
/// episode reset marker.
pub fn filter_valid_records(rows: &[TelemetryRow]) -> Vec<TelemetryRecord> {
    rows.iter().filter_map(|row| row.as_sample().copied()).collect()
}

/// For every reset marker, the index (into the filtered sequence) of the first
/// sample that follows it. Consecutive markers collapse onto the same index, so
/// the result may contain duplicates; a trailing marker yields the filtered length.
pub fn reset_positions(rows: &[TelemetryRow]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut valid_seen = 0usize;
    for row in rows {
        match row {
            TelemetryRow::Sample(_) => valid_seen += 1,
            TelemetryRow::EpisodeReset => positions.push(valid_seen),
        }
    }
    positions
}
