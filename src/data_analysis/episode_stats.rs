// src/data_analysis/episode_stats.rs

use crate::axis_names::AttitudeField;
use crate::data_analysis::attitude_stats::PitchRollStats;
use crate::data_analysis::boundary_detection::EpisodeBoundaries;
use crate::data_input::telemetry_record::TelemetryRecord;
use crate::error::AnalysisError;

/// Summary of one detected episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub episode_index: usize,
    pub start_index: usize, // First filtered record (inclusive).
    pub end_index: usize,   // Last filtered record (exclusive).
    pub start_time: f64,
    pub end_time: f64,
    pub stats_deg: PitchRollStats,
}

impl EpisodeSummary {
    pub fn sample_count(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Degree statistics for every episode delimited by `boundaries`.
pub fn summarize_episodes(
    records: &[TelemetryRecord],
    boundaries: &EpisodeBoundaries,
) -> Result<Vec<EpisodeSummary>, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptySequence);
    }

    boundaries
        .episode_ranges(records.len())
        .into_iter()
        .enumerate()
        .map(|(episode_index, range)| {
            let episode = &records[range.clone()];
            let first = episode.first().ok_or(AnalysisError::EmptySequence)?;
            let last = episode.last().ok_or(AnalysisError::EmptySequence)?;
            Ok(EpisodeSummary {
                episode_index,
                start_index: range.start,
                end_index: range.end,
                start_time: first.time,
                end_time: last.time,
                stats_deg: PitchRollStats::compute(
                    episode,
                    AttitudeField::PITCH_DEG,
                    AttitudeField::ROLL_DEG,
                )?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: f64, pitch_deg: f64, roll_deg: f64) -> TelemetryRecord {
        TelemetryRecord {
            time,
            pitch: pitch_deg.to_radians(),
            roll: roll_deg.to_radians(),
            pitch_deg,
            roll_deg,
        }
    }

    #[test]
    fn test_two_episodes() {
        let records = vec![
            record(0.0, 1.0, 0.0),
            record(0.02, 3.0, 0.0),
            record(5.0, -2.0, 4.0),
            record(5.02, -2.0, -4.0),
            record(5.04, -2.0, 4.0),
        ];
        let boundaries = EpisodeBoundaries { indices: vec![2] };
        let episodes = summarize_episodes(&records, &boundaries).unwrap();
        assert_eq!(episodes.len(), 2);

        assert_eq!(episodes[0].sample_count(), 2);
        assert_eq!(episodes[0].stats_deg.pitch.mean, 2.0);
        assert!((episodes[0].duration() - 0.02).abs() < 1e-12);

        assert_eq!(episodes[1].episode_index, 1);
        assert_eq!(episodes[1].start_index, 2);
        assert_eq!(episodes[1].end_index, 5);
        assert_eq!(episodes[1].start_time, 5.0);
        assert_eq!(episodes[1].stats_deg.roll.max_abs, 4.0);
    }

    #[test]
    fn test_single_record_is_one_episode() {
        let episodes =
            summarize_episodes(&[record(0.0, 1.0, 1.0)], &EpisodeBoundaries::default()).unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].duration(), 0.0);
    }

    #[test]
    fn test_empty_records_rejected() {
        assert!(matches!(
            summarize_episodes(&[], &EpisodeBoundaries::default()),
            Err(AnalysisError::EmptySequence)
        ));
    }
}
