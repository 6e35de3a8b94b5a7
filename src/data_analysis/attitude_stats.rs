// src/data_analysis/attitude_stats.rs

use ndarray::Array1;
use ndarray_stats::QuantileExt; // Import QuantileExt for .max() on Array1

use crate::axis_names::AttitudeField;
use crate::data_input::telemetry_record::TelemetryRecord;
use crate::error::AnalysisError;

/// Pooled summary of one angle series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttitudeStats {
    pub mean: f64,
    /// Population standard deviation (divisor N).
    pub std: f64,
    pub max_abs: f64,
}

/// Mean, population standard deviation and maximum absolute value of `values`.
///
/// An empty slice is a precondition violation and returns
/// [`AnalysisError::EmptySequence`] instead of NaN results.
pub fn compute_attitude_stats(values: &[f64], label: &str) -> Result<AttitudeStats, AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptySequence);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AnalysisError::NonFiniteValue(label.to_string()));
    }

    let arr = Array1::from(values.to_vec());
    let mean = arr.mean().ok_or(AnalysisError::EmptySequence)?;
    let std = arr.std(0.0);
    let max_abs = *arr
        .mapv(f64::abs)
        .max()
        .map_err(|_| AnalysisError::NonFiniteValue(label.to_string()))?;

    Ok(AttitudeStats { mean, std, max_abs })
}

/// Statistics of one attitude field over a record sequence.
pub fn compute_field_stats(
    records: &[TelemetryRecord],
    field: AttitudeField,
) -> Result<AttitudeStats, AnalysisError> {
    let values: Vec<f64> = records.iter().map(|r| r.value(field)).collect();
    compute_attitude_stats(&values, field.column_name())
}

/// Pitch and roll statistics for one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchRollStats {
    pub pitch: AttitudeStats,
    pub roll: AttitudeStats,
}

impl PitchRollStats {
    pub fn compute(
        records: &[TelemetryRecord],
        pitch: AttitudeField,
        roll: AttitudeField,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            pitch: compute_field_stats(records, pitch)?,
            roll: compute_field_stats(records, roll)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_values() {
        let stats = compute_attitude_stats(&[10.0, -10.0, 10.0, -10.0], "pitch_deg").unwrap();
        assert!(stats.mean.abs() < 1e-12);
        assert!((stats.std - 10.0).abs() < 1e-12);
        assert!((stats.max_abs - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_population_std_uses_n() {
        // Sample std (N - 1) would be sqrt(2) here.
        let stats = compute_attitude_stats(&[1.0, 2.0, 3.0], "roll_deg").unwrap();
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.std - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((stats.max_abs - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_max_abs_picks_negative_extreme() {
        let stats = compute_attitude_stats(&[-7.5, 2.0, 3.0], "pitch_deg").unwrap();
        assert_eq!(stats.max_abs, 7.5);
    }

    #[test]
    fn test_single_value() {
        let stats = compute_attitude_stats(&[-4.0], "pitch_deg").unwrap();
        assert_eq!(stats.mean, -4.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.max_abs, 4.0);
    }

    #[test]
    fn test_std_and_max_abs_are_non_negative() {
        let series: [&[f64]; 3] = [&[0.0], &[-1.0, -2.0, -3.0], &[5.5, -0.25, 1e6, -1e6]];
        for values in series {
            let stats = compute_attitude_stats(values, "pitch_deg").unwrap();
            assert!(stats.std >= 0.0);
            assert!(stats.max_abs >= 0.0);
        }
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let result = compute_attitude_stats(&[], "pitch_deg");
        assert!(matches!(result, Err(AnalysisError::EmptySequence)));
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let result = compute_attitude_stats(&[1.0, f64::NAN], "roll_deg");
        assert!(matches!(result, Err(AnalysisError::NonFiniteValue(ref c)) if c == "roll_deg"));
    }

    #[test]
    fn test_field_stats_select_column() {
        let records = vec![
            TelemetryRecord { time: 0.0, pitch_deg: 10.0, roll_deg: -20.0, ..Default::default() },
            TelemetryRecord { time: 0.02, pitch_deg: -10.0, roll_deg: -20.0, ..Default::default() },
        ];
        let stats =
            PitchRollStats::compute(&records, AttitudeField::PITCH_DEG, AttitudeField::ROLL_DEG)
                .unwrap();
        assert_eq!(stats.pitch.max_abs, 10.0);
        assert_eq!(stats.roll.mean, -20.0);
        assert_eq!(stats.roll.std, 0.0);
    }
}
