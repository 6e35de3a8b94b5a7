// src/data_input/telemetry_record.rs

use crate::axis_names::{AngleUnit, AttitudeAxis, AttitudeField};

/// One attitude sample from a telemetry source.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TelemetryRecord {
    pub time: f64,      // Seconds since episode or recording start.
    pub pitch: f64,     // Radians.
    pub roll: f64,      // Radians.
    pub pitch_deg: f64, // Degrees, precomputed for display.
    pub roll_deg: f64,  // Degrees, precomputed for display.
}

impl TelemetryRecord {
    /// Builds a record from radian angles, deriving the degree fields.
    pub fn from_radians(time: f64, pitch: f64, roll: f64) -> Self {
        Self {
            time,
            pitch,
            roll,
            pitch_deg: pitch.to_degrees(),
            roll_deg: roll.to_degrees(),
        }
    }

    pub fn value(&self, field: AttitudeField) -> f64 {
        match (field.axis, field.unit) {
            (AttitudeAxis::Pitch, AngleUnit::Radians) => self.pitch,
            (AttitudeAxis::Roll, AngleUnit::Radians) => self.roll,
            (AttitudeAxis::Pitch, AngleUnit::Degrees) => self.pitch_deg,
            (AttitudeAxis::Roll, AngleUnit::Degrees) => self.roll_deg,
        }
    }
}

/// A row of a telemetry source: either a sample or an episode reset marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TelemetryRow {
    Sample(TelemetryRecord),
    /// The collector ended an episode here; the next sample starts a new one.
    EpisodeReset,
}

impl TelemetryRow {
    pub fn as_sample(&self) -> Option<&TelemetryRecord> {
        match self {
            TelemetryRow::Sample(record) => Some(record),
            TelemetryRow::EpisodeReset => None,
        }
    }

    pub fn is_reset(&self) -> bool {
        matches!(self, TelemetryRow::EpisodeReset)
    }
}

impl From<TelemetryRecord> for TelemetryRow {
    fn from(record: TelemetryRecord) -> Self {
        TelemetryRow::Sample(record)
    }
}
