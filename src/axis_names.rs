/// Centralized attitude axis naming
///
/// Provides consistent axis names and field selection across the plot functions
/// and the statistics passes. Panel order in every chart is Pitch first, then Roll.

/// Attitude axes reported by the analysis, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttitudeAxis {
    Pitch,
    Roll,
}

/// Angle unit of a telemetry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Radians,
    Degrees,
}

impl AngleUnit {
    pub fn label(self) -> &'static str {
        match self {
            AngleUnit::Radians => "rad",
            AngleUnit::Degrees => "deg",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AngleUnit::Radians => " rad",
            AngleUnit::Degrees => "°",
        }
    }
}

/// A single angle column of a telemetry record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttitudeField {
    pub axis: AttitudeAxis,
    pub unit: AngleUnit,
}

impl AttitudeField {
    pub const PITCH: AttitudeField =
        AttitudeField { axis: AttitudeAxis::Pitch, unit: AngleUnit::Radians };
    pub const ROLL: AttitudeField =
        AttitudeField { axis: AttitudeAxis::Roll, unit: AngleUnit::Radians };
    pub const PITCH_DEG: AttitudeField =
        AttitudeField { axis: AttitudeAxis::Pitch, unit: AngleUnit::Degrees };
    pub const ROLL_DEG: AttitudeField =
        AttitudeField { axis: AttitudeAxis::Roll, unit: AngleUnit::Degrees };

    /// Column name used in telemetry CSV files.
    pub fn column_name(self) -> &'static str {
        match (self.axis, self.unit) {
            (AttitudeAxis::Pitch, AngleUnit::Radians) => "pitch",
            (AttitudeAxis::Roll, AngleUnit::Radians) => "roll",
            (AttitudeAxis::Pitch, AngleUnit::Degrees) => "pitch_deg",
            (AttitudeAxis::Roll, AngleUnit::Degrees) => "roll_deg",
        }
    }
}

/// Get the display name for an attitude axis.
pub fn axis_name(axis: AttitudeAxis) -> &'static str {
    match axis {
        AttitudeAxis::Pitch => "Pitch",
        AttitudeAxis::Roll => "Roll",
    }
}

/// All attitude axes in panel order.
pub const ATTITUDE_AXES: [AttitudeAxis; 2] = [AttitudeAxis::Pitch, AttitudeAxis::Roll];
