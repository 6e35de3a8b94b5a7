// src/data_input/telemetry_parser.rs

use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::axis_names::AttitudeField;
use crate::config::InputConfig;
use crate::data_input::telemetry_record::{TelemetryRecord, TelemetryRow};
use crate::error::AnalysisError;

const TIME_COLUMN: &str = "time";

/// Rows loaded from a telemetry source, in file order.
#[derive(Debug, Clone)]
pub struct ParsedTelemetry {
    pub rows: Vec<TelemetryRow>,
    pub headers: Vec<String>,
    /// True when the degree columns were missing and derived from radians.
    pub degrees_derived: bool,
}

impl ParsedTelemetry {
    pub fn reset_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_reset()).count()
    }
}

/// Column positions resolved from the header row.
struct ColumnIndices {
    time: usize,
    pitch: usize,
    roll: usize,
    pitch_deg: Option<usize>,
    roll_deg: Option<usize>,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord, input: &InputConfig) -> Result<Self, AnalysisError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let missing = |name: &str| AnalysisError::MissingColumn(name.to_string());
        let require = |name: &str| find(name).ok_or_else(|| missing(name));

        let time = require(TIME_COLUMN)?;
        let pitch = require(AttitudeField::PITCH.column_name())?;
        let roll = require(AttitudeField::ROLL.column_name())?;
        let pitch_deg = find(AttitudeField::PITCH_DEG.column_name());
        let roll_deg = find(AttitudeField::ROLL_DEG.column_name());

        if !input.derive_degrees {
            if pitch_deg.is_none() {
                return Err(missing(AttitudeField::PITCH_DEG.column_name()));
            }
            if roll_deg.is_none() {
                return Err(missing(AttitudeField::ROLL_DEG.column_name()));
            }
        }

        Ok(Self { time, pitch, roll, pitch_deg, roll_deg })
    }

    fn degrees_derived(&self) -> bool {
        self.pitch_deg.is_none() || self.roll_deg.is_none()
    }
}

fn parse_f64(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<f64, AnalysisError> {
    let raw = record.get(index).unwrap_or("");
    raw.parse::<f64>().map_err(|_| AnalysisError::MalformedValue {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn require_finite(value: f64, column: &str) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::NonFiniteValue(column.to_string()))
    }
}

/// Converts one CSV record into a row. A NaN `pitch` marks an episode reset;
/// every other field of such a row is ignored.
fn parse_row(
    record: &StringRecord,
    columns: &ColumnIndices,
    row: usize,
) -> Result<TelemetryRow, AnalysisError> {
    let pitch = parse_f64(record, columns.pitch, "pitch", row)?;
    if pitch.is_nan() {
        return Ok(TelemetryRow::EpisodeReset);
    }
    let pitch = require_finite(pitch, "pitch")?;
    let time = require_finite(parse_f64(record, columns.time, TIME_COLUMN, row)?, TIME_COLUMN)?;
    let roll = require_finite(parse_f64(record, columns.roll, "roll", row)?, "roll")?;

    let mut sample = TelemetryRecord::from_radians(time, pitch, roll);
    if let Some(idx) = columns.pitch_deg {
        sample.pitch_deg = require_finite(parse_f64(record, idx, "pitch_deg", row)?, "pitch_deg")?;
    }
    if let Some(idx) = columns.roll_deg {
        sample.roll_deg = require_finite(parse_f64(record, idx, "roll_deg", row)?, "roll_deg")?;
    }
    Ok(TelemetryRow::Sample(sample))
}

/// Parses telemetry CSV content from any reader.
pub fn parse_telemetry_reader<R: Read>(
    reader: R,
    input: &InputConfig,
) -> Result<ParsedTelemetry, AnalysisError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let header_record = rdr.headers()?.clone();
    debug!("Headers found in CSV: {:?}", header_record);

    let columns = ColumnIndices::resolve(&header_record, input)?;
    let degrees_derived = columns.degrees_derived();
    if degrees_derived {
        info!("Degree columns not found, deriving pitch_deg/roll_deg from radians");
    }

    let mut rows = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result?;
        rows.push(parse_row(&record, &columns, row_index + 1)?);
    }

    Ok(ParsedTelemetry {
        rows,
        headers: header_record.iter().map(|h| h.to_string()).collect(),
        degrees_derived,
    })
}

/// Loads a telemetry source from disk.
pub fn parse_telemetry_file(
    path: &Path,
    input: &InputConfig,
) -> Result<ParsedTelemetry, AnalysisError> {
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let parsed = parse_telemetry_reader(BufReader::new(file), input)?;
    info!(
        "Loaded {} rows ({} episode resets) from '{}'",
        parsed.rows.len(),
        parsed.reset_count(),
        path.display()
    );
    Ok(parsed)
}
