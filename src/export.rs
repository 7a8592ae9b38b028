use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;

use crate::metadata::PlanMetadata;
use crate::plan::PlanError;
use crate::timetable::Timetable;

/// Filename offered to users when no explicit path is given.
pub const DEFAULT_CSV_FILENAME: &str = "study_timetable_custom.csv";

#[derive(Debug)]
pub enum ExportError {
    Serialization(SerdeJsonError),
    DataFrame(PolarsError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Serialization(err) => write!(f, "serialization error: {err}"),
            ExportError::DataFrame(err) => write!(f, "dataframe conversion error: {err}"),
            ExportError::Io(err) => write!(f, "io error: {err}"),
            ExportError::Csv(err) => write!(f, "csv error: {err}"),
            ExportError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<SerdeJsonError> for ExportError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<PolarsError> for ExportError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<PlanError> for ExportError {
    fn from(value: PlanError) -> Self {
        match value {
            PlanError::InvalidInput(msg) => Self::InvalidData(msg),
            PlanError::DataFrame(err) => Self::DataFrame(err),
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Serialize the timetable as UTF-8 CSV bytes.
///
/// The leading header cell is empty and each row starts with its slot
/// label, the layout a pandas-style table export produces for an indexed
/// frame. The remaining header cells are the day labels.
pub fn csv_bytes(timetable: &Timetable) -> ExportResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(&mut writer, timetable)?;
    writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

pub fn save_timetable_to_csv<P: AsRef<Path>>(
    timetable: &Timetable,
    path: P,
) -> ExportResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    write_rows(&mut writer, timetable)?;
    writer.flush()?;
    Ok(())
}

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, timetable: &Timetable) -> ExportResult<()> {
    let day_labels = timetable.day_labels();

    let mut header = Vec::with_capacity(day_labels.len() + 1);
    header.push(String::new());
    header.extend(day_labels.iter().cloned());
    writer.write_record(&header)?;

    let slot_labels = timetable.slot_labels()?;
    let mut day_entries = Vec::with_capacity(day_labels.len());
    for label in &day_labels {
        day_entries.push(timetable.entries_for_day(label)?);
    }

    for (idx, slot) in slot_labels.iter().enumerate() {
        let mut record = Vec::with_capacity(day_labels.len() + 1);
        record.push(slot.clone());
        for entries in &day_entries {
            record.push(entries.get(idx).cloned().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }
    Ok(())
}

/// Read back the shape of an exported CSV: `(day_count, slot_count)`.
pub fn csv_dimensions<P: AsRef<Path>>(path: P) -> ExportResult<(usize, usize)> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let header_len = reader.headers()?.len();
    if header_len < 2 {
        return Err(ExportError::InvalidData(
            "CSV file contained no day columns".into(),
        ));
    }
    let day_count = header_len - 1;

    let mut slot_count = 0usize;
    for record in reader.records() {
        record?;
        slot_count += 1;
    }
    Ok((day_count, slot_count))
}

#[derive(Serialize, Deserialize)]
struct DaySnapshot {
    label: String,
    entries: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct TimetableSnapshot {
    metadata: PlanMetadata,
    days: Vec<DaySnapshot>,
}

impl TimetableSnapshot {
    fn from_timetable(timetable: &Timetable) -> ExportResult<Self> {
        let mut days = Vec::with_capacity(timetable.day_count());
        for label in timetable.day_labels() {
            let entries = timetable.entries_for_day(&label)?;
            days.push(DaySnapshot { label, entries });
        }
        Ok(Self {
            metadata: timetable.metadata().clone(),
            days,
        })
    }
}

pub fn save_timetable_to_json<P: AsRef<Path>>(
    timetable: &Timetable,
    path: P,
) -> ExportResult<()> {
    let snapshot = TimetableSnapshot::from_timetable(timetable)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}
