//! CSV export of the sample history
//!
//! Writes `Timestamp,ECG Value` rows, oldest first, with ISO-8601
//! millisecond timestamps.

use chrono::{SecondsFormat, TimeZone, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::ExportError;
use crate::sim::SampleBuffer;

/// Write the history as CSV to any writer.
pub fn write_history<W: Write>(history: &SampleBuffer, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["Timestamp", "ECG Value"])?;
    for sample in history.iter() {
        csv_writer.write_record([iso_timestamp(sample.timestamp), sample.value.to_string()])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export the history into `dir`, returning the written path.
pub fn export_history(history: &SampleBuffer, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(format!("ecg_data_{}.csv", file_stamp()));
    let file = std::fs::File::create(&path)?;
    write_history(history, file)?;
    Ok(path)
}

/// ISO-8601 timestamp with millisecond precision (UTC).
fn iso_timestamp(millis: i64) -> String {
    match Utc.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => millis.to_string(),
    }
}

/// Filename-safe timestamp: colons and dots replaced with dashes.
pub(crate) fn file_stamp() -> String {
    Utc::now()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}
