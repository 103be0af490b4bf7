//! CSV export of reservations with a fixed column order.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExportError;
use crate::models::{format_date, Reservation};

/// Header row written at the top of every export.
pub const CSV_HEADER: [&str; 9] = [
    "ID",
    "Passenger Name",
    "Age",
    "Gender",
    "Source",
    "Destination",
    "Journey Date",
    "Return Date",
    "Fare",
];

/// File name used when exporting the whole travel history.
pub const HISTORY_FILE_NAME: &str = "Travel_History.csv";
/// File name used when exporting a selection from the history table.
pub const SELECTION_FILE_NAME: &str = "Selected_Tickets.csv";

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing was selected or booked; no file was created.
    NothingToExport,
}

/// Write `records` to `path` in the order given. An empty slice leaves the
/// filesystem untouched and reports [`ExportOutcome::NothingToExport`].
pub fn export_csv(records: &[Reservation], path: &Path) -> Result<ExportOutcome, ExportError> {
    if records.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(csv_row(record))?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), rows = records.len(), "exported tickets to CSV");
    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

fn csv_row(record: &Reservation) -> [String; 9] {
    [
        record.id.to_string(),
        record.passenger_name.clone(),
        record.age.to_string(),
        record.gender.to_string(),
        record.source.clone(),
        record.destination.clone(),
        format_date(record.journey_date),
        format_date(record.return_date),
        record.fare_display(),
    ]
}
