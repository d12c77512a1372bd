//! Output writers for the assembled day table and raw readings.
//!
//! This module hands finished data to disk:
//! - The day table as a CSV artifact with `Day 1 .. Day N` columns
//! - An optional raw-data export preserving the validated readings
//!   (source, timestamp, value) exactly as the loggers recorded them
//!
//! Writing is deterministic: identical input produces byte-identical
//! output files.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

use super::loaders::RawSeries;
use crate::processors::assemble::OutputTable;

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Creates a CSV writer over a buffered file.
fn create_csv_writer(path: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    ensure_parent_dirs(path)?;
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(csv::Writer::from_writer(BufWriter::new(file)))
}

/// Write the assembled day table as a CSV file.
///
/// The first row holds the column labels (`Day 1`, `Day 2`, ...); each
/// following row holds one intra-day sample index across all columns.
/// Cells with no reading are written as `missing_marker` (empty by
/// default), never as a numeric placeholder.
///
/// # Arguments
///
/// * `path` - Output file path (parent directories will be created)
/// * `table` - The assembled table
/// * `missing_marker` - Cell text for missing readings
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_day_table(path: &Path, table: &OutputTable, missing_marker: &str) -> Result<()> {
    let mut writer = create_csv_writer(path)?;
    let path_str = path.display().to_string();

    let labels: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
    writer
        .write_record(&labels)
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    for row in 0..table.num_rows() {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|column| match column.values[row] {
                Some(value) => value.to_string(),
                None => missing_marker.to_string(),
            })
            .collect();

        writer
            .write_record(&cells)
            .map_err(|e| WriteError::CsvError {
                path: path_str.clone(),
                source: e,
            })?;
    }

    writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

/// Write the validated raw readings as a CSV file.
///
/// One row per reading, in source order: the source file name, the
/// timestamp verbatim, and the measured value.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_raw_series(path: &Path, sources: &[RawSeries]) -> Result<()> {
    let mut writer = create_csv_writer(path)?;
    let path_str = path.display().to_string();

    writer
        .write_record(["source", "timestamp", "value"])
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    for series in sources {
        let name = series
            .source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| series.source.display().to_string());

        for reading in &series.readings {
            let value = reading.value.to_string();
            writer
                .write_record([name.as_str(), reading.timestamp.as_str(), value.as_str()])
                .map_err(|e| WriteError::CsvError {
                    path: path_str.clone(),
                    source: e,
                })?;
        }
    }

    writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}
