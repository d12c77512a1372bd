//! Source record extraction from temperature logger CSV exports.
//!
//! This module parses a single logger export:
//! - Sampling metadata (interval in minutes, temperature unit) from the
//!   header region
//! - The data region, restricted to a configured 1-indexed row window
//!
//! Exports are decoded as UTF-8 with a Latin-1 fallback; older loggers
//! write the degree sign in the header as a single byte.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::warn;
use regex::Regex;
use thiserror::Error;

/// Minutes in one calendar day; day length is derived from this.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors that can occur while extracting a source file.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("sample rate not found in header of '{path}'")]
    SampleRateNotFound { path: PathBuf },

    #[error("temperature units not found in header of '{path}'")]
    UnitsNotFound { path: PathBuf },

    #[error(
        "invalid row window for '{path}': start_row {start_row} must be positive and at most end_row {end_row}"
    )]
    InvalidRowWindow {
        path: PathBuf,
        start_row: usize,
        end_row: usize,
    },

    #[error("row window [{start_row}, {end_row}] exceeds '{path}', which has {total_rows} rows")]
    RowWindowOutOfBounds {
        path: PathBuf,
        start_row: usize,
        end_row: usize,
        total_rows: usize,
    },

    #[error("row window [{start_row}, {end_row}] of '{path}' contains no readings")]
    EmptyWindow {
        path: PathBuf,
        start_row: usize,
        end_row: usize,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Sampling parameters reported by one logger export.
///
/// Derived once per file; a batch is only processed after validation
/// confirms every file reports the same spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingSpec {
    /// Minutes between consecutive samples.
    pub interval_minutes: u32,
    /// Temperature unit label, carried verbatim (e.g. "°C").
    pub unit: String,
}

/// One timestamped measurement from the data region.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Date/time text exactly as recorded; never reparsed.
    pub timestamp: String,
    /// Measured value.
    pub value: f64,
}

/// Windowed data from one source file together with its sampling spec.
#[derive(Debug, Clone)]
pub struct RawSeries {
    /// Path of the export this series came from.
    pub source: PathBuf,
    /// Sampling parameters reported by this file's header.
    pub spec: SamplingSpec,
    /// Readings inside the configured row window, in file order.
    pub readings: Vec<Reading>,
}

impl RawSeries {
    /// Returns the number of readings in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Returns true if the window produced no readings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Measurement values in chronological order, without timestamps.
    pub fn values(&self) -> Vec<f64> {
        self.readings.iter().map(|r| r.value).collect()
    }
}

/// Scan header rows for the sample rate and return it in minutes.
///
/// The loggers emit a header cell containing "Sample Rate" with the
/// minute count embedded, e.g. `Sample Rate: 60 minute(s)`.
fn extract_sample_rate(rows: &[csv::StringRecord]) -> Option<u32> {
    let digits = Regex::new(r"(\d+)").unwrap();
    for row in rows {
        for cell in row.iter() {
            if cell.contains("Sample Rate") {
                if let Some(m) = digits.find(cell) {
                    return m.as_str().parse().ok();
                }
            }
        }
    }
    None
}

/// Scan header rows for the temperature unit label.
///
/// The unit is read from the alarm threshold cells, which carry a value
/// suffixed with the unit, e.g. `High Temperature Alarm: 85°C`.
fn extract_units(rows: &[csv::StringRecord]) -> Option<String> {
    let pattern = Regex::new(r"[-+]?\d+(?:\.\d+)?\s*(°[CF])").unwrap();
    for row in rows {
        for cell in row.iter() {
            if cell.contains("High Temperature Alarm:") || cell.contains("Low Temperature Alarm:")
            {
                if let Some(caps) = pattern.captures(cell) {
                    return Some(caps[1].to_string());
                }
            }
        }
    }
    None
}

/// Read a logger export into CSV records.
///
/// Exports are decoded as UTF-8 when valid, otherwise as Latin-1 (older
/// loggers write the degree sign as a single byte). Decoding is total
/// and never fails.
fn read_records(path: &Path) -> Result<Vec<csv::StringRecord>> {
    let bytes = std::fs::read(path)?;
    let decoded: Cow<'_, str> = match std::str::from_utf8(&bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => encoding_rs::mem::decode_latin1(&bytes),
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Extract a [`RawSeries`] from a logger export.
///
/// Locates the sampling metadata in the header region, then slices the
/// data region to rows `[start_row, end_row]` (1-indexed, inclusive).
/// Rows outside the window are dropped; rows inside the window whose
/// value column is not numeric are skipped with a warning.
///
/// # Arguments
///
/// * `path` - Path to the logger CSV export
/// * `start_row` - First row of the data region (1-indexed, inclusive)
/// * `end_row` - Last row of the data region (1-indexed, inclusive)
///
/// # Errors
///
/// Returns an error if the metadata cannot be located, if the row window
/// is inconsistent with the file, or if the window yields no readings.
pub fn load_series<P: AsRef<Path>>(path: P, start_row: usize, end_row: usize) -> Result<RawSeries> {
    let path = path.as_ref();
    let rows = read_records(path)?;

    let interval_minutes =
        extract_sample_rate(&rows).ok_or_else(|| LoaderError::SampleRateNotFound {
            path: path.to_path_buf(),
        })?;
    let unit = extract_units(&rows).ok_or_else(|| LoaderError::UnitsNotFound {
        path: path.to_path_buf(),
    })?;

    if start_row == 0 || start_row > end_row {
        return Err(LoaderError::InvalidRowWindow {
            path: path.to_path_buf(),
            start_row,
            end_row,
        });
    }
    if end_row > rows.len() {
        return Err(LoaderError::RowWindowOutOfBounds {
            path: path.to_path_buf(),
            start_row,
            end_row,
            total_rows: rows.len(),
        });
    }

    let mut readings = Vec::with_capacity(end_row - start_row + 1);
    for (idx, row) in rows.iter().enumerate() {
        let file_row = idx + 1;
        if file_row < start_row || file_row > end_row {
            continue;
        }

        let timestamp = row.get(0).unwrap_or("").to_string();
        let value: f64 = match row.get(2).and_then(|s| s.trim().parse().ok()) {
            Some(v) => v,
            None => {
                warn!(
                    "skipping row {} of '{}': value column is not numeric",
                    file_row,
                    path.display()
                );
                continue;
            }
        };

        readings.push(Reading { timestamp, value });
    }

    if readings.is_empty() {
        return Err(LoaderError::EmptyWindow {
            path: path.to_path_buf(),
            start_row,
            end_row,
        });
    }

    Ok(RawSeries {
        source: path.to_path_buf(),
        spec: SamplingSpec {
            interval_minutes,
            unit,
        },
        readings,
    })
}

/// Read only the sampling metadata and total row count of an export.
///
/// Used by the `inspect` subcommand; does not apply a row window.
pub fn sniff_metadata<P: AsRef<Path>>(path: P) -> Result<(SamplingSpec, usize)> {
    let path = path.as_ref();
    let rows = read_records(path)?;

    let interval_minutes =
        extract_sample_rate(&rows).ok_or_else(|| LoaderError::SampleRateNotFound {
            path: path.to_path_buf(),
        })?;
    let unit = extract_units(&rows).ok_or_else(|| LoaderError::UnitsNotFound {
        path: path.to_path_buf(),
    })?;

    Ok((
        SamplingSpec {
            interval_minutes,
            unit,
        },
        rows.len(),
    ))
}
