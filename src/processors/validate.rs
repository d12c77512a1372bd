//! Cross-source consistency validation.
//!
//! A batch is only segmented after every source file is confirmed to
//! report the same sampling interval and temperature unit. The first
//! source is the reference; comparison walks sources in discovery order
//! and stops at the first mismatch, so a bad batch never produces output.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::loaders::{RawSeries, SamplingSpec};

/// Errors that can occur during batch validation.
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("no source files to validate")]
    NoSources,

    #[error(
        "sample rate mismatch: '{reference}' reports {expected} minute(s) but '{offender}' reports {found} minute(s)"
    )]
    SampleRateMismatch {
        reference: PathBuf,
        offender: PathBuf,
        expected: u32,
        found: u32,
    },

    #[error("units mismatch: '{reference}' reports {expected} but '{offender}' reports {found}")]
    UnitsMismatch {
        reference: PathBuf,
        offender: PathBuf,
        expected: String,
        found: String,
    },
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidateError>;

/// Confirm that all sources share one sampling spec and return it.
///
/// The first source's spec is the reference. A batch of size one
/// trivially validates; an empty batch is an error.
///
/// # Errors
///
/// Returns an error naming the reference file, the offending file, and
/// the expected vs. found values on the first mismatch encountered.
pub fn confirm_spec(sources: &[RawSeries]) -> Result<SamplingSpec> {
    let reference = sources.first().ok_or(ValidateError::NoSources)?;

    for source in &sources[1..] {
        if source.spec.interval_minutes != reference.spec.interval_minutes {
            return Err(ValidateError::SampleRateMismatch {
                reference: reference.source.clone(),
                offender: source.source.clone(),
                expected: reference.spec.interval_minutes,
                found: source.spec.interval_minutes,
            });
        }
        if source.spec.unit != reference.spec.unit {
            return Err(ValidateError::UnitsMismatch {
                reference: reference.source.clone(),
                offender: source.source.clone(),
                expected: reference.spec.unit.clone(),
                found: source.spec.unit.clone(),
            });
        }
    }

    Ok(reference.spec.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loaders::Reading;
    use std::path::Path;

    fn series(name: &str, interval_minutes: u32, unit: &str) -> RawSeries {
        RawSeries {
            source: Path::new(name).to_path_buf(),
            spec: SamplingSpec {
                interval_minutes,
                unit: unit.to_string(),
            },
            readings: vec![Reading {
                timestamp: "08/01/23 00:00:00".to_string(),
                value: 20.0,
            }],
        }
    }

    #[test]
    fn test_single_source_trivially_validates() {
        let sources = vec![series("a.csv", 60, "°C")];

        let spec = confirm_spec(&sources).unwrap();
        assert_eq!(spec.interval_minutes, 60);
        assert_eq!(spec.unit, "°C");
    }

    #[test]
    fn test_identical_sources_validate() {
        let sources = vec![
            series("a.csv", 30, "°F"),
            series("b.csv", 30, "°F"),
            series("c.csv", 30, "°F"),
        ];

        let spec = confirm_spec(&sources).unwrap();
        assert_eq!(spec.interval_minutes, 30);
    }

    #[test]
    fn test_sample_rate_mismatch_names_both_files() {
        let sources = vec![series("a.csv", 60, "°C"), series("b.csv", 30, "°C")];

        match confirm_spec(&sources).unwrap_err() {
            ValidateError::SampleRateMismatch {
                reference,
                offender,
                expected,
                found,
            } => {
                assert_eq!(reference, Path::new("a.csv"));
                assert_eq!(offender, Path::new("b.csv"));
                assert_eq!(expected, 60);
                assert_eq!(found, 30);
            }
            other => panic!("expected SampleRateMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_units_mismatch_names_both_files() {
        let sources = vec![series("a.csv", 60, "°C"), series("b.csv", 60, "°F")];

        match confirm_spec(&sources).unwrap_err() {
            ValidateError::UnitsMismatch {
                expected, found, ..
            } => {
                assert_eq!(expected, "°C");
                assert_eq!(found, "°F");
            }
            other => panic!("expected UnitsMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_first_mismatch_wins() {
        // b.csv differs in rate, c.csv differs in unit; rate is reported
        // because b.csv comes first.
        let sources = vec![
            series("a.csv", 60, "°C"),
            series("b.csv", 15, "°C"),
            series("c.csv", 60, "°F"),
        ];

        assert!(matches!(
            confirm_spec(&sources).unwrap_err(),
            ValidateError::SampleRateMismatch { .. }
        ));
    }

    #[test]
    fn test_empty_batch_is_an_error() {
        assert!(matches!(
            confirm_spec(&[]).unwrap_err(),
            ValidateError::NoSources
        ));
    }
}
