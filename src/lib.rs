//! Temperature logger batch processing pipeline.
//!
//! This crate provides tools for:
//! - Extracting sampling metadata and windowed readings from logger CSV exports
//! - Validating interval/unit consistency across a batch of exports
//! - Segmenting the continuous time series into calendar-day buckets
//! - Assembling per-day columns into a single `Day 1 .. Day N` table
//!
//! # Example
//!
//! ```no_run
//! use templog_pipeline::core::{loaders, segment};
//! use templog_pipeline::processors::{assemble, validate};
//!
//! let series = loaders::load_series("logger.csv", 21, 68).unwrap();
//! let spec = validate::confirm_spec(std::slice::from_ref(&series)).unwrap();
//! let day_length = segment::samples_per_day(&spec).unwrap();
//! let buckets = segment::segment_days(&series.values(), day_length, false).unwrap();
//! let table = assemble::assemble(&[buckets]);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{OutputConfig, PipelineConfig, RowWindowConfig, SegmentationConfig};
pub use core::loaders::{RawSeries, Reading, SamplingSpec};
pub use core::segment::DayBucket;
pub use processors::assemble::OutputTable;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
