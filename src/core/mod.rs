//! Core data types and I/O operations.

pub mod loaders;
pub mod segment;
pub mod writers;

pub use loaders::{RawSeries, Reading, SamplingSpec};
pub use segment::{samples_per_day, segment_days, DayBucket, SegmentError};
pub use writers::{write_day_table, write_raw_series, WriteError};
