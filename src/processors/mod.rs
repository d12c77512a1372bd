//! Batch processing modules.

pub mod assemble;
pub mod discovery;
pub mod validate;

// Re-export key types for convenience
pub use assemble::{assemble, DayColumn, OutputTable};
pub use discovery::{find_csv_files, DiscoveryError};
pub use validate::{confirm_spec, ValidateError};
