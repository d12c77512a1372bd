//! Output table assembly from day buckets.
//!
//! Merges one or more sources' day buckets into a single column-labeled
//! table. Day numbers continue sequentially across sources, so multi-file
//! captures spanning a longer period read as one uninterrupted sequence.
//! Columns shorter than the longest are padded with an explicit missing
//! marker, never with a numeric placeholder.

use crate::core::segment::DayBucket;

/// One `Day <n>` column of the output table.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    /// Column header, `"Day <n>"`.
    pub label: String,
    /// Cell values aligned by intra-day sample index; `None` marks a
    /// cell with no reading.
    pub values: Vec<Option<f64>>,
}

/// The assembled output table, built once per batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputTable {
    /// Columns in increasing day order.
    pub columns: Vec<DayColumn>,
}

impl OutputTable {
    /// Returns the number of day columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows; after assembly every column has this
    /// length.
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Returns true if the table has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Assemble per-source bucket lists into one output table.
///
/// Sources must already be validated to share a sampling spec and are
/// consumed in validation order. One column is emitted per bucket; day
/// numbering restarts from each source's buckets but the column labels
/// continue sequentially across sources.
///
/// # Arguments
///
/// * `sources` - One bucket list per source file, in validation order
///
/// # Returns
///
/// A table whose columns all have the length of the longest bucket,
/// shorter columns padded with `None`.
pub fn assemble(sources: &[Vec<DayBucket>]) -> OutputTable {
    let num_columns: usize = sources.iter().map(|b| b.len()).sum();
    let mut columns = Vec::with_capacity(num_columns);

    let mut day = 0usize;
    for buckets in sources {
        for bucket in buckets {
            day += 1;
            columns.push(DayColumn {
                label: format!("Day {}", day),
                values: bucket.values.iter().copied().map(Some).collect(),
            });
        }
    }

    let depth = columns.iter().map(|c| c.values.len()).max().unwrap_or(0);
    for column in &mut columns {
        column.values.resize(depth, None);
    }

    OutputTable { columns }
}
