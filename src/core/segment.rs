//! Day segmentation of a continuous sample stream.
//!
//! This module partitions an ordered value sequence into calendar-day
//! buckets of `24h / interval` samples, optionally threading a continuity
//! value across bucket boundaries: when enabled, each day after the first
//! starts with a copy of the previous day's last measurement.

use thiserror::Error;

use super::loaders::{SamplingSpec, MINUTES_PER_DAY};

/// Errors that can occur while deriving or applying the day length.
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error(
        "a 24h day is not an exact multiple of the {interval_minutes} minute sample interval"
    )]
    UnevenDayLength { interval_minutes: u32 },

    #[error("cannot segment an empty sample stream")]
    EmptyStream,
}

/// Result type for segmentation operations.
pub type Result<T> = std::result::Result<T, SegmentError>;

/// One day's worth of measurements.
///
/// Day numbering is 1-based and contiguous. The final bucket of a stream
/// may be shorter than a full day; it is never discarded or padded here.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    /// 1-based day number.
    pub day: usize,
    /// Measurements in chronological order.
    pub values: Vec<f64>,
}

impl DayBucket {
    /// Returns the number of measurements in this bucket.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the bucket holds no measurements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Derive the number of samples per day from a confirmed sampling spec.
///
/// The day length must divide evenly: 1440 minutes that are not an exact
/// multiple of the interval are a configuration error, never rounded.
pub fn samples_per_day(spec: &SamplingSpec) -> Result<usize> {
    if spec.interval_minutes == 0 || MINUTES_PER_DAY % spec.interval_minutes != 0 {
        return Err(SegmentError::UnevenDayLength {
            interval_minutes: spec.interval_minutes,
        });
    }
    Ok((MINUTES_PER_DAY / spec.interval_minutes) as usize)
}

/// Partition a value sequence into day buckets.
///
/// Walks the sequence in strict order, consuming `samples_per_day` values
/// per day. With `repeat_last_values`, each bucket after the first is
/// prefixed with a copy of the previous day's last value; the continuity
/// value is an explicit accumulator threaded through the loop, so earlier
/// buckets are never touched again. Day 1 is unaffected by the flag.
///
/// # Arguments
///
/// * `values` - Ordered measurement stream
/// * `samples_per_day` - Day length from [`samples_per_day`]
/// * `repeat_last_values` - Continuity rule at day boundaries
///
/// # Returns
///
/// `ceil(values.len() / samples_per_day)` buckets numbered from 1.
///
/// # Errors
///
/// Returns an error if the stream is empty.
pub fn segment_days(
    values: &[f64],
    samples_per_day: usize,
    repeat_last_values: bool,
) -> Result<Vec<DayBucket>> {
    if values.is_empty() {
        return Err(SegmentError::EmptyStream);
    }
    debug_assert!(samples_per_day > 0, "day length must be positive");

    let num_buckets = (values.len() + samples_per_day - 1) / samples_per_day;
    let mut buckets = Vec::with_capacity(num_buckets);

    let mut carry: Option<f64> = None;
    for (idx, chunk) in values.chunks(samples_per_day).enumerate() {
        let mut bucket_values = Vec::with_capacity(chunk.len() + 1);
        if repeat_last_values {
            if let Some(link) = carry {
                bucket_values.push(link);
            }
        }
        bucket_values.extend_from_slice(chunk);

        carry = chunk.last().copied();
        buckets.push(DayBucket {
            day: idx + 1,
            values: bucket_values,
        });
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(interval_minutes: u32) -> SamplingSpec {
        SamplingSpec {
            interval_minutes,
            unit: "°C".to_string(),
        }
    }

    fn sequence(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn test_samples_per_day_exact_division() {
        assert_eq!(samples_per_day(&spec(60)).unwrap(), 24);
        assert_eq!(samples_per_day(&spec(30)).unwrap(), 48);
        assert_eq!(samples_per_day(&spec(1440)).unwrap(), 1);
    }

    #[test]
    fn test_samples_per_day_uneven_interval() {
        assert!(matches!(
            samples_per_day(&spec(7)).unwrap_err(),
            SegmentError::UnevenDayLength { interval_minutes: 7 }
        ));
    }

    #[test]
    fn test_samples_per_day_zero_interval() {
        assert!(matches!(
            samples_per_day(&spec(0)).unwrap_err(),
            SegmentError::UnevenDayLength { .. }
        ));
    }

    #[test]
    fn test_samples_per_day_interval_longer_than_day() {
        assert!(matches!(
            samples_per_day(&spec(2880)).unwrap_err(),
            SegmentError::UnevenDayLength { .. }
        ));
    }

    #[test]
    fn test_two_full_days_without_repeat() {
        let buckets = segment_days(&sequence(48), 24, false).unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].day, 1);
        assert_eq!(buckets[1].day, 2);
        assert_eq!(buckets[0].len(), 24);
        assert_eq!(buckets[1].len(), 24);
        // Day 2 starts with a genuinely new sample.
        assert_eq!(buckets[1].values[0], 24.0);
    }

    #[test]
    fn test_two_full_days_with_repeat() {
        let buckets = segment_days(&sequence(48), 24, true).unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].len(), 24);
        assert_eq!(buckets[1].len(), 25);
        // Continuity law: day 2 starts with day 1's last value.
        assert_eq!(buckets[1].values[0], buckets[0].values[23]);
        assert_eq!(buckets[1].values[1], 24.0);
    }

    #[test]
    fn test_repeat_does_not_change_day_one() {
        let plain = segment_days(&sequence(48), 24, false).unwrap();
        let repeated = segment_days(&sequence(48), 24, true).unwrap();

        assert_eq!(plain[0], repeated[0]);
    }

    #[test]
    fn test_continuity_threads_across_many_days() {
        let buckets = segment_days(&sequence(100), 10, true).unwrap();

        assert_eq!(buckets.len(), 10);
        for k in 1..buckets.len() {
            let prev_last = *buckets[k - 1].values.last().unwrap();
            assert_eq!(buckets[k].values[0], prev_last);
        }
    }

    #[test]
    fn test_bucket_count_is_ceiling() {
        for n in [1, 23, 24, 25, 47, 48, 49, 100] {
            let buckets = segment_days(&sequence(n), 24, false).unwrap();
            assert_eq!(buckets.len(), (n + 23) / 24, "n = {}", n);
            // Day numbers are 1..=count with no gaps.
            for (i, bucket) in buckets.iter().enumerate() {
                assert_eq!(bucket.day, i + 1);
            }
        }
    }

    #[test]
    fn test_partial_final_bucket() {
        let buckets = segment_days(&sequence(30), 24, false).unwrap();

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].len(), 24);
        assert_eq!(buckets[1].len(), 6);
    }

    #[test]
    fn test_partial_final_bucket_with_repeat() {
        let buckets = segment_days(&sequence(30), 24, true).unwrap();

        assert_eq!(buckets[1].len(), 7);
        assert_eq!(buckets[1].values[0], 23.0);
    }

    #[test]
    fn test_stream_shorter_than_one_day() {
        let buckets = segment_days(&sequence(5), 24, true).unwrap();

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].day, 1);
        assert_eq!(buckets[0].len(), 5);
    }

    #[test]
    fn test_exact_multiple_has_no_partial_tail() {
        let buckets = segment_days(&sequence(72), 24, false).unwrap();

        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|b| b.len() == 24));
    }

    #[test]
    fn test_empty_stream_is_an_error() {
        assert!(matches!(
            segment_days(&[], 24, false).unwrap_err(),
            SegmentError::EmptyStream
        ));
    }
}
