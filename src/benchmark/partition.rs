//! Static workload partitioning
//!
//! Splits a buffer of `len` elements into `workers` contiguous,
//! non-overlapping ranges whose union is exactly `[0, len)`.

use std::ops::Range;

use crate::utils::{PartitionError, Result};

/// Partition `[0, len)` into `workers` contiguous disjoint ranges.
///
/// Each worker gets `len / workers` elements; the final range absorbs the
/// remainder, so no trailing element is ever dropped. When `workers > len`
/// the leading ranges are empty and the final range covers the whole buffer.
///
/// Fails fast on `workers == 0` before any division takes place.
pub fn partition(len: usize, workers: usize) -> Result<Vec<Range<usize>>> {
    if workers == 0 {
        return Err(PartitionError::ZeroWorkers.into());
    }

    let chunk = len / workers;
    let mut ranges = Vec::with_capacity(workers);

    for i in 0..workers {
        let start = i * chunk;
        let end = if i == workers - 1 { len } else { start + chunk };
        ranges.push(start..end);
    }

    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_cover(len: usize, ranges: &[Range<usize>]) {
        let mut next = 0;
        for range in ranges {
            assert_eq!(range.start, next, "ranges must be contiguous");
            assert!(range.end >= range.start);
            next = range.end;
        }
        assert_eq!(next, len, "ranges must cover the whole buffer");
    }

    #[test]
    fn test_zero_workers_fails_fast() {
        assert!(partition(100, 0).is_err());
    }

    #[test]
    fn test_even_split() {
        let ranges = partition(1_000_000, 4).unwrap();
        assert_eq!(
            ranges,
            vec![0..250_000, 250_000..500_000, 500_000..750_000, 750_000..1_000_000]
        );
    }

    #[test]
    fn test_remainder_goes_to_last_chunk() {
        let ranges = partition(10, 3).unwrap();
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
        assert_exact_cover(10, &ranges);
    }

    #[test]
    fn test_single_worker() {
        let ranges = partition(1234, 1).unwrap();
        assert_eq!(ranges, vec![0..1234]);
    }

    #[test]
    fn test_more_workers_than_elements() {
        let ranges = partition(3, 8).unwrap();
        assert_eq!(ranges.len(), 8);
        assert_exact_cover(3, &ranges);
        // Leading chunks are empty, the last covers everything
        assert!(ranges[..7].iter().all(|r| r.is_empty()));
        assert_eq!(ranges[7], 0..3);
    }

    #[test]
    fn test_exact_cover_sweep() {
        for len in [0, 1, 7, 100, 1001] {
            for workers in 1..=9 {
                let ranges = partition(len, workers).unwrap();
                assert_eq!(ranges.len(), workers);
                assert_exact_cover(len, &ranges);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(partition(999, 7).unwrap(), partition(999, 7).unwrap());
    }
}
