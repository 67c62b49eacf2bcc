//! The bitonic split/merge network.
//!
//! Both recursions only ever hand disjoint halves (via `split_at_mut`) to
//! concurrent tasks, so no two active tasks can touch the same index.

use std::ops::Range;

use rayon::prelude::*;

use crate::error::SortError;

/// Ranges at or below this length are processed without spawning tasks.
pub const DEFAULT_SEQUENTIAL_CUTOFF: usize = 4096;

/// Order a range must end up in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Whether `low` (from the lower half) and `high` (from the upper half)
    /// have to be swapped for this direction.
    #[inline(always)]
    fn out_of_order<T: Ord>(self, low: &T, high: &T) -> bool {
        match self {
            Self::Ascending => low > high,
            Self::Descending => low < high,
        }
    }
}

/// Validates a `(start, length)` range descriptor against a sequence of
/// `bound` elements.
pub(crate) fn check_range(bound: usize, start: usize, len: usize) -> Result<Range<usize>, SortError> {
    if !len.is_power_of_two() {
        return Err(SortError::NotPowerOfTwo { len });
    }
    match start.checked_add(len) {
        Some(end) if end <= bound => Ok(start..end),
        _ => Err(SortError::OutOfBounds { start, len, bound }),
    }
}

/// Sorts `sequence[start..start + length]` into `direction` order.
///
/// Runs on whatever rayon pool is current; see [`crate::Sorter`] for an
/// explicitly sized pool.
pub fn split<T: Ord + Send>(
    sequence: &mut [T],
    start: usize,
    length: usize,
    direction: Direction,
) -> Result<(), SortError> {
    let range = check_range(sequence.len(), start, length)?;
    split_slice(&mut sequence[range], direction, DEFAULT_SEQUENTIAL_CUTOFF);
    Ok(())
}

/// Merges the bitonic range `sequence[start..start + length]` into
/// `direction` order.
///
/// The range must consist of two halves sorted in opposite directions. The
/// result is unspecified (but still a permutation) when it is not.
pub fn merge<T: Ord + Send>(
    sequence: &mut [T],
    start: usize,
    length: usize,
    direction: Direction,
) -> Result<(), SortError> {
    let range = check_range(sequence.len(), start, length)?;
    merge_slice(&mut sequence[range], direction, DEFAULT_SEQUENTIAL_CUTOFF);
    Ok(())
}

/// `data.len()` must be a power of two.
pub(crate) fn split_slice<T: Ord + Send>(data: &mut [T], direction: Direction, cutoff: usize) {
    let len = data.len();
    if len <= 1 {
        return;
    }
    debug_assert!(len.is_power_of_two());

    let (low, high) = data.split_at_mut(len / 2);
    if len > cutoff {
        rayon::join(
            || split_slice(low, Direction::Ascending, cutoff),
            || split_slice(high, Direction::Descending, cutoff),
        );
    } else {
        split_slice(low, Direction::Ascending, cutoff);
        split_slice(high, Direction::Descending, cutoff);
    }
    // Both halves are done here, so `data` is bitonic.
    merge_slice(data, direction, cutoff);
}

/// `data.len()` must be a power of two and `data` must be bitonic.
pub(crate) fn merge_slice<T: Ord + Send>(data: &mut [T], direction: Direction, cutoff: usize) {
    let len = data.len();
    if len <= 1 {
        return;
    }

    let (low, high) = data.split_at_mut(len / 2);
    compare_exchange(low, high, direction, cutoff);
    // Every element of `low` is now on the correct side of every element of
    // `high`, and both halves are bitonic again.
    if len > cutoff {
        rayon::join(
            || merge_slice(low, direction, cutoff),
            || merge_slice(high, direction, cutoff),
        );
    } else {
        merge_slice(low, direction, cutoff);
        merge_slice(high, direction, cutoff);
    }
}

fn compare_exchange<T: Ord + Send>(low: &mut [T], high: &mut [T], direction: Direction, cutoff: usize) {
    if low.len() > cutoff {
        low.par_chunks_mut(cutoff)
            .zip(high.par_chunks_mut(cutoff))
            .for_each(|(low, high)| compare_exchange_serial(low, high, direction));
    } else {
        compare_exchange_serial(low, high, direction);
    }
}

#[inline]
fn compare_exchange_serial<T: Ord>(low: &mut [T], high: &mut [T], direction: Direction) {
    for (a, b) in low.iter_mut().zip(high) {
        if direction.out_of_order(a, b) {
            std::mem::swap(a, b);
        }
    }
}
