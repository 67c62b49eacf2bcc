use std::num::NonZeroUsize;

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::SortError;
use crate::network::{self, DEFAULT_SEQUENTIAL_CUTOFF, Direction};

/// Number of hardware threads, or 1 if that can't be determined.
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[derive(Clone, Debug)]
pub struct SorterBuilder {
    parallelism: usize,
    sequential_cutoff: usize,
}

impl Default for SorterBuilder {
    fn default() -> Self {
        Self {
            parallelism: available_parallelism(),
            sequential_cutoff: DEFAULT_SEQUENTIAL_CUTOFF,
        }
    }
}

impl SorterBuilder {
    /// Number of worker threads. More than the hardware offers is allowed.
    pub fn parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Ranges at or below this length run without spawning tasks.
    pub fn sequential_cutoff(mut self, cutoff: usize) -> Self {
        self.sequential_cutoff = cutoff;
        self
    }

    pub fn build(self) -> Result<Sorter, SortError> {
        if self.parallelism == 0 {
            return Err(SortError::InvalidParallelism);
        }
        if self.sequential_cutoff == 0 {
            return Err(SortError::InvalidCutoff);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.parallelism)
            .thread_name(|i| format!("bitonic-{}", i))
            .build()?;
        debug!(
            "built worker pool: {} threads, sequential cutoff {}",
            self.parallelism, self.sequential_cutoff
        );
        Ok(Sorter {
            pool,
            parallelism: self.parallelism,
            sequential_cutoff: self.sequential_cutoff,
        })
    }
}

/// A bitonic sorter bound to its own worker pool.
///
/// The pool is reused across calls, so constructing one `Sorter` per
/// configuration and sorting many sequences with it avoids paying for thread
/// startup on every sort.
pub struct Sorter {
    pool: ThreadPool,
    parallelism: usize,
    sequential_cutoff: usize,
}

impl Sorter {
    pub fn builder() -> SorterBuilder {
        SorterBuilder::default()
    }

    pub fn new(parallelism: usize) -> Result<Self, SortError> {
        Self::builder().parallelism(parallelism).build()
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    pub fn sequential_cutoff(&self) -> usize {
        self.sequential_cutoff
    }

    /// Sorts `sequence` ascending, in place. Blocks until every task is done.
    ///
    /// Fails without touching `sequence` if its length is not a nonzero power
    /// of two.
    pub fn sort<T: Ord + Send>(&self, sequence: &mut [T]) -> Result<(), SortError> {
        self.sort_range(sequence, 0, sequence.len(), Direction::Ascending)
    }

    /// Sorts `sequence[start..start + length]` into `direction` order on this
    /// sorter's pool.
    pub fn sort_range<T: Ord + Send>(
        &self,
        sequence: &mut [T],
        start: usize,
        length: usize,
        direction: Direction,
    ) -> Result<(), SortError> {
        let range = network::check_range(sequence.len(), start, length)?;
        debug!(
            "sorting {} elements {:?} with {} threads",
            length, direction, self.parallelism
        );
        let data = &mut sequence[range];
        let cutoff = self.sequential_cutoff;
        self.pool
            .install(|| network::split_slice(data, direction, cutoff));
        Ok(())
    }

    /// Merges the bitonic range `sequence[start..start + length]` into
    /// `direction` order on this sorter's pool.
    pub fn merge<T: Ord + Send>(
        &self,
        sequence: &mut [T],
        start: usize,
        length: usize,
        direction: Direction,
    ) -> Result<(), SortError> {
        let range = network::check_range(sequence.len(), start, length)?;
        let data = &mut sequence[range];
        let cutoff = self.sequential_cutoff;
        self.pool
            .install(|| network::merge_slice(data, direction, cutoff));
        Ok(())
    }
}

/// Sorts `sequence` ascending using a fresh pool of `parallelism` threads.
pub fn sort<T: Ord + Send>(sequence: &mut [T], parallelism: usize) -> Result<(), SortError> {
    // Validate before paying for a pool.
    network::check_range(sequence.len(), 0, sequence.len())?;
    Sorter::new(parallelism)?.sort(sequence)
}
