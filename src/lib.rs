//! Parallel bitonic sort.
//!
//! The sort is a data-independent compare-exchange network: a splitter that
//! sorts the two halves of a range in opposite directions (concurrently) and a
//! merger that turns the resulting bitonic range into a sorted one. Lengths
//! must be powers of two.
//!
//! ```
//! let mut data = [3, 6, 5, 7, 4, 1, 8, 2];
//! bitonic::sort(&mut data, 4).unwrap();
//! assert_eq!(data, [1, 2, 3, 4, 5, 6, 7, 8]);
//! ```

pub mod display;
pub mod driver;
pub mod error;
pub mod generator;
pub mod harness;
pub mod network;
pub mod verify;

pub use driver::{Sorter, SorterBuilder, available_parallelism, sort};
pub use error::SortError;
pub use network::{DEFAULT_SEQUENTIAL_CUTOFF, Direction, merge, split};

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::verify::{is_sorted, same_multiset};

    fn pow2_prefix(mut xs: Vec<i32>) -> Vec<i32> {
        if xs.is_empty() {
            xs.push(0);
        }
        let len = 1 << xs.len().ilog2();
        xs.truncate(len);
        xs
    }

    fn sort_with(xs: &[i32], parallelism: usize, cutoff: usize) -> Vec<i32> {
        let sorter = Sorter::builder()
            .parallelism(parallelism)
            .sequential_cutoff(cutoff)
            .build()
            .unwrap();
        let mut sorted = xs.to_vec();
        sorter.sort(&mut sorted).unwrap();
        sorted
    }

    quickcheck! {
        fn sorted_permutation(xs: Vec<i32>) -> bool {
            let xs = pow2_prefix(xs);
            let sorted = sort_with(&xs, 2, 2);
            is_sorted(&sorted) && same_multiset(&xs, &sorted)
        }

        fn idempotent(xs: Vec<i32>) -> bool {
            let xs = pow2_prefix(xs);
            let once = sort_with(&xs, 2, 2);
            let twice = sort_with(&once, 2, 2);
            once == twice
        }

        fn matches_std(xs: Vec<i32>) -> bool {
            let xs = pow2_prefix(xs);
            let mut expected = xs.clone();
            expected.sort_unstable();
            sort_with(&xs, 3, 1) == expected
        }
    }

    #[test]
    fn parallelism_does_not_change_the_output() {
        let data = generator::random_sequence_seeded(1 << 14, 42);
        let reference = sort_with(&data, 1, 256);
        let mut p = 2;
        while p <= available_parallelism().max(4) {
            assert_eq!(sort_with(&data, p, 256), reference, "parallelism={}", p);
            p *= 2;
        }
    }

    #[test]
    fn large_input_with_default_cutoff() {
        let data = generator::random_sequence_seeded(1 << 16, 1);
        let mut sorted = data.clone();
        sort(&mut sorted, available_parallelism()).unwrap();
        assert!(is_sorted(&sorted));
        assert!(same_multiset(&data, &sorted));
    }

    #[test]
    fn duplicates_and_extremes() {
        let mut data = vec![i32::MAX, 0, i32::MIN, 0, 5, 5, -1, i32::MAX];
        sort(&mut data, 2).unwrap();
        assert_eq!(data, [i32::MIN, -1, 0, 0, 5, 5, i32::MAX, i32::MAX]);
    }

    #[test]
    fn non_integer_elements() {
        let mut words = vec!["pear", "fig", "apple", "kiwi"];
        sort(&mut words, 2).unwrap();
        assert_eq!(words, ["apple", "fig", "kiwi", "pear"]);
    }
}
