use std::collections::HashMap;
use std::hash::Hash;

use foldhash::fast::RandomState as FoldRandomState;

pub fn is_sorted<T: Ord>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

/// Whether `a` and `b` hold the same elements with the same multiplicities.
pub fn same_multiset<T: Hash + Eq>(a: &[T], b: &[T]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut counts: HashMap<&T, isize, FoldRandomState> =
        HashMap::with_capacity_and_hasher(a.len(), FoldRandomState::default());
    for x in a {
        *counts.entry(x).or_insert(0) += 1;
    }
    for x in b {
        match counts.get_mut(x) {
            Some(c) if *c > 0 => *c -= 1,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sortedness() {
        assert!(is_sorted::<i32>(&[]));
        assert!(is_sorted(&[1]));
        assert!(is_sorted(&[1, 1, 2, 5]));
        assert!(!is_sorted(&[2, 1]));
    }

    #[test]
    fn multisets() {
        assert!(same_multiset(&[3, 1, 2, 1], &[1, 1, 2, 3]));
        assert!(!same_multiset(&[3, 1, 2, 1], &[1, 2, 2, 3]));
        assert!(!same_multiset(&[1, 2], &[1, 2, 3]));
        assert!(same_multiset::<i32>(&[], &[]));
    }
}
