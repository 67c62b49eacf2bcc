use std::ops::RangeInclusive;

/// Bounds of the values produced by the generator.
pub const VALUE_RANGE: RangeInclusive<i32> = -1_000_000..=1_000_000;

/// `n` integers drawn uniformly from [`VALUE_RANGE`].
pub fn random_sequence(n: usize, rng: &mut fastrand::Rng) -> Vec<i32> {
    let mut data = vec![0i32; n];
    for d in &mut data {
        *d = rng.i32(VALUE_RANGE);
    }
    data
}

pub fn random_sequence_seeded(n: usize, seed: u64) -> Vec<i32> {
    random_sequence(n, &mut fastrand::Rng::with_seed(seed))
}
