//! Wall-clock timing of sorts under varying `(n, p)`.

use std::fmt;
use std::time::{Duration, Instant};

use log::debug;
use rayon::ThreadPoolBuilder;
use rayon::slice::ParallelSliceMut;
use thiserror::Error;
use voracious_radix_sort::RadixSort;

use crate::driver::Sorter;
use crate::error::SortError;
use crate::generator::random_sequence;
use crate::network::check_range;
use crate::verify::{is_sorted, same_multiset};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Sort(#[from] SortError),
    #[error("(n,p) = ({n},{parallelism}) produced output that is not a sorted permutation of its input")]
    Verification { n: usize, parallelism: usize },
    #[error("{name} left its input unsorted")]
    BaselineUnsorted { name: &'static str },
}

/// One timed sort.
#[derive(Clone, Copy, Debug)]
pub struct Measurement {
    pub n: usize,
    pub parallelism: usize,
    pub duration: Duration,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(n,p) = ({},{}) took {} seconds.",
            self.n,
            self.parallelism,
            self.duration.as_secs_f64()
        )
    }
}

/// Generates `n` random elements and times a single sort of them with
/// `parallelism` workers. Pool construction and data generation are not
/// timed; the output is verified afterwards.
pub fn time_sort(
    n: usize,
    parallelism: usize,
    cutoff: usize,
    rng: &mut fastrand::Rng,
) -> Result<Measurement, HarnessError> {
    check_range(n, 0, n)?;
    let sorter = Sorter::builder()
        .parallelism(parallelism)
        .sequential_cutoff(cutoff)
        .build()?;
    let orig = random_sequence(n, rng);
    let mut data = orig.clone();

    let start = Instant::now();
    sorter.sort(&mut data)?;
    let duration = start.elapsed();

    if !is_sorted(&data) || !same_multiset(&orig, &data) {
        return Err(HarnessError::Verification { n, parallelism });
    }
    let m = Measurement {
        n,
        parallelism,
        duration,
    };
    debug!("{}", m);
    Ok(m)
}

/// `1, 2, 4, ...` up to and including `max` (if it is a power of two).
fn doubling(max: usize) -> impl Iterator<Item = usize> {
    std::iter::successors(Some(1usize), |p| p.checked_mul(2)).take_while(move |&p| p <= max)
}

/// Fixed work per worker: `n = base * p` for `p = 1, 2, 4, ..., max_parallelism`.
pub fn weak_scaling(
    base: usize,
    max_parallelism: usize,
    cutoff: usize,
    rng: &mut fastrand::Rng,
) -> Result<Vec<Measurement>, HarnessError> {
    doubling(max_parallelism)
        .map(|p| time_sort(base.saturating_mul(p), p, cutoff, rng))
        .collect()
}

/// Fixed total work `n` for `p = 1, 2, 4, ..., max_parallelism`. Each run
/// sorts freshly generated data.
pub fn strong_scaling(
    n: usize,
    max_parallelism: usize,
    cutoff: usize,
    rng: &mut fastrand::Rng,
) -> Result<Vec<Measurement>, HarnessError> {
    doubling(max_parallelism)
        .map(|p| time_sort(n, p, cutoff, rng))
        .collect()
}

/// Average time of a named sort over several runs.
#[derive(Clone, Debug)]
pub struct BaselineTiming {
    pub name: &'static str,
    pub duration: Duration,
}

impl fmt::Display for BaselineTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.name, human_time(1, self.duration))
    }
}

fn benchmark(
    name: &'static str,
    orig: &[i32],
    repeats: usize,
    mut f: impl FnMut(&mut [i32]) -> Result<(), HarnessError>,
) -> Result<BaselineTiming, HarnessError> {
    // Warmup.
    let mut data = orig.to_vec();
    f(&mut data)?;
    if !is_sorted(&data) {
        return Err(HarnessError::BaselineUnsorted { name });
    }

    let mut total = Duration::ZERO;
    for _ in 0..repeats {
        data.copy_from_slice(orig);
        let start = Instant::now();
        f(&mut data)?;
        total += start.elapsed();
    }
    Ok(BaselineTiming {
        name,
        duration: total / repeats.max(1) as u32,
    })
}

/// Times the bitonic sort against other sorts on the same random data.
pub fn compare_baselines(
    n: usize,
    parallelism: usize,
    cutoff: usize,
    repeats: usize,
    rng: &mut fastrand::Rng,
) -> Result<Vec<BaselineTiming>, HarnessError> {
    let sorter = Sorter::builder()
        .parallelism(parallelism)
        .sequential_cutoff(cutoff)
        .build()?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(parallelism)
        .build()
        .map_err(SortError::from)?;
    check_range(n, 0, n)?;
    let orig = random_sequence(n, rng);

    let mut timings = Vec::with_capacity(4);
    timings.push(benchmark("bitonic", &orig, repeats, |d| {
        sorter.sort(d).map_err(HarnessError::from)
    })?);
    timings.push(benchmark("sort_unstable", &orig, repeats, |d| {
        d.sort_unstable();
        Ok(())
    })?);
    timings.push(benchmark("rayon par_sort_unstable", &orig, repeats, |d| {
        pool.install(|| d.par_sort_unstable());
        Ok(())
    })?);
    timings.push(benchmark("voracious_mt_sort", &orig, repeats, |d| {
        d.voracious_mt_sort(parallelism);
        Ok(())
    })?);
    Ok(timings)
}

pub fn human_time(repeats: usize, duration: Duration) -> String {
    let mut duration = duration.as_nanos() as f64 / repeats as f64;
    if duration < 1000.0 {
        return format!("{:.1}ns", duration);
    }
    duration /= 1000.0;
    if duration < 1000.0 {
        return format!("{:.1}us", duration);
    }
    duration /= 1000.0;
    if duration < 1000.0 {
        return format!("{:.1}ms", duration);
    }
    duration /= 1000.0;
    format!("{:.1}s", duration)
}

pub fn human_size(size: usize) -> String {
    if size < 1024 {
        return format!("{}B", size);
    }
    let mut size = size as f64;
    size /= 1024.0;
    if size < 1024.0 {
        return format!("{}KiB", size);
    }
    size /= 1024.0;
    if size < 1024.0 {
        return format!("{}MiB", size);
    }
    size /= 1024.0;
    format!("{}GiB", size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measurement_report_line() {
        let m = Measurement {
            n: 8192,
            parallelism: 4,
            duration: Duration::from_millis(1500),
        };
        assert_eq!(m.to_string(), "(n,p) = (8192,4) took 1.5 seconds.");
    }

    #[test]
    fn doubling_steps() {
        assert_eq!(doubling(32).collect::<Vec<_>>(), [1, 2, 4, 8, 16, 32]);
        assert_eq!(doubling(5).collect::<Vec<_>>(), [1, 2, 4]);
        assert_eq!(doubling(0).count(), 0);
    }

    #[test]
    fn weak_scaling_grows_n_with_p() {
        let mut rng = fastrand::Rng::with_seed(5);
        let runs = weak_scaling(256, 4, 32, &mut rng).unwrap();
        let shape: Vec<_> = runs.iter().map(|m| (m.n, m.parallelism)).collect();
        assert_eq!(shape, [(256, 1), (512, 2), (1024, 4)]);
    }

    #[test]
    fn strong_scaling_keeps_n() {
        let mut rng = fastrand::Rng::with_seed(6);
        let runs = strong_scaling(1024, 8, 32, &mut rng).unwrap();
        assert_eq!(runs.len(), 4);
        assert!(runs.iter().all(|m| m.n == 1024));
    }

    #[test]
    fn time_sort_rejects_bad_length() {
        let mut rng = fastrand::Rng::with_seed(0);
        assert!(matches!(
            time_sort(1000, 2, 32, &mut rng),
            Err(HarnessError::Sort(SortError::NotPowerOfTwo { len: 1000 }))
        ));
    }

    #[test]
    fn baselines_all_run() {
        let mut rng = fastrand::Rng::with_seed(8);
        let timings = compare_baselines(1 << 10, 2, 64, 2, &mut rng).unwrap();
        let names: Vec<_> = timings.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            ["bitonic", "sort_unstable", "rayon par_sort_unstable", "voracious_mt_sort"]
        );
    }

    #[test]
    fn human_units() {
        assert_eq!(human_time(1, Duration::from_nanos(500)), "500.0ns");
        assert_eq!(human_time(2, Duration::from_millis(3)), "1.5ms");
        assert_eq!(human_size(512), "512B");
        assert_eq!(human_size(4 << 20), "4MiB");
    }
}
