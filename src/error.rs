use thiserror::Error;

/// Contract violations detected before a sort touches any element.
#[derive(Debug, Error)]
pub enum SortError {
    #[error("length must be a nonzero power of two, got {len}")]
    NotPowerOfTwo { len: usize },
    #[error("range [{start}, {start}+{len}) exceeds sequence of length {bound}")]
    OutOfBounds { start: usize, len: usize, bound: usize },
    #[error("parallelism must be at least 1")]
    InvalidParallelism,
    #[error("sequential cutoff must be at least 1")]
    InvalidCutoff,
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
