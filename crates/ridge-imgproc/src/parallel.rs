use rayon::prelude::*;
use thiserror::Error;

use ridge_image::RasterSize;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how per-pixel stages are executed.
///
/// Every strategy produces the same output: each pixel is computed from the
/// input alone, in a fixed accumulation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool and process rows in parallel.
    #[default]
    Parallel,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small rasters, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    Fixed(usize),
}

/// Evaluate `f(row, col)` for every pixel of a raster of the given size.
///
/// The results are returned row-major regardless of the strategy.
pub fn par_iter_pixels<T, F>(
    strategy: ExecutionStrategy,
    size: RasterSize,
    f: F,
) -> Result<Vec<T>, ParallelError>
where
    T: Clone + Default + Send,
    F: Fn(usize, usize) -> T + Send + Sync,
{
    let mut out = vec![T::default(); size.width * size.height];
    let cols = size.width.max(1);

    let fill_row = |(row, row_out): (usize, &mut [T])| {
        row_out
            .iter_mut()
            .enumerate()
            .for_each(|(col, px)| *px = f(row, col));
    };

    match strategy {
        ExecutionStrategy::Serial => {
            out.chunks_mut(cols).enumerate().for_each(fill_row);
        }
        ExecutionStrategy::Parallel => {
            out.par_chunks_mut(cols).enumerate().for_each(fill_row);
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                out.par_chunks_mut(cols).enumerate().for_each(fill_row);
            });
        }
    }

    Ok(out)
}
