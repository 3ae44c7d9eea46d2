use ridge_image::Raster;

use crate::color::luminance_from_rgb_with_strategy;
use crate::error::{ensure_channels, ensure_same_size, ProcessingError};
use crate::filter::separate_gradient_with_strategy;
use crate::normalize::relativize_by;
use crate::parallel::{par_iter_pixels, ExecutionStrategy};

/// A pixel whose corner response exceeded the detection threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerCandidate {
    /// The smaller eigenvalue of the structure tensor at the pixel.
    pub score: f32,
    /// The row of the pixel.
    pub row: usize,
    /// The column of the pixel.
    pub col: usize,
}

/// Smaller eigenvalue of the symmetric matrix `[[a, b], [b, c]]`.
///
/// # Example
///
/// ```
/// use ridge_imgproc::corners::min_eigenvalue;
///
/// assert_eq!(min_eigenvalue(3.0, 0.0, 5.0), 3.0);
/// assert_eq!(min_eigenvalue(1.0, 1.0, 1.0), 0.0);
/// ```
#[inline]
pub fn min_eigenvalue(a: f32, b: f32, c: f32) -> f32 {
    let half_trace = 0.5 * (a + c);
    let half_diff = 0.5 * (a - c);
    half_trace - (half_diff * half_diff + b * b).sqrt()
}

/// Compute the smaller structure tensor eigenvalue at every pixel.
///
/// The tensor of pixel `(y, x)` sums `dx²`, `dx·dy` and `dy²` over the square
/// window `[-n, n]²` around it, sampling with wrap-around borders.
///
/// # Arguments
///
/// * `dx` - The x derivative with shape (H, W, 1).
/// * `dy` - The y derivative with shape (H, W, 1).
/// * `neighborhood_size` - The window radius `n`.
/// * `strategy` - The execution strategy.
pub fn corner_response_with_strategy(
    dx: &Raster,
    dy: &Raster,
    neighborhood_size: usize,
    strategy: ExecutionStrategy,
) -> Result<Raster, ProcessingError> {
    ensure_channels(dx, 1)?;
    ensure_channels(dy, 1)?;
    ensure_same_size(dx, dy)?;

    let n = neighborhood_size as isize;
    let response = par_iter_pixels(strategy, dx.size(), |row, col| {
        let (y, x) = (row as isize, col as isize);
        let (mut sxx, mut sxy, mut syy) = (0.0f32, 0.0f32, 0.0f32);
        for i in -n..=n {
            for j in -n..=n {
                let gx = dx.get_wrapped(y + j, x + i, 0);
                let gy = dy.get_wrapped(y + j, x + i, 0);
                sxx += gx * gx;
                sxy += gx * gy;
                syy += gy * gy;
            }
        }
        min_eigenvalue(sxx, sxy, syy)
    })?;

    Ok(Raster::new(dx.size(), 1, response)?)
}

/// Compute the smaller structure tensor eigenvalue at every pixel.
///
/// Uses [`ExecutionStrategy::default`]. See [`corner_response_with_strategy`].
pub fn corner_response(
    dx: &Raster,
    dy: &Raster,
    neighborhood_size: usize,
) -> Result<Raster, ProcessingError> {
    corner_response_with_strategy(dx, dy, neighborhood_size, ExecutionStrategy::default())
}

// Window cells on the first row or column are skipped, the window never wraps.
fn window_cells(
    row: usize,
    col: usize,
    n: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = usize> {
    let (y, x, n) = (row as isize, col as isize, n as isize);
    let (rows, cols) = (rows as isize, cols as isize);
    (-n..=n).flat_map(move |i| {
        (-n..=n).filter_map(move |j| {
            let (r, c) = (y + j, x + i);
            (r > 0 && r < rows && c > 0 && c < cols).then_some((r * cols + c) as usize)
        })
    })
}

/// Detect corners from the partial derivatives of an intensity raster.
///
/// Pixels whose response (see [`corner_response`]) is strictly above
/// `threshold` become candidates. Each candidate spreads its score over its
/// window, every cell keeping the largest score it received. Candidates are
/// then visited from the strongest to the weakest and clear the window cells
/// holding a smaller score. The map is finally divided by the strongest score.
///
/// Pixels are scanned column by column, which decides the order of equal scores.
/// A strongest score that is not positive, possible with a negative
/// `threshold`, yields an all-zero map.
///
/// # Arguments
///
/// * `dx` - The x derivative with shape (H, W, 1).
/// * `dy` - The y derivative with shape (H, W, 1).
/// * `threshold` - The response a pixel must exceed to be a candidate.
/// * `neighborhood_size` - The window radius.
/// * `strategy` - The execution strategy of the tensor accumulation.
///
/// # Errors
///
/// Returns [`ProcessingError::NoCornersFound`] if no pixel exceeds `threshold`.
pub fn detect_corners_with_strategy(
    dx: &Raster,
    dy: &Raster,
    threshold: f32,
    neighborhood_size: usize,
    strategy: ExecutionStrategy,
) -> Result<Raster, ProcessingError> {
    let response = corner_response_with_strategy(dx, dy, neighborhood_size, strategy)?;
    let (rows, cols) = (response.rows(), response.cols());
    let scores = response.as_slice();

    let mut spread = vec![0.0f32; scores.len()];
    let mut candidates = Vec::new();

    for col in 0..cols {
        for row in 0..rows {
            let score = scores[row * cols + col];
            if score <= threshold {
                continue;
            }
            candidates.push(CornerCandidate { score, row, col });
            for idx in window_cells(row, col, neighborhood_size, rows, cols) {
                if spread[idx] <= score {
                    spread[idx] = score;
                }
            }
        }
    }

    // stable, so equal scores keep the column-major scan order
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let Some(strongest) = candidates.first().map(|c| c.score) else {
        return Err(ProcessingError::NoCornersFound(threshold));
    };

    log::debug!(
        "corners: {} candidates above {threshold}, strongest {strongest}",
        candidates.len()
    );

    for candidate in &candidates {
        for idx in window_cells(candidate.row, candidate.col, neighborhood_size, rows, cols) {
            if spread[idx] < candidate.score {
                log::trace!(
                    "clearing {} at ({}, {}) below {} from ({}, {})",
                    spread[idx],
                    idx / cols,
                    idx % cols,
                    candidate.score,
                    candidate.row,
                    candidate.col
                );
                spread[idx] = 0.0;
            }
        }
    }

    relativize_by(&Raster::new(response.size(), 1, spread)?, strongest)
}

/// Detect corners from the partial derivatives of an intensity raster.
///
/// Uses [`ExecutionStrategy::default`]. See [`detect_corners_with_strategy`].
pub fn detect_corners(
    dx: &Raster,
    dy: &Raster,
    threshold: f32,
    neighborhood_size: usize,
) -> Result<Raster, ProcessingError> {
    detect_corners_with_strategy(
        dx,
        dy,
        threshold,
        neighborhood_size,
        ExecutionStrategy::default(),
    )
}

/// Parameters of the structure tensor corner detector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CornerConfig {
    /// Scale of the gaussian gradient.
    pub sigma: f32,
    /// Response a pixel must exceed to be a corner.
    pub threshold: f32,
    /// Radius of the structure tensor window.
    pub neighborhood_size: usize,
    /// Execution strategy of the per-pixel stages.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub strategy: ExecutionStrategy,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            threshold: 0.1,
            neighborhood_size: 4,
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl CornerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gaussian scale.
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the detection threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the window radius.
    pub fn with_neighborhood_size(mut self, neighborhood_size: usize) -> Self {
        self.neighborhood_size = neighborhood_size;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Detect corners in an RGB raster.
///
/// The raster is reduced to luminance and differentiated at `config.sigma`
/// before running [`detect_corners_with_strategy`].
///
/// # Returns
///
/// A single channel corner map with values in `[0, 1]`.
pub fn corners(src: &Raster, config: &CornerConfig) -> Result<Raster, ProcessingError> {
    let gray = luminance_from_rgb_with_strategy(src, config.strategy)?;
    let (dx, dy, _) = separate_gradient_with_strategy(&gray, config.sigma, config.strategy)?;
    detect_corners_with_strategy(
        &dx,
        &dy,
        config.threshold,
        config.neighborhood_size,
        config.strategy,
    )
}
