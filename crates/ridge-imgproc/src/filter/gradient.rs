use ridge_image::Raster;

use super::kernels::{self, Kernel1d};
use crate::error::{ensure_channels, ProcessingError};
use crate::normalize::relativize;
use crate::parallel::{par_iter_pixels, ExecutionStrategy};

/// The gaussian gradient of a single channel raster.
///
/// All four rasters are single channel and share the extents of the source.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    /// Partial derivative with respect to x (columns).
    pub dx: Raster,
    /// Partial derivative with respect to y (rows).
    pub dy: Raster,
    /// Gradient magnitude `sqrt(dx² + dy²)`.
    pub magnitude: Raster,
    /// Gradient direction in degrees, in `(-90, 90]`.
    pub direction: Raster,
}

/// Gradient direction in degrees for the partial derivatives `dx` and `dy`.
///
/// A zero `dx` maps to exactly 90 degrees, otherwise `atan(dy / dx)`.
#[inline]
pub fn gradient_direction(dx: f32, dy: f32) -> f32 {
    if dx == 0.0 {
        90.0
    } else {
        (dy / dx).atan().to_degrees()
    }
}

/// Convolve a single channel raster with two 2D kernels built as outer products.
///
/// For every pixel the full `(2s+1)²` window is scanned once, sampling with
/// wrap-around borders, and two sums are accumulated:
///
/// ```text
/// first  = Σ_j Σ_i src(y+j, x+i) * kernel_x[i] * kernel_y[j]
/// second = Σ_j Σ_i src(y+j, x+i) * kernel_y[i] * kernel_x[j]
/// ```
///
/// i.e. `first` applies `kernel_x` along the columns and `kernel_y` along the
/// rows, and `second` swaps them.
///
/// # Arguments
///
/// * `src` - The source raster with shape (H, W, 1).
/// * `kernel_x` - The kernel applied along the columns for the first output.
/// * `kernel_y` - The kernel applied along the rows for the first output.
/// * `strategy` - The execution strategy.
///
/// PRECONDITION: both kernels have the same support.
pub fn separable_gradient(
    src: &Raster,
    kernel_x: &Kernel1d,
    kernel_y: &Kernel1d,
    strategy: ExecutionStrategy,
) -> Result<(Raster, Raster), ProcessingError> {
    ensure_channels(src, 1)?;

    let support = kernel_x.support().min(kernel_y.support()) as isize;

    let sums = par_iter_pixels(strategy, src.size(), |row, col| {
        let (y, x) = (row as isize, col as isize);
        let mut first = 0.0f32;
        let mut second = 0.0f32;
        for i in -support..=support {
            for j in -support..=support {
                let v = src.get_wrapped(y + j, x + i, 0);
                first += v * kernel_x.at(i) * kernel_y.at(j);
                second += v * kernel_y.at(i) * kernel_x.at(j);
            }
        }
        (first, second)
    })?;

    let (first, second): (Vec<f32>, Vec<f32>) = sums.into_iter().unzip();
    Ok((
        Raster::new(src.size(), 1, first)?,
        Raster::new(src.size(), 1, second)?,
    ))
}

/// Compute the gaussian partial derivatives and the gradient direction.
///
/// # Arguments
///
/// * `src` - The source intensity raster with shape (H, W, 1).
/// * `sigma` - The scale of the gaussian.
/// * `strategy` - The execution strategy.
///
/// # Returns
///
/// The rasters `(dx, dy, direction)`, direction in degrees.
///
/// # Errors
///
/// Returns [`ProcessingError::InvalidSigma`] for a non-positive scale and
/// [`ProcessingError::InvalidChannelCount`] if `src` is not single channel.
pub fn separate_gradient_with_strategy(
    src: &Raster,
    sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<(Raster, Raster, Raster), ProcessingError> {
    let smooth = kernels::gaussian_kernel_1d(sigma)?;
    let deriv = kernels::gaussian_derivative_kernel_1d(sigma)?;

    log::debug!(
        "gaussian gradient: sigma {sigma}, support {}, raster {}",
        smooth.support(),
        src.size()
    );

    // x derivative: derivative kernel along columns, smoothing along rows.
    let (dx, dy) = separable_gradient(src, &deriv, &smooth, strategy)?;

    let direction = dx
        .as_slice()
        .iter()
        .zip(dy.as_slice())
        .map(|(&gx, &gy)| gradient_direction(gx, gy))
        .collect();
    let direction = Raster::new(src.size(), 1, direction)?;

    Ok((dx, dy, direction))
}

/// Compute the gaussian partial derivatives and the gradient direction.
///
/// Uses [`ExecutionStrategy::default`]. See [`separate_gradient_with_strategy`].
pub fn separate_gradient(
    src: &Raster,
    sigma: f32,
) -> Result<(Raster, Raster, Raster), ProcessingError> {
    separate_gradient_with_strategy(src, sigma, ExecutionStrategy::default())
}

/// Compute the full gaussian gradient field of an intensity raster.
///
/// # Arguments
///
/// * `src` - The source intensity raster with shape (H, W, 1).
/// * `sigma` - The scale of the gaussian.
/// * `strategy` - The execution strategy.
pub fn spatial_gradient_gaussian_with_strategy(
    src: &Raster,
    sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<GradientField, ProcessingError> {
    let (dx, dy, direction) = separate_gradient_with_strategy(src, sigma, strategy)?;

    let magnitude = dx
        .as_slice()
        .iter()
        .zip(dy.as_slice())
        .map(|(&gx, &gy)| (gx * gx + gy * gy).sqrt())
        .collect();
    let magnitude = Raster::new(src.size(), 1, magnitude)?;

    Ok(GradientField {
        dx,
        dy,
        magnitude,
        direction,
    })
}

/// Compute the full gaussian gradient field of an intensity raster.
///
/// Uses [`ExecutionStrategy::default`].
///
/// # Example
///
/// ```
/// use ridge_image::Raster;
/// use ridge_imgproc::filter::spatial_gradient_gaussian;
///
/// let flat = Raster::from_size_val([5, 5].into(), 1, 0.5).unwrap();
/// let field = spatial_gradient_gaussian(&flat, 1.0).unwrap();
/// assert!(field.magnitude.as_slice().iter().all(|m| m.abs() < 1e-6));
/// ```
pub fn spatial_gradient_gaussian(
    src: &Raster,
    sigma: f32,
) -> Result<GradientField, ProcessingError> {
    spatial_gradient_gaussian_with_strategy(src, sigma, ExecutionStrategy::default())
}

/// The absolute partial derivatives, each scaled to `[0, 1]` by its own maximum.
///
/// Handy to inspect the two gradient components as images.
///
/// # Returns
///
/// The rasters `(|dx| / max|dx|, |dy| / max|dy|)`.
pub fn gradient_components_relative(
    field: &GradientField,
) -> Result<(Raster, Raster), ProcessingError> {
    let dx = relativize(&field.dx.map(f32::abs))?;
    let dy = relativize(&field.dy.map(f32::abs))?;
    Ok((dx, dy))
}
