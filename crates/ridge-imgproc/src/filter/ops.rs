use ridge_image::Raster;

use super::kernels;
use crate::error::ProcessingError;
use crate::parallel::{par_iter_pixels, ExecutionStrategy};

/// Blur a raster with a 2D gaussian, wrapping around the borders.
///
/// Every channel is smoothed independently with the unnormalized kernel from
/// [`kernels::gaussian_kernel_2d`], so a flat raster keeps roughly, but not
/// exactly, its value.
///
/// # Arguments
///
/// * `src` - The source raster with shape (H, W, C).
/// * `sigma` - The scale of the gaussian.
/// * `strategy` - The execution strategy.
pub fn gaussian_blur_wrap_with_strategy(
    src: &Raster,
    sigma: f32,
    strategy: ExecutionStrategy,
) -> Result<Raster, ProcessingError> {
    let (support, kernel) = kernels::gaussian_kernel_2d(sigma)?;
    let support = support as isize;
    let side = 2 * support + 1;
    let depth = src.num_channels();

    let pixels = par_iter_pixels(strategy, src.size(), |row, col| {
        let (y, x) = (row as isize, col as isize);
        let mut acc = vec![0.0f32; depth];
        for j in -support..=support {
            for i in -support..=support {
                let k = kernel[((j + support) * side + i + support) as usize];
                for (ch, a) in acc.iter_mut().enumerate() {
                    *a += k * src.get_wrapped(y + j, x + i, ch);
                }
            }
        }
        acc
    })?;

    Ok(Raster::new(src.size(), depth, pixels.concat())?)
}

/// Blur a raster with a 2D gaussian, wrapping around the borders.
///
/// Uses [`ExecutionStrategy::default`]. See [`gaussian_blur_wrap_with_strategy`].
///
/// # Example
///
/// ```
/// use ridge_image::Raster;
/// use ridge_imgproc::filter::gaussian_blur_wrap;
///
/// let src = Raster::from_size_val([8, 8].into(), 3, 1.0).unwrap();
/// let blurred = gaussian_blur_wrap(&src, 1.0).unwrap();
/// assert_eq!(blurred.num_channels(), 3);
/// ```
pub fn gaussian_blur_wrap(src: &Raster, sigma: f32) -> Result<Raster, ProcessingError> {
    gaussian_blur_wrap_with_strategy(src, sigma, ExecutionStrategy::default())
}
