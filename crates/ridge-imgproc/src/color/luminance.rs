use ridge_image::Raster;

use crate::error::ProcessingError;
use crate::parallel::{par_iter_pixels, ExecutionStrategy};

/// Define the RGB weights for the luminance reduction.
const RW: f32 = 0.3;
const GW: f32 = 0.6;
const BW: f32 = 0.1;

/// Reduce an RGB raster to a single luminance channel using the formula:
///
/// Y = 0.3 * R + 0.6 * G + 0.1 * B
///
/// # Arguments
///
/// * `src` - The input raster, channels ordered red, green, blue. Extra channels are ignored.
/// * `strategy` - The execution strategy.
///
/// # Errors
///
/// Returns [`ProcessingError::InvalidChannelCount`] if `src` has fewer than 3 channels.
pub fn luminance_from_rgb_with_strategy(
    src: &Raster,
    strategy: ExecutionStrategy,
) -> Result<Raster, ProcessingError> {
    let depth = src.num_channels();
    if depth < 3 {
        return Err(ProcessingError::InvalidChannelCount {
            expected: 3,
            found: depth,
        });
    }

    let data = src.as_slice();
    let cols = src.cols();
    let luminance = par_iter_pixels(strategy, src.size(), |row, col| {
        let px = &data[(row * cols + col) * depth..];
        RW * px[0] + GW * px[1] + BW * px[2]
    })?;

    Ok(Raster::new(src.size(), 1, luminance)?)
}

/// Reduce an RGB raster to a single luminance channel.
///
/// Uses [`ExecutionStrategy::default`]. See [`luminance_from_rgb_with_strategy`].
///
/// # Example
///
/// ```
/// use ridge_image::Raster;
/// use ridge_imgproc::color::luminance_from_rgb;
///
/// let rgb = Raster::from_size_val([4, 5].into(), 3, 0.0).unwrap();
/// let gray = luminance_from_rgb(&rgb).unwrap();
///
/// assert_eq!(gray.num_channels(), 1);
/// assert_eq!(gray.size().width, 4);
/// assert_eq!(gray.size().height, 5);
/// ```
pub fn luminance_from_rgb(src: &Raster) -> Result<Raster, ProcessingError> {
    luminance_from_rgb_with_strategy(src, ExecutionStrategy::default())
}
