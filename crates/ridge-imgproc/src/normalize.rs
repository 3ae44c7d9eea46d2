//! Scaling of rasters relative to their own maximum.
//!
//! Edge and corner strengths only mean something relative to the strongest
//! response in the same raster, so both detectors rescale their maps with
//! [`relativize`] before thresholding or returning them.

use ridge_image::Raster;

use crate::error::ProcessingError;

/// Divide every sample of a raster by `divisor`.
///
/// A non-positive divisor yields an all-zero raster of the same shape.
pub fn relativize_by(src: &Raster, divisor: f32) -> Result<Raster, ProcessingError> {
    if divisor <= 0.0 {
        return Ok(Raster::from_size_val(
            src.size(),
            src.num_channels(),
            0.0,
        )?);
    }
    Ok(src.map(|v| v / divisor))
}

/// Divide every sample of a raster by the largest sample of the raster.
///
/// The output lies in `[0, 1]` for non-negative input. When the largest sample
/// is zero (or negative) the output is all zeros instead of a division by zero.
///
/// # Arguments
///
/// * `src` - The input raster with shape (H, W, C).
///
/// # Example
///
/// ```
/// use ridge_image::Raster;
/// use ridge_imgproc::normalize::relativize;
///
/// let src = Raster::new([3, 1].into(), 1, vec![0.0, 2.0, 4.0]).unwrap();
/// let up = relativize(&src).unwrap();
/// assert_eq!(up.as_slice(), &[0.0, 0.5, 1.0]);
/// ```
pub fn relativize(src: &Raster) -> Result<Raster, ProcessingError> {
    relativize_by(src, src.max_value())
}
