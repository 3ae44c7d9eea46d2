use ridge_image::RasterError;

use crate::parallel::ParallelError;

/// An error type for the processing stages.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProcessingError {
    /// The gaussian scale must be strictly positive and finite.
    #[error("Sigma must be a positive finite number, got {0}")]
    InvalidSigma(f32),

    /// The raster does not have the number of channels the stage needs.
    #[error("Expected a raster with {expected} channel(s), got {found}")]
    InvalidChannelCount {
        /// Number of channels the stage needs.
        expected: usize,
        /// Number of channels of the given raster.
        found: usize,
    },

    /// Two cooperating rasters have different extents.
    #[error("Raster size mismatch: {0}x{1} vs {2}x{3} (width x height)")]
    InvalidRasterSize(usize, usize, usize, usize),

    /// A gradient direction could not be assigned to any orientation bin.
    #[error("Gradient direction {0} does not fall into any orientation bin")]
    InvalidOrientation(f32),

    /// No pixel produced a corner score above the threshold.
    #[error("No corner score exceeds the threshold {0}")]
    NoCornersFound(f32),

    /// Error building a raster.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// Error running a stage in parallel.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

pub(crate) fn ensure_channels(
    raster: &ridge_image::Raster,
    expected: usize,
) -> Result<(), ProcessingError> {
    if raster.num_channels() != expected {
        return Err(ProcessingError::InvalidChannelCount {
            expected,
            found: raster.num_channels(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_same_size(
    a: &ridge_image::Raster,
    b: &ridge_image::Raster,
) -> Result<(), ProcessingError> {
    if a.size() != b.size() {
        return Err(ProcessingError::InvalidRasterSize(
            a.cols(),
            a.rows(),
            b.cols(),
            b.rows(),
        ));
    }
    Ok(())
}
