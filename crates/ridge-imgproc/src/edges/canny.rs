use ridge_image::Raster;

use super::{link_edges, thin_gradient_with_strategy};
use crate::color::luminance_from_rgb_with_strategy;
use crate::error::ProcessingError;
use crate::filter::spatial_gradient_gaussian_with_strategy;
use crate::normalize::relativize;
use crate::parallel::ExecutionStrategy;

/// Parameters of the Canny edge detector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CannyConfig {
    /// Scale of the gaussian gradient.
    pub sigma: f32,
    /// Relative magnitude needed to start an edge.
    pub start_thresh: f32,
    /// Relative magnitude needed to extend an edge.
    pub continue_thresh: f32,
    /// Execution strategy of the per-pixel stages.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub strategy: ExecutionStrategy,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            start_thresh: 0.4,
            continue_thresh: 0.1,
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl CannyConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gaussian scale.
    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the start and continue thresholds.
    pub fn with_thresholds(mut self, start_thresh: f32, continue_thresh: f32) -> Self {
        self.start_thresh = start_thresh;
        self.continue_thresh = continue_thresh;
        self
    }

    /// Set the execution strategy.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Detect edges in an RGB raster with the Canny detector.
///
/// The raster is reduced to luminance, its gaussian gradient is thinned with
/// non-maximum suppression, scaled so the strongest edge is 1 and finally
/// linked with hysteresis.
///
/// # Arguments
///
/// * `src` - The input raster with at least 3 channels, red, green, blue first.
/// * `config` - The detector parameters.
///
/// # Returns
///
/// A single channel edge map with values in `[0, 1]`.
///
/// # Example
///
/// ```
/// use ridge_image::Raster;
/// use ridge_imgproc::edges::{canny, CannyConfig};
///
/// // a soft vertical bar: 0, 0, 0, 0.5, 1, 1, 1, 0.5
/// let bar = |col: usize| match col {
///     3 | 7 => 0.5,
///     4..=6 => 1.0,
///     _ => 0.0,
/// };
/// let rgb = Raster::from_fn([8, 8].into(), 3, |_, col, _| bar(col)).unwrap();
/// let edges = canny(&rgb, &CannyConfig::default().with_sigma(1.0)).unwrap();
/// assert_eq!(edges.num_channels(), 1);
/// assert_eq!(edges.max_value(), 1.0);
/// ```
pub fn canny(src: &Raster, config: &CannyConfig) -> Result<Raster, ProcessingError> {
    let gray = luminance_from_rgb_with_strategy(src, config.strategy)?;
    let field = spatial_gradient_gaussian_with_strategy(&gray, config.sigma, config.strategy)?;
    let thinned =
        thin_gradient_with_strategy(&field.magnitude, &field.direction, config.strategy)?;
    let thinned = relativize(&thinned)?;

    log::debug!(
        "canny: sigma {}, thresholds {}/{}",
        config.sigma,
        config.start_thresh,
        config.continue_thresh
    );

    link_edges(&thinned, config.start_thresh, config.continue_thresh)
}
