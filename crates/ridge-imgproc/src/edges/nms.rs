use ridge_image::Raster;

use crate::error::{ensure_channels, ensure_same_size, ProcessingError};
use crate::parallel::{par_iter_pixels, ExecutionStrategy};

/// The four canonical gradient orientations used to thin edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Horizontal gradient, 0 or 180 degrees.
    Deg0,
    /// Diagonal gradient, 45 degrees.
    Deg45,
    /// Vertical gradient, 90 degrees.
    Deg90,
    /// Anti-diagonal gradient, 135 degrees.
    Deg135,
}

impl Orientation {
    /// The orientation in degrees.
    pub fn degrees(&self) -> f32 {
        match self {
            Orientation::Deg0 => 0.0,
            Orientation::Deg45 => 45.0,
            Orientation::Deg90 => 90.0,
            Orientation::Deg135 => 135.0,
        }
    }

    /// The `(row, col)` offsets of the two neighbours compared along this orientation.
    pub fn neighbours(&self) -> [(isize, isize); 2] {
        match self {
            Orientation::Deg0 => [(0, 1), (0, -1)],
            Orientation::Deg45 => [(1, 1), (-1, -1)],
            Orientation::Deg90 => [(1, 0), (-1, 0)],
            Orientation::Deg135 => [(-1, 1), (1, -1)],
        }
    }
}

/// Round a gradient direction to the nearest canonical orientation.
///
/// Negative angles are shifted by 180 degrees first. Candidates are scanned
/// in the order 0, 45, 90, 135 starting from 180 and only a strictly closer
/// candidate replaces the current one, so ties keep the earlier bin. Angles
/// that stay closest to 180 fall into the same bin as 0, and so do NaN and
/// infinite angles, which are never closer to any candidate.
///
/// # Example
///
/// ```
/// use ridge_imgproc::edges::{discretize_orientation, Orientation};
///
/// assert_eq!(discretize_orientation(44.9).unwrap(), Orientation::Deg45);
/// assert_eq!(discretize_orientation(-44.9).unwrap(), Orientation::Deg135);
/// ```
pub fn discretize_orientation(angle: f32) -> Result<Orientation, ProcessingError> {
    let shifted = if angle < 0.0 { angle + 180.0 } else { angle };

    let mut closest = 180.0f32;
    for c in [0.0f32, 45.0, 90.0, 135.0] {
        if (shifted - c).abs() < (shifted - closest).abs() {
            closest = c;
        }
    }

    match closest as u32 {
        0 | 180 => Ok(Orientation::Deg0),
        45 => Ok(Orientation::Deg45),
        90 => Ok(Orientation::Deg90),
        135 => Ok(Orientation::Deg135),
        _ => Err(ProcessingError::InvalidOrientation(angle)),
    }
}

/// Thin a gradient magnitude map with non-maximum suppression.
///
/// Each pixel keeps its magnitude only if it is strictly greater than both
/// neighbours along its discretized gradient direction, sampled with
/// wrap-around borders. Every other pixel becomes zero.
///
/// # Arguments
///
/// * `magnitude` - The gradient magnitude with shape (H, W, 1).
/// * `direction` - The gradient direction in degrees with shape (H, W, 1).
/// * `strategy` - The execution strategy.
pub fn thin_gradient_with_strategy(
    magnitude: &Raster,
    direction: &Raster,
    strategy: ExecutionStrategy,
) -> Result<Raster, ProcessingError> {
    ensure_channels(magnitude, 1)?;
    ensure_channels(direction, 1)?;
    ensure_same_size(magnitude, direction)?;

    let cols = magnitude.cols();
    let orientations = direction
        .as_slice()
        .iter()
        .map(|&angle| discretize_orientation(angle))
        .collect::<Result<Vec<_>, _>>()?;

    let thinned = par_iter_pixels(strategy, magnitude.size(), |row, col| {
        let (y, x) = (row as isize, col as isize);
        let center = magnitude.get_wrapped(y, x, 0);
        let is_peak = orientations[row * cols + col]
            .neighbours()
            .iter()
            .all(|&(dy, dx)| center > magnitude.get_wrapped(y + dy, x + dx, 0));
        if is_peak {
            center
        } else {
            0.0
        }
    })?;

    Ok(Raster::new(magnitude.size(), 1, thinned)?)
}

/// Thin a gradient magnitude map with non-maximum suppression.
///
/// Uses [`ExecutionStrategy::default`]. See [`thin_gradient_with_strategy`].
pub fn thin_gradient(magnitude: &Raster, direction: &Raster) -> Result<Raster, ProcessingError> {
    thin_gradient_with_strategy(magnitude, direction, ExecutionStrategy::default())
}
