#![deny(missing_docs)]
//! Raster container and border sampling for the ridge detectors.

/// Index mapping for out-of-range coordinates.
pub mod border;

/// Error types for the raster module.
pub mod error;

/// Floating point raster representation.
pub mod raster;

pub use crate::error::RasterError;
pub use crate::raster::{Raster, RasterSize};
