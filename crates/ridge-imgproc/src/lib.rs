#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// memoization of gradient fields.
pub mod cache;

/// color reduction module.
pub mod color;

/// structure tensor corner detection module.
pub mod corners;

/// Canny edge detection module.
pub mod edges;

/// error types for the processing stages.
pub mod error;

/// image filtering module.
pub mod filter;

/// operations to normalize rasters.
pub mod normalize;

/// module containing parallization utilities.
pub mod parallel;

pub use error::ProcessingError;
