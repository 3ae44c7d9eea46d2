//! Filter operations
//!
//! Gaussian kernels, the wrap-around gaussian gradient and gaussian smoothing.

/// Filter kernels
pub mod kernels;

/// Gaussian gradient operations
mod gradient;
pub use gradient::*;

/// Smoothing operations
mod ops;
pub use ops::*;
