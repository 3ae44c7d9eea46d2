//! Canny edge detection
//!
//! Orientation binning, non-maximum suppression, hysteresis linking and the
//! full detector pipeline.

mod canny;
pub use canny::{canny, CannyConfig};

mod hysteresis;
pub use hysteresis::link_edges;

mod nms;
pub use nms::{discretize_orientation, thin_gradient, thin_gradient_with_strategy, Orientation};
