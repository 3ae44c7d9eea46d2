mod luminance;

pub use luminance::{luminance_from_rgb, luminance_from_rgb_with_strategy};
