#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use ridge_image as image;

#[doc(inline)]
pub use ridge_imgproc as imgproc;

#[doc(inline)]
pub use ridge_io as io;
