/// An error type for the raster module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RasterError {
    /// Error when the data length does not match the raster shape.
    #[error("Data length ({0}) does not match the raster size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the raster has a zero extent.
    #[error("Raster extents must be non-zero, got {0}x{1}x{2} (height x width x depth)")]
    EmptyRaster(usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for a raster with {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),
}
