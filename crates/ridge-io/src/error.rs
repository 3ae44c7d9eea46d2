/// An error type for the io module.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// Error when the file does not exist.
    #[error("File does not exist: {0}")]
    FileDoesNotExist(std::path::PathBuf),

    /// Error to open or write the file.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to decode the image.
    #[error("Failed to decode the image. {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// Error to encode the image.
    #[error("Failed to encode the image. {0}")]
    ImageEncodeError(image::ImageError),

    /// The raster cannot be stored as an image file.
    #[error("Cannot write a raster with {0} channels, expected 1 or 3")]
    UnsupportedChannels(usize),

    /// Error to create the raster.
    #[error("Failed to create raster. {0}")]
    Raster(#[from] ridge_image::RasterError),
}
