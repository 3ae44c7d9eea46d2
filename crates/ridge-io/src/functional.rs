use std::path::Path;

use ridge_image::{Raster, RasterSize};

use crate::error::IoError;

/// Reads an image file into an RGB raster with samples in `[0, 1]`.
///
/// The method reads any format supported by the image crate. Grayscale
/// images are expanded to three channels and alpha channels are dropped.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// A raster with shape (H, W, 3).
pub fn read_image_rgb(file_path: impl AsRef<Path>) -> Result<Raster, IoError> {
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(&file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = RasterSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "read {} as {size}, color {:?}",
        file_path.display(),
        img.color()
    );

    let data = img
        .into_rgb8()
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / 255.0)
        .collect();

    Ok(Raster::new(size, 3, data)?)
}

/// Writes a raster to the given file path.
///
/// The format is deduced from the file extension. Samples are clamped to
/// `[0, 1]` and quantized to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path of the image file to create.
/// * `raster` - A raster with one (grayscale) or three (RGB) channels.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedChannels`] for any other number of channels.
pub fn write_image(file_path: impl AsRef<Path>, raster: &Raster) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let (width, height) = (raster.width() as u32, raster.height() as u32);

    let bytes = raster
        .as_slice()
        .iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect::<Vec<u8>>();

    let color = match raster.num_channels() {
        1 => image::ExtendedColorType::L8,
        3 => image::ExtendedColorType::Rgb8,
        n => return Err(IoError::UnsupportedChannels(n)),
    };

    image::save_buffer(file_path, &bytes, width, height, color)
        .map_err(IoError::ImageEncodeError)?;

    log::debug!("wrote {} ({})", file_path.display(), raster.size());

    Ok(())
}
