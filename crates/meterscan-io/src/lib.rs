//! meterscan-io - Raster file I/O
//!
//! Decodes photograph files into the single-channel [`Raster`] the
//! recognition pipeline consumes, and encodes rasters back to grayscale
//! files for inspecting binarized overlays. Format handling is delegated
//! to the `image` crate; the recognition core never touches files.
//!
//! # Channel selection
//!
//! The pipeline's threshold samples one channel; decoded color images
//! contribute their red channel. The display family in scope is
//! effectively monochrome, so this is a documented precondition rather
//! than a lossy shortcut; channels are never averaged.

mod error;

use std::path::Path;

use image::DynamicImage;
use meterscan_core::Raster;

pub use error::{IoError, IoResult};

/// Decode an image file into a raster.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded, or if the
/// decoded image is empty.
pub fn read_raster(path: impl AsRef<Path>) -> IoResult<Raster> {
    let decoded = image::open(path)?;
    Ok(raster_from_image(&decoded)?)
}

/// Convert a decoded image into a raster, taking the red channel.
///
/// # Errors
///
/// Returns an error if the image has a zero dimension.
pub fn raster_from_image(decoded: &DynamicImage) -> meterscan_core::Result<Raster> {
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for pixel in rgb.pixels() {
        data.push(pixel[0]);
    }
    Raster::from_raw(width, height, data)
}

/// Encode a raster as an 8-bit grayscale image file.
///
/// The format is chosen from the path extension, as the `image` crate
/// does for [`image::DynamicImage::save`].
///
/// # Errors
///
/// Returns an error if the file cannot be written or encoded.
pub fn write_raster(path: impl AsRef<Path>, raster: &Raster) -> IoResult<()> {
    let (width, height) = (raster.width(), raster.height());
    let gray = image::GrayImage::from_raw(width, height, raster.data().to_vec())
        .ok_or_else(|| IoError::Encode(format!("raster buffer mismatch for {}x{}", width, height)))?;
    gray.save(path)?;
    Ok(())
}
