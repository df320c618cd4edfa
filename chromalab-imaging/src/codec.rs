//! Image file I/O through the `image` crate.

use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::info;

use crate::error::ImagingError;

/// Raster formats offered in open dialogs.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tiff", "gif"];

/// Extension added when a save path has none.
pub const DEFAULT_SAVE_EXTENSION: &str = "png";

/// Decode any supported raster file into 8-bit RGB.
pub fn load_image(path: &Path) -> crate::Result<RgbImage> {
    let image = image::open(path)?.to_rgb8();
    if image.width() == 0 || image.height() == 0 {
        return Err(ImagingError::EmptyImage);
    }
    info!(
        "Loaded {}x{} image from {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(image)
}

/// Encode `image` with the format implied by the path's extension.
///
/// A path without an extension gets `.png`. Returns the path written.
pub fn save_image(image: &RgbImage, path: &Path) -> crate::Result<PathBuf> {
    let path = if path.extension().is_none() {
        path.with_extension(DEFAULT_SAVE_EXTENSION)
    } else {
        path.to_path_buf()
    };
    image.save(&path)?;
    info!("Saved image to {}", path.display());
    Ok(path)
}
