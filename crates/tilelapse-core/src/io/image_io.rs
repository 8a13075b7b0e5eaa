use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::encode::ensure_parent_dir;
use crate::error::Result;

/// Save a mosaic as PNG, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
