//! Source decoding and atomic PNG export

use crate::io::configuration::TEMP_SUFFIX;
use crate::io::error::{Result, SynthesisError, file_system_error};
use image::{ImageFormat, ImageReader, RgbImage};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Decode an image file, detecting PNG, JPEG or GIF from its content
///
/// Alpha is discarded; only the RGB channels drive luminance matching.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - The content is not a recognised or valid image
pub fn decode_source(path: &Path) -> Result<RgbImage> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(file_system_error(path, "open source image"))?;

    match reader.format() {
        Some(format) => info!("Decoding {} as {format:?}", path.display()),
        None => info!("Decoding {} (format not recognised)", path.display()),
    }

    let image = reader.decode().map_err(|e| SynthesisError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(image.to_rgb8())
}

/// Temporary path written before the final rename onto `dest`
pub fn temp_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Encode `canvas` as PNG next to `dest`, then move it into place
///
/// The destination never holds a partial image. If encoding fails the
/// temporary file is left on disk and `dest` is untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - PNG encoding or writing the temporary file fails
/// - The temporary file cannot be renamed onto the destination
pub fn write_png_atomically(canvas: &RgbImage, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }

    let temp = temp_path(dest);
    debug!("Encoding PNG to {}", temp.display());
    canvas
        .save_with_format(&temp, ImageFormat::Png)
        .map_err(|e| SynthesisError::ImageExport {
            path: temp.clone(),
            source: e,
        })?;

    std::fs::rename(&temp, dest).map_err(file_system_error(&temp, "rename output"))?;
    info!("Wrote {}", dest.display());

    Ok(())
}
