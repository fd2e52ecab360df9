//! Decode an image and scale it to the meme width, keeping its aspect ratio.

use crate::config::MemeConfig;
use crate::error::MemeError;
use image::imageops::FilterType;
use image::{ImageReader, RgbImage};
use std::path::Path;
use tracing::debug;

/// Tallest meme produced; caps the resize allocation at 500 × 5000 RGB8.
pub const MAX_HEIGHT: u32 = 5000;

/// Height matching `width` for a `src_w × src_h` source, never below 1 px.
///
/// `None` when the exact height does not fit in a `u32`.
pub fn scaled_height(src_w: u32, src_h: u32, width: u32) -> Option<u32> {
    if src_w == 0 {
        return Some(1);
    }
    u32::try_from((width as u64 * src_h as u64) / src_w as u64)
        .ok()
        .map(|h| h.max(1))
}

/// Load the image at `path` and resize it to `width` (see
/// [`MemeConfig::effective_width`]) with Lanczos3 resampling.
///
/// The format is sniffed from the content, so downloaded files with a
/// misleading extension still decode.
pub fn load_and_resize(path: &Path, width: u32) -> Result<RgbImage, MemeError> {
    let decode_err = |source| MemeError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let img = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| MemeError::from_io(path, e))?
        .decode()
        .map_err(decode_err)?;

    let width = MemeConfig::effective_width(width);
    let height = scaled_height(img.width(), img.height(), width)
        .filter(|&h| h <= MAX_HEIGHT)
        .ok_or_else(|| MemeError::ImageTooLarge {
            path: path.to_path_buf(),
            src_width: img.width(),
            src_height: img.height(),
            width,
            max_height: MAX_HEIGHT,
        })?;
    debug!(
        "Resizing {} from {}x{} to {}x{}",
        path.display(),
        img.width(),
        img.height(),
        width,
        height
    );

    Ok(img.resize_exact(width, height, FilterType::Lanczos3).to_rgb8())
}
