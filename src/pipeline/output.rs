//! Persist a finished meme as a uniquely named JPEG.

use crate::error::MemeError;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

const JPEG_QUALITY: u8 = 90;

/// Mode of a written meme: the usual `rw-r--r--`, not tempfile's private 0600.
#[cfg(unix)]
const MEME_MODE: u32 = 0o644;

/// Write `img` to `output_dir/meme_<random>.jpg`, creating the directory.
///
/// The name is reserved atomically before encoding, so concurrent writers
/// never clobber each other. A partially written file is removed on error.
pub fn write_meme(img: &RgbImage, output_dir: &Path) -> Result<PathBuf, MemeError> {
    let write_err = |path: &Path, detail: String| MemeError::OutputWriteFailed {
        path: path.to_path_buf(),
        detail,
    };

    std::fs::create_dir_all(output_dir).map_err(|e| write_err(output_dir, e.to_string()))?;

    let (file, path) = tempfile::Builder::new()
        .prefix("meme_")
        .suffix(".jpg")
        .tempfile_in(output_dir)
        .and_then(|f| f.keep().map_err(|e| e.error))
        .map_err(|e| write_err(output_dir, e.to_string()))?;
    if let Err(e) = share_readable(&path) {
        let _ = std::fs::remove_file(&path);
        return Err(write_err(&path, e.to_string()));
    }

    let mut writer = BufWriter::new(file);
    let encoded = {
        let mut encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
        encoder.encode_image(img)
    }
    .map_err(|e| e.to_string())
    .and_then(|()| writer.flush().map_err(|e| e.to_string()));

    if let Err(detail) = encoded {
        let _ = std::fs::remove_file(&path);
        return Err(write_err(&path, detail));
    }

    debug!("Wrote {}x{} meme to {}", img.width(), img.height(), path.display());
    Ok(path)
}

#[cfg(unix)]
fn share_readable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(MEME_MODE))
}

#[cfg(not(unix))]
fn share_readable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn writes_named_jpeg_and_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/static");
        let img = RgbImage::from_pixel(40, 30, Rgb([200, 10, 10]));

        let path = write_meme(&img, &out).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("meme_") && name.ends_with(".jpg"), "{name}");
        assert_eq!(path.parent().unwrap(), out);

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));
        let a = write_meme(&img, dir.path()).unwrap();
        let b = write_meme(&img, dir.path()).unwrap();
        assert_ne!(a, b);
    }

    #[cfg(unix)]
    #[test]
    fn meme_is_readable_by_others() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));
        let path = write_meme(&img, dir.path()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }
}
