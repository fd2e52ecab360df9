//! Input resolution: normalise a user-supplied image path or URL to a local file.
//!
//! ## Why download to a temp file?
//!
//! The decoder and the web form both work from file-system paths. Downloading
//! to a `TempDir` gives us such a path while ensuring cleanup happens
//! automatically when `ResolvedImage` is dropped, even on an error path. The
//! downloaded bytes are sniffed before returning so callers get a meaningful
//! error rather than a decoder failure on an HTML error page.

use crate::error::MemeError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// The resolved image: either a local path or a downloaded temp file.
#[derive(Debug)]
pub enum ResolvedImage {
    /// Input was already a local file.
    Local(PathBuf),
    /// Input was a URL; image downloaded to a temp directory.
    /// The `TempDir` is kept alive to prevent cleanup until composition completes.
    Downloaded { path: PathBuf, _temp_dir: TempDir },
}

impl ResolvedImage {
    /// Get the path to the image file regardless of how it was resolved.
    pub fn path(&self) -> &Path {
        match self {
            ResolvedImage::Local(p) => p,
            ResolvedImage::Downloaded { path, .. } => path,
        }
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to a local image path.
///
/// If the input is a URL, download it to a temporary directory.
/// If the input is a local file, validate it exists and is readable.
pub async fn resolve_image(input: &str, timeout_secs: u64) -> Result<ResolvedImage, MemeError> {
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else if input.trim().is_empty() {
        Err(MemeError::InvalidInput {
            input: input.to_string(),
        })
    } else {
        resolve_local(input)
    }
}

/// Resolve a local file path, validating existence and read permission.
fn resolve_local(path_str: &str) -> Result<ResolvedImage, MemeError> {
    let path = PathBuf::from(path_str);

    if !path.is_file() {
        return Err(MemeError::FileNotFound { path });
    }
    std::fs::File::open(&path).map_err(|e| MemeError::from_io(&path, e))?;

    debug!("Resolved local image: {}", path.display());
    Ok(ResolvedImage::Local(path))
}

/// Download a URL to a temporary directory and return the path.
async fn download_url(url: &str, timeout_secs: u64) -> Result<ResolvedImage, MemeError> {
    info!("Downloading image from: {}", url);

    let failed = |reason: String| MemeError::DownloadFailed {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| failed(e.to_string()))?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            MemeError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            failed(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status())));
    }

    let filename = extract_filename(url);

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            MemeError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            failed(e.to_string())
        }
    })?;

    // Sniff the content before touching the disk.
    let format = image::guess_format(&bytes)
        .map_err(|_| failed("response is not a supported image".to_string()))?;
    debug!("Downloaded {} bytes ({:?})", bytes.len(), format);

    let temp_dir = TempDir::new().map_err(|e| MemeError::Internal(e.to_string()))?;
    let file_path = temp_dir.path().join(&filename);

    tokio::fs::write(&file_path, &bytes)
        .await
        .map_err(|e| MemeError::Internal(format!("Failed to write temp file: {}", e)))?;

    info!("Downloaded to: {}", file_path.display());

    Ok(ResolvedImage::Downloaded {
        path: file_path,
        _temp_dir: temp_dir,
    })
}

/// Extract a reasonable filename from the URL path.
fn extract_filename(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() && last.contains('.') {
                    return last.to_string();
                }
            }
        }
    }

    "downloaded.jpg".to_string()
}
