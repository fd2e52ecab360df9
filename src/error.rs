//! Error types for the memegen library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`MemeError`] is **fatal**: the operation cannot proceed at all
//!   (image missing, unsupported document format, no quotes anywhere).
//!   Returned as `Err(MemeError)` from every public entry point.
//!
//! * [`SourceError`] is **non-fatal**: one quote source failed to load
//!   (corrupt DOCX, pdfium missing) while the others are fine. Stored inside
//!   [`crate::library::QuoteLibrary`] so callers can report partial success
//!   rather than losing every quote to one bad file.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the memegen library.
#[derive(Debug, Error)]
pub enum MemeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Reading a file failed for a reason other than missing/permission.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input string is neither an existing file nor an HTTP/HTTPS URL.
    #[error("Invalid image source '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but the download failed.
    #[error("Failed to download '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    // ── Ingestion errors ──────────────────────────────────────────────────
    /// No ingestor handles this file extension.
    #[error("No suitable ingestor for '{path}' (extension {extension:?}); supported: txt, csv, docx, pdf")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The CSV file is malformed or lacks the `body`/`author` columns.
    #[error("CSV '{path}' could not be parsed: {detail}")]
    CsvParse { path: PathBuf, detail: String },

    /// The DOCX container or its `word/document.xml` part is unreadable.
    #[error("DOCX '{path}' is malformed: {detail}")]
    MalformedDocx { path: PathBuf, detail: String },

    /// pdfium could not open the document.
    #[error("PDF '{path}' is corrupt or unreadable: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
PDF quote sources need libpdfium at runtime. You can:\n\
  • Install pdfium system-wide (e.g. from bblanchon/pdfium-binaries).\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium (file or containing directory).\n"
    )]
    PdfiumBindingFailed(String),

    // ── Selection errors ──────────────────────────────────────────────────
    /// The image directory holds no usable images.
    #[error("No images found in '{dir}'")]
    NoImages { dir: PathBuf },

    /// Every quote source failed or yielded nothing.
    #[error("No quotes found in the {sources} configured source(s)")]
    NoQuotes { sources: usize },

    /// A quote body was supplied without an author.
    #[error("Author name is required if a quote is provided")]
    AuthorRequired,

    // ── Image errors ──────────────────────────────────────────────────────
    /// The image could not be decoded.
    #[error("Failed to open or decode image '{path}': {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The resized image would exceed the pixel budget (extremely tall inputs).
    #[error("Image '{path}' is too tall: {src_width}x{src_height} would resize to more than {max_height}px high at {width}px wide")]
    ImageTooLarge {
        path: PathBuf,
        src_width: u32,
        src_height: u32,
        width: u32,
        max_height: u32,
    },

    /// The caption font could not be loaded.
    #[error("Could not load the font at '{path}': {detail}")]
    FontLoad { path: PathBuf, detail: String },

    /// Could not create or write the output meme file.
    #[error("Failed to write meme '{path}': {detail}")]
    OutputWriteFailed { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MemeError {
    /// Map an `io::Error` raised while opening `path` to the matching variant.
    pub(crate) fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => MemeError::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => MemeError::PermissionDenied { path },
            _ => MemeError::ReadFailed { path, source: err },
        }
    }
}

/// A non-fatal failure of a single quote source.
///
/// Collected by [`crate::library::load_quotes`]; loading continues with the
/// remaining sources and only fails if none yields a quote.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
#[error("{path}: {detail}")]
pub struct SourceError {
    pub path: PathBuf,
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_io_maps_not_found() {
        let e = MemeError::from_io(
            "quotes.txt",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(e, MemeError::FileNotFound { .. }));
        assert!(e.to_string().contains("quotes.txt"));
    }

    #[test]
    fn from_io_maps_permission_denied() {
        let e = MemeError::from_io(
            "/root/secret.csv",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(e, MemeError::PermissionDenied { .. }));
    }

    #[test]
    fn unsupported_format_display() {
        let e = MemeError::UnsupportedFormat {
            path: "notes.rtf".into(),
            extension: "rtf".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.rtf"), "got: {msg}");
        assert!(msg.contains("docx"), "got: {msg}");
    }

    #[test]
    fn no_quotes_display() {
        let e = MemeError::NoQuotes { sources: 4 };
        assert!(e.to_string().contains('4'));
    }

    #[test]
    fn source_error_display() {
        let e = SourceError {
            path: "DogQuotes.pdf".into(),
            detail: "pdfium missing".into(),
        };
        assert_eq!(e.to_string(), "DogQuotes.pdf: pdfium missing");
    }
}
