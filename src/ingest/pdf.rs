//! PDF quotes: extract the text layer with pdfium, then read it line by line.
//!
//! pdfium is bound at runtime. `PDFIUM_LIB_PATH` may point at the library
//! file or at the directory holding it; otherwise the system library is used.
//! Binding happens per call so that a machine without pdfium can still ingest
//! every other format.

use super::{has_magic, parse_lines, Ingestor};
use crate::error::MemeError;
use crate::quote::QuoteModel;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ingestor for `.pdf` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfIngestor;

impl Ingestor for PdfIngestor {
    fn extensions(&self) -> &'static [&'static str] {
        &["pdf"]
    }

    fn parse(&self, path: &Path) -> Result<Vec<QuoteModel>, MemeError> {
        self.ensure_ingestible(path)?;

        if !has_magic(path, b"%PDF")? {
            return Err(MemeError::CorruptPdf {
                path: path.to_path_buf(),
                detail: "missing %PDF header".into(),
            });
        }

        let text = extract_text(path)?;
        Ok(parse_lines(&text))
    }
}

/// Bind to libpdfium, honouring `PDFIUM_LIB_PATH`.
pub fn bind_pdfium() -> Result<Pdfium, MemeError> {
    let bindings = match std::env::var_os("PDFIUM_LIB_PATH") {
        Some(p) if !p.is_empty() => {
            let p = PathBuf::from(p);
            let lib = if p.is_dir() {
                Pdfium::pdfium_platform_library_name_at_path(&p)
            } else {
                p
            };
            debug!("Binding pdfium from {}", lib.display());
            Pdfium::bind_to_library(&lib)
        }
        _ => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| MemeError::PdfiumBindingFailed(e.to_string()))?;

    Ok(Pdfium::new(bindings))
}

/// Concatenate the text of every page, one page per block of lines.
fn extract_text(path: &Path) -> Result<String, MemeError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|e| MemeError::CorruptPdf {
            path: path.to_path_buf(),
            detail: format!("{:?}", e),
        })?;

    let mut text = String::new();
    for (idx, page) in document.pages().iter().enumerate() {
        let page_text = page.text().map_err(|e| MemeError::CorruptPdf {
            path: path.to_path_buf(),
            detail: format!("page {}: {:?}", idx + 1, e),
        })?;
        text.push_str(&page_text.all());
        text.push('\n');
    }

    debug!("Extracted {} chars of text from {}", text.len(), path.display());
    Ok(text)
}
