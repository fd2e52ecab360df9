//! DOCX quotes: one `body - author` pair per paragraph.
//!
//! A `.docx` file is a ZIP container; the body text lives in
//! `word/document.xml` as `<w:p>` paragraphs made of `<w:t>` runs. Reading the
//! XML directly keeps the dependency surface to `zip` + `quick-xml` instead of
//! a full OOXML object model.

use super::{clean_text, has_magic, Ingestor};
use crate::error::MemeError;
use crate::quote::QuoteModel;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Ingestor for `.docx` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxIngestor;

impl Ingestor for DocxIngestor {
    fn extensions(&self) -> &'static [&'static str] {
        &["docx"]
    }

    fn parse(&self, path: &Path) -> Result<Vec<QuoteModel>, MemeError> {
        self.ensure_ingestible(path)?;

        if !has_magic(path, b"PK\x03\x04")? {
            return Err(malformed(path, "not a ZIP container"));
        }

        let file = std::fs::File::open(path).map_err(|e| MemeError::from_io(path, e))?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| malformed(path, e))?;

        let mut xml = String::new();
        archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| malformed(path, format!("{DOCUMENT_PART}: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| malformed(path, format!("{DOCUMENT_PART}: {e}")))?;

        let paragraphs = paragraphs(&xml).map_err(|e| malformed(path, e))?;
        debug!("{} paragraphs in {}", paragraphs.len(), path.display());

        Ok(paragraphs
            .iter()
            .filter_map(|p| paragraph_quote(p))
            .collect())
    }
}

/// A paragraph is a quote only if it splits into exactly two parts on `-`.
fn paragraph_quote(paragraph: &str) -> Option<QuoteModel> {
    if paragraph.is_empty() {
        return None;
    }
    let parts: Vec<&str> = paragraph.split('-').collect();
    if parts.len() != 2 {
        return None;
    }
    let body = clean_text(parts[0]);
    let author = clean_text(parts[1]);
    if body.is_empty() || author.is_empty() {
        return None;
    }
    Some(QuoteModel::new(body, author))
}

/// Collect the text of every `<w:p>` paragraph in document order.
fn paragraphs(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn malformed(path: &Path, detail: impl ToString) -> MemeError {
    MemeError::MalformedDocx {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}
