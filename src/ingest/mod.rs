//! Quote ingestion: turn TXT, CSV, DOCX and PDF documents into [`QuoteModel`]s.
//!
//! Each submodule implements the [`Ingestor`] trait for exactly one format.
//! [`parse`] picks the right one from the file extension, so callers never
//! name a concrete ingestor.
//!
//! ## Data Flow
//!
//! ```text
//! path ──▶ SourceFormat::from_path ──▶ Ingestor::parse ──▶ Vec<QuoteModel>
//!           (extension)                 (txt/csv/docx/pdf)
//! ```
//!
//! Line-oriented formats (TXT, PDF, DOCX paragraphs) encode a quote as
//! `body - author`; both halves go through [`clean_text`]. CSV carries the
//! two fields in `body`/`author` columns and is only trimmed.

pub mod csv;
pub mod docx;
pub mod pdf;
pub mod text;

use crate::error::MemeError;
use crate::quote::QuoteModel;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use unicode_general_category::{get_general_category, GeneralCategory};

pub use self::csv::CsvIngestor;
pub use self::docx::DocxIngestor;
pub use self::pdf::PdfIngestor;
pub use self::text::TextIngestor;

/// A parser for one family of quote documents.
pub trait Ingestor: Send + Sync {
    /// Lower-case file extensions this ingestor accepts.
    fn extensions(&self) -> &'static [&'static str];

    /// Parse every quote in the document at `path`.
    ///
    /// Fails with [`MemeError::UnsupportedFormat`] when
    /// [`can_ingest`](Ingestor::can_ingest) is false.
    fn parse(&self, path: &Path) -> Result<Vec<QuoteModel>, MemeError>;

    /// Whether the file extension is one this ingestor accepts.
    fn can_ingest(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }

    /// Reject paths this ingestor cannot handle.
    fn ensure_ingestible(&self, path: &Path) -> Result<(), MemeError> {
        if self.can_ingest(path) {
            Ok(())
        } else {
            Err(MemeError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: extension_of(path).unwrap_or_default(),
            })
        }
    }
}

/// Supported quote document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Txt,
    Csv,
    Docx,
    Pdf,
}

impl SourceFormat {
    /// Select the format from the (case-insensitive) file extension.
    pub fn from_path(path: &Path) -> Result<Self, MemeError> {
        let extension = extension_of(path).unwrap_or_default();
        match extension.as_str() {
            "txt" => Ok(SourceFormat::Txt),
            "csv" => Ok(SourceFormat::Csv),
            "docx" => Ok(SourceFormat::Docx),
            "pdf" => Ok(SourceFormat::Pdf),
            _ => Err(MemeError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }

    /// The ingestor responsible for this format.
    pub fn ingestor(self) -> &'static dyn Ingestor {
        match self {
            SourceFormat::Txt => &TextIngestor,
            SourceFormat::Csv => &CsvIngestor,
            SourceFormat::Docx => &DocxIngestor,
            SourceFormat::Pdf => &PdfIngestor,
        }
    }
}

/// Parse a quote document of any supported format.
pub fn parse(path: impl AsRef<Path>) -> Result<Vec<QuoteModel>, MemeError> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;
    debug!("Selected {:?} ingestor for {}", format, path.display());
    let quotes = format.ingestor().parse(path)?;
    debug!("Parsed {} quotes from {}", quotes.len(), path.display());
    Ok(quotes)
}

/// Lower-cased extension of `path`, if any.
pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

// ── Text cleaning ────────────────────────────────────────────────────────────

static RE_UNWANTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r##"[()"#<>{}`+=~|.!?/@;,¿«»¨ï]"##).unwrap());

/// Python-style `isprintable`: drops control, format, surrogate, private-use
/// and unassigned code points, and every separator except the ASCII space.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

/// Strip punctuation, symbols and non-printable characters, then trim.
pub fn clean_text(input: &str) -> String {
    let stripped = RE_UNWANTED.replace_all(input, "");
    stripped
        .chars()
        .filter(|&c| is_printable(c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split a `body - author` line into a quote.
///
/// Only the first two `-`-separated parts are used. Returns `None` when the
/// line has no `-`, or when either cleaned half is empty.
pub fn split_quote_line(line: &str) -> Option<QuoteModel> {
    let mut parts = line.split('-');
    let body = clean_text(parts.next()?);
    let author = clean_text(parts.next()?);
    if body.is_empty() || author.is_empty() {
        return None;
    }
    Some(QuoteModel::new(body, author))
}

/// Apply [`split_quote_line`] to every line of `text`.
pub(crate) fn parse_lines(text: &str) -> Vec<QuoteModel> {
    text.lines().filter_map(split_quote_line).collect()
}

/// Verify the first bytes of a file, like `file(1)` would.
///
/// Files shorter than `magic` pass; the format parser reports those.
pub(crate) fn has_magic(path: &Path, magic: &[u8]) -> Result<bool, MemeError> {
    let mut f = std::fs::File::open(path).map_err(|e| MemeError::from_io(path, e))?;
    let mut head = vec![0u8; magic.len()];
    match f.read_exact(&mut head) {
        Ok(()) => Ok(head == magic),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(true),
        Err(e) => Err(MemeError::from_io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_clean_text_strips_punctuation() {
        assert_eq!(clean_text("  \"To bork or not to bork.\" "), "To bork or not to bork");
        assert_eq!(clean_text("Who's a good boy?!"), "Who's a good boy");
        assert_eq!(clean_text("«Ruff»; (woof) {grr}"), "Ruff woof grr");
    }

    #[test]
    fn test_clean_text_strips_non_printable() {
        assert_eq!(clean_text("Bark\u{200B}ing\tdog\u{FEFF}\r\n"), "Barkingdog");
        assert_eq!(clean_text("a\u{00A0}b"), "ab");
        assert_eq!(clean_text("a\u{2028}b\u{2029}c\u{3000}d"), "abcd");
    }

    #[test]
    fn test_clean_text_strips_bidi_and_private_use() {
        for s in [
            "Rex\u{202C}",
            "Rex\u{202A}",
            "Rex\u{202E}",
            "Rex\u{2066}",
            "Rex\u{2069}",
            "Rex\u{061C}",
            "Rex\u{E000}",
            "Rex\u{00AD}",
        ] {
            assert_eq!(clean_text(s), "Rex", "{:?}", s);
        }
        assert_eq!(
            split_quote_line("\u{2066}Sit\u{2069} - \u{E000}Spot"),
            Some(QuoteModel::new("Sit", "Spot"))
        );
    }

    #[test]
    fn test_clean_text_keeps_letters_and_apostrophes() {
        assert_eq!(clean_text("Élan d'un chien"), "Élan d'un chien");
    }

    #[test]
    fn test_split_quote_line() {
        let q = split_quote_line("\"Chase the mailman\" - Skittle").unwrap();
        assert_eq!(q.quote(), "Chase the mailman");
        assert_eq!(q.author(), "Skittle");
    }

    #[test]
    fn test_split_quote_line_ignores_extra_parts() {
        let q = split_quote_line("Treat - Rex - the third").unwrap();
        assert_eq!(q.quote(), "Treat");
        assert_eq!(q.author(), "Rex");
    }

    #[test]
    fn test_split_quote_line_rejects_incomplete() {
        assert!(split_quote_line("no separator here").is_none());
        assert!(split_quote_line(" - Rex").is_none());
        assert!(split_quote_line("Treat - ").is_none());
        assert!(split_quote_line("").is_none());
    }

    #[test]
    fn test_parse_lines_skips_noise() {
        let text = "Bark like no one is listening - Rex\n\n???\nPage 1\nLife is better with a dog - Fido\n";
        let quotes = parse_lines(text);
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].author(), "Fido");
    }

    #[test]
    fn test_source_format_from_extension() {
        let f = |p: &str| SourceFormat::from_path(&PathBuf::from(p));
        assert_eq!(f("q.txt").unwrap(), SourceFormat::Txt);
        assert_eq!(f("Q.CSV").unwrap(), SourceFormat::Csv);
        assert_eq!(f("dir.v2/q.docx").unwrap(), SourceFormat::Docx);
        assert_eq!(f("q.pdf").unwrap(), SourceFormat::Pdf);
        assert!(matches!(
            f("q.rtf"),
            Err(MemeError::UnsupportedFormat { .. })
        ));
        assert!(f("quotes").is_err());
    }

    #[test]
    fn test_can_ingest() {
        assert!(TextIngestor.can_ingest(Path::new("a/b.TXT")));
        assert!(!TextIngestor.can_ingest(Path::new("a/b.csv")));
        assert!(DocxIngestor.can_ingest(Path::new("b.docx")));
        assert!(!PdfIngestor.can_ingest(Path::new("pdf")));
    }

    #[test]
    fn test_parse_rejects_unknown_extension() {
        let err = parse("quotes.xlsx").unwrap_err();
        assert!(matches!(err, MemeError::UnsupportedFormat { .. }));
    }
}
