//! Plain-text quotes: one `body - author` pair per line.

use super::{parse_lines, Ingestor};
use crate::error::MemeError;
use crate::quote::QuoteModel;
use std::path::Path;

/// Ingestor for `.txt` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextIngestor;

impl Ingestor for TextIngestor {
    fn extensions(&self) -> &'static [&'static str] {
        &["txt"]
    }

    fn parse(&self, path: &Path) -> Result<Vec<QuoteModel>, MemeError> {
        self.ensure_ingestible(path)?;
        let bytes = std::fs::read(path).map_err(|e| MemeError::from_io(path, e))?;
        Ok(parse_lines(&String::from_utf8_lossy(&bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_lines_and_skips_blank() {
        let mut f = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(
            f,
            "To bork or not to bork - Bork\r\n\r\nHe who smelt it... - Stinky\nheader line\n"
        )
        .unwrap();

        let quotes = TextIngestor.parse(f.path()).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0], QuoteModel::new("To bork or not to bork", "Bork"));
        assert_eq!(quotes[1], QuoteModel::new("He who smelt it", "Stinky"));
    }

    #[test]
    fn rejects_wrong_extension() {
        let f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let err = TextIngestor.parse(f.path()).unwrap_err();
        assert!(matches!(err, MemeError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = TextIngestor.parse(Path::new("/nonexistent/quotes.txt")).unwrap_err();
        assert!(matches!(err, MemeError::FileNotFound { .. }));
    }
}
