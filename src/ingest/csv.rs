//! CSV quotes: a header row with `body` and `author` columns.

use super::Ingestor;
use crate::error::MemeError;
use crate::quote::QuoteModel;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Ingestor for `.csv` files.
///
/// Extra columns are ignored. Values are trimmed but otherwise kept verbatim:
/// CSV quoting already delimits the fields, so no punctuation is stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvIngestor;

#[derive(Debug, Deserialize)]
struct CsvRow {
    body: String,
    author: String,
}

impl Ingestor for CsvIngestor {
    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn parse(&self, path: &Path) -> Result<Vec<QuoteModel>, MemeError> {
        self.ensure_ingestible(path)?;

        let mut reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .from_path(path)
            .map_err(|e| csv_error(path, e))?;

        let mut quotes = Vec::new();
        for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
            let row = row.map_err(|e| csv_error(path, e))?;
            if row.body.is_empty() || row.author.is_empty() {
                debug!("Skipping incomplete CSV row {} in {}", line + 2, path.display());
                continue;
            }
            quotes.push(QuoteModel::new(row.body, row.author));
        }
        Ok(quotes)
    }
}

fn csv_error(path: &Path, err: ::csv::Error) -> MemeError {
    let detail = err.to_string();
    match err.into_kind() {
        ::csv::ErrorKind::Io(io) => MemeError::from_io(path, io),
        _ => MemeError::CsvParse {
            path: path.to_path_buf(),
            detail,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parses_body_and_author_columns() {
        let f = csv_file("body,author\nChase the mailman,Skittle\n\"When in doubt, go shoe-shopping\", Mr. Paws \n");
        let quotes = CsvIngestor.parse(f.path()).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0], QuoteModel::new("Chase the mailman", "Skittle"));
        assert_eq!(
            quotes[1],
            QuoteModel::new("When in doubt, go shoe-shopping", "Mr. Paws")
        );
    }

    #[test]
    fn ignores_extra_columns_and_order() {
        let f = csv_file("author,year,body\nRex,2020,Bark\n");
        let quotes = CsvIngestor.parse(f.path()).unwrap();
        assert_eq!(quotes, vec![QuoteModel::new("Bark", "Rex")]);
    }

    #[test]
    fn skips_rows_with_empty_fields() {
        let f = csv_file("body,author\n,Rex\nBark,\nWoof,Fido\n");
        let quotes = CsvIngestor.parse(f.path()).unwrap();
        assert_eq!(quotes, vec![QuoteModel::new("Woof", "Fido")]);
    }

    #[test]
    fn missing_column_is_parse_error() {
        let f = csv_file("quote,who\nBark,Rex\n");
        let err = CsvIngestor.parse(f.path()).unwrap_err();
        assert!(matches!(err, MemeError::CsvParse { .. }), "got: {err}");
    }
}
