//! The quote record shared by every ingestor and the compositor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A quote and its author.
///
/// Immutable once built: ingestors construct it, the compositor only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteModel {
    quote: String,
    author: String,
}

impl QuoteModel {
    pub fn new(quote: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
        }
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

impl fmt::Display for QuoteModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.quote, self.author)
    }
}
