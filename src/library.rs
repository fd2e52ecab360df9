//! Quote and image catalogues loaded from disk.
//!
//! Sources are ingested concurrently on the blocking pool. One unreadable
//! document should not take the whole catalogue down, so per-source failures
//! are logged and kept as [`SourceError`]s; loading only fails when nothing
//! at all was found.

use crate::error::{MemeError, SourceError};
use crate::ingest;
use crate::quote::QuoteModel;
use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Image extensions picked up by [`list_images`].
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Every quote loaded from a set of sources.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuoteLibrary {
    pub quotes: Vec<QuoteModel>,
    /// Sources that could not be ingested.
    pub failures: Vec<SourceError>,
}

impl QuoteLibrary {
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// A uniformly random quote, or `None` when the library is empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&QuoteModel> {
        self.quotes.choose(rng)
    }
}

/// Ingest every source, tolerating individual failures.
///
/// Quotes keep source order. Fails with [`MemeError::NoQuotes`] when the
/// combined result is empty.
pub async fn load_quotes(sources: &[PathBuf]) -> Result<QuoteLibrary, MemeError> {
    let tasks = sources.iter().cloned().map(|path| async move {
        let result = tokio::task::spawn_blocking({
            let path = path.clone();
            move || ingest::parse(&path)
        })
        .await
        .unwrap_or_else(|e| Err(MemeError::Internal(format!("Ingest task panicked: {}", e))));
        (path, result)
    });

    let mut library = QuoteLibrary::default();
    for (path, result) in join_all(tasks).await {
        match result {
            Ok(quotes) => library.quotes.extend(quotes),
            Err(e) => {
                warn!("Skipping quote source {}: {}", path.display(), e);
                library.failures.push(SourceError {
                    path,
                    detail: e.to_string(),
                });
            }
        }
    }

    if library.is_empty() {
        return Err(MemeError::NoQuotes {
            sources: sources.len(),
        });
    }

    info!(
        "Loaded {} quotes from {} sources ({} failed)",
        library.len(),
        sources.len(),
        library.failures.len()
    );
    Ok(library)
}

/// Recursively list JPEG/PNG files under `dir`, sorted by path.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, MemeError> {
    if !dir.is_dir() {
        return Err(MemeError::NoImages {
            dir: dir.to_path_buf(),
        });
    }

    let mut images: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), err);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_image(e.path()))
        .map(|e| e.into_path())
        .collect();
    images.sort();

    if images.is_empty() {
        return Err(MemeError::NoImages {
            dir: dir.to_path_buf(),
        });
    }
    Ok(images)
}

fn is_image(path: &Path) -> bool {
    ingest::extension_of(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
