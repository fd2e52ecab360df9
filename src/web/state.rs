//! Application state shared by every handler.

use crate::config::MemeConfig;
use crate::engine::MemeEngine;
use crate::error::MemeError;
use crate::library::{list_images, load_quotes, QuoteLibrary};
use std::path::{Path, PathBuf};
use tracing::info;

/// Catalogues and compositor, loaded once at startup.
pub struct AppState {
    /// Writes into the directory served under `/static`.
    pub engine: MemeEngine,
    pub quotes: QuoteLibrary,
    pub images: Vec<PathBuf>,
    pub download_timeout_secs: u64,
}

impl AppState {
    /// Load quotes and images from `config`; memes go to `static_dir`.
    pub async fn load(config: &MemeConfig, static_dir: &Path) -> Result<Self, MemeError> {
        let quotes = load_quotes(&config.quote_sources).await?;
        let images = list_images(&config.images_dir)?;
        let engine = MemeEngine::new(config)?.with_output_dir(static_dir);
        info!(
            "Web state ready: {} quotes, {} images, memes in {}",
            quotes.len(),
            images.len(),
            static_dir.display()
        );
        Ok(Self {
            engine,
            quotes,
            images,
            download_timeout_secs: config.download_timeout_secs,
        })
    }

    /// Public URL of a meme written by [`AppState::engine`].
    pub fn meme_url(&self, path: &Path) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("/static/{}", name)
    }
}
