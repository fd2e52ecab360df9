//! One-shot meme generation: pick an image and a quote, then compose.
//!
//! This is the library form of `memegen generate`. Anything the request
//! leaves out is filled from the configured catalogues:
//!
//! | Request field | When absent |
//! |---------------|-------------|
//! | `images` | random image under `config.images_dir` |
//! | `body` | random quote from `config.quote_sources` |
//! | `author` | required whenever `body` is given |

use crate::config::MemeConfig;
use crate::engine::MemeEngine;
use crate::error::MemeError;
use crate::library::{list_images, load_quotes};
use crate::pipeline::input;
use crate::quote::QuoteModel;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What the caller wants on the meme.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemeRequest {
    /// Candidate images (paths or URLs); one is picked at random.
    pub images: Vec<String>,
    /// Quote text. Requires `author`.
    pub body: Option<String>,
    pub author: Option<String>,
    /// Target width; falls back to `config.width`.
    pub width: Option<u32>,
}

/// A generated meme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemeOutput {
    /// Path of the written JPEG.
    pub path: PathBuf,
    /// The quote that was drawn.
    pub quote: QuoteModel,
    /// The image source that was used (path or URL).
    pub image: String,
    pub duration_ms: u64,
}

/// Generate a meme according to `request`, filling gaps from `config`.
///
/// # Errors
/// - [`MemeError::AuthorRequired`]: `body` given without `author`
/// - [`MemeError::NoImages`] / [`MemeError::NoQuotes`]: nothing to pick from
/// - any input, decode or write error from the composition
pub async fn generate_meme(
    request: &MemeRequest,
    config: &MemeConfig,
) -> Result<MemeOutput, MemeError> {
    let start = Instant::now();
    let mut rng = StdRng::from_entropy();

    // ── Step 1: Resolve the quote ────────────────────────────────────────
    // Validated first: a missing author should not cost a quote-file scan.
    let quote = match (&request.body, &request.author) {
        (Some(body), Some(author)) => QuoteModel::new(body.as_str(), author.as_str()),
        (Some(_), None) => return Err(MemeError::AuthorRequired),
        (None, author) => {
            if author.is_some() {
                warn!("--author given without --body; picking a random quote instead");
            }
            let library = load_quotes(&config.quote_sources).await?;
            library
                .choose(&mut rng)
                .cloned()
                .ok_or_else(|| MemeError::NoQuotes {
                    sources: config.quote_sources.len(),
                })?
        }
    };
    debug!("Quote: {}", quote);

    // ── Step 2: Pick the image ───────────────────────────────────────────
    let image = if request.images.is_empty() {
        let images = list_images(&config.images_dir)?;
        images
            .choose(&mut rng)
            .map(|p| p.to_string_lossy().into_owned())
            .ok_or_else(|| MemeError::NoImages {
                dir: config.images_dir.clone(),
            })?
    } else {
        request
            .images
            .choose(&mut rng)
            .cloned()
            .ok_or_else(|| MemeError::InvalidInput {
                input: String::new(),
            })?
    };
    info!("Using image: {}", image);

    // ── Step 3: Compose ──────────────────────────────────────────────────
    let resolved = input::resolve_image(&image, config.download_timeout_secs).await?;
    let engine = Arc::new(MemeEngine::new(config)?);
    let width = request.width.unwrap_or(config.width);

    let img_path = resolved.path().to_path_buf();
    let (body, author) = (quote.quote().to_string(), quote.author().to_string());
    let path = tokio::task::spawn_blocking(move || engine.make_meme(&img_path, &body, &author, width))
        .await
        .map_err(|e| MemeError::Internal(format!("Compose task panicked: {}", e)))??;

    // `resolved` (and any downloaded temp file) lives until here.
    drop(resolved);

    Ok(MemeOutput {
        path,
        quote,
        image,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
