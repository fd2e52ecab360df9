//! Request handlers.

use crate::pipeline::input;
use crate::quote::QuoteModel;
use axum::{extract::State, Form, Json};
use maud::Markup;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::error::{ApiError, IMAGE_FETCH_FAILED};
use super::state::AppState;
use super::templates;

const MISSING_INFO: &str = "Missing info.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateMemeForm {
    pub image_url: String,
    pub body: String,
    pub author: String,
}

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check.
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /`: a random image captioned with a random quote.
pub async fn meme_rand(State(state): State<Arc<AppState>>) -> Result<Markup, ApiError> {
    let (img, quote) = {
        let mut rng = rand::thread_rng();
        (
            state.images.choose(&mut rng).cloned(),
            state.quotes.choose(&mut rng).cloned(),
        )
    };
    let img = img.ok_or_else(|| ApiError::Internal("no images loaded".into()))?;
    let quote = quote.ok_or_else(|| ApiError::Internal("no quotes loaded".into()))?;

    let path = compose(state.clone(), img, quote).await?;
    Ok(templates::meme_page(&state.meme_url(&path)))
}

/// `GET /create`: the creation form.
pub async fn meme_form() -> Markup {
    templates::meme_form()
}

/// `POST /create`: download the image at `image_url` and caption it.
///
/// Only `http(s)` URLs are accepted; the form never reads server-side files.
pub async fn meme_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateMemeForm>,
) -> Result<Markup, ApiError> {
    let url = form.image_url.trim();
    let body = form.body.trim();
    let author = form.author.trim();
    if url.is_empty() || body.is_empty() || author.is_empty() {
        return Err(ApiError::BadRequest(MISSING_INFO.into()));
    }
    if !input::is_url(url) {
        warn!("Rejected non-URL image source: {}", url);
        return Err(ApiError::BadRequest(IMAGE_FETCH_FAILED.into()));
    }

    let resolved = input::resolve_image(url, state.download_timeout_secs)
        .await
        .map_err(|e| {
            warn!("Image download failed: {}", e);
            ApiError::BadRequest(IMAGE_FETCH_FAILED.into())
        })?;

    let result = compose(
        state.clone(),
        resolved.path().to_path_buf(),
        QuoteModel::new(body, author),
    )
    .await;
    // The downloaded temp file is removed here, success or not.
    drop(resolved);

    let path = result?;
    info!("Created meme from {}", url);
    Ok(templates::meme_page(&state.meme_url(&path)))
}

async fn compose(state: Arc<AppState>, img: PathBuf, quote: QuoteModel) -> Result<PathBuf, ApiError> {
    tokio::task::spawn_blocking(move || {
        let width = state.engine.width();
        state
            .engine
            .make_meme(&img, quote.quote(), quote.author(), width)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Compose task panicked: {}", e)))?
    .map_err(ApiError::from)
}
