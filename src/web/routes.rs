//! Route table.
//!
//! - /          GET   random meme
//! - /create    GET   creation form
//! - /create    POST  create meme from form
//! - /static/*  GET   generated memes
//! - /ping      GET   health check

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

pub fn create_routes(static_dir: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::meme_rand))
        .route("/create", get(handlers::meme_form).post(handlers::meme_post))
        .route("/ping", get(handlers::ping))
        .nest_service("/static", ServeDir::new(static_dir))
}
