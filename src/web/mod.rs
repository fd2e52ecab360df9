//! Minimal web form for meme generation.
//!
//! Endpoints:
//! - `/`          GET   random image + random quote, rendered as a page
//! - `/create`    GET   form asking for an image URL, a quote and an author
//! - `/create`    POST  compose the submitted meme
//! - `/static/*`  GET   generated memes
//! - `/ping`      GET   health check

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

pub use error::ApiError;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
