//! # memegen
//!
//! Caption images with quotes ingested from TXT, CSV, DOCX and PDF files.
//!
//! ## Pipeline Overview
//!
//! ```text
//! quote files ─┐
//!              ├─ 1. Ingest   dispatch on extension, normalise to QuoteModel
//!              ├─ 2. Pick     random quote + random image (or a given path/URL)
//!              ├─ 3. Input    resolve local file or download from URL
//!              ├─ 4. Resize   proportional, at most 500 px wide
//!              ├─ 5. Caption  quote + author at a random position that never clips
//!              └─ 6. Output   JPEG with a random file name
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use memegen::{generate_meme, MemeConfig, MemeRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MemeConfig::builder()
//!         .images_dir("./_data/photos/dog")
//!         .output_dir("./tmp")
//!         .build()?;
//!     let request = MemeRequest {
//!         body: Some("Stay pawsitive".into()),
//!         author: Some("Rex".into()),
//!         ..Default::default()
//!     };
//!     let meme = generate_meme(&request, &config).await?;
//!     println!("{}", meme.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `cli`    | on      | The `memegen` binary (clap + anyhow + tracing-subscriber) |
//! | `server` | on      | The web form (axum + tower-http + maud) |
//!
//! Disable both when using only the library:
//! ```toml
//! memegen = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod engine;
pub mod error;
pub mod generate;
pub mod ingest;
pub mod library;
pub mod pipeline;
pub mod quote;

#[cfg(feature = "server")]
pub mod web;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{MemeConfig, MemeConfigBuilder};
pub use engine::MemeEngine;
pub use error::{MemeError, SourceError};
pub use generate::{generate_meme, MemeOutput, MemeRequest};
pub use ingest::{parse, Ingestor, SourceFormat};
pub use library::{list_images, load_quotes, QuoteLibrary};
pub use quote::QuoteModel;
