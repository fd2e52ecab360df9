//! Pipeline stages for meme composition.
//!
//! Each submodule implements exactly one transformation step, so each is
//! independently testable and [`crate::engine::MemeEngine`] just chains them.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ resize ──▶ caption ──▶ output
//! (URL/path) (Lanczos3) (quote+author) (JPEG)
//! ```
//!
//! 1. [`input`]  : canonicalise the user-supplied path or URL to a local file
//! 2. [`resize`] : decode and scale to the meme width, keeping aspect ratio
//! 3. [`caption`]: pick a random in-bounds position and draw both text lines
//! 4. [`output`] : reserve a unique `meme_*.jpg` name and encode

pub mod caption;
pub mod input;
pub mod output;
pub mod resize;
