//! The meme compositor: resize an image and caption it with a quote.

use crate::config::MemeConfig;
use crate::error::MemeError;
use crate::pipeline::caption::{Captioner, Placement};
use crate::pipeline::{output, resize};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::info;

/// Composes memes into a fixed output directory.
///
/// Fonts are loaded once in [`MemeEngine::new`]; the engine is cheap to share
/// behind an `Arc` and every call is independent.
#[derive(Debug, Clone)]
pub struct MemeEngine {
    captioner: Captioner,
    output_dir: PathBuf,
    width: u32,
}

impl MemeEngine {
    pub fn new(config: &MemeConfig) -> Result<Self, MemeError> {
        Ok(Self {
            captioner: Captioner::new(config)?,
            output_dir: config.output_dir.clone(),
            width: config.width,
        })
    }

    /// Same engine, writing somewhere else.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Default width from the config this engine was built with.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Resize `img_path` to `width`, caption it with `text` and `author`,
    /// and return the path of the written JPEG.
    pub fn make_meme(
        &self,
        img_path: &Path,
        text: &str,
        author: &str,
        width: u32,
    ) -> Result<PathBuf, MemeError> {
        self.make_meme_with_rng(img_path, text, author, width, &mut rand::thread_rng())
            .map(|(path, _)| path)
    }

    /// [`make_meme`](Self::make_meme) with an explicit random source, also
    /// returning where the caption was placed.
    pub fn make_meme_with_rng<R: Rng + ?Sized>(
        &self,
        img_path: &Path,
        text: &str,
        author: &str,
        width: u32,
        rng: &mut R,
    ) -> Result<(PathBuf, Placement), MemeError> {
        let mut img = resize::load_and_resize(img_path, width)?;
        let placement = self.captioner.draw(&mut img, text, author, rng);
        let path = output::write_meme(&img, &self.output_dir)?;
        info!("Meme written to {}", path.display());
        Ok((path, placement))
    }
}
