//! Configuration types for meme generation.
//!
//! All behaviour is controlled through [`MemeConfig`], built via its
//! [`MemeConfigBuilder`]. Keeping every knob in one struct makes it easy to
//! share a config between the CLI and the web server and to log it on start-up.

use crate::error::MemeError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Widest image the compositor produces, in pixels.
pub const MAX_WIDTH: u32 = 500;

/// Configuration for meme generation.
///
/// Built via [`MemeConfig::builder()`] or using [`MemeConfig::default()`].
///
/// # Example
/// ```rust
/// use memegen::MemeConfig;
///
/// let config = MemeConfig::builder()
///     .width(400)
///     .output_dir("./tmp")
///     .build()
///     .unwrap();
/// assert_eq!(config.width, 400);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemeConfig {
    /// Target width of the resized image in pixels. Range: 1–500. Default: 500.
    ///
    /// The height follows from the source aspect ratio.
    pub width: u32,

    /// Quote font size in pixels. Default: 30.
    ///
    /// Also drives the vertical layout bounds: the quote baseline never sits
    /// closer than `margin + font_size` to the top, nor closer than
    /// `2 * font_size` to the bottom.
    pub font_size: u32,

    /// Author font size as a fraction of `font_size`. Default: 0.8.
    pub author_scale: f32,

    /// Minimum distance between text and the left/top image edge. Default: 10.
    pub margin: u32,

    /// RGB colour of the quote text. Default: `(250, 240, 255)`.
    ///
    /// The author line always gets a random colour.
    pub quote_color: [u8; 3],

    /// TTF/OTF font file. If None, the embedded DejaVu Sans face is used.
    pub font_path: Option<PathBuf>,

    /// Directory generated memes are written to. Default: `./tmp`.
    pub output_dir: PathBuf,

    /// Directory scanned for images when none is given. Default: `./_data/photos/dog`.
    pub images_dir: PathBuf,

    /// Quote documents loaded when no quote body is given.
    pub quote_sources: Vec<PathBuf>,

    /// Download timeout for image URLs in seconds. Default: 30.
    pub download_timeout_secs: u64,
}

impl Default for MemeConfig {
    fn default() -> Self {
        Self {
            width: MAX_WIDTH,
            font_size: 30,
            author_scale: 0.8,
            margin: 10,
            quote_color: [250, 240, 255],
            font_path: None,
            output_dir: PathBuf::from("./tmp"),
            images_dir: PathBuf::from("./_data/photos/dog"),
            quote_sources: default_quote_sources(),
            download_timeout_secs: 30,
        }
    }
}

/// The bundled quote documents, one per supported format.
pub fn default_quote_sources() -> Vec<PathBuf> {
    [
        "./_data/DogQuotes/DogQuotesTXT.txt",
        "./_data/DogQuotes/DogQuotesDOCX.docx",
        "./_data/DogQuotes/DogQuotesCSV.csv",
        "./_data/DogQuotes/DogQuotesPDF.pdf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

impl MemeConfig {
    /// Create a new builder for `MemeConfig`.
    pub fn builder() -> MemeConfigBuilder {
        MemeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Author font size in pixels, truncated like the quote size.
    pub fn author_font_size(&self) -> u32 {
        ((self.font_size as f32 * self.author_scale) as u32).max(1)
    }

    /// Clamp a requested width into the supported range.
    ///
    /// Out-of-range widths fall back to [`MAX_WIDTH`] rather than the nearest
    /// bound, so `0` and `10_000` both produce a 500 px meme.
    pub fn effective_width(requested: u32) -> u32 {
        if requested == 0 || requested > MAX_WIDTH {
            MAX_WIDTH
        } else {
            requested
        }
    }
}

/// Builder for [`MemeConfig`].
#[derive(Debug)]
pub struct MemeConfigBuilder {
    config: MemeConfig,
}

impl MemeConfigBuilder {
    pub fn width(mut self, width: u32) -> Self {
        self.config.width = width;
        self
    }

    pub fn font_size(mut self, px: u32) -> Self {
        self.config.font_size = px;
        self
    }

    pub fn author_scale(mut self, scale: f32) -> Self {
        self.config.author_scale = scale;
        self
    }

    pub fn margin(mut self, px: u32) -> Self {
        self.config.margin = px;
        self
    }

    pub fn quote_color(mut self, rgb: [u8; 3]) -> Self {
        self.config.quote_color = rgb;
        self
    }

    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_path = Some(path.into());
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.images_dir = dir.into();
        self
    }

    pub fn quote_sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.quote_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<MemeConfig, MemeError> {
        let c = &self.config;
        if c.width == 0 || c.width > MAX_WIDTH {
            return Err(MemeError::InvalidConfig(format!(
                "width must be 1–{MAX_WIDTH}, got {}",
                c.width
            )));
        }
        if c.font_size < 8 {
            return Err(MemeError::InvalidConfig(format!(
                "font size must be ≥ 8, got {}",
                c.font_size
            )));
        }
        if !(c.author_scale > 0.0 && c.author_scale <= 1.0) {
            return Err(MemeError::InvalidConfig(format!(
                "author scale must be in (0, 1], got {}",
                c.author_scale
            )));
        }
        if c.download_timeout_secs == 0 {
            return Err(MemeError::InvalidConfig(
                "download timeout must be ≥ 1s".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let c = MemeConfig::default();
        assert_eq!(c.width, 500);
        assert_eq!(c.font_size, 30);
        assert_eq!(c.author_font_size(), 24);
        assert_eq!(c.margin, 10);
        assert_eq!(c.quote_sources.len(), 4);
    }

    #[test]
    fn effective_width_falls_back_to_max() {
        assert_eq!(MemeConfig::effective_width(0), 500);
        assert_eq!(MemeConfig::effective_width(501), 500);
        assert_eq!(MemeConfig::effective_width(1), 1);
        assert_eq!(MemeConfig::effective_width(320), 320);
    }

    #[test]
    fn builder_rejects_bad_width() {
        let err = MemeConfig::builder().width(900).build().unwrap_err();
        assert!(err.to_string().contains("width"), "got: {err}");
    }

    #[test]
    fn builder_rejects_bad_author_scale() {
        assert!(MemeConfig::builder().author_scale(0.0).build().is_err());
        assert!(MemeConfig::builder().author_scale(1.5).build().is_err());
        assert!(MemeConfig::builder().author_scale(f32::NAN).build().is_err());
    }

    #[test]
    fn builder_sets_sources() {
        let c = MemeConfig::builder()
            .quote_sources(["a.txt", "b.csv"])
            .build()
            .unwrap();
        assert_eq!(c.quote_sources, vec![PathBuf::from("a.txt"), PathBuf::from("b.csv")]);
    }
}
