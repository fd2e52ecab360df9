//! Caption layout and drawing.
//!
//! Two text blocks are drawn: the quote, with its baseline at `y`, and the
//! author line `- <author>` directly below it, its top at `y + 5`. The left
//! edge `x` and the baseline `y` are drawn uniformly from the range that keeps
//! the wider of the two lines inside the image.
//!
//! ```text
//!   margin ┐
//!          ▼
//!   ┌────────────────────────────┐
//!   │  ▲ margin + font_size       │
//!   │  x,y ─▶ Quote text here     │  baseline at y
//!   │         - Author            │  top at y + 5
//!   │  ▼ 2 × font_size            │
//!   └────────────────────────────┘
//! ```

use crate::config::MemeConfig;
use crate::error::MemeError;
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::debug;

/// DejaVu Sans, shipped so captions render without any system fonts.
static EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Gap between the quote baseline and the top of the author line.
const AUTHOR_GAP: i32 = 5;

/// Where the caption landed and which colour the author line got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub author_color: Rgb<u8>,
}

/// Pick the quote anchor `(x, y)`.
///
/// `x` lies in `margin..=img_w - text_width` and `y` in
/// `margin + font_size..=img_h - 2 * font_size`; when a range is empty the
/// lower bound is used, so text that cannot fit starts at the margin.
pub fn place_text<R: Rng + ?Sized>(
    img_w: u32,
    img_h: u32,
    text_width: u32,
    margin: u32,
    font_size: u32,
    rng: &mut R,
) -> (i32, i32) {
    let margin = margin as i64;
    let font_size = font_size as i64;

    let max_x = margin.max(img_w as i64 - text_width as i64);
    let min_y = margin + font_size;
    let max_y = min_y.max(img_h as i64 - 2 * font_size);

    let x = if max_x > margin {
        rng.gen_range(margin..=max_x)
    } else {
        margin
    };
    let y = if max_y > min_y {
        rng.gen_range(min_y..=max_y)
    } else {
        min_y
    };

    (x as i32, y as i32)
}

/// Draws quote + author captions with a preloaded font.
#[derive(Clone)]
pub struct Captioner {
    font: FontArc,
    quote_scale: PxScale,
    author_scale: PxScale,
    font_size: u32,
    margin: u32,
    quote_color: Rgb<u8>,
}

impl std::fmt::Debug for Captioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Captioner")
            .field("font_size", &self.font_size)
            .field("author_scale", &self.author_scale)
            .field("margin", &self.margin)
            .field("quote_color", &self.quote_color)
            .finish()
    }
}

impl Captioner {
    /// Load the configured font (or the embedded one) and fix the sizes.
    pub fn new(config: &MemeConfig) -> Result<Self, MemeError> {
        let font = match config.font_path {
            Some(ref path) => load_font(path)?,
            None => FontArc::try_from_slice(EMBEDDED_FONT).map_err(|e| MemeError::FontLoad {
                path: PathBuf::from("<embedded DejaVuSans.ttf>"),
                detail: e.to_string(),
            })?,
        };

        Ok(Self {
            font,
            quote_scale: PxScale::from(config.font_size as f32),
            author_scale: PxScale::from(config.author_font_size() as f32),
            font_size: config.font_size,
            margin: config.margin,
            quote_color: Rgb(config.quote_color),
        })
    }

    /// Rendered width of the quote and author lines, whichever is wider.
    pub fn text_width(&self, quote: &str, author: &str) -> u32 {
        let (quote_w, _) = text_size(self.quote_scale, &self.font, quote);
        let (author_w, _) = text_size(self.author_scale, &self.font, &author_line(author));
        quote_w.max(author_w)
    }

    /// Draw both lines onto `img` at a random position, in place.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        img: &mut RgbImage,
        quote: &str,
        author: &str,
        rng: &mut R,
    ) -> Placement {
        let text_width = self.text_width(quote, author);
        let (x, y) = place_text(
            img.width(),
            img.height(),
            text_width,
            self.margin,
            self.font_size,
            rng,
        );

        // imageproc positions glyphs by the top of the line box; shift up by
        // the ascent so `y` is the quote baseline.
        let ascent = self.font.as_scaled(self.quote_scale).ascent().round() as i32;
        draw_text_mut(img, self.quote_color, x, y - ascent, self.quote_scale, &self.font, quote);

        let author_color = Rgb([rng.gen(), rng.gen(), rng.gen()]);
        draw_text_mut(
            img,
            author_color,
            x,
            y + AUTHOR_GAP,
            self.author_scale,
            &self.font,
            &author_line(author),
        );

        debug!(
            "Caption at ({}, {}) width {}px, author colour {:?}",
            x, y, text_width, author_color.0
        );

        Placement { x, y, author_color }
    }
}

fn author_line(author: &str) -> String {
    format!("- {author}")
}

fn load_font(path: &Path) -> Result<FontArc, MemeError> {
    let bytes = std::fs::read(path).map_err(|e| MemeError::FontLoad {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    FontArc::try_from_vec(bytes).map_err(|e| MemeError::FontLoad {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}
