//! Monospace font metrics and glyph drawing on top of fontdue.

use crate::{AsciiArtError, Result};
use fontdue::{Font, FontSettings};
use image::{Rgb, RgbImage};
use std::path::Path;

/// DejaVu Sans Mono, shipped with the binaries.
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Glyph whose advance stands in for the width of every cell.
pub const MEASURE_GLYPH: char = 'M';

pub struct MonoFont {
    font: Font,
}

impl MonoFont {
    pub fn bundled() -> Result<Self> {
        Self::from_bytes(BUNDLED_FONT)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| AsciiArtError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data)
    }

    /// `--font` override if given, bundled face otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    pub fn from_bytes<D>(data: D) -> Result<Self>
    where
        D: std::ops::Deref<Target = [u8]>,
    {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| AsciiArtError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    /// Horizontal advance of one cell at `px`.
    pub fn char_width(&self, px: f32) -> f32 {
        self.font.metrics(MEASURE_GLYPH, px).advance_width
    }

    pub fn line_height(&self, px: f32) -> f32 {
        px * LINE_HEIGHT_FACTOR
    }

    /// Distance from the top of the em box to the baseline.
    pub fn ascent(&self, px: f32) -> f32 {
        self.font
            .horizontal_line_metrics(px)
            .map(|m| m.ascent)
            .unwrap_or(px * 0.8)
    }

    /// Whole-pixel cell size used when laying glyphs on a fixed grid.
    pub fn cell_size(&self, px: f32) -> (u32, u32) {
        (
            self.char_width(px).ceil().max(0.0) as u32,
            self.line_height(px).ceil().max(0.0) as u32,
        )
    }

    /// Draw `ch` with its em box top-left at (`x`, `top`), blending coverage
    /// over whatever is already on the canvas. Off-canvas pixels are clipped.
    pub fn draw_glyph(&self, canvas: &mut RgbImage, ch: char, x: f32, top: f32, px: f32, color: Rgb<u8>) {
        let (metrics, bitmap) = self.font.rasterize(ch, px);
        if metrics.width == 0 || metrics.height == 0 {
            return;
        }

        let baseline = (top + self.ascent(px)).round() as i32;
        let x_offset = x.round() as i32 + metrics.xmin;
        let y_offset = baseline - metrics.height as i32 - metrics.ymin;
        let (width, height) = (canvas.width() as i32, canvas.height() as i32);

        for sy in 0..metrics.height {
            for sx in 0..metrics.width {
                let tx = x_offset + sx as i32;
                let ty = y_offset + sy as i32;
                if tx < 0 || tx >= width || ty < 0 || ty >= height {
                    continue;
                }
                let coverage = bitmap[sy * metrics.width + sx];
                if coverage == 0 {
                    continue;
                }
                let dst = canvas.get_pixel_mut(tx as u32, ty as u32);
                *dst = blend(*dst, color, coverage);
            }
        }
    }

    /// Draw a run of glyphs left to right, one cell advance apart.
    pub fn draw_text(&self, canvas: &mut RgbImage, text: &str, x: f32, top: f32, px: f32, color: Rgb<u8>) {
        let advance = self.char_width(px);
        for (col, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            self.draw_glyph(canvas, ch, x + col as f32 * advance, top, px, color);
        }
    }
}

/// Alpha-blend `fg` over `bg` with 8-bit coverage.
#[inline]
fn blend(bg: Rgb<u8>, fg: Rgb<u8>, alpha: u8) -> Rgb<u8> {
    let a = alpha as u32;
    let mix = |b: u8, f: u8| ((f as u32 * a + b as u32 * (255 - a) + 127) / 255) as u8;
    Rgb([mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])])
}
