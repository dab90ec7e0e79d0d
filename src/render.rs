//! Text to raster rendering with a monospace font.

use crate::font::MonoFont;
use crate::{checked_canvas, AsciiArtError, Result, WriteFailure};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

pub const DEFAULT_FONT_SIZE: u32 = 12;
pub const DEFAULT_PADDING: u32 = 10;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Font size in pixels
    pub font_size: u32,
    /// Uniform margin in pixels
    pub padding: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            padding: DEFAULT_PADDING,
        }
    }
}

/// Split on `\n` / `\r\n`. A final terminator does not open an extra line.
///
/// An empty file yields zero rows, so it renders as padding alone.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Widest line, in characters.
pub fn max_cols(lines: &[&str]) -> usize {
    lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}

pub struct TextRenderer<'a> {
    font: &'a MonoFont,
    options: RenderOptions,
}

impl<'a> TextRenderer<'a> {
    pub fn new(font: &'a MonoFont, options: RenderOptions) -> Self {
        Self { font, options }
    }

    fn px(&self) -> f32 {
        self.options.font_size as f32
    }

    pub fn char_width(&self) -> f32 {
        self.font.char_width(self.px())
    }

    pub fn line_height(&self) -> f32 {
        self.font.line_height(self.px())
    }

    /// Canvas size that fits `lines` plus padding on every side.
    ///
    /// Fails with a render error when the canvas would exceed
    /// [`MAX_CANVAS_PIXELS`](crate::MAX_CANVAS_PIXELS).
    pub fn canvas_size(&self, lines: &[&str]) -> Result<(u32, u32)> {
        let pad = 2.0 * self.options.padding as f64;
        let width = (self.char_width() as f64 * max_cols(lines) as f64 + pad).ceil();
        let height = (self.line_height() as f64 * lines.len() as f64 + pad).ceil();
        checked_canvas(width, height)
    }

    /// Draw `text` black on white, one row per line, top-aligned.
    pub fn render(&self, text: &str) -> Result<RgbImage> {
        let lines = split_lines(text);
        log::debug!(
            "font metrics at {}px: char width {}, line height {}",
            self.options.font_size,
            self.char_width(),
            self.line_height()
        );
        let (width, height) = self.canvas_size(&lines)?;
        if width == 0 || height == 0 {
            return Err(AsciiArtError::Render(format!(
                "empty canvas ({width}x{height})"
            )));
        }
        log::debug!(
            "rendering {} lines, {} cols at {}px into {}x{}",
            lines.len(),
            max_cols(&lines),
            self.options.font_size,
            width,
            height
        );

        let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);
        let pad = self.options.padding as f32;
        let line_height = self.line_height();
        for (i, line) in lines.iter().enumerate() {
            let top = pad + i as f32 * line_height;
            self.font
                .draw_text(&mut canvas, line, pad, top, self.px(), FOREGROUND);
        }
        Ok(canvas)
    }
}

/// PNG-encode a canvas into memory.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| AsciiArtError::Render(format!("PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Write encoded bytes to `path`.
pub fn write_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|e| AsciiArtError::Write {
        path: path.to_path_buf(),
        source: WriteFailure::Io(e),
    })
}
