//! Image to ASCII art converter, plus the text renderer and border filters
//! that share its palette and font handling.

pub mod border;
pub mod cli;
pub mod dither;
pub mod font;
pub mod grid;
pub mod options;
pub mod palette;
pub mod quantize;
pub mod render;

pub use font::MonoFont;
pub use grid::CellGrid;
pub use render::{RenderOptions, TextRenderer};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Pixel};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsciiArtError {
    #[error("failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: WriteFailure,
    },
    #[error("render error: {0}")]
    Render(String),
    #[error("font error: {0}")]
    Font(String),
}

/// Underlying cause of a failed write: plain I/O or the image encoder.
#[derive(Error, Debug)]
pub enum WriteFailure {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, AsciiArtError>;

/// Default output width in characters
pub const DEFAULT_WIDTH: u32 = 80;

/// Largest canvas or character grid either tool allocates, in cells/pixels.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Convert computed (already rounded) dimensions to `u32`, rejecting anything
/// non-finite, out of range or over [`MAX_CANVAS_PIXELS`].
pub fn checked_canvas(width: f64, height: f64) -> Result<(u32, u32)> {
    let fits = |v: f64| v.is_finite() && v >= 0.0 && v <= u32::MAX as f64;
    if !fits(width) || !fits(height) || width * height > MAX_CANVAS_PIXELS as f64 {
        return Err(AsciiArtError::Render(format!(
            "canvas {width}x{height} exceeds the limit of {MAX_CANVAS_PIXELS} pixels"
        )));
    }
    Ok((width as u32, height as u32))
}

/// Decode an image file, tagging failures with the offending path.
pub fn open_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|source| AsciiArtError::Load {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode an image to `path`, format chosen by the file extension.
pub fn save_image(image: &image::RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image.save(path).map_err(|e| AsciiArtError::Write {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Map every pixel of an already-resized image to a palette glyph, one
/// string per row.
pub fn ascii_rows<P>(image: &ImageBuffer<P, Vec<u8>>) -> Vec<String>
where
    P: Pixel<Subpixel = u8>,
{
    image
        .rows()
        .map(|row| row.map(|px| palette::glyph_for(px.to_rgb())).collect::<String>())
        .collect()
}

/// Image to ASCII converter
pub struct Converter {
    width: u32,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn new() -> Self {
        Self { width: DEFAULT_WIDTH }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Character grid (cols, rows) for an image of the given pixel size.
    ///
    /// Rows are halved to make up for monospace cells being about twice as
    /// tall as they are wide.
    pub fn grid_size(&self, img_w: u32, img_h: u32) -> Result<(u32, u32)> {
        let out_w = self.width as f64;
        let scale = out_w / img_w.max(1) as f64;
        let out_h = (img_h as f64 * scale * palette::CHAR_ASPECT).round().max(1.0);
        checked_canvas(out_w, out_h)
    }

    /// Convert to rows of palette characters.
    pub fn convert_rows(&self, image: &DynamicImage) -> Result<Vec<String>> {
        let (out_w, out_h) = self.grid_size(image.width(), image.height())?;
        log::debug!(
            "resizing {}x{} to {}x{} cells",
            image.width(),
            image.height(),
            out_w,
            out_h
        );

        // Alpha plays no part in luminance
        let resized = imageops::resize(&image.to_rgb8(), out_w, out_h, FilterType::Triangle);
        Ok(ascii_rows(&resized))
    }

    /// Convert to a newline-joined block with a trailing newline.
    pub fn convert(&self, image: &DynamicImage) -> Result<String> {
        Ok(self.convert_rows(image)?.join("\n") + "\n")
    }
}
