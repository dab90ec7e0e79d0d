//! ASCII-art borders composited over an image.
//!
//! Masks are built per character cell (255 = overlay, 0 = base) and upscaled
//! nearest-neighbour to the pixel grid before blending.

use crate::font::MonoFont;
use crate::grid::CellGrid;
use crate::quantize::Quantizer;
use crate::{ascii_rows, AsciiArtError, Result};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb, RgbImage};

pub const DEFAULT_BORDER: u32 = 10;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// `v * 255 / fade`, ties to even, clamped to a mask value.
fn ramp(v: u32, fade: u32) -> u8 {
    let m = (v as f64 * 255.0 / fade as f64).round_ties_even();
    m.clamp(0.0, 255.0) as u8
}

/// Fit the cell grid for `font` at `font_size` into `image`.
pub fn fit_grid(image: &RgbImage, font: &MonoFont, font_size: u32) -> Result<CellGrid> {
    let (cell_w, cell_h) = font.cell_size(font_size as f32);
    let grid = CellGrid::fit(image.width(), image.height(), cell_w, cell_h)?;
    log::debug!(
        "cell grid {}x{} of {}x{} px",
        grid.cols,
        grid.rows,
        grid.cell_w,
        grid.cell_h
    );
    Ok(grid)
}

/// Full-size ASCII rendition of `image`: one glyph per cell, black on white.
pub fn ascii_canvas(image: &RgbImage, grid: &CellGrid, font: &MonoFont, font_size: u32) -> RgbImage {
    let thumb = imageops::resize(image, grid.cols, grid.rows, FilterType::Triangle);
    let rows = ascii_rows(&thumb);

    let mut canvas = RgbImage::from_pixel(image.width(), image.height(), WHITE);
    for (row, line) in rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let (px, py) = grid.origin(col as u32, row as u32);
            font.draw_glyph(&mut canvas, ch, px as f32, py as f32, font_size as f32, INK);
        }
    }
    canvas
}

/// Single-band border mask: solid for `border - fade` cells, then a linear
/// ramp down to zero at `border`.
pub fn fade_mask(grid: &CellGrid, border: u32, fade: u32) -> GrayImage {
    let fade = fade.min(border);
    GrayImage::from_fn(grid.cols, grid.rows, |x, y| {
        let d = grid.edge_distance(x, y);
        let m = if d >= border {
            0
        } else if d < border - fade {
            255
        } else {
            ramp(border - d, fade)
        };
        Luma([m])
    })
}

/// Nearest-neighbour upscale of a cell mask to pixel size.
pub fn upscale_mask(mask: &GrayImage, width: u32, height: u32) -> GrayImage {
    imageops::resize(mask, width, height, FilterType::Nearest)
}

/// Blend `fg` over `bg` where `mask` is the per-pixel alpha of `fg`.
pub fn composite(fg: &RgbImage, bg: &RgbImage, mask: &GrayImage) -> Result<RgbImage> {
    if fg.dimensions() != bg.dimensions() || fg.dimensions() != mask.dimensions() {
        return Err(AsciiArtError::Render(format!(
            "composite size mismatch: {:?} over {:?} with mask {:?}",
            fg.dimensions(),
            bg.dimensions(),
            mask.dimensions()
        )));
    }
    Ok(RgbImage::from_fn(fg.width(), fg.height(), |x, y| {
        let a = mask.get_pixel(x, y)[0] as u32;
        let f = fg.get_pixel(x, y);
        let b = bg.get_pixel(x, y);
        let mix = |ch: usize| ((f[ch] as u32 * a + b[ch] as u32 * (255 - a) + 127) / 255) as u8;
        Rgb([mix(0), mix(1), mix(2)])
    }))
}

/// Whether pixel (x, y) lies inside a `width × height` rectangle with corners
/// rounded to `radius`.
fn inside_rounded_rect(x: u32, y: u32, width: u32, height: u32, radius: f64) -> bool {
    let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
    let (w, h) = (width as f64, height as f64);
    let cx = if px < radius {
        radius
    } else if px > w - radius {
        w - radius
    } else {
        return true;
    };
    let cy = if py < radius {
        radius
    } else if py > h - radius {
        h - radius
    } else {
        return true;
    };
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

/// Paint everything outside the rounded outline white.
pub fn round_corners(image: &mut RgbImage, radius_px: u32) {
    let (w, h) = image.dimensions();
    let radius = (radius_px as f64).min(w as f64 / 2.0).min(h as f64 / 2.0);
    if radius <= 0.0 {
        return;
    }
    for (x, y, px) in image.enumerate_pixels_mut() {
        if !inside_rounded_rect(x, y, w, h, radius) {
            *px = WHITE;
        }
    }
}

/// ASCII border fading into the untouched original.
#[derive(Debug, Clone, Copy)]
pub struct AsciiBorder {
    pub border: u32,
    /// Fade width in cells; defaults to `border`
    pub fade: Option<u32>,
    pub font_size: u32,
}

impl Default for AsciiBorder {
    fn default() -> Self {
        Self {
            border: DEFAULT_BORDER,
            fade: None,
            font_size: crate::render::DEFAULT_FONT_SIZE,
        }
    }
}

impl AsciiBorder {
    pub fn apply(&self, image: &RgbImage, font: &MonoFont) -> Result<RgbImage> {
        let grid = fit_grid(image, font, self.font_size)?;
        let canvas = ascii_canvas(image, &grid, font, self.font_size);
        let fade = self.fade.unwrap_or(self.border);
        let mask = fade_mask(&grid, self.border, fade);
        let mask = upscale_mask(&mask, image.width(), image.height());
        composite(&canvas, image, &mask)
    }
}

/// Which corner square a cell falls in, as the cell-centre offset from the
/// arc centre; `None` outside all four corners.
fn corner_offset(x: u32, y: u32, cols: u32, rows: u32, reach: u32) -> Option<(f64, f64)> {
    let left = x < reach;
    let right = x >= cols.saturating_sub(reach);
    let top = y < reach;
    let bottom = y >= rows.saturating_sub(reach);

    let dx = if left {
        reach as f64 - x as f64 - 0.5
    } else if right {
        x as f64 - (cols - reach) as f64 + 0.5
    } else {
        return None;
    };
    let dy = if top {
        reach as f64 - y as f64 - 0.5
    } else if bottom {
        y as f64 - (rows - reach) as f64 + 0.5
    } else {
        return None;
    };
    Some((dx, dy))
}

fn outside_arc(offset: Option<(f64, f64)>, radius: u32) -> bool {
    let r = radius as f64;
    offset.is_some_and(|(dx, dy)| dx * dx + dy * dy > r * r)
}

/// ASCII border, a palette-quantized middle band, then the original centre.
#[derive(Debug, Clone, Copy)]
pub struct LayeredBorder {
    pub border: u32,
    /// Quantized band thickness; defaults to `border`
    pub quant: Option<u32>,
    /// ASCII→8-bit fade; defaults to `border`
    pub fade_ascii: Option<u32>,
    /// 8-bit→original fade; defaults to the quantized band thickness
    pub fade_quant: Option<u32>,
    /// Corner radius in cells, clamped to `border`
    pub radius: u32,
    pub font_size: u32,
    pub colors: u16,
    pub dither: bool,
}

impl Default for LayeredBorder {
    fn default() -> Self {
        Self {
            border: DEFAULT_BORDER,
            quant: None,
            fade_ascii: None,
            fade_quant: None,
            radius: 0,
            font_size: crate::render::DEFAULT_FONT_SIZE,
            colors: crate::quantize::DEFAULT_COLORS,
            dither: false,
        }
    }
}

impl LayeredBorder {
    /// Cell masks for the ASCII layer and the quantized layer.
    pub fn masks(&self, grid: &CellGrid) -> Result<(GrayImage, GrayImage)> {
        let bc = self.border;
        let qc = self.quant.unwrap_or(bc);
        let fade_a = self.fade_ascii.unwrap_or(bc);
        let fade_q = self.fade_quant.unwrap_or(qc);
        if bc + qc > grid.max_band() {
            return Err(AsciiArtError::Render(
                "combined border exceeds image size".into(),
            ));
        }
        let rr = self.radius.min(bc);
        let (cols, rows) = (grid.cols, grid.rows);

        let ascii = GrayImage::from_fn(cols, rows, |x, y| {
            let d = grid.edge_distance(x, y);
            let mut m = if fade_a > 0 {
                if d + fade_a <= bc {
                    255
                } else if d < bc {
                    ramp(bc - d, fade_a)
                } else {
                    0
                }
            } else if d < bc {
                255
            } else {
                0
            };
            if rr > 0 && outside_arc(corner_offset(x, y, cols, rows, rr), rr) {
                m = 255;
            }
            Luma([m])
        });

        let quant = GrayImage::from_fn(cols, rows, |x, y| {
            let d = grid.edge_distance(x, y);
            let mut m = if d < bc {
                0
            } else if fade_a > 0 && d < bc + fade_a {
                ramp(d - bc, fade_a)
            } else if d + fade_q <= bc + qc {
                255
            } else if fade_q > 0 && d < bc + qc {
                ramp(bc + qc - d, fade_q)
            } else {
                0
            };
            if rr > 0 && m > 0 && outside_arc(corner_offset(x, y, cols, rows, bc + rr), rr) {
                m = 0;
            }
            Luma([m])
        });

        Ok((ascii, quant))
    }

    pub fn apply(&self, image: &RgbImage, font: &MonoFont) -> Result<RgbImage> {
        let grid = fit_grid(image, font, self.font_size)?;
        let (ascii_mask, quant_mask) = self.masks(&grid)?;

        let canvas = ascii_canvas(image, &grid, font, self.font_size);
        let quantized = Quantizer::new(self.colors)
            .with_dither(self.dither)
            .quantize(image);

        let (w, h) = image.dimensions();
        let base = composite(&quantized, image, &upscale_mask(&quant_mask, w, h))?;
        let mut result = composite(&canvas, &base, &upscale_mask(&ascii_mask, w, h))?;

        let rr = self.radius.min(self.border);
        if rr > 0 {
            round_corners(&mut result, rr * grid.cell_w);
        }
        Ok(result)
    }
}
