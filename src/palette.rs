//! Luminance to character mapping over the fixed density ramp.

use image::Rgb;

/// Density ramp, darkest-looking glyph first.
pub const PALETTE: &[char] = &['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

/// Row scale applied to the target grid; monospace cells are ~2x taller than wide.
pub const CHAR_ASPECT: f64 = 0.5;

// ITU-R BT.709 weights, scaled by 10_000 so indexing stays in integers.
const WEIGHT_R: u64 = 2126;
const WEIGHT_G: u64 = 7152;
const WEIGHT_B: u64 = 722;
const WEIGHT_SUM: u64 = WEIGHT_R + WEIGHT_G + WEIGHT_B;

/// Relative luminance (BT.709) in the 0..=255 range.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64
}

/// Index into a palette of `levels` entries for the given colour.
///
/// Equivalent to `floor(luminance / 255 * (levels - 1))` evaluated exactly,
/// so pure white always lands on the last entry.
#[inline]
pub fn palette_index(r: u8, g: u8, b: u8, levels: usize) -> usize {
    if levels <= 1 {
        return 0;
    }
    let weighted = WEIGHT_R * r as u64 + WEIGHT_G * g as u64 + WEIGHT_B * b as u64;
    let idx = weighted * (levels as u64 - 1) / (255 * WEIGHT_SUM);
    (idx as usize).min(levels - 1)
}

/// Palette glyph for one pixel.
#[inline]
pub fn glyph_for(pixel: Rgb<u8>) -> char {
    let [r, g, b] = pixel.0;
    PALETTE[palette_index(r, g, b, PALETTE.len())]
}
