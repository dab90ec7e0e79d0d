//! Median-cut palette reduction ("8-bit" look).

use crate::dither;
use image::{Rgb, RgbImage};
use std::collections::HashMap;

/// Palette size of a classic 8-bit indexed image.
pub const DEFAULT_COLORS: u16 = 256;

/// One median-cut box: distinct colours with their pixel counts.
struct ColorBox {
    entries: Vec<([u8; 3], u32)>,
}

impl ColorBox {
    fn channel_range(&self, channel: usize) -> u8 {
        let (lo, hi) = self
            .entries
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), (c, _)| (lo.min(c[channel]), hi.max(c[channel])));
        hi.saturating_sub(lo)
    }

    /// Widest channel and its range.
    fn widest(&self) -> (usize, u8) {
        (0..3)
            .map(|ch| (ch, self.channel_range(ch)))
            .max_by_key(|&(ch, range)| (range, std::cmp::Reverse(ch)))
            .unwrap_or((0, 0))
    }

    fn population(&self) -> u64 {
        self.entries.iter().map(|&(_, n)| n as u64).sum()
    }

    /// Split at the population-weighted median along the widest channel.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest();
        self.entries.sort_by_key(|&(c, _)| (c[channel], c));

        let half = self.population() / 2;
        let mut running = 0u64;
        let mut at = self.entries.len();
        for (i, &(_, n)) in self.entries.iter().enumerate() {
            running += n as u64;
            if running >= half {
                at = i + 1;
                break;
            }
        }
        let at = at.clamp(1, self.entries.len() - 1);
        let upper = self.entries.split_off(at);
        (self, ColorBox { entries: upper })
    }

    fn mean(&self) -> Rgb<u8> {
        let total = self.population().max(1);
        let mut sum = [0u64; 3];
        for &(c, n) in &self.entries {
            for ch in 0..3 {
                sum[ch] += c[ch] as u64 * n as u64;
            }
        }
        Rgb(sum.map(|s| ((s + total / 2) / total) as u8))
    }
}

/// Build a palette of at most `colors` entries by median cut.
///
/// Images with no more distinct colours than `colors` get them back exactly.
pub fn median_cut(image: &RgbImage, colors: u16) -> Vec<Rgb<u8>> {
    let colors = colors.max(1) as usize;

    let mut histogram: HashMap<[u8; 3], u32> = HashMap::new();
    for px in image.pixels() {
        *histogram.entry(px.0).or_insert(0) += 1;
    }
    if histogram.is_empty() {
        return Vec::new();
    }
    let mut entries: Vec<_> = histogram.into_iter().collect();
    entries.sort_unstable();

    let mut boxes = vec![ColorBox { entries }];
    while boxes.len() < colors {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.entries.len() > 1)
            .max_by_key(|(_, b)| (b.widest().1, b.population()))
            .map(|(i, _)| i);
        let Some(i) = candidate else { break };
        let (lo, hi) = boxes.swap_remove(i).split();
        boxes.push(lo);
        boxes.push(hi);
    }

    log::debug!("median cut produced {} colours", boxes.len());
    boxes.iter().map(ColorBox::mean).collect()
}

/// Index of the palette entry closest to `color`.
pub fn nearest(palette: &[Rgb<u8>], color: [f32; 3]) -> usize {
    palette
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let d: f32 = (0..3)
                .map(|ch| {
                    let diff = p[ch] as f32 - color[ch];
                    diff * diff
                })
                .sum();
            (i, d)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Replace every pixel by its nearest palette colour.
pub fn remap(image: &RgbImage, palette: &[Rgb<u8>]) -> RgbImage {
    if palette.is_empty() {
        return image.clone();
    }
    let mut cache: HashMap<[u8; 3], Rgb<u8>> = HashMap::new();
    let mut out = image.clone();
    for px in out.pixels_mut() {
        let key = px.0;
        *px = *cache
            .entry(key)
            .or_insert_with(|| palette[nearest(palette, key.map(f32::from))]);
    }
    out
}

/// Median-cut quantizer with optional Floyd–Steinberg dithering.
pub struct Quantizer {
    colors: u16,
    dither: bool,
}

impl Default for Quantizer {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS)
    }
}

impl Quantizer {
    pub fn new(colors: u16) -> Self {
        Self { colors: colors.max(1), dither: false }
    }

    pub fn with_dither(mut self, enabled: bool) -> Self {
        self.dither = enabled;
        self
    }

    pub fn quantize(&self, image: &RgbImage) -> RgbImage {
        let palette = median_cut(image, self.colors);
        if self.dither {
            dither::dither_floyd_steinberg(image, &palette)
        } else {
            remap(image, &palette)
        }
    }
}
