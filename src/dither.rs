//! Floyd–Steinberg dithering against a fixed colour palette.

use crate::quantize::nearest;
use image::{Rgb, RgbImage};

/// Floyd–Steinberg error diffusion, row-major, onto `palette`.
/// Every output pixel is a palette entry.
pub fn dither_floyd_steinberg(image: &RgbImage, palette: &[Rgb<u8>]) -> RgbImage {
    let (w, h) = image.dimensions();
    if palette.is_empty() || w == 0 || h == 0 {
        return image.clone();
    }

    // Working buffer accumulates diffused error per channel
    let mut errors: Vec<[f32; 3]> = image.pixels().map(|p| p.0.map(f32::from)).collect();
    let mut output = RgbImage::new(w, h);
    let width = w as usize;

    for y in 0..h {
        for x in 0..w {
            let idx = y as usize * width + x as usize;
            let old = errors[idx].map(|v| v.clamp(0.0, 255.0));
            let new = palette[nearest(palette, old)];
            output.put_pixel(x, y, new);

            let e = [
                old[0] - new[0] as f32,
                old[1] - new[1] as f32,
                old[2] - new[2] as f32,
            ];
            let mut spread = |target: usize, weight: f32| {
                for ch in 0..3 {
                    errors[target][ch] += e[ch] * weight;
                }
            };

            // 7/16 right, 3/16 below-left, 5/16 below, 1/16 below-right
            if x + 1 < w {
                spread(idx + 1, 7.0 / 16.0);
            }
            if y + 1 < h {
                let row = idx + width;
                if x > 0 {
                    spread(row - 1, 3.0 / 16.0);
                }
                spread(row, 5.0 / 16.0);
                if x + 1 < w {
                    spread(row + 1, 1.0 / 16.0);
                }
            }
        }
    }

    output
}
