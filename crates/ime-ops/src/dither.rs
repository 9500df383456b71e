//! Floyd-Steinberg error-diffusion dithering to black and white.
//!
//! The intensity `(R + G + B) / 3` of each pixel is thresholded at 127 in
//! row-major order. The quantisation error is pushed onto unvisited
//! neighbours of the working intensity buffer:
//!
//! ```text
//!          *    7/16
//!   3/16  5/16  1/16
//! ```
//!
//! Shares use integer division, so they truncate toward zero.

use ime_core::{Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::split::{SplitPercent, cut};
use crate::OpsResult;

/// Threshold above which a pixel becomes white.
pub const THRESHOLD: i32 = 127;

/// Dithers the intensity of the whole image. Output alpha is 255.
pub fn dither_full(image: &Image) -> Image {
    let (width, height) = image.dimensions();
    trace!(width, height, "dither");

    let mut buf: Vec<i32> = image.pixels().iter().map(|p| (p.r + p.g + p.b) / 3).collect();
    let mut out = vec![0i32; buf.len()];

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let old = buf[i];
            let new = if old > THRESHOLD { 255 } else { 0 };
            out[i] = new;
            let err = old - new;

            let mut spread = |dy: usize, dx: isize, share: i32| {
                let ny = y + dy;
                let nx = x as isize + dx;
                if ny < height && nx >= 0 && (nx as usize) < width {
                    buf[ny * width + nx as usize] += err * share / 16;
                }
            };
            spread(0, 1, 7);
            spread(1, -1, 3);
            spread(1, 0, 5);
            spread(1, 1, 1);
        }
    }

    image.map_indexed(|y, x, _| Pixel::gray(out[y * width + x], 255))
}

/// Dithers the image left of the split; the rest is the source.
///
/// Unlike the other split-capable filters there is no divider column. The
/// dithered side keeps the source alpha.
pub fn dither(image: &Image, split: SplitPercent) -> OpsResult<Image> {
    let dithered = dither_full(image);
    cut(image, &dithered, split)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(rows: &[&[i32]]) -> Image {
        let rows: Vec<Vec<Pixel>> = rows
            .iter()
            .map(|r| r.iter().map(|&v| Pixel::gray(v, 255)).collect())
            .collect();
        Image::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_reference() {
        let out = dither(&gray(&[&[100, 150], &[200, 50]]), SplitPercent::FULL).unwrap();
        assert_eq!(out, gray(&[&[0, 255], &[255, 0]]));
    }

    #[test]
    fn test_half_split_has_no_divider() {
        let out = dither(&gray(&[&[100, 150], &[200, 50]]), SplitPercent::new(50).unwrap()).unwrap();
        assert_eq!(out, gray(&[&[0, 150], &[255, 50]]));
    }

    #[test]
    fn test_output_is_binary() {
        let img = Image::from_fn(7, 5, |y, x| Pixel::rgb((x * 37) as i32 % 256, (y * 51) as i32 % 256, 90)).unwrap();
        let out = dither_full(&img);
        for p in out.pixels() {
            assert!(p.r == 0 || p.r == 255);
            assert_eq!(p.r, p.g);
            assert_eq!(p.g, p.b);
        }
    }

    #[test]
    fn test_negative_error_truncates_toward_zero() {
        // 130 -> 255, error -125: right neighbour gets -125*7/16 = -54.
        // 180 - 54 = 126 stays black.
        let out = dither_full(&gray(&[&[130, 180]]));
        assert_eq!(out, gray(&[&[255, 0]]));
    }

    #[test]
    fn test_keeps_source_alpha() {
        let img = Image::filled(2, 1, Pixel::new(200, 200, 200, 40)).unwrap();
        let out = dither(&img, SplitPercent::FULL).unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::new(255, 255, 255, 40));
    }
}
