//! Generic per-pixel transformation and 3x3 color matrices.
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//! use ime_ops::pixel_map::{apply, ColorMatrix};
//! use ime_ops::SplitPercent;
//!
//! let img = Image::filled(2, 2, Pixel::gray(100, 255)).unwrap();
//! let sepia = apply(&img, SplitPercent::FULL, |p| ColorMatrix::SEPIA.transform(p));
//! assert_eq!(sepia.pixel(0, 0), Pixel::new(135, 120, 93, 255));
//! ```

use ime_core::{Image, Pixel, clamp_channel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::split::{SplitPercent, split_view};

/// Applies `f` to every pixel left of the split.
///
/// See [`crate::split`] for the compositing rule.
pub fn apply<F>(image: &Image, split: SplitPercent, f: F) -> Image
where
    F: Fn(Pixel) -> Pixel,
{
    trace!(width = image.width(), height = image.height(), %split, "pixel_map::apply");
    split_view(image, split, |_, _, p| f(p))
}

/// A 3x3 matrix applied to the `[r, g, b]` column vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix(pub [[f64; 3]; 3]);

impl ColorMatrix {
    /// Classic sepia tone.
    pub const SEPIA: ColorMatrix = ColorMatrix([
        [0.393, 0.769, 0.189],
        [0.349, 0.686, 0.168],
        [0.272, 0.534, 0.131],
    ]);

    /// Multiplies the pixel's color by the matrix.
    ///
    /// Each output channel is truncated toward zero, then clamped. Alpha is kept.
    pub fn transform(&self, p: Pixel) -> Pixel {
        let (r, g, b) = (p.r as f64, p.g as f64, p.b as f64);
        let row = |m: [f64; 3]| clamp_channel((r * m[0] + g * m[1] + b * m[2]) as i32);
        Pixel::new(row(self.0[0]), row(self.0[1]), row(self.0[2]), p.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sepia_reference_values() {
        let m = ColorMatrix::SEPIA;
        assert_eq!(m.transform(Pixel::gray(100, 255)), Pixel::new(135, 120, 93, 255));
        assert_eq!(m.transform(Pixel::gray(150, 255)), Pixel::new(202, 180, 140, 255));
        assert_eq!(m.transform(Pixel::gray(200, 255)), Pixel::new(255, 240, 187, 255));
        assert_eq!(m.transform(Pixel::gray(50, 255)), Pixel::new(67, 60, 46, 255));
    }

    #[test]
    fn test_matrix_keeps_alpha() {
        let out = ColorMatrix::SEPIA.transform(Pixel::new(1, 2, 3, 17));
        assert_eq!(out.a, 17);
    }

    #[test]
    fn test_apply_whole_image() {
        let img = Image::filled(3, 1, Pixel::gray(10, 128)).unwrap();
        let out = apply(&img, SplitPercent::FULL, |p| Pixel::gray(p.r + 300, 0));
        for p in out.pixels() {
            assert_eq!(*p, Pixel::gray(255, 128));
        }
    }
}
