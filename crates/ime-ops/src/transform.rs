//! Geometric transformations.
//!
//! Both flips always cover the whole image and are involutions.
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//! use ime_ops::transform::flip_horizontal;
//!
//! let img = Image::from_rows(&[[Pixel::gray(1, 255), Pixel::gray(2, 255)]]).unwrap();
//! let flipped = flip_horizontal(&img);
//! assert_eq!(flipped.pixel(0, 0).r, 2);
//! ```

use ime_core::Image;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Mirrors the image left to right: column `x` becomes `width - 1 - x`.
pub fn flip_horizontal(image: &Image) -> Image {
    trace!(width = image.width(), height = image.height(), "flip_horizontal");
    let w = image.width();
    image.map_indexed(|y, x, _| image.pixel(y, w - 1 - x))
}

/// Mirrors the image top to bottom: row `y` becomes `height - 1 - y`.
pub fn flip_vertical(image: &Image) -> Image {
    trace!(width = image.width(), height = image.height(), "flip_vertical");
    let h = image.height();
    image.map_indexed(|y, x, _| image.pixel(h - 1 - y, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ime_core::Pixel;

    fn sample() -> Image {
        Image::from_fn(3, 2, |y, x| Pixel::new(x as i32, y as i32, 0, 255)).unwrap()
    }

    #[test]
    fn test_flip_horizontal() {
        let out = flip_horizontal(&sample());
        assert_eq!(out.pixel(0, 0).r, 2);
        assert_eq!(out.pixel(1, 2).r, 0);
        assert_eq!(out.pixel(1, 2).g, 1);
    }

    #[test]
    fn test_flip_vertical() {
        let out = flip_vertical(&sample());
        assert_eq!(out.pixel(0, 1).g, 1);
        assert_eq!(out.pixel(1, 1).g, 0);
        assert_eq!(out.pixel(0, 1).r, 1);
    }

    #[test]
    fn test_flips_are_involutions() {
        let img = sample();
        assert_eq!(flip_horizontal(&flip_horizontal(&img)), img);
        assert_eq!(flip_vertical(&flip_vertical(&img)), img);
    }
}
