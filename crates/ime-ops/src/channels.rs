//! Splitting an image into per-channel grayscale images and back.

use ime_core::{Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::components::{Component, extract};
use crate::split::SplitPercent;
use crate::{OpsError, OpsResult};

/// Returns the red, green and blue components as grayscale images.
pub fn rgb_split(image: &Image) -> [Image; 3] {
    trace!(width = image.width(), height = image.height(), "rgb_split");
    [Component::Red, Component::Green, Component::Blue]
        .map(|c| extract(image, c, SplitPercent::FULL))
}

/// Rebuilds a color image from three single-channel images.
///
/// Takes R from `red`, G from `green`, B from `blue` and alpha from `red`.
///
/// # Errors
///
/// Returns [`OpsError::InvalidArgument`] if the images differ in size.
pub fn rgb_combine(red: &Image, green: &Image, blue: &Image) -> OpsResult<Image> {
    if !red.same_dimensions(green) || !red.same_dimensions(blue) {
        return Err(OpsError::invalid(format!(
            "rgb-combine needs images of equal size, got {:?}, {:?} and {:?}",
            red.dimensions(),
            green.dimensions(),
            blue.dimensions()
        )));
    }
    Ok(red.map_indexed(|y, x, r| {
        Pixel::new(r.r, green.pixel(y, x).g, blue.pixel(y, x).b, r.a)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image {
        Image::from_rows(&[
            [Pixel::new(100, 150, 200, 255), Pixel::new(50, 100, 150, 10)],
            [Pixel::new(0, 50, 100, 255), Pixel::new(200, 220, 240, 128)],
        ])
        .unwrap()
    }

    #[test]
    fn test_split_is_grayscale() {
        let [r, g, b] = rgb_split(&sample());
        assert_eq!(r.pixel(0, 0), Pixel::gray(100, 255));
        assert_eq!(g.pixel(1, 1), Pixel::gray(220, 128));
        assert_eq!(b.pixel(0, 1), Pixel::gray(150, 10));
    }

    #[test]
    fn test_split_then_combine_roundtrip() {
        let img = sample();
        let [r, g, b] = rgb_split(&img);
        assert_eq!(rgb_combine(&r, &g, &b).unwrap(), img);
    }

    #[test]
    fn test_alpha_from_red() {
        let red = Image::filled(1, 1, Pixel::new(1, 0, 0, 9)).unwrap();
        let green = Image::filled(1, 1, Pixel::new(0, 2, 0, 255)).unwrap();
        let blue = Image::filled(1, 1, Pixel::new(0, 0, 3, 255)).unwrap();
        assert_eq!(rgb_combine(&red, &green, &blue).unwrap().pixel(0, 0), Pixel::new(1, 2, 3, 9));
    }

    #[test]
    fn test_combine_size_mismatch() {
        let a = Image::filled(2, 2, Pixel::WHITE).unwrap();
        let b = Image::filled(2, 1, Pixel::WHITE).unwrap();
        assert!(rgb_combine(&a, &a, &b).unwrap_err().is_invalid_argument());
        assert!(rgb_combine(&a, &b, &a).unwrap_err().is_invalid_argument());
    }
}
