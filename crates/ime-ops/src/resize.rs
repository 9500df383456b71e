//! Downscaling with bilinear interpolation.
//!
//! Target cell `(i, j)` maps proportionally to the source position
//! `row = H * i / th`, `col = W * j / tw`. Positions that are whole numbers
//! at two-decimal precision are sampled directly. Other positions blend four
//! samples
//!
//! ```text
//! A = (floor r, floor c)   C = (floor r, up c)
//! B = (up r,    floor c)   D = (up r,    up c)
//! ```
//!
//! where `up(v) = min(ceil(v + 1), dim - 1)`, one step past the usual
//! ceiling. Output alpha is always 255.
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//! use ime_ops::resize::downscale;
//!
//! let img = Image::filled(4, 4, Pixel::gray(60, 255)).unwrap();
//! let small = downscale(&img, 2, 2).unwrap();
//! assert_eq!(small.dimensions(), (2, 2));
//! assert_eq!(small.pixel(1, 1), Pixel::gray(60, 255));
//! ```

use ime_core::{Channel, Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::plane::{Plane, round_to_channel};
use crate::{OpsError, OpsResult};

#[inline]
fn floor(v: f64) -> usize {
    v.floor() as usize
}

#[inline]
fn up(v: f64, dim: usize) -> usize {
    ((v + 1.0).ceil() as usize).min(dim - 1)
}

#[inline]
fn two_decimals(v: f64) -> f64 {
    (v * 100.0 + 0.5).floor() / 100.0
}

/// Index of `v` if it is a whole number once rounded to two decimals.
#[inline]
fn whole(v: f64) -> Option<usize> {
    let rounded = two_decimals(v);
    (rounded % 1.0 == 0.0).then(|| rounded.round() as usize)
}

/// Samples `plane` at the fractional position `(row, col)`.
pub fn sample(plane: &Plane, row: f64, col: f64) -> f64 {
    if let (Some(r), Some(c)) = (whole(row), whole(col)) {
        return plane.get(r, c);
    }

    let (h, w) = (plane.height(), plane.width());
    let (r0, r1) = (floor(row), up(row, h));
    let (c0, c1) = (floor(col), up(col, w));

    let a = plane.get(r0, c0);
    let b = plane.get(r1, c0);
    let c = plane.get(r0, c1);
    let d = plane.get(r1, c1);

    let m = b * (row - r0 as f64) + a * (r1 as f64 - row);
    let n = d * (row - r0 as f64) + c * (r1 as f64 - row);
    n * (col - c0 as f64) + m * (c1 as f64 - col)
}

/// Downscales the image to `target_width` x `target_height`.
///
/// # Errors
///
/// Returns [`OpsError::InvalidArgument`] when a target dimension exceeds the
/// source or is zero.
pub fn downscale(image: &Image, target_width: usize, target_height: usize) -> OpsResult<Image> {
    let (width, height) = image.dimensions();
    if target_width > width || target_height > height {
        return Err(OpsError::invalid(
            "Target width/height cannot be greater than source width/height in downscaling.",
        ));
    }
    if target_width == 0 || target_height == 0 {
        return Err(OpsError::invalid("Target width/height must be positive."));
    }
    debug!(width, height, target_width, target_height, "downscale");

    let planes = Channel::COLOR.map(|ch| Plane::from_channel(image, ch, width, height));
    let out = Image::from_fn(target_width, target_height, |i, j| {
        let row = height as f64 * (i as f64 / target_height as f64);
        let col = width as f64 * (j as f64 / target_width as f64);
        let [r, g, b] = planes.each_ref().map(|p| round_to_channel(sample(p, row, col)));
        Pixel::rgb(r, g, b)
    })?;
    Ok(out)
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

    fn source() -> Image {
        gray(&[&[100, 150], &[200, 50]])
    }

    #[test]
    fn test_whole() {
        assert_eq!(whole(2.0), Some(2));
        assert_eq!(whole(1.999), Some(2));
        assert_eq!(whole(14.999999999999998), Some(15));
        assert_eq!(whole(1.5), None);
        assert_eq!(whole(0.33), None);
    }

    #[test]
    fn test_own_size_with_inexact_positions() {
        // 22.0 * (15.0 / 22.0) lands just below 15
        let img = Image::from_fn(22, 1, |_, x| Pixel::gray(x as i32 * 10, 255)).unwrap();
        assert_eq!(downscale(&img, 22, 1).unwrap(), img);

        for w in 1..64 {
            let img = Image::from_fn(w, 3, |y, x| Pixel::gray(((x * 7 + y) % 256) as i32, 255))
                .unwrap();
            assert_eq!(downscale(&img, w, 3).unwrap(), img, "width {w}");
        }
    }

    #[test]
    fn test_same_size_is_identity() {
        assert_eq!(downscale(&source(), 2, 2).unwrap(), source());
    }

    #[test]
    fn test_single_axis() {
        assert_eq!(downscale(&source(), 1, 2).unwrap(), gray(&[&[100], &[200]]));
        assert_eq!(downscale(&source(), 2, 1).unwrap(), gray(&[&[100, 150]]));
        assert_eq!(downscale(&source(), 1, 1).unwrap(), gray(&[&[100]]));
    }

    #[test]
    fn test_interpolated_rows() {
        let img = gray(&[
            &[100, 150, 150, 150, 150],
            &[200, 50, 50, 150, 150],
            &[200, 50, 50, 150, 150],
        ]);
        let out = downscale(&img, 5, 2).unwrap();
        assert_eq!(out, gray(&[&[100, 150, 150, 150, 150], &[200, 50, 50, 150, 0]]));
    }

    #[test]
    fn test_alpha_forced_opaque() {
        let img = Image::filled(2, 2, Pixel::new(10, 10, 10, 3)).unwrap();
        let out = downscale(&img, 1, 1).unwrap();
        assert_eq!(out.pixel(0, 0), Pixel::rgb(10, 10, 10));
    }

    #[test]
    fn test_invalid_targets() {
        for (w, h) in [(3, 2), (2, 3), (2, 0), (0, 1)] {
            let err = downscale(&source(), w, h).unwrap_err();
            assert!(err.is_invalid_argument(), "{w}x{h}");
        }
    }
}
