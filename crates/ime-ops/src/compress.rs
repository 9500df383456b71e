//! Lossy compression with the 2-D Haar wavelet.
//!
//! For each color channel:
//!
//! 1. pad to the smallest power-of-two square holding the image (zeros)
//! 2. forward transform: at size `c` (full, then halving down to 2) transform
//!    every row prefix of length `c`, then every column prefix
//! 3. zero all coefficients whose magnitude is at most the `k`-th smallest
//!    distinct non-zero magnitude, `k = distinct * percent / 100`
//! 4. inverse transform: columns then rows, size doubling from 2
//! 5. crop, round and clamp
//!
//! Alpha does not go through the transform; the source alpha is kept.
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//! use ime_ops::compress::{haar_compress, CompressionPercent};
//!
//! let img = Image::filled(3, 3, Pixel::gray(80, 255)).unwrap();
//! let out = haar_compress(&img, CompressionPercent::new(0).unwrap());
//! assert_eq!(out, img);
//! ```

use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use ime_core::{Channel, Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::plane::Plane;
use crate::{OpsError, OpsResult};

/// Share of distinct wavelet coefficients to discard, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompressionPercent(u8);

impl CompressionPercent {
    /// Validates a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidArgument`] outside `[0, 100]`.
    pub fn new(percent: i64) -> OpsResult<Self> {
        if !(0..=100).contains(&percent) {
            return Err(OpsError::invalid(
                "Compression percentage must be between 0 and 100",
            ));
        }
        Ok(Self(percent as u8))
    }

    /// The percentage.
    #[inline]
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CompressionPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for CompressionPercent {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| OpsError::invalid(format!("invalid compression percent '{s}'")))?;
        Self::new(value)
    }
}

/// One Haar step: pair averages in the first half, pair differences in the second.
///
/// A trailing odd sample is dropped.
pub fn haar_1d(data: &[f64]) -> Vec<f64> {
    let half = data.len() / 2;
    let mut out = vec![0.0; data.len()];
    for i in 0..half {
        out[i] = (data[2 * i] + data[2 * i + 1]) / SQRT_2;
        out[i + half] = (data[2 * i] - data[2 * i + 1]) / SQRT_2;
    }
    out
}

/// Inverse of [`haar_1d`].
pub fn inverse_haar_1d(data: &[f64]) -> Vec<f64> {
    let half = data.len() / 2;
    let mut out = vec![0.0; data.len()];
    for i in 0..half {
        out[2 * i] = (data[i] + data[i + half]) / SQRT_2;
        out[2 * i + 1] = (data[i] - data[i + half]) / SQRT_2;
    }
    out
}

fn transform_rows(plane: &mut Plane, c: usize, step: fn(&[f64]) -> Vec<f64>) {
    for y in 0..c {
        let row: Vec<f64> = (0..c).map(|x| plane.get(y, x)).collect();
        for (x, v) in step(&row).into_iter().enumerate() {
            plane.set(y, x, v);
        }
    }
}

fn transform_cols(plane: &mut Plane, c: usize, step: fn(&[f64]) -> Vec<f64>) {
    for x in 0..c {
        let col: Vec<f64> = (0..c).map(|y| plane.get(y, x)).collect();
        for (y, v) in step(&col).into_iter().enumerate() {
            plane.set(y, x, v);
        }
    }
}

/// Forward 2-D transform of a square power-of-two plane, in place.
pub fn haar_2d(plane: &mut Plane) {
    let mut c = plane.width().min(plane.height());
    while c > 1 {
        transform_rows(plane, c, haar_1d);
        transform_cols(plane, c, haar_1d);
        c /= 2;
    }
}

/// Inverse of [`haar_2d`], in place.
pub fn inverse_haar_2d(plane: &mut Plane) {
    let size = plane.width().min(plane.height());
    let mut c = 2;
    while c <= size {
        transform_cols(plane, c, inverse_haar_1d);
        transform_rows(plane, c, inverse_haar_1d);
        c *= 2;
    }
}

/// Zeroes the smallest `percent` of distinct non-zero magnitudes.
///
/// Returns the cutoff magnitude, or `None` when nothing was discarded.
pub fn threshold(samples: &mut [f64], percent: CompressionPercent) -> Option<f64> {
    let mut magnitudes: Vec<f64> = samples
        .iter()
        .filter(|v| **v != 0.0)
        .map(|v| v.abs())
        .collect();
    magnitudes.sort_by(f64::total_cmp);
    magnitudes.dedup();

    let k = magnitudes.len() * percent.percent() as usize / 100;
    if k == 0 {
        return None;
    }
    let cutoff = magnitudes[k - 1];
    for v in samples.iter_mut() {
        if v.abs() <= cutoff {
            *v = 0.0;
        }
    }
    trace!(distinct = magnitudes.len(), k, cutoff, "threshold");
    Some(cutoff)
}

/// Compresses the image's color channels with the Haar wavelet.
pub fn haar_compress(image: &Image, percent: CompressionPercent) -> Image {
    let (width, height) = image.dimensions();
    let size = width.max(height).next_power_of_two();
    debug!(width, height, size, %percent, "haar_compress");

    let [red, green, blue] = Channel::COLOR.map(|channel| {
        let mut plane = Plane::from_channel(image, channel, size, size);
        haar_2d(&mut plane);
        threshold(plane.samples_mut(), percent);
        inverse_haar_2d(&mut plane);
        plane
    });

    image.map_indexed(|y, x, p| {
        Pixel::new(
            red.channel_value(y, x),
            green.channel_value(y, x),
            blue.channel_value(y, x),
            p.a,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn gray(rows: &[&[i32]]) -> Image {
        let rows: Vec<Vec<Pixel>> = rows
            .iter()
            .map(|r| r.iter().map(|&v| Pixel::gray(v, 255)).collect())
            .collect();
        Image::from_rows(&rows).unwrap()
    }

    fn pct(p: i64) -> CompressionPercent {
        CompressionPercent::new(p).unwrap()
    }

    #[test]
    fn test_haar_1d() {
        let out = haar_1d(&[100.0, 150.0]);
        assert_abs_diff_eq!(out[0], 250.0 / SQRT_2, epsilon = 1e-12);
        assert_abs_diff_eq!(out[1], -50.0 / SQRT_2, epsilon = 1e-12);

        let data = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let back = inverse_haar_1d(&haar_1d(&data));
        for (a, b) in data.iter().zip(&back) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_haar_2d_coefficients() {
        let img = gray(&[&[100, 150], &[200, 50]]);
        let mut plane = Plane::from_channel(&img, Channel::Red, 2, 2);
        haar_2d(&mut plane);
        assert_abs_diff_eq!(plane.get(0, 0), 250.0, epsilon = 1e-9);
        assert_abs_diff_eq!(plane.get(0, 1), 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(plane.get(1, 0), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(plane.get(1, 1), -100.0, epsilon = 1e-9);

        inverse_haar_2d(&mut plane);
        assert_abs_diff_eq!(plane.get(1, 0), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_haar_2d_roundtrip_4x4() {
        let img = Image::from_fn(4, 4, |y, x| Pixel::gray((y * 37 + x * 11) as i32 % 256, 255)).unwrap();
        let mut plane = Plane::from_channel(&img, Channel::Red, 4, 4);
        let before = plane.clone();
        haar_2d(&mut plane);
        inverse_haar_2d(&mut plane);
        for (a, b) in before.samples().iter().zip(plane.samples()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_threshold_counts_distinct_values() {
        let mut samples = [5.0, -5.0, 5.0, 1.0, 0.0, 9.0];
        // Distinct magnitudes {1, 5, 9}: 50 % discards one of them.
        assert_eq!(threshold(&mut samples, pct(50)), Some(1.0));
        assert_eq!(samples, [5.0, -5.0, 5.0, 0.0, 0.0, 9.0]);

        let mut samples = [5.0, -5.0, 9.0];
        // 2 * 40 / 100 == 0: nothing discarded.
        assert_eq!(threshold(&mut samples, pct(40)), None);
        assert_eq!(samples, [5.0, -5.0, 9.0]);
    }

    #[test]
    fn test_compress_reference() {
        let img = gray(&[&[100, 150], &[200, 50]]);
        assert_eq!(haar_compress(&img, pct(50)), gray(&[&[75, 175], &[175, 75]]));
    }

    #[test]
    fn test_compress_non_square() {
        let img = gray(&[&[100, 150, 150], &[200, 50, 150]]);
        let out = haar_compress(&img, pct(50));
        assert_eq!(out, gray(&[&[50, 150, 175], &[150, 50, 175]]));
    }

    #[test]
    fn test_compress_extremes() {
        let img = gray(&[&[100, 150], &[200, 50]]);
        assert_eq!(haar_compress(&img, pct(0)), img);
        assert_eq!(haar_compress(&img, pct(100)), gray(&[&[0, 0], &[0, 0]]));
    }

    #[test]
    fn test_compress_keeps_alpha() {
        let img = Image::from_rows(&[[Pixel::new(10, 20, 30, 7), Pixel::new(40, 50, 60, 300)]]).unwrap();
        let out = haar_compress(&img, pct(100));
        assert_eq!(out.pixel(0, 0), Pixel::new(0, 0, 0, 7));
        assert_eq!(out.pixel(0, 1), Pixel::new(0, 0, 0, 300));
    }

    #[test]
    fn test_percent_range() {
        assert!(CompressionPercent::new(-1).unwrap_err().is_invalid_argument());
        assert!(CompressionPercent::new(101).unwrap_err().is_invalid_argument());
        assert_eq!("25".parse::<CompressionPercent>().unwrap().percent(), 25);
        assert!("x".parse::<CompressionPercent>().is_err());
    }
}
