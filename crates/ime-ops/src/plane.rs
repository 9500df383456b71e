//! Single-channel `f64` matrices used by the wavelet and resampling code.

use ime_core::{Channel, Image, clamp_channel};

/// Row-major matrix of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Plane {
    /// Zero-filled plane.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Copies one channel of an image into a plane of at least the image's
    /// size. Cells outside the image stay zero.
    pub fn from_channel(image: &Image, channel: Channel, width: usize, height: usize) -> Self {
        let mut plane = Self::zeros(width.max(image.width()), height.max(image.height()));
        for y in 0..image.height() {
            for x in 0..image.width() {
                plane.set(y, x, image.pixel(y, x).channel(channel) as f64);
            }
        }
        plane
    }

    /// Plane width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Plane height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at row `y`, column `x`.
    #[inline]
    pub fn get(&self, y: usize, x: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// Sets the sample at row `y`, column `x`.
    #[inline]
    pub fn set(&mut self, y: usize, x: usize, v: f64) {
        self.data[y * self.width + x] = v;
    }

    /// All samples, row-major.
    pub fn samples(&self) -> &[f64] {
        &self.data
    }

    /// All samples, mutably.
    pub fn samples_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Sample rounded to the nearest integer and clamped to `[0, 255]`.
    #[inline]
    pub fn channel_value(&self, y: usize, x: usize) -> i32 {
        round_to_channel(self.get(y, x))
    }
}

/// Rounds half up and clamps to `[0, 255]`.
#[inline]
pub fn round_to_channel(v: f64) -> i32 {
    clamp_channel((v + 0.5).floor() as i32)
}
