//! Kernel convolution: blur and sharpen.
//!
//! Neighbours outside the image are edge-replicated (coordinates are clamped
//! to the image). Each color channel becomes
//! `round(weighted_sum / sum_of_weights)` clamped to `[0, 255]`; alpha is
//! copied from the source pixel.
//!
//! # Kernels
//!
//! - [`Kernel::blur`] - 3x3 Gaussian-like weights
//! - [`Kernel::sharpen`] - 5x5 with a strong center and negative outer ring
//!
//! # Example
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//! use ime_ops::filter::{convolve, Kernel};
//! use ime_ops::SplitPercent;
//!
//! let img = Image::filled(8, 8, Pixel::gray(120, 255)).unwrap();
//! let blurred = convolve(&img, &Kernel::blur(), SplitPercent::FULL);
//! assert_eq!(blurred, img);
//! ```

use ime_core::{Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::split::{SplitPercent, split_view};
use crate::{OpsError, OpsResult};

/// Square convolution kernel of odd size.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major.
    pub data: Vec<f32>,
    /// Kernel width (odd).
    pub width: usize,
    /// Kernel height (equal to width).
    pub height: usize,
}

impl Kernel {
    /// Creates a new kernel from data.
    ///
    /// Width and height must be equal odd numbers.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::invalid("kernel dimensions must be odd"));
        }
        if width != height {
            return Err(OpsError::invalid(format!(
                "kernel must be square, got {width}x{height}"
            )));
        }
        if data.len() != width * height {
            return Err(OpsError::invalid(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// 3x3 blur: `[[1, 2, 1], [2, 4, 2], [1, 2, 1]] / 16`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ime_ops::filter::Kernel;
    ///
    /// let k = Kernel::blur();
    /// assert_eq!(k.width, 3);
    /// assert_eq!(k.radius(), 1);
    /// ```
    pub fn blur() -> Self {
        let (e, s, c) = (1.0 / 16.0, 1.0 / 8.0, 1.0 / 4.0);
        Self {
            data: vec![
                e, s, e,
                s, c, s,
                e, s, e,
            ],
            width: 3,
            height: 3,
        }
    }

    /// 5x5 sharpen: outer ring `-1/8`, inner ring `1/4`, center `1`.
    pub fn sharpen() -> Self {
        let (o, i) = (-1.0 / 8.0, 1.0 / 4.0);
        Self {
            data: vec![
                o, o, o, o, o,
                o, i, i, i, o,
                o, i, 1.0, i, o,
                o, i, i, i, o,
                o, o, o, o, o,
            ],
            width: 5,
            height: 5,
        }
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> usize {
        self.width / 2
    }

    /// Weight at kernel row `ky`, column `kx`.
    #[inline]
    pub fn weight(&self, ky: usize, kx: usize) -> f32 {
        self.data[ky * self.width + kx]
    }
}

/// Convolves the image with `kernel` left of the split.
pub fn convolve(image: &Image, kernel: &Kernel, split: SplitPercent) -> Image {
    let (width, height) = image.dimensions();
    trace!(width, height, kernel_size = kernel.width, %split, "convolve");

    let r = kernel.radius() as isize;
    split_view(image, split, |y, x, p| {
        let mut sums = [0.0f32; 3];
        let mut weight = 0.0f32;

        for ky in 0..kernel.height {
            for kx in 0..kernel.width {
                // Source coordinates with edge clamping
                let sx = (x as isize + kx as isize - r)
                    .max(0)
                    .min(width as isize - 1) as usize;
                let sy = (y as isize + ky as isize - r)
                    .max(0)
                    .min(height as isize - 1) as usize;

                let kw = kernel.weight(ky, kx);
                let src = image.pixel(sy, sx);
                sums[0] += src.r as f32 * kw;
                sums[1] += src.g as f32 * kw;
                sums[2] += src.b as f32 * kw;
                weight += kw;
            }
        }

        let norm = if weight == 0.0 { 1.0 } else { weight };
        let [r, g, b] = sums.map(|s| (s / norm).round() as i32);
        Pixel::new(r, g, b, p.a)
    })
}
