//! Levels adjustment with a quadratic tone curve.
//!
//! The curve `y = A x^2 + B x + C` is built from the black, mid and white
//! points `b < m < w` with the closed form
//!
//! ```text
//! d = b^2 (m - w) + w m^2 - m w^2
//! A = (-b (128 - 255) + 128 w - 255 m) / d
//! B = (b^2 (128 - 255) + 255 m^2 - 128 w^2) / d
//! C = (b^2 (255 m - 128 w) - b (255 m^2 - 128 w^2)) / d
//! ```
//!
//! and each color channel becomes `clamp(trunc(curve(x)))`.
//!
//! # Example
//!
//! ```rust
//! use ime_ops::levels::LevelsCurve;
//!
//! let curve = LevelsCurve::fit(20, 100, 255).unwrap();
//! assert_eq!(curve.eval(100), 92);
//! assert_eq!(curve.eval(200), 165);
//! ```

use ime_core::{Image, Pixel, clamp_channel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::split::{SplitPercent, split_view};
use crate::{OpsError, OpsResult};

/// Quadratic tone curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelsCurve {
    /// Quadratic coefficient
    pub a: f64,
    /// Linear coefficient
    pub b: f64,
    /// Constant term
    pub c: f64,
}

impl LevelsCurve {
    /// Builds the curve for black point `black`, mid point `mid` and white point `white`.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidArgument`] unless `0 <= black < mid < white <= 255`.
    pub fn fit(black: i32, mid: i32, white: i32) -> OpsResult<Self> {
        if black < 0 || black >= mid || mid >= white || white > 255 {
            return Err(OpsError::invalid(
                "Invalid levels adjustment values. Ensure 0 <= b < m < w <= 255.",
            ));
        }

        let (b, m, w) = (black as i64, mid as i64, white as i64);
        let num_a = -b * (128 - 255) + 128 * w - 255 * m;
        let num_b = b * b * (128 - 255) + 255 * m * m - 128 * w * w;
        let num_c = b * b * (255 * m - 128 * w) - b * (255 * m * m - 128 * w * w);
        let den = (b * b * (m - w) + w * m * m - m * w * w) as f64;

        let curve = Self {
            a: num_a as f64 / den,
            b: num_b as f64 / den,
            c: num_c as f64 / den,
        };
        debug!(black, mid, white, a = curve.a, b = curve.b, c = curve.c, "levels curve");
        Ok(curve)
    }

    /// Evaluates the curve at `x`, truncated and clamped to `[0, 255]`.
    #[inline]
    pub fn eval(&self, x: i32) -> i32 {
        let x = x as f64;
        clamp_channel((self.a * x * x + self.b * x + self.c) as i32)
    }
}

/// Applies the curve to R, G and B left of the split.
pub fn levels_adjust(image: &Image, curve: &LevelsCurve, split: SplitPercent) -> Image {
    trace!(width = image.width(), height = image.height(), %split, "levels_adjust");
    split_view(image, split, |_, _, p| {
        Pixel::new(curve.eval(p.r), curve.eval(p.g), curve.eval(p.b), p.a)
    })
}
