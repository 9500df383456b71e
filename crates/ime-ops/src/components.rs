//! Per-pixel color filters: component extraction, brighten and sepia.
//!
//! Component extraction turns every pixel into gray `(v, v, v, a)` where `v`
//! is computed from the pixel's color:
//!
//! | Component | Value |
//! |-----------|-------|
//! | red / green / blue | that channel |
//! | luma | `round(0.2126 R + 0.7152 G + 0.0722 B)` |
//! | intensity | `(R + G + B) / 3` |
//! | value | `max(R, G, B)` |

use std::fmt;
use std::str::FromStr;

use ime_core::pixel::{REC709_LUMA_B, REC709_LUMA_G, REC709_LUMA_R};
use ime_core::{Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::pixel_map::{ColorMatrix, apply};
use crate::split::SplitPercent;
use crate::{OpsError, OpsResult};

/// A scalar derived from a pixel's color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Red channel
    Red,
    /// Green channel
    Green,
    /// Blue channel
    Blue,
    /// Rec.709 weighted luma
    Luma,
    /// Mean of the color channels
    Intensity,
    /// Largest color channel
    Value,
}

impl Component {
    /// All components.
    pub const ALL: [Component; 6] = [
        Component::Red,
        Component::Green,
        Component::Blue,
        Component::Luma,
        Component::Intensity,
        Component::Value,
    ];

    /// Computes the component of `p`.
    pub fn of(self, p: Pixel) -> i32 {
        match self {
            Component::Red => p.r,
            Component::Green => p.g,
            Component::Blue => p.b,
            Component::Luma => (p.r as f32 * REC709_LUMA_R
                + p.g as f32 * REC709_LUMA_G
                + p.b as f32 * REC709_LUMA_B)
                .round() as i32,
            Component::Intensity => (p.r + p.g + p.b) / 3,
            Component::Value => p.r.max(p.g).max(p.b),
        }
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Component::Red => "red",
            Component::Green => "green",
            Component::Blue => "blue",
            Component::Luma => "luma",
            Component::Intensity => "intensity",
            Component::Value => "value",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        Component::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| OpsError::invalid(format!("unknown component '{s}'")))
    }
}

/// Renders `component` as a grayscale image, left of the split.
pub fn extract(image: &Image, component: Component, split: SplitPercent) -> Image {
    debug!(%component, %split, "extract component");
    apply(image, split, |p| Pixel::gray(component.of(p), p.a))
}

/// Adds `increment` to R, G and B of every pixel, clamping the result.
///
/// # Errors
///
/// Returns [`OpsError::InvalidArgument`] unless `-255 < increment < 255`.
pub fn brighten(image: &Image, increment: i32) -> OpsResult<Image> {
    if increment <= -255 || increment >= 255 {
        return Err(OpsError::invalid(format!(
            "brighten increment must be between -254 and 254, got {increment}"
        )));
    }
    debug!(increment, "brighten");
    Ok(apply(image, SplitPercent::FULL, |p| {
        Pixel::new(p.r + increment, p.g + increment, p.b + increment, p.a)
    }))
}

/// Sepia tone via [`ColorMatrix::SEPIA`], left of the split.
pub fn sepia(image: &Image, split: SplitPercent) -> Image {
    apply(image, split, |p| ColorMatrix::SEPIA.transform(p))
}
