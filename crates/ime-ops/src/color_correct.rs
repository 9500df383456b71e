//! Histogram-based color correction.
//!
//! Aligns the histogram peaks of the three color channels: each channel is
//! shifted by `avg_peak - peak`, where `avg_peak` is the integer mean of the
//! three peaks. Offsets always come from the whole image, even when only
//! part of it is rendered through a split.

use ime_core::{Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::histogram::Histogram;
use crate::split::{SplitPercent, split_view};

/// Per-channel offsets that move each peak onto the average peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelOffsets {
    /// Red offset
    pub red: i32,
    /// Green offset
    pub green: i32,
    /// Blue offset
    pub blue: i32,
}

impl ChannelOffsets {
    /// Computes offsets from a histogram's peaks.
    pub fn from_histogram(histogram: &Histogram) -> Self {
        let [pr, pg, pb] = histogram.peaks().map(|p| p as i32);
        let avg = (pr + pg + pb) / 3;
        debug!(pr, pg, pb, avg, "histogram peaks");
        Self {
            red: avg - pr,
            green: avg - pg,
            blue: avg - pb,
        }
    }

    /// Returns `true` when no channel moves.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Shifts a pixel's color channels (unclamped).
    pub fn apply(&self, p: Pixel) -> Pixel {
        Pixel::new(p.r + self.red, p.g + self.green, p.b + self.blue, p.a)
    }
}

/// Color-corrects the image left of the split.
pub fn color_correct(image: &Image, split: SplitPercent) -> Image {
    trace!(width = image.width(), height = image.height(), %split, "color_correct");
    let offsets = ChannelOffsets::from_histogram(&Histogram::of(image));
    split_view(image, split, |_, _, p| offsets.apply(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Image {
        Image::from_rows(&[
            [Pixel::gray(100, 255), Pixel::gray(150, 255)],
            [Pixel::gray(200, 255), Pixel::gray(50, 255)],
        ])
        .unwrap()
    }

    #[test]
    fn test_gray_image_is_unchanged() {
        let img = source();
        let offsets = ChannelOffsets::from_histogram(&Histogram::of(&img));
        assert!(offsets.is_zero());
        assert_eq!(color_correct(&img, SplitPercent::FULL), img);
    }

    #[test]
    fn test_peaks_are_aligned() {
        // Peaks at R=60, G=90, B=120: average 90.
        let img = Image::from_rows(&[
            [Pixel::rgb(60, 90, 120), Pixel::rgb(60, 90, 120)],
            [Pixel::rgb(30, 200, 240), Pixel::rgb(250, 5, 0)],
        ])
        .unwrap();
        let offsets = ChannelOffsets::from_histogram(&Histogram::of(&img));
        assert_eq!(
            offsets,
            ChannelOffsets {
                red: 30,
                green: 0,
                blue: -30
            }
        );

        let out = color_correct(&img, SplitPercent::FULL);
        assert_eq!(out.pixel(0, 0), Pixel::rgb(90, 90, 90));
        // Shifted values are clamped.
        assert_eq!(out.pixel(1, 1), Pixel::rgb(255, 5, 0));
    }

    #[test]
    fn test_offsets_ignore_split() {
        let img = Image::from_rows(&[[
            Pixel::rgb(60, 90, 120),
            Pixel::rgb(60, 90, 120),
            Pixel::rgb(200, 200, 200),
        ]])
        .unwrap();
        let out = color_correct(&img, SplitPercent::new(50).unwrap());
        assert_eq!(out.pixel(0, 0), Pixel::rgb(90, 90, 90));
        assert_eq!(out.pixel(0, 1), Pixel::DIVIDER);
        assert_eq!(out.pixel(0, 2), img.pixel(0, 2));
    }
}
