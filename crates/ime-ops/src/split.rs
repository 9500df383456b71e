//! Split-view compositing.
//!
//! Most filters can render a preview where only the left part of the image
//! is filtered. With `pos = percent * width / 100`:
//!
//! ```text
//!  x <  pos   filtered pixel (R, G, B clamped, source alpha)
//!  x == pos   divider, opaque black
//!  x >  pos   source pixel
//! ```
//!
//! At 100 % the divider falls outside the image so the whole image is
//! filtered. [`cut`] is the variant without a divider column.

use std::fmt;
use std::str::FromStr;

use ime_core::{Image, Pixel};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{OpsError, OpsResult};

const SPLIT_RANGE_MSG: &str = "Split percent must be between 0 and 100";

/// Percentage of the image width, from the left, that a filter is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SplitPercent(u8);

impl SplitPercent {
    /// Whole image, no divider.
    pub const FULL: SplitPercent = SplitPercent(100);

    /// Validates a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidArgument`] outside `[0, 100]`.
    pub fn new(percent: i64) -> OpsResult<Self> {
        if !(0..=100).contains(&percent) {
            return Err(OpsError::invalid(SPLIT_RANGE_MSG));
        }
        Ok(Self(percent as u8))
    }

    /// The percentage.
    #[inline]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Column of the divider for an image of `width` columns.
    #[inline]
    pub fn position(self, width: usize) -> usize {
        self.0 as usize * width / 100
    }
}

impl Default for SplitPercent {
    fn default() -> Self {
        Self::FULL
    }
}

impl fmt::Display for SplitPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for SplitPercent {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| OpsError::invalid(format!("invalid split percent '{s}'")))?;
        Self::new(value)
    }
}

/// Applies `f(y, x, pixel)` left of the split, draws the divider, copies the rest.
///
/// The filtered pixel has R, G and B clamped to `[0, 255]` and always keeps
/// the source pixel's alpha, whatever `f` returns for it.
pub fn split_view<F>(source: &Image, split: SplitPercent, mut f: F) -> Image
where
    F: FnMut(usize, usize, Pixel) -> Pixel,
{
    let pos = split.position(source.width());
    trace!(width = source.width(), height = source.height(), pos, "split_view");

    source.map_indexed(|y, x, p| {
        if x < pos {
            let out = f(y, x, p);
            Pixel::new(out.r, out.g, out.b, p.a).with_clamped_rgb()
        } else if x == pos {
            Pixel::DIVIDER
        } else {
            p
        }
    })
}

/// Straight left/right cut: `filtered` left of the split (with the source
/// alpha), `source` from the split column on. No divider.
///
/// # Errors
///
/// Returns [`OpsError::InvalidArgument`] if the two images differ in size.
pub fn cut(source: &Image, filtered: &Image, split: SplitPercent) -> OpsResult<Image> {
    if !source.same_dimensions(filtered) {
        return Err(OpsError::invalid(format!(
            "split cut needs equal sizes, got {:?} and {:?}",
            source.dimensions(),
            filtered.dimensions()
        )));
    }
    let pos = split.position(source.width());
    Ok(source.map_indexed(|y, x, p| {
        if x < pos {
            let d = filtered.pixel(y, x);
            Pixel::new(d.r, d.g, d.b, p.a)
        } else {
            p
        }
    }))
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

    #[test]
    fn test_split_range() {
        assert!(SplitPercent::new(0).is_ok());
        assert!(SplitPercent::new(100).is_ok());
        assert!(SplitPercent::new(-10).unwrap_err().is_invalid_argument());
        let err = SplitPercent::new(101).unwrap_err();
        assert_eq!(err, OpsError::InvalidArgument(SPLIT_RANGE_MSG.into()));
        assert!("abc".parse::<SplitPercent>().is_err());
        assert_eq!("50".parse::<SplitPercent>().unwrap().percent(), 50);
    }

    #[test]
    fn test_position_floors() {
        assert_eq!(SplitPercent::new(50).unwrap().position(3), 1);
        assert_eq!(SplitPercent::new(75).unwrap().position(2), 1);
        assert_eq!(SplitPercent::new(99).unwrap().position(2), 1);
        assert_eq!(SplitPercent::FULL.position(7), 7);
        assert_eq!(SplitPercent::default(), SplitPercent::FULL);
    }

    #[test]
    fn test_full_split_has_no_divider() {
        let img = gray(&[&[1, 2], &[3, 4]]);
        let out = split_view(&img, SplitPercent::FULL, |_, _, p| Pixel::gray(p.r * 10, 0));
        assert_eq!(out, gray(&[&[10, 20], &[30, 40]]));
    }

    #[test]
    fn test_zero_split_is_divider_then_source() {
        let img = gray(&[&[1, 2, 3]]);
        let out = split_view(&img, SplitPercent::new(0).unwrap(), |_, _, _| Pixel::WHITE);
        assert_eq!(out.pixel(0, 0), Pixel::DIVIDER);
        assert_eq!(out.pixel(0, 1), img.pixel(0, 1));
        assert_eq!(out.pixel(0, 2), img.pixel(0, 2));
    }

    #[test]
    fn test_filtered_side_is_clamped_alpha_from_source() {
        let img = Image::filled(2, 1, Pixel::new(0, 0, 0, 300)).unwrap();
        let out = split_view(&img, SplitPercent::FULL, |_, _, _| Pixel::new(-5, 999, 7, 0));
        assert_eq!(out.pixel(0, 0), Pixel::new(0, 255, 7, 300));
    }

    #[test]
    fn test_cut_without_divider() {
        let img = gray(&[&[100, 150], &[200, 50]]);
        let filtered = Image::filled(2, 2, Pixel::new(9, 9, 9, 0)).unwrap();
        let out = cut(&img, &filtered, SplitPercent::new(50).unwrap()).unwrap();
        assert_eq!(out, gray(&[&[9, 150], &[9, 50]]));

        let small = Image::filled(1, 1, Pixel::WHITE).unwrap();
        assert!(cut(&img, &small, SplitPercent::FULL).is_err());
    }
}
