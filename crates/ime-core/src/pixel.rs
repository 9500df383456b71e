//! Pixel type for 8-bit-range RGBA images.
//!
//! A [`Pixel`] holds four signed integer channels. Values are expected in
//! `[0, 255]` but the type does not enforce it: filters clamp explicitly
//! where their algorithm requires, and intermediate results may overflow
//! the range before that clamp.
//!
//! ```
//! use ime_core::{Channel, Pixel};
//!
//! let p = Pixel::new(300, 128, -4, 255).with_clamped_rgb();
//! assert_eq!(p, Pixel::new(255, 128, 0, 255));
//! assert_eq!(p.channel(Channel::Green), 128);
//! ```

use std::fmt;

/// Rec.709 luminance coefficient for red channel.
pub const REC709_LUMA_R: f32 = 0.2126;

/// Rec.709 luminance coefficient for green channel.
pub const REC709_LUMA_G: f32 = 0.7152;

/// Rec.709 luminance coefficient for blue channel.
pub const REC709_LUMA_B: f32 = 0.0722;

/// Lowest legal channel value.
pub const CHANNEL_MIN: i32 = 0;

/// Highest legal channel value.
pub const CHANNEL_MAX: i32 = 255;

/// Clamps a channel value into `[0, 255]`.
#[inline]
pub fn clamp_channel(value: i32) -> i32 {
    value.clamp(CHANNEL_MIN, CHANNEL_MAX)
}

/// One of the four channels of a [`Pixel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Alpha (opacity)
    Alpha,
}

impl Channel {
    /// The three color channels, in R, G, B order.
    pub const COLOR: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Index of the channel in R, G, B, A order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

/// An RGBA pixel with integer channels.
///
/// Equality and hashing are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    /// Red channel
    pub r: i32,
    /// Green channel
    pub g: i32,
    /// Blue channel
    pub b: i32,
    /// Alpha channel
    pub a: i32,
}

impl Pixel {
    /// Opaque black, used as the split-view divider line.
    pub const DIVIDER: Pixel = Pixel::new(0, 0, 0, 255);

    /// Fully transparent black, used to pad images.
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);

    /// Opaque white.
    pub const WHITE: Pixel = Pixel::new(255, 255, 255, 255);

    /// Creates a pixel from its four channels.
    #[inline]
    pub const fn new(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel.
    #[inline]
    pub const fn rgb(r: i32, g: i32, b: i32) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Creates a gray pixel with `v` in every color channel.
    #[inline]
    pub const fn gray(v: i32, a: i32) -> Self {
        Self::new(v, v, v, a)
    }

    /// Returns the value of one channel.
    #[inline]
    pub fn channel(&self, channel: Channel) -> i32 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// Returns a copy with one channel replaced.
    #[inline]
    pub fn with_channel(mut self, channel: Channel, value: i32) -> Self {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
            Channel::Alpha => self.a = value,
        }
        self
    }

    /// Returns a copy with R, G and B clamped to `[0, 255]`. Alpha is kept as is.
    #[inline]
    pub fn with_clamped_rgb(self) -> Self {
        Self::new(
            clamp_channel(self.r),
            clamp_channel(self.g),
            clamp_channel(self.b),
            self.a,
        )
    }

    /// Color channels as `[r, g, b]`.
    #[inline]
    pub fn rgb_array(&self) -> [i32; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality() {
        let a = Pixel::new(1, 2, 3, 4);
        let b = Pixel::new(1, 2, 3, 4);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&Pixel::new(1, 2, 3, 5)));
    }

    #[test]
    fn test_clamp_leaves_alpha() {
        let p = Pixel::new(-20, 128, 999, 400).with_clamped_rgb();
        assert_eq!(p, Pixel::new(0, 128, 255, 400));
    }

    #[test]
    fn test_channel_access() {
        let p = Pixel::new(10, 20, 30, 40);
        for (i, ch) in [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha]
            .into_iter()
            .enumerate()
        {
            assert_eq!(ch.index(), i);
            assert_eq!(p.channel(ch), 10 * (i as i32 + 1));
        }
        assert_eq!(p.with_channel(Channel::Blue, 7).b, 7);
    }

    #[test]
    fn test_constants() {
        assert_eq!(Pixel::DIVIDER, Pixel::rgb(0, 0, 0));
        assert_eq!(Pixel::TRANSPARENT.a, 0);
        assert_eq!(Pixel::gray(9, 255), Pixel::new(9, 9, 9, 255));
        assert_eq!(Pixel::default(), Pixel::TRANSPARENT);
    }
}
