//! Per-channel integer planes, the hand-off format between codecs and images.
//!
//! Decoders produce a [`ChannelPlanes`] (four row-major `i32` matrices, one per
//! channel) and encoders consume one, so the engine never deals with file
//! bytes. Conversion to and from [`Image`] is lossless.

use crate::error::{Error, Result};
use crate::image::Image;
use crate::pixel::{Channel, Pixel};

/// Four row-major channel planes of equal size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPlanes {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Red plane
    pub red: Vec<i32>,
    /// Green plane
    pub green: Vec<i32>,
    /// Blue plane
    pub blue: Vec<i32>,
    /// Alpha plane
    pub alpha: Vec<i32>,
}

impl ChannelPlanes {
    /// Creates planes of the given size filled with opaque black.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            red: vec![0; len],
            green: vec![0; len],
            blue: vec![0; len],
            alpha: vec![255; len],
        }
    }

    /// Returns one plane.
    pub fn plane(&self, channel: Channel) -> &[i32] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
            Channel::Alpha => &self.alpha,
        }
    }

    /// Sets every alpha sample to 255.
    pub fn make_opaque(&mut self) {
        self.alpha.fill(255);
    }

    fn validate(&self) -> Result<()> {
        let len = self.width * self.height;
        for ch in [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha] {
            let got = self.plane(ch).len();
            if got != len {
                return Err(Error::invalid_dimensions(
                    self.width,
                    self.height,
                    format!("{ch:?} plane has {got} samples, expected {len}"),
                ));
            }
        }
        Ok(())
    }
}

impl Image {
    /// Builds an image from channel planes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or a plane
    /// has the wrong number of samples.
    pub fn from_planes(planes: &ChannelPlanes) -> Result<Image> {
        planes.validate()?;
        let w = planes.width;
        Image::from_fn(planes.width, planes.height, |y, x| {
            let i = y * w + x;
            Pixel::new(planes.red[i], planes.green[i], planes.blue[i], planes.alpha[i])
        })
    }

    /// Splits the image into channel planes.
    pub fn to_planes(&self) -> ChannelPlanes {
        let len = self.width() * self.height();
        let mut planes = ChannelPlanes {
            width: self.width(),
            height: self.height(),
            red: Vec::with_capacity(len),
            green: Vec::with_capacity(len),
            blue: Vec::with_capacity(len),
            alpha: Vec::with_capacity(len),
        };
        for p in self.pixels() {
            planes.red.push(p.r);
            planes.green.push(p.g);
            planes.blue.push(p.b);
            planes.alpha.push(p.a);
        }
        planes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planes_roundtrip() {
        let img = Image::from_fn(3, 2, |y, x| {
            Pixel::new(x as i32, y as i32, (x + y) as i32, 100 + x as i32)
        })
        .unwrap();
        let planes = img.to_planes();
        assert_eq!(planes.red, vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(planes.green, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(Image::from_planes(&planes).unwrap(), img);
    }

    #[test]
    fn test_short_plane_rejected() {
        let mut planes = ChannelPlanes::new(2, 2);
        planes.blue.pop();
        let err = Image::from_planes(&planes).unwrap_err();
        assert!(err.to_string().contains("Blue"));
    }

    #[test]
    fn test_make_opaque() {
        let mut planes = ChannelPlanes::new(1, 2);
        planes.alpha = vec![0, 7];
        planes.make_opaque();
        assert_eq!(planes.plane(Channel::Alpha), &[255, 255]);
    }
}
