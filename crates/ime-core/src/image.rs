//! Image buffer type.
//!
//! An [`Image`] is a rectangular grid of [`Pixel`]s with dimensions fixed at
//! construction. Pixels are addressed as `(row, col)`, i.e. `(y, x)`, and are
//! stored in **row-major** order:
//!
//! ```text
//! [p(0,0) p(0,1) ... p(0,w-1)]  <- Row 0
//! [p(1,0) p(1,1) ... p(1,w-1)]  <- Row 1
//! ...
//! ```
//!
//! Filters never mutate their input. They build a fresh image (usually with
//! [`Image::from_fn`]) so a destination may safely replace its own source in
//! the store.
//!
//! # Usage
//!
//! ```rust
//! use ime_core::{Image, Pixel};
//!
//! let mut img = Image::filled(3, 2, Pixel::gray(10, 255)).unwrap();
//! img.set_pixel(1, 2, Pixel::rgb(255, 0, 0));
//!
//! assert_eq!(img.width(), 3);
//! assert_eq!(img.height(), 2);
//! assert_eq!(img.pixel(1, 2).r, 255);
//! assert_eq!(img.get(2, 0), None);
//! ```

use crate::error::{Error, Result};
use crate::pixel::Pixel;

/// An owned RGBA image.
///
/// Equality and hashing are deep (cell by cell).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Creates an image with every cell set to `pixel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; width * height],
        })
    }

    /// Creates an image by evaluating `f(y, x)` for every cell in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Pixel,
    {
        check_dimensions(width, height)?;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(y, x));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an image from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if there are no rows, the first row
    /// is empty, or the rows have different lengths.
    pub fn from_rows<R: AsRef<[Pixel]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        check_dimensions(width, height)?;

        let mut pixels = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(Error::invalid_dimensions(
                    width,
                    height,
                    format!("row {y} has {} pixels", row.len()),
                ));
            }
            pixels.extend_from_slice(row);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width (number of columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height (number of rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns `true` if `other` has the same width and height.
    #[inline]
    pub fn same_dimensions(&self, other: &Image) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Returns the pixel at row `y`, column `x`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, y: usize, x: usize) -> Pixel {
        assert!(
            y < self.height && x < self.width,
            "pixel ({y}, {x}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        self.pixels[y * self.width + x]
    }

    /// Returns the pixel at row `y`, column `x`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, y: usize, x: usize) -> Option<Pixel> {
        (y < self.height && x < self.width).then(|| self.pixels[y * self.width + x])
    }

    /// Replaces a single pixel.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, y: usize, x: usize, pixel: Pixel) {
        assert!(
            y < self.height && x < self.width,
            "pixel ({y}, {x}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        self.pixels[y * self.width + x] = pixel;
    }

    /// Replaces every pixel from a list of rows of the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the rows do not match the
    /// image's dimensions. The image is left untouched in that case.
    pub fn fill_from<R: AsRef<[Pixel]>>(&mut self, rows: &[R]) -> Result<()> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        if height != self.height || rows.iter().any(|r| r.as_ref().len() != self.width) {
            return Err(Error::dimension_mismatch(self.dimensions(), (width, height)));
        }
        for (dst, row) in self.pixels.chunks_exact_mut(self.width).zip(rows) {
            dst.copy_from_slice(row.as_ref());
        }
        Ok(())
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(self.width)
    }

    /// Returns a new image with `f` applied to every pixel.
    pub fn map<F>(&self, f: F) -> Image
    where
        F: FnMut(&Pixel) -> Pixel,
    {
        Image {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(f).collect(),
        }
    }

    /// Returns a new image of the same size built from `f(y, x, pixel)`.
    pub fn map_indexed<F>(&self, mut f: F) -> Image
    where
        F: FnMut(usize, usize, Pixel) -> Pixel,
    {
        let w = self.width;
        Image {
            width: self.width,
            height: self.height,
            pixels: self
                .pixels
                .iter()
                .enumerate()
                .map(|(i, p)| f(i / w, i % w, *p))
                .collect(),
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be positive",
        ));
    }
    Ok(())
}
