//! # ime-io
//!
//! Image file I/O for the editing engine.
//!
//! Codecs decode files into [`ChannelPlanes`] and encode planes back out;
//! [`read_image`] and [`write_image`] bridge to [`Image`].
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Alpha | Feature |
//! |--------|------|-------|-------|---------|
//! | PPM (P3) | yes | yes | no | always |
//! | PNG | yes | yes | yes | `png` |
//! | JPEG | yes | yes | no | `jpeg` |
//!
//! Formats without alpha load as fully opaque and are saved with alpha
//! forced to 255.
//!
//! # Example
//!
//! ```rust,ignore
//! use ime_io::{read_image, write_image};
//!
//! let image = read_image("input.ppm")?;
//! write_image("output.png", &image)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use std::path::Path;

use ime_core::{ChannelPlanes, Image};
#[allow(unused_imports)]
use tracing::{debug, trace};

mod error;
pub mod detect;
pub mod ppm;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

pub use detect::Format;
pub use error::{IoError, IoResult};

/// Reads an image file into channel planes.
///
/// Format is detected from magic bytes, falling back to the extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ChannelPlanes> {
    let path = path.as_ref();
    let format = Format::detect(path)?;
    debug!(path = %path.display(), %format, "read");

    match format {
        Format::Ppm => ppm::read(path),
        #[cfg(feature = "png")]
        Format::Png => png::read(path),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),
        _ => Err(unsupported(path)),
    }
}

/// Writes channel planes to a file.
///
/// Format is chosen by extension. Formats without alpha get alpha 255.
pub fn write<P: AsRef<Path>>(path: P, planes: &ChannelPlanes) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), %format, "write");

    let opaque;
    let planes = if format.has_alpha() {
        planes
    } else {
        opaque = {
            let mut p = planes.clone();
            p.make_opaque();
            p
        };
        &opaque
    };

    match format {
        Format::Ppm => ppm::write(path, planes),
        #[cfg(feature = "png")]
        Format::Png => png::write(path, planes),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, planes),
        _ => Err(unsupported(path)),
    }
}

/// Reads an image file.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let planes = read(path)?;
    Ok(Image::from_planes(&planes)?)
}

/// Writes an image file.
pub fn write_image<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    write(path, &image.to_planes())
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(format!(
        "{} (supported: ppm, png, jpg, jpeg)",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ime_core::Pixel;

    fn sample() -> Image {
        Image::from_fn(3, 2, |y, x| {
            Pixel::new(40 * x as i32, 100 + y as i32, 7, 50 + x as i32)
        })
        .unwrap()
    }

    #[test]
    fn test_ppm_forces_opaque() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ppm");
        write_image(&path, &sample()).unwrap();
        let back = read_image(&path).unwrap();
        assert_eq!(back, sample().map(|p| Pixel { a: 255, ..*p }));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_png_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.PNG");
        write_image(&path, &sample()).unwrap();
        assert_eq!(read_image(&path).unwrap(), sample());
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bmp");
        assert!(matches!(
            write_image(&path, &sample()),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_image(dir.path().join("nope.ppm")),
            Err(IoError::Io(_))
        ));
    }

    #[cfg(feature = "png")]
    #[test]
    fn test_magic_beats_extension() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.png");
        write_image(&real, &sample()).unwrap();
        let renamed = dir.path().join("renamed.ppm");
        std::fs::rename(&real, &renamed).unwrap();
        assert_eq!(read_image(&renamed).unwrap(), sample());
    }

    #[test]
    fn test_zero_size_ppm_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("z.ppm");
        std::fs::write(&path, "P3\n0 0\n255\n").unwrap();
        assert!(matches!(read_image(&path), Err(IoError::Core(_))));
    }
}
