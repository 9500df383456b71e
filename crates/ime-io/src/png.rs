//! PNG format support.
//!
//! Reads 8- and 16-bit RGB, RGBA, grayscale and grayscale+alpha files
//! (16-bit samples keep their high byte). Writes 8-bit RGBA so alpha
//! survives a save.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ime_core::ChannelPlanes;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// Reads a PNG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ChannelPlanes> {
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let width = info.width as usize;
    let height = info.height as usize;
    let data = &buf[..info.buffer_size()];
    trace!(width, height, color = ?info.color_type, depth = ?info.bit_depth, "png::read");

    let step = match info.bit_depth {
        png::BitDepth::Eight => 1,
        png::BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNG bit depth {other:?} after expansion"
            )));
        }
    };
    // Samples per pixel, and how to spread them onto RGBA
    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat("indexed PNG was not expanded".into()));
        }
    };

    let mut planes = ChannelPlanes::new(width, height);
    for (i, px) in data.chunks_exact(channels * step).take(width * height).enumerate() {
        let s = |c: usize| px[c * step] as i32;
        let (r, g, b, a) = match channels {
            1 => (s(0), s(0), s(0), 255),
            2 => (s(0), s(0), s(0), s(1)),
            3 => (s(0), s(1), s(2), 255),
            _ => (s(0), s(1), s(2), s(3)),
        };
        planes.red[i] = r;
        planes.green[i] = g;
        planes.blue[i] = b;
        planes.alpha[i] = a;
    }
    Ok(planes)
}

/// Writes an 8-bit RGBA PNG file.
pub fn write<P: AsRef<Path>>(path: P, planes: &ChannelPlanes) -> IoResult<()> {
    let width = u32::try_from(planes.width)
        .map_err(|_| IoError::EncodeError(format!("width {} too large", planes.width)))?;
    let height = u32::try_from(planes.height)
        .map_err(|_| IoError::EncodeError(format!("height {} too large", planes.height)))?;

    let file = File::create(path.as_ref())?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e: png::EncodingError| IoError::EncodeError(e.to_string()))?;
    writer
        .write_image_data(&interleave(planes))
        .map_err(|e: png::EncodingError| IoError::EncodeError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e: png::EncodingError| IoError::EncodeError(e.to_string()))
}

fn interleave(planes: &ChannelPlanes) -> Vec<u8> {
    let len = planes.width * planes.height;
    let mut out = Vec::with_capacity(len * 4);
    for i in 0..len {
        for v in [planes.red[i], planes.green[i], planes.blue[i], planes.alpha[i]] {
            out.push(v.clamp(0, 255) as u8);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.png");

        let mut planes = ChannelPlanes::new(2, 2);
        planes.red = vec![255, 0, 10, 20];
        planes.green = vec![0, 255, 30, 40];
        planes.blue = vec![0, 0, 50, 60];
        planes.alpha = vec![255, 128, 0, 7];

        write(&path, &planes).unwrap();
        assert_eq!(read(&path).unwrap(), planes);
    }

    #[test]
    fn test_read_grayscale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        {
            let file = File::create(&path).unwrap();
            let mut enc = png::Encoder::new(BufWriter::new(file), 2, 1);
            enc.set_color(png::ColorType::Grayscale);
            enc.set_depth(png::BitDepth::Eight);
            let mut w = enc.write_header().unwrap();
            w.write_image_data(&[17, 200]).unwrap();
        }
        let planes = read(&path).unwrap();
        assert_eq!(planes.red, vec![17, 200]);
        assert_eq!(planes.blue, vec![17, 200]);
        assert_eq!(planes.alpha, vec![255, 255]);
    }

    #[test]
    fn test_read_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(read(&path), Err(IoError::DecodeError(_))));
    }
}
