//! JPEG format support.
//!
//! Decoding goes through `jpeg-decoder`, encoding through `jpeg-encoder`.
//! JPEG has no alpha: reads come back opaque and writes drop alpha.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use ime_core::ChannelPlanes;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{IoError, IoResult};

/// Encoder quality used by [`write`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ChannelPlanes> {
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

    let width = info.width as usize;
    let height = info.height as usize;
    trace!(width, height, format = ?info.pixel_format, "jpeg::read");

    let rgb: Vec<[u8; 3]> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => {
            pixels.chunks_exact(3).map(|p| [p[0], p[1], p[2]]).collect()
        }
        jpeg_decoder::PixelFormat::L8 => pixels.iter().map(|&g| [g, g, g]).collect(),
        // High byte of each big-endian sample
        jpeg_decoder::PixelFormat::L16 => {
            pixels.chunks_exact(2).map(|l| [l[0], l[0], l[0]]).collect()
        }
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|cmyk| {
                let k = 1.0 - cmyk[3] as f32 / 255.0;
                let ch = |v: u8| ((1.0 - v as f32 / 255.0) * k * 255.0) as u8;
                [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2])]
            })
            .collect(),
    };

    if rgb.len() < width * height {
        return Err(IoError::DecodeError(format!(
            "expected {} pixels, decoded {}",
            width * height,
            rgb.len()
        )));
    }

    let mut planes = ChannelPlanes::new(width, height);
    for (i, [r, g, b]) in rgb.into_iter().take(width * height).enumerate() {
        planes.red[i] = r as i32;
        planes.green[i] = g as i32;
        planes.blue[i] = b as i32;
    }
    Ok(planes)
}

/// Writes a JPEG file at [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, planes: &ChannelPlanes) -> IoResult<()> {
    write_with_quality(path, planes, DEFAULT_QUALITY)
}

/// Writes a JPEG file at the given quality (1-100).
pub fn write_with_quality<P: AsRef<Path>>(
    path: P,
    planes: &ChannelPlanes,
    quality: u8,
) -> IoResult<()> {
    let width = u16::try_from(planes.width)
        .map_err(|_| IoError::EncodeError(format!("width {} exceeds JPEG limit", planes.width)))?;
    let height = u16::try_from(planes.height).map_err(|_| {
        IoError::EncodeError(format!("height {} exceeds JPEG limit", planes.height))
    })?;

    let len = planes.width * planes.height;
    let mut data = Vec::with_capacity(len * 3);
    for i in 0..len {
        for v in [planes.red[i], planes.green[i], planes.blue[i]] {
            data.push(v.clamp(0, 255) as u8);
        }
    }

    let mut buffer = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut buffer, quality);
    encoder
        .encode(&data, width, height, jpeg_encoder::ColorType::Rgb)
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

    fs::write(path.as_ref(), buffer)?;
    Ok(())
}
