//! Plain-text PPM (`P3`) support.
//!
//! ```text
//! P3
//! # comment lines are allowed anywhere
//! WIDTH HEIGHT
//! MAXVAL
//! r g b r g b ...
//! ```
//!
//! Samples may be separated by any whitespace. The writer emits one sample
//! per line. PPM has no alpha: reading yields opaque pixels and writing
//! drops alpha.

use std::fs;
use std::path::Path;

use ime_core::ChannelPlanes;
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::{IoError, IoResult};

const MAGIC: &str = "P3";

/// Reads a PPM file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ChannelPlanes> {
    let text = fs::read_to_string(path.as_ref())?;
    decode(&text)
}

/// Writes a PPM file.
pub fn write<P: AsRef<Path>>(path: P, planes: &ChannelPlanes) -> IoResult<()> {
    fs::write(path.as_ref(), encode(planes))?;
    Ok(())
}

/// Parses PPM text.
pub fn decode(text: &str) -> IoResult<ChannelPlanes> {
    let mut tokens = text
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace);

    let magic = tokens
        .next()
        .ok_or_else(|| IoError::Parse("empty PPM file".into()))?;
    if magic != MAGIC {
        return Err(IoError::Parse(format!(
            "invalid PPM file format: expected {MAGIC}, got '{magic}'"
        )));
    }

    let mut number = |what: &str| -> IoResult<i64> {
        let tok = tokens
            .next()
            .ok_or_else(|| IoError::Parse(format!("missing {what}")))?;
        tok.parse()
            .map_err(|_| IoError::Parse(format!("invalid {what}: '{tok}'")))
    };
    let mut dimension = |what: &str| -> IoResult<usize> {
        let v = number(what)?;
        usize::try_from(v).map_err(|_| IoError::Parse(format!("invalid {what}: {v}")))
    };

    let width = dimension("width")?;
    let height = dimension("height")?;
    let maxval = number("max value")?;
    if !(1..=i32::MAX as i64).contains(&maxval) {
        return Err(IoError::Parse(format!("invalid max value: {maxval}")));
    }
    trace!(width, height, maxval, "ppm header");

    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| IoError::Parse(format!("image size {width}x{height} overflows")))?;

    // Samples are gathered before the planes are allocated, so the header
    // size can never exceed what the text actually holds.
    let mut samples = Vec::new();
    for _ in 0..expected {
        let v = number("sample")?;
        if !(0..=maxval).contains(&v) {
            return Err(IoError::Parse(format!("sample {v} outside 0..={maxval}")));
        }
        samples.push(v as i32);
    }

    let mut planes = ChannelPlanes::new(width, height);
    for (i, rgb) in samples.chunks_exact(3).enumerate() {
        planes.red[i] = rgb[0];
        planes.green[i] = rgb[1];
        planes.blue[i] = rgb[2];
    }
    Ok(planes)
}

/// Serialises planes as PPM text, one sample per line.
pub fn encode(planes: &ChannelPlanes) -> String {
    let mut out = format!("{MAGIC}\n{} {}\n255\n", planes.width, planes.height);
    for i in 0..planes.width * planes.height {
        for v in [planes.red[i], planes.green[i], planes.blue[i]] {
            out.push_str(&v.clamp(0, 255).to_string());
            out.push('\n');
        }
    }
    out
}
