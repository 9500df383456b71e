//! Format detection utilities.
//!
//! Formats are chosen by file extension when writing. When reading, magic
//! bytes win over the extension so a mislabelled file still decodes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::IoResult;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Plain-text PPM (`P3`).
    Ppm,
    /// PNG format.
    Png,
    /// JPEG format.
    Jpeg,
    /// Unknown/unsupported format.
    Unknown,
}

impl Format {
    /// Detects format from file path (magic bytes, then extension).
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        match Self::from_magic_bytes(path)? {
            Format::Unknown => Ok(Self::from_extension(path)),
            format => Ok(format),
        }
    }

    /// Detects format from file extension only (case-insensitive).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("ppm") => Format::Ppm,
            Some("png") => Format::Png,
            Some("jpg") | Some("jpeg") => Format::Jpeg,
            _ => Format::Unknown,
        }
    }

    /// Detects format from the first bytes of a file.
    pub fn from_magic_bytes<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut file = File::open(path)?;
        let mut header = [0u8; 8];
        let bytes_read = file.read(&mut header)?;
        Ok(Self::from_bytes(&header[..bytes_read]))
    }

    /// Detects format from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Format::Png;
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Format::Jpeg;
        }
        // P3 may be preceded by comment lines, so only an exact start counts
        if bytes.starts_with(b"P3") {
            return Format::Ppm;
        }
        Format::Unknown
    }

    /// Returns true if the format stores an alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(self, Format::Png)
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Format::Ppm => "PPM",
            Format::Png => "PNG",
            Format::Jpeg => "JPEG",
            Format::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
