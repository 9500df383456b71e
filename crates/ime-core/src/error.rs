//! Error types for ime-core operations.
//!
//! The [`Error`] enum covers the failure modes of the data model itself:
//! - Image construction with zero or ragged dimensions
//! - Bulk updates whose shape disagrees with the target image
//! - Lookups of names absent from an [`crate::store::ImageStore`]
//!
//! # Usage
//!
//! ```rust
//! use ime_core::{Error, Result};
//!
//! fn check(width: usize, height: usize) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_dimensions(width, height, "empty image"));
//!     }
//!     Ok(())
//! }
//! assert!(check(0, 4).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the image data model and the image store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No image is stored under the requested name.
    #[error("image not found: {name}")]
    ImageNotFound {
        /// Name that was looked up
        name: String,
    },

    /// Dimensions are zero, ragged or inconsistent with the supplied data.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
        /// What was wrong
        reason: String,
    },

    /// Two images (or an image and a bulk update) have different shapes.
    #[error("dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    DimensionMismatch {
        /// Expected width
        expected_width: usize,
        /// Expected height
        expected_height: usize,
        /// Actual width
        actual_width: usize,
        /// Actual height
        actual_height: usize,
    },
}

impl Error {
    /// Creates an [`Error::ImageNotFound`].
    pub fn image_not_found(name: impl Into<String>) -> Self {
        Self::ImageNotFound { name: name.into() }
    }

    /// Creates an [`Error::InvalidDimensions`].
    pub fn invalid_dimensions(width: usize, height: usize, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] from `(width, height)` pairs.
    pub fn dimension_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        }
    }

    /// Returns `true` if this is a missing-image error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ImageNotFound { .. })
    }

    /// Returns `true` if this is a dimension-related error.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::DimensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::image_not_found("koala");
        assert_eq!(err.to_string(), "image not found: koala");

        let err = Error::dimension_mismatch((2, 2), (3, 1));
        assert!(err.to_string().contains("2x2"));
        assert!(err.to_string().contains("3x1"));
    }

    #[test]
    fn test_predicates() {
        assert!(Error::image_not_found("x").is_not_found());
        assert!(!Error::image_not_found("x").is_dimension_error());
        assert!(Error::invalid_dimensions(0, 1, "empty").is_dimension_error());
        assert!(Error::dimension_mismatch((1, 1), (2, 2)).is_dimension_error());
    }
}
