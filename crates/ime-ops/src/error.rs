//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpsError {
    /// Malformed, missing or out-of-range parameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A source image is absent from the store.
    #[error("image not found: {0}")]
    ImageNotFound(String),

    /// The command name is not in the registry.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Error from the image data model.
    #[error(transparent)]
    Core(ime_core::Error),
}

impl OpsError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Returns `true` for [`OpsError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` for [`OpsError::ImageNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ImageNotFound(_))
    }
}

impl From<ime_core::Error> for OpsError {
    fn from(err: ime_core::Error) -> Self {
        match err {
            ime_core::Error::ImageNotFound { name } => Self::ImageNotFound(name),
            other => Self::Core(other),
        }
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
