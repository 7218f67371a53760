//! Error types for component and payload construction.

use std::path::PathBuf;

/// Result type alias for herald operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building components or request payloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument violated a constraint. `field` names the offending
    /// field or constraint.
    #[error("{field} {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// A file attachment could not be read.
    #[error("Failed to read file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An inbound payload could not be decoded.
    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Name of the violated field, if this is an argument error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidArgument { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Whether this is an argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
