//! Stream snapshot errors.

use br_core::BrError;
use thiserror::Error;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors raised while building or reading a stream snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StreamError {
    /// Non-physical values (negative flow, non-positive pressure, etc.).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A property the framework did not supply but a unit needs.
    #[error("Stream property not available: {what}")]
    MissingProperty { what: &'static str },
}

impl From<StreamError> for BrError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::NonPhysical { what, .. } => BrError::Invariant { what },
            StreamError::InvalidArg { what } => BrError::InvalidArg { what },
            StreamError::MissingProperty { what } => BrError::InvalidArg { what },
        }
    }
}
