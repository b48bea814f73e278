//! ICC error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ICC operations.
pub type IccResult<T> = Result<T, IccError>;

/// Errors from loading profiles and building transforms.
#[derive(Debug, Error)]
pub enum IccError {
    /// The profile file could not be read.
    #[error("cannot read profile {}: {source}", path.display())]
    LoadFailed {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The data is not a parsable ICC profile.
    #[error("invalid ICC profile: {0}")]
    InvalidProfile(String),

    /// LittleCMS could not create a profile.
    #[error("cannot create {what} profile: {reason}")]
    CreateFailed {
        /// Kind of profile, e.g. `"Lab"` or `"display-p3"`.
        what: String,
        /// LittleCMS error text.
        reason: String,
    },

    /// LittleCMS could not build a transform for the profile.
    #[error("cannot build {direction} transform: {reason}")]
    TransformFailed {
        /// Conversion direction, e.g. `"Lab to RGB"`.
        direction: &'static str,
        /// LittleCMS error text.
        reason: String,
    },
}
