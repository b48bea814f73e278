//! Error types for gamut engine construction.

use perceptual_icc::IccError;
use thiserror::Error;

/// Result type for gamut engine construction.
pub type GamutResult<T> = Result<T, GamutError>;

/// Errors that can occur while building an [`crate::RgbColorSpace`].
///
/// Construction is the only fallible step; every conversion and gamut query
/// on a built color space is a total function.
#[derive(Debug, Error)]
pub enum GamutError {
    /// Profile loading or transform creation failed.
    #[error(transparent)]
    Icc(#[from] IccError),

    /// The profile is readable but cannot drive a gamut engine.
    #[error("unsupported profile: {reason}")]
    UnsupportedProfile {
        /// Why the profile was rejected.
        reason: String,
    },

    /// No in-gamut point was found on the achromatic axis, or the
    /// blackpoint is not below the whitepoint.
    #[error("no usable gamut boundary on the achromatic axis in {space}")]
    GamutBoundaryNotFound {
        /// Color model that was searched.
        space: &'static str,
    },
}

impl GamutError {
    /// Creates a [`GamutError::UnsupportedProfile`] error.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedProfile {
            reason: reason.into(),
        }
    }
}
