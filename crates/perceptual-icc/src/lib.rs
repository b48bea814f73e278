//! # perceptual-icc
//!
//! ICC profile access for the perceptual color engine, built on Little CMS 2.
//!
//! # Features
//!
//! - Load RGB profiles from files or in-memory ICC data
//! - Built-in profiles (sRGB and a few wide-gamut RGB spaces)
//! - Profile metadata: description, manufacturer, model, copyright,
//!   ICC version, device class, PCS, matrix-shaper and `vcgt` detection
//! - [`LabTransforms`]: the three uncached transforms a gamut engine needs
//!   (Lab to RGB in `f64` and `u16`, RGB to Lab)
//!
//! # Example
//!
//! ```rust
//! use perceptual_icc::{Intent, LabTransforms, Profile};
//!
//! let srgb = Profile::srgb();
//! let transforms = LabTransforms::new(&srgb, Intent::AbsoluteColorimetric).unwrap();
//! let lab = transforms.rgb_to_lab([1.0, 1.0, 1.0]);
//! assert!(lab[0] > 99.0);
//! ```
//!
//! # Thread Safety
//!
//! [`LabTransforms`] are created with the LittleCMS no-cache flag and may be
//! shared between threads. [`Profile`] is only needed while building them.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod profile;
mod standard;
mod transform;

pub use error::{IccError, IccResult};
pub use profile::Profile;
pub use standard::StandardProfile;
pub use transform::LabTransforms;

/// Rendering intent for color transformations.
///
/// Determines how out-of-gamut colors are handled during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// Compresses the entire source gamut to fit within the destination.
    #[default]
    Perceptual,

    /// Clips out-of-gamut colors, mapping media white to media white.
    RelativeColorimetric,

    /// Maintains saturation at the expense of accuracy.
    Saturation,

    /// Clips out-of-gamut colors without white point adaptation.
    ///
    /// Used by the gamut engine: in-gamut colors survive a Lab/RGB
    /// roundtrip unchanged, out-of-gamut colors do not.
    AbsoluteColorimetric,
}

impl From<Intent> for lcms2::Intent {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Perceptual => lcms2::Intent::Perceptual,
            Intent::RelativeColorimetric => lcms2::Intent::RelativeColorimetric,
            Intent::Saturation => lcms2::Intent::Saturation,
            Intent::AbsoluteColorimetric => lcms2::Intent::AbsoluteColorimetric,
        }
    }
}
