//! RGB color space gamut engine.
//!
//! [`RgbColorSpace`] wraps the LittleCMS transforms of one RGB profile and
//! answers, for CIELab/CIELCh (D50) and Oklab/Oklch colors:
//!
//! - whether a color is displayable (roundtrip validity test)
//! - which device color it maps to
//! - how far its chroma must be reduced to become displayable
//! - which device color is the most saturated at a given hue
//!
//! LittleCMS clips out-of-range results silently, so a color counts as in
//! gamut only if its RGB image lies in `[0, 1]` and converting back lands
//! within a small deviation of the input.
//!
//! # Example
//!
//! ```rust,no_run
//! use perceptual_core::{GenericColor, Rgba8};
//! use perceptual_gamut::RgbColorSpace;
//!
//! let space = RgbColorSpace::create_srgb()?;
//! let gray = space.from_cielab_d50_to_rgba_or_transparent(&GenericColor::new(50.0, 0.0, 0.0));
//! assert!(gray.is_opaque());
//!
//! let red = space.max_chroma_color_by_cielch_d50_hue360(40.0);
//! assert_ne!(red, Rgba8::TRANSPARENT);
//! # Ok::<(), perceptual_gamut::GamutError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod constants;
mod error;
mod hue_map;
mod rgb_color_space;

pub use error::{GamutError, GamutResult};
pub use hue_map::HueMap;
pub use rgb_color_space::{ProfileMetadata, RgbColorSpace};
