//! # perceptual-render
//!
//! Progressive, parallel rendering of gamut diagrams.
//!
//! - [`ChromaHueImageParameters`] - the CIELab a/b plane at one lightness,
//!   refined over 11 interlacing passes
//! - [`ChromaLightnessImageParameters`] - chroma against lightness at one hue
//! - [`ColorWheelImage`] - a cached hue ring
//! - [`GradientImageParameters`] - a slider gradient between two colors
//!   with alpha
//!
//! Renders report to a [`RenderCallback`], which can abort between and
//! during stages. Work runs on the library's own [`RenderContext`] pool.
//!
//! ## Pipeline
//!
//! ```text
//! InterlacingPass 1..n  ->  deliver(Intermediate) after each pass
//!        |
//!   cut-off, find_boundary, do_antialias
//!        |
//!   deliver(Final)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod antialias;
mod callback;
mod chroma_hue;
mod chroma_lightness;
mod color_wheel;
mod context;
mod error;
mod gradient;
pub mod interlacing;

pub use antialias::{do_antialias, find_boundary};
pub use callback::{CollectingCallback, InterlacingState, RenderCallback};
pub use chroma_hue::{CHROMA_HUE_PASS_COUNT, ChromaHueImageParameters};
pub use chroma_lightness::ChromaLightnessImageParameters;
pub use color_wheel::ColorWheelImage;
pub use context::RenderContext;
pub use error::{RenderError, RenderResult};
pub use gradient::{GradientImageParameters, normalized_lcha, transparency_background};
pub use interlacing::InterlacingPass;
