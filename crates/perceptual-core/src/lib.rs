//! # perceptual-core
//!
//! Core types shared by the perceptual color engine crates.
//!
//! - [`GenericColor`] - Three (plus one) `f64` channels whose meaning depends
//!   on context (CIELab, CIELCh, Oklab, Oklch, unit RGB)
//! - [`Rgba8`], [`DeviceRgb`] - Device colors as 8-bit pixels and unit floats
//! - [`Image`] - Row-major raster buffer with an explicit [`PixelFormat`]
//! - [`Point`], [`Rect`], [`Size`] - Integer raster geometry
//!
//! ## Crate Structure
//!
//! ```text
//! perceptual-core (this crate)
//!    ^
//!    |
//!    +-- perceptual-math (polar points, color math)
//!    +-- perceptual-gamut (RGB color space engine)
//!    +-- perceptual-render (diagram images)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod error;
pub mod image;
pub mod rect;

pub use color::*;
pub use error::*;
pub use image::*;
pub use rect::*;
