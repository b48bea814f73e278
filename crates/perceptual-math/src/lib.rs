//! # perceptual-math
//!
//! Numeric building blocks for the perceptual color engine:
//!
//! - [`PolarPoint`] - Normalized polar coordinates (chroma/hue planes)
//! - Helpers: [`is_in_range`], [`is_nearly_equal`], [`normalized_angle_degree`],
//!   [`round_to_digits`], [`is_odd`], [`split_elements`], [`split_list`]
//! - [`Mat3`] - `f64` 3x3 matrices with a closed-form inverse
//! - Conversions between CIELab/CIELCh (D50), XYZ and Oklab/Oklch
//!
//! # Design
//!
//! All matrix operations assume **row-major** storage and **column vectors**;
//! [`Trio`] (a [`glam::DVec3`]) is the vector type:
//!
//! ```text
//! result = matrix * trio
//! ```
//!
//! # Usage
//!
//! ```rust
//! use perceptual_core::GenericColor;
//! use perceptual_math::{cielab_d50_to_oklab, oklab_to_cielab_d50};
//!
//! let lab = GenericColor::new(50.0, 20.0, -30.0);
//! let back = oklab_to_cielab_d50(&cielab_d50_to_oklab(&lab));
//! assert!((back.first - 50.0).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - `DVec3` as the matrix-vector trio type
//! - `perceptual-core` - [`perceptual_core::GenericColor`]
//!
//! # Used By
//!
//! - `perceptual-gamut` - Gamut engine conversions
//! - `perceptual-render` - Diagram geometry

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod convert;
mod helpers;
mod mat3;
mod polar;

pub use adapt::*;
pub use convert::*;
pub use helpers::*;
pub use mat3::*;
pub use polar::*;
