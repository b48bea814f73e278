//! Color value types.
//!
//! - [`GenericColor`] - Untyped three-channel `f64` color. Whether it holds
//!   CIELab, CIELCh, Oklab, Oklch or unit RGB depends on where it is used.
//! - [`Rgba8`] - 8-bit device pixel, straight or premultiplied depending on
//!   the [`crate::PixelFormat`] of the image it lives in.
//! - [`DeviceRgb`] - Device RGB with channels nominally in `[0, 1]`.
//!
//! # Usage
//!
//! ```rust
//! use perceptual_core::{GenericColor, Rgba8};
//!
//! let lch = GenericColor::new(50.0, 32.0, 270.0);
//! assert_eq!(lch.to_array(), [50.0, 32.0, 270.0]);
//!
//! let pixel = Rgba8::opaque(255, 128, 0);
//! assert!(pixel.is_opaque());
//! ```

use std::fmt;

/// Three `f64` channels plus an optional fourth one.
///
/// The channel meaning depends on context:
///
/// | context | first | second | third |
/// |---|---|---|---|
/// | CIELab / Oklab | L | a | b |
/// | CIELCh / Oklch | L | C | h (degree) |
/// | unit RGB | red | green | blue |
///
/// `fourth` is unused by every conversion in this workspace and defaults to 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenericColor {
    /// First channel (lightness or red).
    pub first: f64,
    /// Second channel (a, chroma or green).
    pub second: f64,
    /// Third channel (b, hue or blue).
    pub third: f64,
    /// Fourth channel (alpha or unused).
    pub fourth: f64,
}

impl GenericColor {
    /// Creates a color from three channels; `fourth` is 0.
    #[inline]
    pub const fn new(first: f64, second: f64, third: f64) -> Self {
        Self {
            first,
            second,
            third,
            fourth: 0.0,
        }
    }

    /// Creates a color with all four channels.
    #[inline]
    pub const fn with_fourth(first: f64, second: f64, third: f64, fourth: f64) -> Self {
        Self {
            first,
            second,
            third,
            fourth,
        }
    }

    /// Creates a color from the first three array elements.
    #[inline]
    pub const fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// Returns the first three channels.
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.first, self.second, self.third]
    }

    /// Squared Euclidean distance over the first three channels.
    #[inline]
    pub fn squared_distance(&self, other: &Self) -> f64 {
        let d0 = self.first - other.first;
        let d1 = self.second - other.second;
        let d2 = self.third - other.third;
        d0 * d0 + d1 * d1 + d2 * d2
    }
}

impl From<[f64; 3]> for GenericColor {
    fn from(values: [f64; 3]) -> Self {
        Self::from_array(values)
    }
}

impl fmt::Display for GenericColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GenericColor({}, {}, {}, {})",
            self.first, self.second, self.third, self.fourth
        )
    }
}

/// An 8-bit RGBA pixel.
///
/// Whether the color channels are premultiplied with alpha is a property of
/// the containing image, not of the pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black. Used as the out-of-gamut sentinel.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque pixel.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Converts unit-range channels to an opaque pixel.
    ///
    /// Each channel is scaled by 255, rounded and clamped to `0..=255`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use perceptual_core::Rgba8;
    ///
    /// assert_eq!(Rgba8::from_unit_rgb(1.2, 0.5, -0.1), Rgba8::opaque(255, 128, 0));
    /// ```
    pub fn from_unit_rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::opaque(
            unit_to_eight_bit(red),
            unit_to_eight_bit(green),
            unit_to_eight_bit(blue),
        )
    }

    /// Returns `true` if alpha is 255.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Returns `true` if alpha is 0.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Returns the same pixel with a different alpha value.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Multiplies the color channels by alpha.
    pub fn premultiplied(self) -> Self {
        let a = self.a as u32;
        let scale = |c: u8| ((c as u32 * a + 127) / 255) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// Divides the color channels by alpha. Zero alpha gives [`Rgba8::TRANSPARENT`].
    pub fn unpremultiplied(self) -> Self {
        if self.a == 0 {
            return Self::TRANSPARENT;
        }
        let a = self.a as u32;
        let scale = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Scales a unit value to `0..=255` with rounding and clamping.
#[inline]
pub fn unit_to_eight_bit(value: f64) -> u8 {
    // NaN saturates to 0
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Device RGB with `f64` channels nominally in `[0, 1]`.
///
/// Input type of the RGB-to-Lab conversions; built from 8-bit or
/// 16-bit device values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeviceRgb {
    /// Red channel.
    pub red: f64,
    /// Green channel.
    pub green: f64,
    /// Blue channel.
    pub blue: f64,
}

impl DeviceRgb {
    /// Creates a device color from unit channels.
    #[inline]
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Returns the channels as an array.
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<Rgba8> for DeviceRgb {
    fn from(pixel: Rgba8) -> Self {
        Self::new(
            pixel.r as f64 / 255.0,
            pixel.g as f64 / 255.0,
            pixel.b as f64 / 255.0,
        )
    }
}

impl From<[u8; 3]> for DeviceRgb {
    fn from(rgb: [u8; 3]) -> Self {
        Rgba8::opaque(rgb[0], rgb[1], rgb[2]).into()
    }
}

impl From<[u16; 3]> for DeviceRgb {
    fn from(rgb: [u16; 3]) -> Self {
        const MAX: f64 = u16::MAX as f64;
        Self::new(rgb[0] as f64 / MAX, rgb[1] as f64 / MAX, rgb[2] as f64 / MAX)
    }
}
