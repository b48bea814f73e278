//! A one-dimensional gradient between two CIELCh-D50 colors with alpha.

use crate::{InterlacingState, RenderCallback, RenderContext};
use perceptual_core::{GenericColor, Image, PixelFormat, Rgba8, unit_to_eight_bit};
use perceptual_gamut::RgbColorSpace;
use perceptual_math::normalized_angle_degree;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Gray levels of the two checkerboard tiles, equally far from mid gray.
const CHECKER_DARK: u8 = 127 - 15;
const CHECKER_LIGHT: u8 = 128 + 15;

/// Checkerboard tile edge in logical pixels.
const CHECKER_TILE_LOGICAL: f64 = 10.0;

/// Brings an LCh color with alpha (in `fourth`) into canonical form.
///
/// Negative chroma becomes positive with the hue turned by 180°. The hue is
/// normalized to `[0, 360)`, lightness clamped to `[0, 100]` and alpha
/// to `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use perceptual_core::GenericColor;
/// use perceptual_render::normalized_lcha;
///
/// let color = normalized_lcha(&GenericColor::with_fourth(120.0, -10.0, 300.0, 2.0));
/// assert_eq!(color, GenericColor::with_fourth(100.0, 10.0, 120.0, 1.0));
/// ```
pub fn normalized_lcha(color: &GenericColor) -> GenericColor {
    let (chroma, hue) = if color.second < 0.0 {
        (-color.second, color.third + 180.0)
    } else {
        (color.second, color.third)
    };
    GenericColor::with_fourth(
        color.first.clamp(0.0, 100.0),
        chroma,
        normalized_angle_degree(hue),
        color.fourth.clamp(0.0, 1.0),
    )
}

/// A two-tone gray checkerboard that shows through translucent colors.
///
/// Tiles are 10 logical pixels wide, scaled by `device_pixel_ratio`; the
/// top-left tile is the lighter one. The returned image holds exactly two
/// tiles in each direction.
pub fn transparency_background(device_pixel_ratio: f64) -> Image {
    let tile = tile_size(device_pixel_ratio);
    let mut image = Image::new(2 * tile, 2 * tile, PixelFormat::Argb32Premultiplied);
    let width = image.width() as usize;
    for (index, pixel) in image.pixels_mut().iter_mut().enumerate() {
        *pixel = checker_color(index % width, index / width, tile as usize);
    }
    image.set_device_pixel_ratio(device_pixel_ratio);
    image
}

fn tile_size(device_pixel_ratio: f64) -> u32 {
    ((CHECKER_TILE_LOGICAL * device_pixel_ratio).round() as u32).max(1)
}

fn checker_color(x: usize, y: usize, tile: usize) -> Rgba8 {
    let level = if (x / tile + y / tile) % 2 == 0 {
        CHECKER_LIGHT
    } else {
        CHECKER_DARK
    };
    Rgba8::opaque(level, level, level)
}

/// Premultiplied source-over compositing.
fn over(source: Rgba8, destination: Rgba8) -> Rgba8 {
    let keep = 255 - source.a as u32;
    let blend = |s: u8, d: u8| (s as u32 + (d as u32 * keep + 127) / 255).min(255) as u8;
    Rgba8::new(
        blend(source.r, destination.r),
        blend(source.g, destination.g),
        blend(source.b, destination.b),
        blend(source.a, destination.a),
    )
}

/// A request for a gradient slider image.
///
/// The gradient runs left to right from the first to the second color.
/// Lightness, chroma, hue and alpha are interpolated linearly; the hue
/// takes the shorter way round the circle. Colors outside the gamut are
/// clipped, never left transparent. When either color is translucent, the
/// gradient is painted over a gray checkerboard.
///
/// Colors are LCh with alpha in [`GenericColor::fourth`]. Setters store them
/// in the form [`normalized_lcha`] gives.
///
/// # Example
///
/// ```rust,no_run
/// use perceptual_core::GenericColor;
/// use perceptual_gamut::RgbColorSpace;
/// use perceptual_render::{CollectingCallback, GradientImageParameters, RenderContext};
///
/// let mut gradient = GradientImageParameters::new(RgbColorSpace::create_srgb()?);
/// gradient.set_first_color(GenericColor::with_fourth(50.0, 60.0, 350.0, 1.0));
/// gradient.set_second_color(GenericColor::with_fourth(50.0, 60.0, 10.0, 0.0));
/// gradient.set_gradient_length(200);
/// gradient.set_gradient_thickness(16);
///
/// let mut callback = CollectingCallback::new();
/// gradient.render(RenderContext::shared()?, &mut callback);
/// assert_eq!(callback.final_image().map(|image| image.width()), Some(200));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GradientImageParameters {
    first_color: GenericColor,
    second_color: GenericColor,
    gradient_length: u32,
    gradient_thickness: u32,
    device_pixel_ratio: f64,
    /// Color space to render in. Nothing is drawn without one.
    pub rgb_color_space: Option<Arc<RgbColorSpace>>,
}

impl Default for GradientImageParameters {
    /// Opaque black to opaque white, zero size, no color space.
    fn default() -> Self {
        Self {
            first_color: GenericColor::with_fourth(0.0, 0.0, 0.0, 1.0),
            second_color: GenericColor::with_fourth(100.0, 0.0, 0.0, 1.0),
            gradient_length: 0,
            gradient_thickness: 0,
            device_pixel_ratio: 1.0,
            rgb_color_space: None,
        }
    }
}

impl PartialEq for GradientImageParameters {
    /// Color spaces compare by identity.
    fn eq(&self, other: &Self) -> bool {
        let same_space = match (&self.rgb_color_space, &other.rgb_color_space) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.first_color == other.first_color
            && self.second_color == other.second_color
            && self.gradient_length == other.gradient_length
            && self.gradient_thickness == other.gradient_thickness
            && self.device_pixel_ratio == other.device_pixel_ratio
            && same_space
    }
}

impl GradientImageParameters {
    /// Creates a default gradient for `rgb_color_space`.
    pub fn new(rgb_color_space: Arc<RgbColorSpace>) -> Self {
        Self {
            rgb_color_space: Some(rgb_color_space),
            ..Self::default()
        }
    }

    /// Sets the color at the left end.
    pub fn set_first_color(&mut self, color: GenericColor) {
        self.first_color = normalized_lcha(&color);
        self.unwrap_second_hue();
    }

    /// Sets the color at the right end.
    pub fn set_second_color(&mut self, color: GenericColor) {
        self.second_color = color;
        self.unwrap_second_hue();
    }

    /// Normalizes the second color, then moves its hue by a full turn if
    /// that shortens the way from the first hue.
    fn unwrap_second_hue(&mut self) {
        let mut second = normalized_lcha(&self.second_color);
        let difference = self.first_color.third - second.third;
        if difference > 180.0 {
            second.third += 360.0;
        } else if difference < -180.0 {
            second.third -= 360.0;
        }
        self.second_color = second;
    }

    /// The normalized first color.
    pub fn first_color(&self) -> GenericColor {
        self.first_color
    }

    /// The normalized second color. Its hue may lie outside `[0, 360)` so
    /// that interpolation takes the shorter way.
    pub fn second_color(&self) -> GenericColor {
        self.second_color
    }

    /// Sets the length along the gradient, in physical pixels.
    pub fn set_gradient_length(&mut self, length: u32) {
        self.gradient_length = length;
    }

    /// Sets the thickness across the gradient, in physical pixels.
    pub fn set_gradient_thickness(&mut self, thickness: u32) {
        self.gradient_thickness = thickness;
    }

    /// Sets the device pixel ratio. Values below 1 become 1.
    ///
    /// Only the checkerboard tile size and the ratio stored in the image
    /// depend on it; the pixel size does not.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = if ratio >= 1.0 { ratio } else { 1.0 };
    }

    /// Length in physical pixels.
    pub fn gradient_length(&self) -> u32 {
        self.gradient_length
    }

    /// Thickness in physical pixels.
    pub fn gradient_thickness(&self) -> u32 {
        self.gradient_thickness
    }

    /// Device pixel ratio.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Interpolated LCh color with alpha at `value` in `[0, 1]`.
    ///
    /// `0` is the first color and `1` the second. The hue of the result is
    /// not normalized.
    pub fn color_from_value(&self, value: f64) -> GenericColor {
        let lerp = |a: f64, b: f64| a + (b - a) * value;
        let (first, second) = (&self.first_color, &self.second_color);
        GenericColor::with_fourth(
            lerp(first.first, second.first),
            lerp(first.second, second.second),
            lerp(first.third, second.third),
            lerp(first.fourth, second.fourth),
        )
    }

    fn is_translucent(&self) -> bool {
        self.first_color.fourth != 1.0 || self.second_color.fourth != 1.0
    }

    /// Renders the gradient into `callback`.
    ///
    /// Delivers a single final image. An empty size or a missing color space
    /// give an empty or transparent final image.
    pub fn render<C: RenderCallback>(&self, ctx: &RenderContext, callback: &mut C) {
        if callback.should_abort() {
            return;
        }
        let (length, thickness) = (self.gradient_length, self.gradient_thickness);
        let mut image = Image::new(length, thickness, PixelFormat::Argb32Premultiplied);
        image.set_device_pixel_ratio(self.device_pixel_ratio);
        let space = match &self.rgb_color_space {
            Some(space) if !image.is_empty() => space,
            _ => {
                callback.deliver_interlacing_pass(&image, InterlacingState::Final);
                return;
            }
        };

        // Color management is the expensive part: convert a single line.
        let line: Vec<Rgba8> = ctx.install(|| {
            (0..length)
                .into_par_iter()
                .map(|i| {
                    let color = self.color_from_value((i as f64 + 0.5) / length as f64);
                    space
                        .from_cielch_d50_to_rgba_bound(&color)
                        .with_alpha(unit_to_eight_bit(color.fourth))
                        .premultiplied()
                })
                .collect()
        });
        if callback.should_abort() {
            return;
        }

        let translucent = self.is_translucent();
        let tile = tile_size(self.device_pixel_ratio) as usize;
        let width = length as usize;
        ctx.install(|| {
            image
                .pixels_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, (pixel, color)) in row.iter_mut().zip(&line).enumerate() {
                        *pixel = if translucent {
                            over(*color, checker_color(x, y, tile))
                        } else {
                            *color
                        };
                    }
                });
        });
        if callback.should_abort() {
            return;
        }
        debug!(length, thickness, translucent, "gradient image done");
        callback.deliver_interlacing_pass(&image, InterlacingState::Final);
    }
}
