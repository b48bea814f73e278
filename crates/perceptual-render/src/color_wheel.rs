//! A hue ring at neutral lightness.

use crate::{RenderContext, do_antialias, find_boundary};
use perceptual_core::{GenericColor, Image, PixelFormat, Rgba8};
use perceptual_gamut::RgbColorSpace;
use perceptual_gamut::constants::{NEUTRAL_GRAY_LCH, SRGB_VERSATILE_CHROMA};
use perceptual_math::{PolarPoint, is_in_range};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// A cached color wheel image.
///
/// The ring shows every CIELCh-D50 hue at lightness 50 and chroma 32, a
/// chroma that sRGB can display at every hue. Hue 0° points right and hues
/// grow counter-clockwise. The image is rendered on first request and kept
/// until a setter changes a value.
///
/// # Example
///
/// ```rust,no_run
/// use perceptual_gamut::RgbColorSpace;
/// use perceptual_render::{ColorWheelImage, RenderContext};
///
/// let mut wheel = ColorWheelImage::new(RgbColorSpace::create_srgb()?);
/// wheel.set_image_size(200);
/// wheel.set_wheel_thickness(20.0);
/// let image = wheel.image(RenderContext::shared()?);
/// assert_eq!(image.width(), 200);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ColorWheelImage {
    rgb_color_space: Arc<RgbColorSpace>,
    image_size_physical: u32,
    border_physical: f64,
    wheel_thickness_physical: f64,
    device_pixel_ratio: f64,
    image: Option<Image>,
}

impl ColorWheelImage {
    /// Creates an empty wheel for `rgb_color_space`.
    pub fn new(rgb_color_space: Arc<RgbColorSpace>) -> Self {
        Self {
            rgb_color_space,
            image_size_physical: 0,
            border_physical: 0.0,
            wheel_thickness_physical: 0.0,
            device_pixel_ratio: 1.0,
            image: None,
        }
    }

    /// Sets width and height of the square image, in physical pixels.
    pub fn set_image_size(&mut self, size: u32) {
        if self.image_size_physical != size {
            self.image_size_physical = size;
            self.image = None;
        }
    }

    /// Sets the transparent margin around the ring. Negative values become 0.
    pub fn set_border(&mut self, border: f64) {
        let border = if border >= 0.0 { border } else { 0.0 };
        if self.border_physical != border {
            self.border_physical = border;
            self.image = None;
        }
    }

    /// Sets the ring thickness. Negative values become 0.
    pub fn set_wheel_thickness(&mut self, thickness: f64) {
        let thickness = if thickness >= 0.0 { thickness } else { 0.0 };
        if self.wheel_thickness_physical != thickness {
            self.wheel_thickness_physical = thickness;
            self.image = None;
        }
    }

    /// Sets the device pixel ratio stored in the image. Values below 1 become 1.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        let ratio = if ratio >= 1.0 { ratio } else { 1.0 };
        if self.device_pixel_ratio != ratio {
            self.device_pixel_ratio = ratio;
            self.image = None;
        }
    }

    /// Image size in physical pixels.
    pub fn image_size(&self) -> u32 {
        self.image_size_physical
    }

    /// Border in physical pixels.
    pub fn border(&self) -> f64 {
        self.border_physical
    }

    /// Ring thickness in physical pixels.
    pub fn wheel_thickness(&self) -> f64 {
        self.wheel_thickness_physical
    }

    /// Device pixel ratio.
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Returns `true` if the next [`image`](Self::image) call is served from cache.
    pub fn is_cached(&self) -> bool {
        self.image.is_some()
    }

    /// Returns the wheel image, rendering it if needed.
    ///
    /// A zero size gives an empty image; a border that leaves no room for
    /// the ring gives a fully transparent one.
    pub fn image(&mut self, ctx: &RenderContext) -> &Image {
        let image = match self.image.take() {
            Some(image) => image,
            None => self.render(ctx),
        };
        self.image.insert(image)
    }

    fn render(&self, ctx: &RenderContext) -> Image {
        let size = self.image_size_physical;
        let mut image = Image::new(size, size, PixelFormat::Argb32Premultiplied);
        image.set_device_pixel_ratio(self.device_pixel_ratio);
        let outer_radius = (size as f64 - 2.0 * self.border_physical) / 2.0;
        if image.is_empty() || outer_radius <= 0.0 {
            return image;
        }

        let inner_radius = outer_radius - self.wheel_thickness_physical;
        let center = (size as f64 - 1.0) / 2.0;
        let space = &self.rgb_color_space;
        let ring_color = |x: f64, y: f64| {
            let polar = PolarPoint::from_cartesian(x - center, center - y);
            if !is_in_range(inner_radius, polar.radius(), outer_radius) {
                return Rgba8::TRANSPARENT;
            }
            let lch = GenericColor::new(NEUTRAL_GRAY_LCH[0], SRGB_VERSATILE_CHROMA, polar.angle_degree());
            space.from_cielch_d50_to_rgba_or_transparent(&lch)
        };

        let width = size as usize;
        ctx.install(|| {
            image
                .pixels_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, pixel) in row.iter_mut().enumerate() {
                        *pixel = ring_color(x as f64, y as f64);
                    }
                });
        });
        let boundary = find_boundary(&image);
        do_antialias(ctx, &mut image, &boundary, ring_color);
        debug!(size, boundary = boundary.len(), "color wheel image done");
        image
    }
}

impl std::fmt::Debug for ColorWheelImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorWheelImage")
            .field("image_size_physical", &self.image_size_physical)
            .field("border_physical", &self.border_physical)
            .field("wheel_thickness_physical", &self.wheel_thickness_physical)
            .field("device_pixel_ratio", &self.device_pixel_ratio)
            .field("cached", &self.image.is_some())
            .finish()
    }
}
