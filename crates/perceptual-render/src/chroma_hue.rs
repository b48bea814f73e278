//! The chroma-hue plane at a fixed lightness.

use crate::{
    InterlacingPass, InterlacingState, RenderCallback, RenderContext, do_antialias, find_boundary,
};
use perceptual_core::{GenericColor, Image, PixelFormat, Rgba8};
use perceptual_gamut::RgbColorSpace;
use perceptual_gamut::constants::NEUTRAL_GRAY_LCH;
use perceptual_math::split_list;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, trace};

/// Number of interlacing passes of a chroma-hue render.
pub const CHROMA_HUE_PASS_COUNT: i32 = 11;

/// Pixels drawn beyond the circle before the cut-off, in chroma units.
const OVERLAP: f64 = 2.0;

/// A request for a chroma-hue diagram: the CIELab a/b plane at one
/// lightness, cut to a disc whose radius is the maximum chroma of the
/// color space.
///
/// Out-of-gamut colors inside the disc are painted neutral gray; outside
/// the disc the image is transparent.
///
/// # Example
///
/// ```rust,no_run
/// use perceptual_gamut::RgbColorSpace;
/// use perceptual_render::{ChromaHueImageParameters, CollectingCallback, RenderContext};
///
/// let parameters = ChromaHueImageParameters {
///     image_size_physical: 256,
///     border_physical: 4.0,
///     lightness: 60.0,
///     rgb_color_space: Some(RgbColorSpace::create_srgb()?),
///     ..Default::default()
/// };
/// let mut callback = CollectingCallback::new();
/// parameters.render(RenderContext::shared()?, &mut callback);
/// let image = callback.final_image().unwrap();
/// assert_eq!(image.width(), 256);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChromaHueImageParameters {
    /// Width and height of the square image, in physical pixels.
    pub image_size_physical: u32,
    /// Transparent margin around the disc, in physical pixels.
    pub border_physical: f64,
    /// Stored in the delivered images.
    pub device_pixel_ratio: f64,
    /// CIELab lightness of the plane, in `[0, 100]`.
    pub lightness: f64,
    /// Color space to render in. Nothing is drawn without one.
    pub rgb_color_space: Option<Arc<RgbColorSpace>>,
}

impl Default for ChromaHueImageParameters {
    fn default() -> Self {
        Self {
            image_size_physical: 0,
            border_physical: 0.0,
            device_pixel_ratio: 1.0,
            lightness: NEUTRAL_GRAY_LCH[0],
            rgb_color_space: None,
        }
    }
}

impl PartialEq for ChromaHueImageParameters {
    /// Color spaces compare by identity.
    fn eq(&self, other: &Self) -> bool {
        let same_space = match (&self.rgb_color_space, &other.rgb_color_space) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.image_size_physical == other.image_size_physical
            && self.border_physical == other.border_physical
            && self.device_pixel_ratio == other.device_pixel_ratio
            && self.lightness == other.lightness
            && same_space
    }
}

/// Maps continuous pixel coordinates to CIELab a/b.
#[derive(Debug, Clone, Copy)]
struct PlaneGeometry {
    border: f64,
    chroma_range: f64,
    scale: f64,
}

impl PlaneGeometry {
    fn a(&self, x: f64) -> f64 {
        (x + 0.5 - self.border) * self.scale - self.chroma_range
    }

    fn b(&self, y: f64) -> f64 {
        self.chroma_range - (y + 0.5 - self.border) * self.scale
    }

    fn is_inside(&self, a: f64, b: f64, margin: f64) -> bool {
        let radius = self.chroma_range + margin;
        a * a + b * b <= radius * radius
    }
}

impl ChromaHueImageParameters {
    /// Renders the diagram progressively into `callback`.
    ///
    /// Delivers one intermediate image per interlacing pass, then cuts the
    /// image to the disc, antialiases the disc edge and delivers the final
    /// image. A zero size, a border of half the size or more, or a missing
    /// color space yield a single transparent final image.
    pub fn render<C: RenderCallback>(&self, ctx: &RenderContext, callback: &mut C) {
        if callback.should_abort() {
            return;
        }
        let size = self.image_size_physical;
        let mut image = Image::new(size, size, PixelFormat::Argb32Premultiplied);
        image.set_device_pixel_ratio(self.device_pixel_ratio);

        let radius = (size as f64 - 2.0 * self.border_physical) / 2.0;
        let space = match &self.rgb_color_space {
            Some(space) if radius > 0.0 => space,
            _ => {
                callback.deliver_interlacing_pass(&image, InterlacingState::Final);
                return;
            }
        };

        let chroma_range = space.profile_maximum_cielch_d50_chroma();
        let geometry = PlaneGeometry {
            border: self.border_physical,
            chroma_range,
            scale: 2.0 * chroma_range / (size as f64 - 2.0 * self.border_physical),
        };
        let neutral_gray = space.from_cielch_d50_to_rgba_bound(&GenericColor::from_array(NEUTRAL_GRAY_LCH));
        image.fill(neutral_gray);

        let color_at = |a: f64, b: f64| {
            let color = space.from_cielab_d50_to_rgba_or_transparent(&GenericColor::new(self.lightness, a, b));
            if color.is_transparent() { neutral_gray } else { color }
        };

        let mut pass = InterlacingPass::new(CHROMA_HUE_PASS_COUNT);
        loop {
            if callback.should_abort() {
                return;
            }
            let anchors: Vec<u32> = pass.row_anchors(size).collect();
            let bands: Vec<_> = split_list(&anchors, ctx.threads())
                .into_iter()
                .filter_map(|group| {
                    let first = *group.first()? as usize;
                    let last = *group.last()? as usize;
                    Some(first..(last + pass.rectangle_height as usize).min(size as usize))
                })
                .collect();

            let abort_check = &*callback;
            let width = size as usize;
            ctx.for_each_band(image.pixels_mut(), width, &bands, |band, chunk| {
                // Band starts are row anchors, so stepping hits every anchor in it
                for y in band.clone().step_by(pass.line_frequency as usize) {
                    if abort_check.should_abort() {
                        return;
                    }
                    let b = geometry.b(y as f64);
                    let block_end = (y + pass.rectangle_height as usize).min(band.end);
                    for x in pass.column_anchors(size) {
                        let a = geometry.a(x as f64);
                        if !geometry.is_inside(a, b, OVERLAP) {
                            continue;
                        }
                        let color = color_at(a, b);
                        let x = x as usize;
                        let x_end = (x + pass.rectangle_width as usize).min(width);
                        for row in y..block_end {
                            let offset = (row - band.start) * width;
                            chunk[offset + x..offset + x_end].fill(color);
                        }
                    }
                }
            });
            if callback.should_abort() {
                return;
            }
            trace!(countdown = pass.countdown, "chroma-hue pass done");
            callback.deliver_interlacing_pass(&image, InterlacingState::Intermediate);
            if pass.is_last() {
                break;
            }
            pass.switch_to_next_pass();
        }

        // Cut off everything outside the disc
        let width = size as usize;
        ctx.install(|| {
            image
                .pixels_mut()
                .par_chunks_mut(width)
                .enumerate()
                .for_each(|(y, row)| {
                    let b = geometry.b(y as f64);
                    for (x, pixel) in row.iter_mut().enumerate() {
                        if !geometry.is_inside(geometry.a(x as f64), b, 0.0) {
                            *pixel = Rgba8::TRANSPARENT;
                        }
                    }
                });
        });
        if callback.should_abort() {
            return;
        }

        let boundary = find_boundary(&image);
        if callback.should_abort() {
            return;
        }
        do_antialias(ctx, &mut image, &boundary, |x, y| {
            let (a, b) = (geometry.a(x), geometry.b(y));
            if geometry.is_inside(a, b, 0.0) {
                color_at(a, b)
            } else {
                Rgba8::TRANSPARENT
            }
        });
        if callback.should_abort() {
            return;
        }
        debug!(size, lightness = self.lightness, boundary = boundary.len(), "chroma-hue image done");
        callback.deliver_interlacing_pass(&image, InterlacingState::Final);
    }
}
