//! The chroma-lightness plane at a fixed hue.

use crate::{InterlacingState, RenderCallback, RenderContext, do_antialias, find_boundary};
use perceptual_core::{GenericColor, Image, PixelFormat, Size};
use perceptual_gamut::RgbColorSpace;
use perceptual_math::{normalized_angle_degree, split_elements};
use std::sync::Arc;
use tracing::debug;

/// A request for a chroma-lightness diagram.
///
/// Lightness runs from 100 at the top to 0 at the bottom; chroma grows to
/// the right with the same scale, so one pixel covers `100 / height` units
/// on both axes. Out-of-gamut pixels stay transparent.
#[derive(Debug, Clone, Default)]
pub struct ChromaLightnessImageParameters {
    /// Image size in physical pixels.
    pub image_size_physical: Size,
    /// CIELCh-D50 hue of the plane, any angle.
    pub hue: f64,
    /// Color space to render in. Nothing is drawn without one.
    pub rgb_color_space: Option<Arc<RgbColorSpace>>,
}

impl PartialEq for ChromaLightnessImageParameters {
    /// Color spaces compare by identity.
    fn eq(&self, other: &Self) -> bool {
        let same_space = match (&self.rgb_color_space, &other.rgb_color_space) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.image_size_physical == other.image_size_physical && self.hue == other.hue && same_space
    }
}

impl ChromaLightnessImageParameters {
    /// Renders the diagram into `callback`.
    ///
    /// One parallel pass is delivered as intermediate image, then the gamut
    /// edge is antialiased and the final image delivered. An empty size or
    /// a missing color space yield a single transparent final image.
    pub fn render<C: RenderCallback>(&self, ctx: &RenderContext, callback: &mut C) {
        if callback.should_abort() {
            return;
        }
        let Size { width, height } = self.image_size_physical;
        let mut image = Image::new(width, height, PixelFormat::Argb32Premultiplied);
        let space = match &self.rgb_color_space {
            Some(space) if !image.is_empty() => space,
            _ => {
                callback.deliver_interlacing_pass(&image, InterlacingState::Final);
                return;
            }
        };

        let hue = normalized_angle_degree(self.hue);
        let units_per_pixel = 100.0 / height as f64;
        let color_at = |x: f64, y: f64| {
            let lch = GenericColor::new(
                100.0 - (y + 0.5) * units_per_pixel,
                (x + 0.5) * units_per_pixel,
                hue,
            );
            space.from_cielch_d50_to_rgba_or_transparent(&lch)
        };

        let row_width = width as usize;
        let bands = split_elements(height as usize, ctx.threads());
        let abort_check = &*callback;
        ctx.for_each_band(image.pixels_mut(), row_width, &bands, |band, chunk| {
            for (y, row) in band.zip(chunk.chunks_mut(row_width)) {
                if abort_check.should_abort() {
                    return;
                }
                for (x, pixel) in row.iter_mut().enumerate() {
                    let color = color_at(x as f64, y as f64);
                    if !color.is_transparent() {
                        *pixel = color;
                    }
                }
            }
        });
        if callback.should_abort() {
            return;
        }
        callback.deliver_interlacing_pass(&image, InterlacingState::Intermediate);
        if callback.should_abort() {
            return;
        }

        let boundary = find_boundary(&image);
        if callback.should_abort() {
            return;
        }
        do_antialias(ctx, &mut image, &boundary, color_at);
        if callback.should_abort() {
            return;
        }
        debug!(width, height, hue, boundary = boundary.len(), "chroma-lightness image done");
        callback.deliver_interlacing_pass(&image, InterlacingState::Final);
    }
}
