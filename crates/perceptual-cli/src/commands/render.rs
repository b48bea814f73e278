//! Diagram export commands.

use crate::{ChromaHueArgs, ChromaLightnessArgs, GradientArgs, WheelArgs};
use anyhow::{Context, Result};
use perceptual_core::{Image, Size};
use perceptual_render::{
    ChromaHueImageParameters, ChromaLightnessImageParameters, ColorWheelImage,
    GradientImageParameters, InterlacingState, RenderCallback, RenderContext,
};
use std::time::Instant;
use tracing::{debug, info};

/// Logs every delivery and keeps the final image.
#[derive(Default)]
struct ProgressCallback {
    passes: usize,
    final_image: Option<Image>,
}

impl RenderCallback for ProgressCallback {
    fn deliver_interlacing_pass(&mut self, image: &Image, state: InterlacingState) {
        match state {
            InterlacingState::Intermediate => {
                self.passes += 1;
                debug!(pass = self.passes, "intermediate image");
            }
            InterlacingState::Final => self.final_image = Some(image.clone()),
        }
    }
}

impl ProgressCallback {
    fn into_image(self) -> Result<Image> {
        self.final_image.context("Render finished without a final image")
    }
}

fn render_context(threads: usize) -> Result<RenderContext> {
    RenderContext::new(threads).context("Failed to configure render pool")
}

/// Renders the chroma-hue plane to PNG.
pub fn run_chroma_hue(args: ChromaHueArgs, threads: usize) -> Result<()> {
    let ctx = render_context(threads)?;
    let parameters = ChromaHueImageParameters {
        image_size_physical: args.size,
        border_physical: args.border,
        lightness: args.lightness,
        rgb_color_space: Some(super::load_color_space(&args.space)?),
        ..Default::default()
    };
    let start = Instant::now();
    let mut callback = ProgressCallback::default();
    parameters.render(&ctx, &mut callback);
    info!(passes = callback.passes, elapsed = ?start.elapsed(), "chroma-hue rendered");
    super::save_png(&args.output, &callback.into_image()?)
}

/// Renders the chroma-lightness plane to PNG.
pub fn run_chroma_lightness(args: ChromaLightnessArgs, threads: usize) -> Result<()> {
    let ctx = render_context(threads)?;
    let parameters = ChromaLightnessImageParameters {
        image_size_physical: Size::new(args.width, args.height),
        hue: args.hue,
        rgb_color_space: Some(super::load_color_space(&args.space)?),
    };
    let start = Instant::now();
    let mut callback = ProgressCallback::default();
    parameters.render(&ctx, &mut callback);
    info!(elapsed = ?start.elapsed(), "chroma-lightness rendered");
    super::save_png(&args.output, &callback.into_image()?)
}

/// Renders the color wheel to PNG.
pub fn run_wheel(args: WheelArgs, threads: usize) -> Result<()> {
    let ctx = render_context(threads)?;
    let mut wheel = ColorWheelImage::new(super::load_color_space(&args.space)?);
    wheel.set_image_size(args.size);
    wheel.set_border(args.border);
    wheel.set_wheel_thickness(args.thickness);
    let start = Instant::now();
    let image = wheel.image(&ctx);
    info!(elapsed = ?start.elapsed(), "wheel rendered");
    super::save_png(&args.output, image)
}

/// Renders a slider gradient to PNG.
pub fn run_gradient(args: GradientArgs, threads: usize) -> Result<()> {
    let ctx = render_context(threads)?;
    let mut gradient = GradientImageParameters::new(super::load_color_space(&args.space)?);
    gradient.set_first_color(args.from);
    gradient.set_second_color(args.to);
    gradient.set_gradient_length(args.length);
    gradient.set_gradient_thickness(args.thickness);
    debug!(from = %gradient.first_color(), to = %gradient.second_color(), "gradient colors");
    let start = Instant::now();
    let mut callback = ProgressCallback::default();
    gradient.render(&ctx, &mut callback);
    info!(elapsed = ?start.elapsed(), "gradient rendered");
    super::save_png(&args.output, &callback.into_image()?)
}
