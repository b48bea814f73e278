//! CLI command implementations

pub mod gamut;
pub mod info;
pub mod render;

use crate::ProfileArgs;
use anyhow::{Context, Result, bail};
use perceptual_core::{GenericColor, Image, Rgba8};
use perceptual_gamut::RgbColorSpace;
use perceptual_icc::StandardProfile;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Builds the color space selected on the command line.
pub fn load_color_space(args: &ProfileArgs) -> Result<Arc<RgbColorSpace>> {
    let space = match &args.profile {
        Some(path) => RgbColorSpace::try_create_from_file(path)
            .with_context(|| format!("Failed to load profile: {}", path.display()))?,
        None if args.standard == StandardProfile::Srgb => {
            RgbColorSpace::create_srgb().context("Failed to create sRGB color space")?
        }
        None => {
            let profile = args
                .standard
                .to_profile()
                .with_context(|| format!("Failed to create {} profile", args.standard))?;
            RgbColorSpace::from_profile(&profile)
                .with_context(|| format!("Failed to create {} color space", args.standard))?
        }
    };
    info!(name = space.profile_name(), "color space ready");
    Ok(space)
}

/// Writes `image` as 8-bit RGBA PNG with straight alpha.
pub fn save_png(path: &Path, image: &Image) -> Result<()> {
    if image.is_empty() {
        bail!("Nothing to write: the image is empty");
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    writer
        .write_image_data(&image.to_straight_rgba_bytes())
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    writer
        .finish()
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "saved");
    Ok(())
}

/// `#rrggbb`, or `transparent` for the out-of-gamut sentinel.
pub fn format_rgba(color: Rgba8) -> String {
    if color.is_transparent() {
        return "transparent".to_string();
    }
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Formats a three-component color with a fixed number of decimals.
pub fn format_color(color: &GenericColor, decimals: usize) -> String {
    format!(
        "{:.*} {:.*} {:.*}",
        decimals, color.first, decimals, color.second, decimals, color.third
    )
}
