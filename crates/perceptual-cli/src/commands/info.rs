//! Profile info command.
//!
//! Prints profile metadata, the gamut extremes found while building the
//! color space and, when verbose, the most chromatic color per hue.

use crate::InfoArgs;
use anyhow::{Result, bail};
use perceptual_gamut::RgbColorSpace;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8) -> Result<()> {
    if !(args.hue_step > 0.0 && args.hue_step <= 360.0) {
        bail!("--hue-step must be in (0, 360], got {}", args.hue_step);
    }
    let space = super::load_color_space(&args.space)?;
    print_metadata(&space);
    print_gamut(&space);
    if verbose > 0 {
        print_hue_table(&space, args.hue_step);
    }
    Ok(())
}

fn print_metadata(space: &RgbColorSpace) {
    println!("{}", space.profile_name());
    println!("  Manufacturer:   {}", or_dash(space.profile_manufacturer()));
    println!("  Model:          {}", or_dash(space.profile_model()));
    println!("  Copyright:      {}", or_dash(space.profile_copyright()));
    println!("  ICC version:    {}", space.profile_icc_version());
    println!("  Class:          {}", space.profile_class());
    println!("  Color model:    {}", space.profile_color_model());
    println!("  PCS:            {}", space.profile_pcs_color_model());
    println!("  Matrix-shaper:  {}", if space.profile_has_matrix_shaper() { "yes" } else { "no" });
    if let Some(path) = space.profile_absolute_file_path() {
        println!("  File:           {}", path.display());
    }
    if let Some(size) = space.profile_file_size() {
        println!("  File size:      {} bytes", size);
    }
}

fn print_gamut(space: &RgbColorSpace) {
    println!("  CIELab-D50 L:   {:.2} .. {:.2}", space.cielab_d50_blackpoint_l(), space.cielab_d50_whitepoint_l());
    println!("  Oklab L:        {:.4} .. {:.4}", space.oklab_blackpoint_l(), space.oklab_whitepoint_l());
    println!("  Max CIELCh C:   {:.2}", space.profile_maximum_cielch_d50_chroma());
    println!("  Max Oklch C:    {:.4}", space.profile_maximum_oklch_chroma());
}

fn print_hue_table(space: &RgbColorSpace, step: f64) {
    println!("  Most chromatic color per hue:");
    println!("    {:>7}  {:<9}  {:<9}", "hue", "CIELCh", "Oklch");
    let mut hue = 0.0;
    while hue < 360.0 {
        println!(
            "    {:>6.1}°  {:<9}  {:<9}",
            hue,
            super::format_rgba(space.max_chroma_color_by_cielch_d50_hue360(hue)),
            super::format_rgba(space.max_chroma_color_by_oklab_hue360(hue)),
        );
        hue += step;
    }
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}
