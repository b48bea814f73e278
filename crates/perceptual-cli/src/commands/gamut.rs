//! Gamut query command.

use crate::GamutArgs;
use anyhow::Result;
use perceptual_core::GenericColor;
use tracing::debug;

/// Tests one LCh color against the gamut and prints its reduced form.
pub fn run(args: GamutArgs) -> Result<()> {
    let space = super::load_color_space(&args.space)?;
    let lch = GenericColor::new(args.lightness, args.chroma, args.hue);

    let (model, decimals, in_gamut, reduced) = if args.oklch {
        (
            "Oklch",
            4,
            space.is_oklch_in_gamut(&lch),
            space.reduce_oklch_chroma_to_fit_into_gamut(&lch),
        )
    } else {
        (
            "CIELCh-D50",
            2,
            space.is_cielch_d50_in_gamut(&lch),
            space.reduce_cielch_d50_chroma_to_fit_into_gamut(&lch),
        )
    };
    let rgba = if args.oklch {
        space.from_oklch_to_rgba_or_transparent(&reduced)
    } else {
        space.from_cielch_d50_to_rgba_or_transparent(&reduced)
    };
    debug!(?lch, ?reduced, "gamut query");

    println!("{} in {}", model, space.profile_name());
    println!("  Input:     {}", super::format_color(&lch, decimals));
    println!("  In gamut:  {}", if in_gamut { "yes" } else { "no" });
    println!("  Reduced:   {}", super::format_color(&reduced, decimals));
    println!("  RGB:       {}", super::format_rgba(rgba));
    Ok(())
}
