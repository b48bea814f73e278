//! Gamut engine behavior on the built-in sRGB profile.

use approx::assert_abs_diff_eq;
use perceptual_core::{GenericColor, Rgba8};
use perceptual_gamut::constants::{CIELAB_DEVIATION_LIMIT, HUE_LOOKUP_TOLERANCE_DEGREES};
use perceptual_gamut::{GamutError, RgbColorSpace};
use perceptual_icc::{Profile, StandardProfile};
use perceptual_math::lch_to_lab;
use std::io::Write;
use std::sync::{Arc, OnceLock};

fn srgb() -> Arc<RgbColorSpace> {
    static SPACE: OnceLock<Arc<RgbColorSpace>> = OnceLock::new();
    SPACE
        .get_or_init(|| RgbColorSpace::create_srgb().expect("sRGB must initialize"))
        .clone()
}

/// Absolute difference between two hues, across the 0°/360° seam.
fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn sample_lch(max_lightness: f64, max_chroma: f64) -> Vec<GenericColor> {
    let mut colors = Vec::new();
    for l_step in 0..=6 {
        for c_step in 0..=5 {
            for h_step in 0..8 {
                colors.push(GenericColor::new(
                    max_lightness * (l_step as f64 / 5.0 - 0.1),
                    max_chroma * (c_step as f64 / 2.5 - 0.5),
                    h_step as f64 * 97.0 - 200.0,
                ));
            }
        }
    }
    colors
}

#[test]
fn srgb_metadata() {
    let space = srgb();
    assert_eq!(space.profile_name(), "sRGB color space");
    assert_eq!(space.profile_manufacturer(), "LittleCMS");
    assert_eq!(space.profile_model(), "");
    assert!(space.profile_has_matrix_shaper());
    assert!(space.profile_absolute_file_path().is_none());
    assert!(space.profile_file_size().is_none());
    assert_eq!(space.profile_color_model(), "RgbData");
}

#[test]
fn srgb_achromatic_axis() {
    let space = srgb();
    assert!(space.cielab_d50_blackpoint_l() < space.cielab_d50_whitepoint_l());
    assert!(space.cielab_d50_blackpoint_l() < 1.0);
    assert!(space.cielab_d50_whitepoint_l() > 99.0);
    assert!(space.oklab_blackpoint_l() < space.oklab_whitepoint_l());
    assert!(space.oklab_blackpoint_l() < 0.01);
    assert!(space.oklab_whitepoint_l() > 0.99);

    let black = GenericColor::new(space.cielab_d50_blackpoint_l(), 0.0, 0.0);
    let white = GenericColor::new(space.cielab_d50_whitepoint_l(), 0.0, 0.0);
    assert!(space.is_cielab_d50_in_gamut(&black));
    assert!(space.is_cielab_d50_in_gamut(&white));
}

#[test]
fn srgb_maximum_chroma() {
    let space = srgb();
    // sRGB blue peaks near CIELCh-D50 chroma 131 and Oklch chroma 0.31
    let cielch = space.profile_maximum_cielch_d50_chroma();
    assert!(cielch > 125.0 && cielch < 140.0, "{cielch}");
    let oklch = space.profile_maximum_oklch_chroma();
    assert!(oklch > 0.28 && oklch < 0.36, "{oklch}");
}

#[test]
fn gamut_membership() {
    let space = srgb();
    assert!(space.is_cielch_d50_in_gamut(&GenericColor::new(50.0, 0.0, 0.0)));
    assert!(space.is_cielch_d50_in_gamut(&GenericColor::new(50.0, 20.0, 250.0)));
    assert!(!space.is_cielch_d50_in_gamut(&GenericColor::new(50.0, 200.0, 30.0)));
    assert!(!space.is_cielch_d50_in_gamut(&GenericColor::new(-1.0, 0.0, 0.0)));
    assert!(!space.is_cielch_d50_in_gamut(&GenericColor::new(101.0, 0.0, 0.0)));
    assert!(!space.is_cielch_d50_in_gamut(&GenericColor::new(f64::NAN, 0.0, 0.0)));

    assert!(space.is_oklch_in_gamut(&GenericColor::new(0.5, 0.0, 0.0)));
    assert!(space.is_oklch_in_gamut(&GenericColor::new(0.6, 0.05, 140.0)));
    assert!(!space.is_oklch_in_gamut(&GenericColor::new(0.5, 0.5, 140.0)));
    assert!(!space.is_oklch_in_gamut(&GenericColor::new(1.5, 0.0, 0.0)));
    assert!(!space.is_oklab_in_gamut(&GenericColor::new(0.5, 0.4, 0.0)));
}

#[test]
fn out_of_gamut_is_transparent() {
    let space = srgb();
    let vivid = GenericColor::new(50.0, 120.0, 0.0);
    assert_eq!(space.from_cielab_d50_to_rgba_or_transparent(&vivid), Rgba8::TRANSPARENT);
    assert_eq!(
        space.from_oklab_to_rgba_or_transparent(&GenericColor::new(0.5, 0.4, 0.0)),
        Rgba8::TRANSPARENT
    );

    let gray = space.from_cielab_d50_to_rgba_or_transparent(&GenericColor::new(50.0, 0.0, 0.0));
    assert!(gray.is_opaque());
    assert!(gray.r == gray.g && gray.g == gray.b);
    // CIELab L50 is about sRGB 119
    assert!(gray.r > 110 && gray.r < 128, "{gray:?}");
}

#[test]
fn bound_conversion_is_always_opaque() {
    let space = srgb();
    let clipped = space.from_cielch_d50_to_rgba_bound(&GenericColor::new(50.0, 200.0, 30.0));
    assert!(clipped.is_opaque());
    let white = space.from_cielch_d50_to_rgba_bound(&GenericColor::new(100.0, 0.0, 0.0));
    assert!(white.r >= 250 && white.g >= 250 && white.b >= 250, "{white:?}");
}

#[test]
fn bound_16_bit_roundtrip_stays_within_deviation_limit() {
    let space = srgb();
    let mut checked = 0;
    for l_step in 0..=20 {
        for c_step in 0..=35 {
            for h_step in 0..36 {
                let lch = GenericColor::new(l_step as f64 * 5.0, c_step as f64 * 4.0, h_step as f64 * 10.0);
                if !space.is_cielch_d50_in_gamut(&lch) {
                    continue;
                }
                let back = space.to_cielab_d50(space.from_cielch_d50_to_rgb16_bound(&lch));
                let deviation = lch_to_lab(&lch).squared_distance(&back).sqrt();
                assert!(deviation < CIELAB_DEVIATION_LIMIT, "{lch}: deviation {deviation}");
                checked += 1;
            }
        }
    }
    assert!(checked > 5000, "only {checked} in-gamut samples");
}

#[test]
fn device_to_perceptual() {
    let space = srgb();
    let white = space.to_cielab_d50(Rgba8::opaque(255, 255, 255));
    assert_abs_diff_eq!(white.first, 100.0, epsilon = 0.1);
    assert_abs_diff_eq!(white.second, 0.0, epsilon = 0.1);

    let red = space.to_cielch_d50([255u8, 0, 0]);
    assert!(red.second > 70.0);
    assert!(hue_distance(red.third, 40.0) < 5.0, "{red}");

    let oklab_white = space.to_oklab([u16::MAX; 3]);
    assert_abs_diff_eq!(oklab_white.first, 1.0, epsilon = 0.01);

    let oklch_blue = space.to_oklch([0u8, 0, 255]);
    assert!(hue_distance(oklch_blue.third, 264.0) < 5.0, "{oklch_blue}");

    let rgb = space.from_cielch_d50_to_rgb1(&space.to_cielch_d50([51u8, 102, 153]));
    assert_abs_diff_eq!(rgb.first, 0.2, epsilon = 0.005);
    assert_abs_diff_eq!(rgb.second, 0.4, epsilon = 0.005);
    assert_abs_diff_eq!(rgb.third, 0.6, epsilon = 0.005);
}

#[test]
fn cielch_reduction_properties() {
    let space = srgb();
    for input in sample_lch(100.0, 150.0) {
        let reduced = space.reduce_cielch_d50_chroma_to_fit_into_gamut(&input);
        assert!(space.is_cielch_d50_in_gamut(&reduced), "{input} -> {reduced}");
        assert!(reduced.second <= input.second.abs());
        if reduced.second > 0.0 {
            let expected = if input.second < 0.0 { input.third + 180.0 } else { input.third };
            assert!(hue_distance(reduced.third, expected) < 1e-9, "{input} -> {reduced}");
        }
        let again = space.reduce_cielch_d50_chroma_to_fit_into_gamut(&reduced);
        assert_eq!(again, reduced);
    }
}

#[test]
fn oklch_reduction_properties() {
    let space = srgb();
    for input in sample_lch(1.0, 0.5) {
        let reduced = space.reduce_oklch_chroma_to_fit_into_gamut(&input);
        assert!(space.is_oklch_in_gamut(&reduced), "{input} -> {reduced}");
        assert!(reduced.second <= input.second.abs());
        let again = space.reduce_oklch_chroma_to_fit_into_gamut(&reduced);
        assert_eq!(again, reduced);
    }
}

#[test]
fn in_gamut_color_is_kept() {
    let space = srgb();
    let color = GenericColor::new(60.0, 20.0, 120.0);
    assert_eq!(space.reduce_cielch_d50_chroma_to_fit_into_gamut(&color), color);

    let wrapped = space.reduce_cielch_d50_chroma_to_fit_into_gamut(&GenericColor::new(60.0, 20.0, 480.0));
    assert_abs_diff_eq!(wrapped.third, 120.0, epsilon = 1e-9);
}

#[test]
fn reduction_reaches_the_boundary() {
    let space = srgb();
    let reduced = space.reduce_cielch_d50_chroma_to_fit_into_gamut(&GenericColor::new(50.0, 200.0, 30.0));
    let mut beyond = reduced;
    beyond.second += 0.01;
    assert!(!space.is_cielch_d50_in_gamut(&beyond));
    assert!(reduced.second > 20.0);
}

#[test]
fn most_saturated_color_matches_hue() {
    let space = srgb();
    for step in 0..24 {
        let hue = step as f64 * 15.0;
        let color = space.max_chroma_color_by_cielch_d50_hue360(hue);
        assert!(color.is_opaque());
        let found = space.to_cielch_d50(color).third;
        assert!(hue_distance(found, hue) < 5.0, "CIELCh {hue}: {found}");

        let color = space.max_chroma_color_by_oklab_hue360(hue);
        let found = space.to_oklch(color).third;
        assert!(hue_distance(found, hue) < 5.0, "Oklch {hue}: {found}");
    }
    // Hues outside [0, 360) are normalized
    assert_eq!(
        space.max_chroma_color_by_cielch_d50_hue360(-330.0),
        space.max_chroma_color_by_cielch_d50_hue360(30.0)
    );
}

#[test]
fn most_saturated_color_is_not_outdone_nearby() {
    let space = srgb();
    let start = space.profile_maximum_cielch_d50_chroma();
    for degree in 0..360 {
        let hue = degree as f64;
        let found = space.to_cielch_d50(space.max_chroma_color_by_cielch_d50_hue360(hue)).second;
        let best = [hue - HUE_LOOKUP_TOLERANCE_DEGREES, hue, hue + HUE_LOOKUP_TOLERANCE_DEGREES]
            .into_iter()
            .flat_map(|h| (1..100).map(move |l| GenericColor::new(l as f64, start, h)))
            .map(|lch| space.reduce_cielch_d50_chroma_to_fit_into_gamut(&lch).second)
            .fold(0.0_f64, f64::max);
        assert!(
            found + CIELAB_DEVIATION_LIMIT >= best,
            "hue {hue}: lookup chroma {found}, in-gamut chroma {best}"
        );
    }
}

#[test]
fn shared_across_threads() {
    let space = srgb();
    std::thread::scope(|scope| {
        for t in 0..4 {
            let space = &space;
            scope.spawn(move || {
                for i in 0..50 {
                    let lch = GenericColor::new(30.0 + t as f64 * 10.0, 150.0, i as f64 * 7.0);
                    let reduced = space.reduce_cielch_d50_chroma_to_fit_into_gamut(&lch);
                    assert!(space.is_cielch_d50_in_gamut(&reduced));
                }
            });
        }
    });
}

#[test]
fn wide_gamut_exceeds_srgb() {
    let profile = StandardProfile::WideGamutRgb.to_profile().unwrap();
    let wide = RgbColorSpace::from_profile(&profile).unwrap();
    let srgb = srgb();
    assert!(wide.profile_maximum_cielch_d50_chroma() > srgb.profile_maximum_cielch_d50_chroma());
    assert!(wide.profile_maximum_oklch_chroma() > srgb.profile_maximum_oklch_chroma());

    // Vivid green outside sRGB but inside Wide Gamut RGB
    let green = GenericColor::new(60.0, 95.0, 150.0);
    assert!(!srgb.is_cielch_d50_in_gamut(&green));
    assert!(wide.is_cielch_d50_in_gamut(&green));
}

#[test]
fn non_rgb_profile_is_rejected() {
    let lab = Profile::lab().unwrap();
    let err = RgbColorSpace::from_profile(&lab).unwrap_err();
    assert!(matches!(err, GamutError::UnsupportedProfile { .. }), "{err}");
}

#[test]
fn load_from_file() {
    let data = StandardProfile::DisplayP3.to_profile().unwrap().to_icc().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    file.flush().unwrap();

    let space = RgbColorSpace::try_create_from_file(file.path()).unwrap();
    assert_eq!(space.profile_file_size(), Some(data.len() as u64));
    assert!(space.profile_absolute_file_path().unwrap().is_absolute());
    // Display P3 red is more saturated than sRGB red
    let red = space.to_cielch_d50([255u8, 0, 0]).second;
    assert!(red > srgb().to_cielch_d50([255u8, 0, 0]).second);
}

#[test]
fn missing_file_is_an_icc_error() {
    let err = RgbColorSpace::try_create_from_file("/nonexistent/display.icc").unwrap_err();
    assert!(matches!(err, GamutError::Icc(_)), "{err}");
}
