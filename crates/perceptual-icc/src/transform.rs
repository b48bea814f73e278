//! Lab/RGB transforms for one RGB profile.

use crate::{IccError, IccResult, Intent, Profile};
use lcms2::{DisallowCache, Flags, GlobalContext, PixelFormat, Transform as LcmsTransform};

type UncachedTransform<F, T> = LcmsTransform<F, T, GlobalContext, DisallowCache>;

/// The three transforms between CIELab (D50) and one RGB profile.
///
/// All transforms are created with [`Flags::NO_CACHE`], which makes them
/// safe to call from several threads at once.
///
/// Lab values are `[L, a, b]` with `L` in `[0, 100]`; RGB values are unit
/// `f64` or full-range `u16`. The `f64` path is unbounded, so out-of-gamut
/// Lab gives channels outside `[0, 1]`. The `u16` path clips.
///
/// # Example
///
/// ```rust
/// use perceptual_icc::{Intent, LabTransforms, Profile};
///
/// let transforms = LabTransforms::new(&Profile::srgb(), Intent::AbsoluteColorimetric).unwrap();
/// let rgb = transforms.lab_to_rgb16([50.0, 0.0, 0.0]);
/// assert!(rgb[0] > 0 && rgb[0] < u16::MAX);
/// ```
pub struct LabTransforms {
    lab_to_rgb: UncachedTransform<[f64; 3], [f64; 3]>,
    lab_to_rgb16: UncachedTransform<[f64; 3], [u16; 3]>,
    rgb_to_lab: UncachedTransform<[f64; 3], [f64; 3]>,
}

impl LabTransforms {
    /// Builds the transforms between a Lab v4 profile and `rgb`.
    ///
    /// # Errors
    ///
    /// Returns [`IccError::TransformFailed`] if LittleCMS cannot build any
    /// of the three transforms.
    pub fn new(rgb: &Profile, intent: Intent) -> IccResult<Self> {
        let lab = Profile::lab()?;
        let intent: lcms2::Intent = intent.into();
        let failed = |direction: &'static str, e: lcms2::Error| IccError::TransformFailed {
            direction,
            reason: e.to_string(),
        };

        let lab_to_rgb = LcmsTransform::new_flags_context(
            GlobalContext::new(),
            &lab.inner,
            PixelFormat::Lab_DBL,
            &rgb.inner,
            PixelFormat::RGB_DBL,
            intent,
            Flags::NO_CACHE,
        )
        .map_err(|e| failed("Lab to RGB", e))?;

        let lab_to_rgb16 = LcmsTransform::new_flags_context(
            GlobalContext::new(),
            &lab.inner,
            PixelFormat::Lab_DBL,
            &rgb.inner,
            PixelFormat::RGB_16,
            intent,
            Flags::NO_CACHE,
        )
        .map_err(|e| failed("Lab to RGB16", e))?;

        let rgb_to_lab = LcmsTransform::new_flags_context(
            GlobalContext::new(),
            &rgb.inner,
            PixelFormat::RGB_DBL,
            &lab.inner,
            PixelFormat::Lab_DBL,
            intent,
            Flags::NO_CACHE,
        )
        .map_err(|e| failed("RGB to Lab", e))?;

        Ok(Self {
            lab_to_rgb,
            lab_to_rgb16,
            rgb_to_lab,
        })
    }

    /// Lab to unit RGB, `f64` precision.
    #[inline]
    pub fn lab_to_rgb(&self, lab: [f64; 3]) -> [f64; 3] {
        let mut rgb = [[0.0; 3]];
        self.lab_to_rgb.transform_pixels(&[lab], &mut rgb);
        rgb[0]
    }

    /// Lab to 16-bit RGB.
    #[inline]
    pub fn lab_to_rgb16(&self, lab: [f64; 3]) -> [u16; 3] {
        let mut rgb = [[0u16; 3]];
        self.lab_to_rgb16.transform_pixels(&[lab], &mut rgb);
        rgb[0]
    }

    /// Unit RGB to Lab.
    #[inline]
    pub fn rgb_to_lab(&self, rgb: [f64; 3]) -> [f64; 3] {
        let mut lab = [[0.0; 3]];
        self.rgb_to_lab.transform_pixels(&[rgb], &mut lab);
        lab[0]
    }

    /// Unit RGB to Lab for many pixels at once.
    pub fn rgb_to_lab_many(&self, rgb: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let mut lab = vec![[0.0; 3]; rgb.len()];
        self.rgb_to_lab.transform_pixels(rgb, &mut lab);
        lab
    }
}

impl std::fmt::Debug for LabTransforms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabTransforms").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StandardProfile;
    use approx::assert_abs_diff_eq;

    fn srgb_transforms() -> LabTransforms {
        LabTransforms::new(&Profile::srgb(), Intent::AbsoluteColorimetric).unwrap()
    }

    #[test]
    fn test_transforms_are_sync() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<LabTransforms>();
    }

    #[test]
    fn test_shared_across_threads() {
        let transforms = srgb_transforms();
        let expected = transforms.lab_to_rgb16([60.0, 20.0, -30.0]);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        assert_eq!(transforms.lab_to_rgb16([60.0, 20.0, -30.0]), expected);
                    }
                });
            }
        });
    }

    #[test]
    fn test_every_standard_profile_builds() {
        for standard in StandardProfile::ALL {
            let profile = standard.to_profile().unwrap();
            assert!(LabTransforms::new(&profile, Intent::RelativeColorimetric).is_ok(), "{standard}");
        }
    }

    #[test]
    fn test_white_roundtrip() {
        let transforms = srgb_transforms();
        let lab = transforms.rgb_to_lab([1.0, 1.0, 1.0]);
        assert!(lab[0] > 99.0 && lab[0] <= 100.5);
        assert_abs_diff_eq!(lab[1], 0.0, epsilon = 0.5);
        assert_abs_diff_eq!(lab[2], 0.0, epsilon = 0.5);
    }

    #[test]
    fn test_gray_roundtrip() {
        let transforms = srgb_transforms();
        let rgb = transforms.lab_to_rgb([50.0, 0.0, 0.0]);
        let back = transforms.rgb_to_lab(rgb);
        assert_abs_diff_eq!(back[0], 50.0, epsilon = 0.01);
        assert_abs_diff_eq!(back[1], 0.0, epsilon = 0.01);
        assert_abs_diff_eq!(back[2], 0.0, epsilon = 0.01);
    }

    #[test]
    fn test_out_of_gamut_leaves_unit_range() {
        let transforms = srgb_transforms();
        let rgb = transforms.lab_to_rgb([50.0, 120.0, 0.0]);
        assert!(rgb.iter().any(|&c| !(0.0..=1.0).contains(&c)), "{rgb:?}");

        let clipped = transforms.lab_to_rgb16([50.0, 120.0, 0.0]);
        assert_eq!(clipped[0], u16::MAX);
    }

    #[test]
    fn test_rgb16_black() {
        let rgb = srgb_transforms().lab_to_rgb16([0.0, 0.0, 0.0]);
        assert!(rgb.iter().all(|&c| c < 256));
    }

    #[test]
    fn test_many_matches_single() {
        let transforms = srgb_transforms();
        let input = [[0.2, 0.4, 0.6], [1.0, 0.0, 0.0]];
        let many = transforms.rgb_to_lab_many(&input);
        for (rgb, lab) in input.iter().zip(&many) {
            assert_eq!(transforms.rgb_to_lab(*rgb), *lab);
        }
    }

    #[test]
    fn test_wide_gamut_profile() {
        let profile = StandardProfile::WideGamutRgb.to_profile().unwrap();
        assert!(LabTransforms::new(&profile, Intent::AbsoluteColorimetric).is_ok());
    }
}
