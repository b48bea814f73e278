//! The RGB color space gamut engine.

use crate::constants::*;
use crate::{GamutError, GamutResult, HueMap};
use perceptual_core::{DeviceRgb, GenericColor, Rgba8};
use perceptual_icc::{Intent, LabTransforms, Profile};
use perceptual_math::{
    PolarPoint, cielab_d50_to_oklab, is_in_range, lab_to_lch, lch_to_lab, oklab_to_cielab_d50,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Textual and structural facts about the profile behind a color space.
///
/// Captured once at construction so that [`RgbColorSpace`] does not keep the
/// profile handle itself alive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMetadata {
    /// Profile description.
    pub name: String,
    /// Manufacturer text.
    pub manufacturer: String,
    /// Device model text.
    pub model: String,
    /// Copyright text.
    pub copyright: String,
    /// ICC version with one decimal, e.g. `"4.3"`.
    pub icc_version: String,
    /// Device class, e.g. `"DisplayClass"`.
    pub device_class: String,
    /// Device color model, e.g. `"RgbData"`.
    pub color_model: String,
    /// Profile connection space, e.g. `"XYZData"`.
    pub pcs_color_model: String,
    /// Whether the profile has a matrix-shaper component.
    pub has_matrix_shaper: bool,
    /// Absolute path, for profiles loaded from a file.
    pub absolute_file_path: Option<PathBuf>,
    /// Size in bytes, for profiles loaded from a file.
    pub file_size: Option<u64>,
}

impl ProfileMetadata {
    fn from_profile(profile: &Profile) -> Self {
        Self {
            name: profile.description(),
            manufacturer: profile.manufacturer(),
            model: profile.model(),
            copyright: profile.copyright(),
            icc_version: profile.icc_version(),
            device_class: profile.device_class(),
            color_model: profile.color_space(),
            pcs_color_model: profile.pcs(),
            has_matrix_shaper: profile.is_matrix_shaper(),
            absolute_file_path: profile.source().map(Path::to_path_buf),
            file_size: profile.file_size(),
        }
    }
}

/// An RGB color space with its gamut in CIELab-D50 and Oklab.
///
/// Built once from an ICC profile and immutable afterward. Every query is
/// `&self` and the underlying transforms are uncached, so one instance is
/// shared by `Arc` across render threads.
///
/// Construction is the only fallible step. Conversions and gamut tests
/// never fail; out-of-gamut colors come back as [`Rgba8::TRANSPARENT`] or
/// `false`.
///
/// # Example
///
/// ```rust,no_run
/// use perceptual_core::GenericColor;
/// use perceptual_gamut::RgbColorSpace;
///
/// let space = RgbColorSpace::create_srgb()?;
/// let vivid = GenericColor::new(50.0, 200.0, 30.0);
/// assert!(!space.is_cielch_d50_in_gamut(&vivid));
///
/// let reduced = space.reduce_cielch_d50_chroma_to_fit_into_gamut(&vivid);
/// assert!(space.is_cielch_d50_in_gamut(&reduced));
/// assert_eq!(reduced.third, 30.0);
/// # Ok::<(), perceptual_gamut::GamutError>(())
/// ```
pub struct RgbColorSpace {
    transforms: LabTransforms,
    metadata: ProfileMetadata,
    maximum_cielch_d50_chroma: f64,
    maximum_oklch_chroma: f64,
    cielab_d50_blackpoint_l: f64,
    cielab_d50_whitepoint_l: f64,
    oklab_blackpoint_l: f64,
    oklab_whitepoint_l: f64,
    cielch_d50_hue_map: HueMap,
    oklch_hue_map: HueMap,
}

/// The cube edges that join a primary to a secondary, parameterized over `[0, 1]`.
const CUBE_EDGES: [fn(f64) -> [f64; 3]; 6] = [
    |v| [1.0, v, 0.0],
    |v| [1.0, 0.0, v],
    |v| [v, 1.0, 0.0],
    |v| [0.0, 1.0, v],
    |v| [v, 0.0, 1.0],
    |v| [0.0, v, 1.0],
];

/// One traced point of the RGB cube surface.
#[derive(Debug, Clone, Copy)]
struct SurfaceSample {
    v: f64,
    rgb: [f64; 3],
    cielch: GenericColor,
    oklch: GenericColor,
}

impl SurfaceSample {
    fn new(v: f64, rgb: [f64; 3], lab: [f64; 3]) -> Self {
        let lab = GenericColor::from_array(lab);
        Self {
            v,
            rgb,
            cielch: lab_to_lch(&lab),
            oklch: lab_to_lch(&cielab_d50_to_oklab(&lab)),
        }
    }
}

impl RgbColorSpace {
    /// Builds a color space for the LittleCMS built-in sRGB profile.
    pub fn create_srgb() -> GamutResult<Arc<Self>> {
        let mut space = Self::build(&Profile::srgb())?;
        // The built-in profile carries generic texts
        space.metadata.name = "sRGB color space".to_string();
        space.metadata.manufacturer = "LittleCMS".to_string();
        space.metadata.model = String::new();
        Ok(Arc::new(space))
    }

    /// Loads an ICC profile file and builds a color space for it.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, if the profile is not an
    /// RGB device profile, if it carries a `vcgt` tag, or if no gamut
    /// boundary can be found.
    pub fn try_create_from_file(path: impl AsRef<Path>) -> GamutResult<Arc<Self>> {
        let path = path.as_ref();
        let profile = Profile::from_file(path)?;
        Self::from_profile(&profile).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "rejected ICC profile");
        })
    }

    /// Builds a color space for an already loaded profile.
    pub fn from_profile(profile: &Profile) -> GamutResult<Arc<Self>> {
        Self::build(profile).map(Arc::new)
    }

    fn build(profile: &Profile) -> GamutResult<Self> {
        if !profile.is_rgb() {
            return Err(GamutError::unsupported(format!(
                "color model {} is not RGB",
                profile.color_space()
            )));
        }
        if profile.has_vcgt() {
            return Err(GamutError::unsupported(
                "profiles with a video card gamma table (vcgt) are not supported",
            ));
        }

        let transforms = LabTransforms::new(profile, Intent::AbsoluteColorimetric)?;
        let mut space = Self {
            transforms,
            metadata: ProfileMetadata::from_profile(profile),
            // Ceilings keep the scans below from rejecting anything early
            maximum_cielch_d50_chroma: CIELCH_D50_CHROMA_CEILING,
            maximum_oklch_chroma: OKLCH_CHROMA_CEILING,
            cielab_d50_blackpoint_l: 0.0,
            cielab_d50_whitepoint_l: 100.0,
            oklab_blackpoint_l: 0.0,
            oklab_whitepoint_l: 1.0,
            cielch_d50_hue_map: HueMap::new(),
            oklch_hue_map: HueMap::new(),
        };

        let (black, white) = space.scan_achromatic_axis("CIELab", 100.0, CIELAB_GAMUT_PRECISION, |s, l| {
            s.is_cielab_d50_in_gamut(&GenericColor::new(l, 0.0, 0.0))
        })?;
        space.cielab_d50_blackpoint_l = black;
        space.cielab_d50_whitepoint_l = white;

        let (black, white) = space.scan_achromatic_axis("Oklab", 1.0, OKLAB_GAMUT_PRECISION, |s, l| {
            s.is_oklab_in_gamut(&GenericColor::new(l, 0.0, 0.0))
        })?;
        space.oklab_blackpoint_l = black;
        space.oklab_whitepoint_l = white;

        space.detect_chromaticity_boundary();

        debug!(
            name = %space.metadata.name,
            cielab_black = space.cielab_d50_blackpoint_l,
            cielab_white = space.cielab_d50_whitepoint_l,
            oklab_black = space.oklab_blackpoint_l,
            oklab_white = space.oklab_whitepoint_l,
            max_cielch_chroma = space.maximum_cielch_d50_chroma,
            max_oklch_chroma = space.maximum_oklch_chroma,
            "initialized RGB color space"
        );
        Ok(space)
    }

    /// Scans lightness upward from 0 and downward from `top`.
    fn scan_achromatic_axis(
        &self,
        space: &'static str,
        top: f64,
        step: f64,
        in_gamut: impl Fn(&Self, f64) -> bool,
    ) -> GamutResult<(f64, f64)> {
        let not_found = GamutError::GamutBoundaryNotFound { space };

        let mut black = 0.0;
        while !in_gamut(self, black) {
            black += step;
            if black >= top {
                return Err(not_found);
            }
        }

        let mut white = top;
        while !in_gamut(self, white) {
            white -= step;
            if white <= black {
                return Err(not_found);
            }
        }

        if black >= white {
            return Err(not_found);
        }
        Ok((black, white))
    }

    /// Traces the outer surface of the RGB cube.
    ///
    /// Walks the six edges that join a primary to a secondary. Where two
    /// neighboring samples skip a hue key in either map, the edge between
    /// them is bisected until the keys are contiguous. Fills both hue maps
    /// and replaces the chroma ceilings with the detected maxima plus a
    /// safety margin.
    fn detect_chromaticity_boundary(&mut self) {
        let max_step = SURFACE_SAMPLES_PER_EDGE - 1;
        let mut samples = Vec::with_capacity(CUBE_EDGES.len() * SURFACE_SAMPLES_PER_EDGE as usize);
        for edge in CUBE_EDGES {
            let params: Vec<f64> = (0..=max_step).map(|step| step as f64 / max_step as f64).collect();
            let grid: Vec<[f64; 3]> = params.iter().map(|&v| edge(v)).collect();
            let labs = self.transforms.rgb_to_lab_many(&grid);
            let edge_samples: Vec<SurfaceSample> = params
                .iter()
                .zip(grid.iter().zip(&labs))
                .map(|(&v, (rgb, lab))| SurfaceSample::new(v, *rgb, *lab))
                .collect();

            samples.extend(edge_samples.first().copied());
            for pair in edge_samples.windows(2) {
                self.fill_hue_gap(edge, &pair[0], &pair[1], HUE_GAP_MAX_BISECTIONS, &mut samples);
                samples.push(pair[1]);
            }
        }

        let mut max_cielch_chroma = 0.0_f64;
        let mut max_oklch_chroma = 0.0_f64;
        let mut cielch_map = HueMap::new();
        let mut oklch_map = HueMap::new();
        for sample in &samples {
            let [r, g, b] = sample.rgb;
            let color = Rgba8::from_unit_rgb(r, g, b);
            max_cielch_chroma = max_cielch_chroma.max(sample.cielch.second);
            cielch_map.record(sample.cielch.third, sample.cielch.second, color);
            max_oklch_chroma = max_oklch_chroma.max(sample.oklch.second);
            oklch_map.record(sample.oklch.third, sample.oklch.second, color);
        }
        debug!(samples = samples.len(), "chromaticity boundary traced");

        cielch_map.close_wrap();
        oklch_map.close_wrap();
        self.cielch_d50_hue_map = cielch_map;
        self.oklch_hue_map = oklch_map;

        self.maximum_cielch_d50_chroma = (max_cielch_chroma * CHROMA_DETECTION_INCREMENT_FACTOR
            + CIELAB_DEVIATION_LIMIT)
            .min(CIELCH_D50_CHROMA_CEILING);
        self.maximum_oklch_chroma = (max_oklch_chroma * CHROMA_DETECTION_INCREMENT_FACTOR
            + OKLAB_DEVIATION_LIMIT)
            .min(OKLCH_CHROMA_CEILING);
    }

    /// Inserts samples between `low` and `high`, in edge order, until no hue
    /// key is skipped or `depth` runs out.
    fn fill_hue_gap(
        &self,
        edge: fn(f64) -> [f64; 3],
        low: &SurfaceSample,
        high: &SurfaceSample,
        depth: u32,
        samples: &mut Vec<SurfaceSample>,
    ) {
        let gap = HueMap::leaves_gap(low.cielch.third, high.cielch.third)
            || HueMap::leaves_gap(low.oklch.third, high.oklch.third);
        if depth == 0 || !gap {
            return;
        }
        let v = (low.v + high.v) / 2.0;
        let rgb = edge(v);
        let mid = SurfaceSample::new(v, rgb, self.transforms.rgb_to_lab(rgb));
        self.fill_hue_gap(edge, low, &mid, depth - 1, samples);
        samples.push(mid);
        self.fill_hue_gap(edge, &mid, high, depth - 1, samples);
    }

    /// Lab to unit RGB, if the color survives the roundtrip test.
    fn cielab_d50_to_valid_rgb(&self, lab: &GenericColor) -> Option<[f64; 3]> {
        let rgb = self.transforms.lab_to_rgb(lab.to_array());
        if !rgb.iter().all(|&c| is_in_range(0.0, c, 1.0)) {
            return None;
        }
        let back = GenericColor::from_array(self.transforms.rgb_to_lab(rgb));
        let limit = CIELAB_DEVIATION_LIMIT * CIELAB_DEVIATION_LIMIT;
        (lab.squared_distance(&back) <= limit).then_some(rgb)
    }

    /// Oklab to unit RGB, with the deviation measured in Oklab.
    fn oklab_to_valid_rgb(&self, oklab: &GenericColor) -> Option<[f64; 3]> {
        let lab = oklab_to_cielab_d50(oklab);
        let rgb = self.transforms.lab_to_rgb(lab.to_array());
        if !rgb.iter().all(|&c| is_in_range(0.0, c, 1.0)) {
            return None;
        }
        let back = cielab_d50_to_oklab(&GenericColor::from_array(self.transforms.rgb_to_lab(rgb)));
        let limit = OKLAB_DEVIATION_LIMIT * OKLAB_DEVIATION_LIMIT;
        (oklab.squared_distance(&back) <= limit).then_some(rgb)
    }

    /// Returns `true` if the CIELab-D50 color is displayable.
    pub fn is_cielab_d50_in_gamut(&self, lab: &GenericColor) -> bool {
        is_in_range(0.0, lab.first, 100.0) && self.cielab_d50_to_valid_rgb(lab).is_some()
    }

    /// Returns `true` if the CIELCh-D50 color is displayable.
    pub fn is_cielch_d50_in_gamut(&self, lch: &GenericColor) -> bool {
        if !is_in_range(0.0, lch.first, 100.0) || lch.second.abs() > self.maximum_cielch_d50_chroma {
            return false;
        }
        self.cielab_d50_to_valid_rgb(&lch_to_lab(lch)).is_some()
    }

    /// Returns `true` if the Oklab color is displayable.
    pub fn is_oklab_in_gamut(&self, oklab: &GenericColor) -> bool {
        is_in_range(0.0, oklab.first, 1.0) && self.oklab_to_valid_rgb(oklab).is_some()
    }

    /// Returns `true` if the Oklch color is displayable.
    pub fn is_oklch_in_gamut(&self, lch: &GenericColor) -> bool {
        if !is_in_range(0.0, lch.first, 1.0) || lch.second.abs() > self.maximum_oklch_chroma {
            return false;
        }
        self.oklab_to_valid_rgb(&lch_to_lab(lch)).is_some()
    }

    /// Converts CIELab-D50 to an opaque pixel, or [`Rgba8::TRANSPARENT`]
    /// when the color is out of gamut.
    pub fn from_cielab_d50_to_rgba_or_transparent(&self, lab: &GenericColor) -> Rgba8 {
        self.cielab_d50_to_valid_rgb(lab)
            .map_or(Rgba8::TRANSPARENT, |[r, g, b]| Rgba8::from_unit_rgb(r, g, b))
    }

    /// Converts CIELCh-D50 to an opaque pixel, or [`Rgba8::TRANSPARENT`].
    pub fn from_cielch_d50_to_rgba_or_transparent(&self, lch: &GenericColor) -> Rgba8 {
        self.from_cielab_d50_to_rgba_or_transparent(&lch_to_lab(lch))
    }

    /// Converts Oklab to an opaque pixel, or [`Rgba8::TRANSPARENT`].
    pub fn from_oklab_to_rgba_or_transparent(&self, oklab: &GenericColor) -> Rgba8 {
        self.oklab_to_valid_rgb(oklab)
            .map_or(Rgba8::TRANSPARENT, |[r, g, b]| Rgba8::from_unit_rgb(r, g, b))
    }

    /// Converts Oklch to an opaque pixel, or [`Rgba8::TRANSPARENT`].
    pub fn from_oklch_to_rgba_or_transparent(&self, lch: &GenericColor) -> Rgba8 {
        self.from_oklab_to_rgba_or_transparent(&lch_to_lab(lch))
    }

    /// Converts CIELCh-D50 to 16-bit device RGB, clipping silently.
    ///
    /// For in-gamut input, converting the result back with
    /// [`to_cielab_d50`](Self::to_cielab_d50) stays within the CIELab
    /// deviation limit.
    pub fn from_cielch_d50_to_rgb16_bound(&self, lch: &GenericColor) -> [u16; 3] {
        self.transforms.lab_to_rgb16(lch_to_lab(lch).to_array())
    }

    /// Converts CIELCh-D50 to an always opaque pixel.
    ///
    /// The 8-bit result is for display. Use
    /// [`from_cielch_d50_to_rgb16_bound`](Self::from_cielch_d50_to_rgb16_bound)
    /// when the color has to survive a roundtrip.
    pub fn from_cielch_d50_to_rgba_bound(&self, lch: &GenericColor) -> Rgba8 {
        let rgb = self.from_cielch_d50_to_rgb16_bound(lch);
        let eight_bit = |c: u16| ((c as u32 * 255 + 32767) / 65535) as u8;
        Rgba8::opaque(eight_bit(rgb[0]), eight_bit(rgb[1]), eight_bit(rgb[2]))
    }

    /// Converts CIELCh-D50 to unit RGB without any range check.
    pub fn from_cielch_d50_to_rgb1(&self, lch: &GenericColor) -> GenericColor {
        GenericColor::from_array(self.transforms.lab_to_rgb(lch_to_lab(lch).to_array()))
    }

    /// Converts a device color to CIELab-D50.
    pub fn to_cielab_d50(&self, rgb: impl Into<DeviceRgb>) -> GenericColor {
        GenericColor::from_array(self.transforms.rgb_to_lab(rgb.into().to_array()))
    }

    /// Converts a device color to CIELCh-D50.
    pub fn to_cielch_d50(&self, rgb: impl Into<DeviceRgb>) -> GenericColor {
        lab_to_lch(&self.to_cielab_d50(rgb))
    }

    /// Converts a device color to Oklab.
    pub fn to_oklab(&self, rgb: impl Into<DeviceRgb>) -> GenericColor {
        cielab_d50_to_oklab(&self.to_cielab_d50(rgb))
    }

    /// Converts a device color to Oklch.
    pub fn to_oklch(&self, rgb: impl Into<DeviceRgb>) -> GenericColor {
        lab_to_lch(&self.to_oklab(rgb))
    }

    /// Projects a CIELCh-D50 color into the gamut, keeping its hue.
    ///
    /// Hue is normalized, chroma clamped to the maximum chroma and
    /// lightness clamped between blackpoint and whitepoint. If the result is
    /// still out of gamut, chroma is bisected down to a precision of
    /// [`CIELAB_GAMUT_PRECISION`]. Where the boundary is not convex in
    /// chroma this may not find the nearest in-gamut color.
    pub fn reduce_cielch_d50_chroma_to_fit_into_gamut(&self, lch: &GenericColor) -> GenericColor {
        reduce_chroma(
            lch,
            self.maximum_cielch_d50_chroma,
            self.cielab_d50_blackpoint_l,
            self.cielab_d50_whitepoint_l,
            CIELAB_GAMUT_PRECISION,
            |color| self.is_cielch_d50_in_gamut(color),
        )
    }

    /// Projects an Oklch color into the gamut, keeping its hue.
    ///
    /// Same procedure as
    /// [`reduce_cielch_d50_chroma_to_fit_into_gamut`](Self::reduce_cielch_d50_chroma_to_fit_into_gamut)
    /// with [`OKLAB_GAMUT_PRECISION`].
    pub fn reduce_oklch_chroma_to_fit_into_gamut(&self, lch: &GenericColor) -> GenericColor {
        reduce_chroma(
            lch,
            self.maximum_oklch_chroma,
            self.oklab_blackpoint_l,
            self.oklab_whitepoint_l,
            OKLAB_GAMUT_PRECISION,
            |color| self.is_oklch_in_gamut(color),
        )
    }

    /// Most saturated device color near a CIELCh-D50 hue.
    ///
    /// Searches the traced boundary within ±0.5° of `hue`, so no in-gamut
    /// color in that window is noticeably more chromatic.
    pub fn max_chroma_color_by_cielch_d50_hue360(&self, hue: f64) -> Rgba8 {
        self.cielch_d50_hue_map
            .most_saturated_near(hue, HUE_LOOKUP_TOLERANCE_DEGREES)
            .unwrap_or(Rgba8::TRANSPARENT)
    }

    /// Most saturated device color near an Oklab hue.
    pub fn max_chroma_color_by_oklab_hue360(&self, hue: f64) -> Rgba8 {
        self.oklch_hue_map
            .most_saturated_near(hue, HUE_LOOKUP_TOLERANCE_DEGREES)
            .unwrap_or(Rgba8::TRANSPARENT)
    }

    /// Metadata of the underlying profile.
    pub fn metadata(&self) -> &ProfileMetadata {
        &self.metadata
    }

    /// Profile description.
    pub fn profile_name(&self) -> &str {
        &self.metadata.name
    }

    /// Profile manufacturer.
    pub fn profile_manufacturer(&self) -> &str {
        &self.metadata.manufacturer
    }

    /// Profile device model.
    pub fn profile_model(&self) -> &str {
        &self.metadata.model
    }

    /// Profile copyright.
    pub fn profile_copyright(&self) -> &str {
        &self.metadata.copyright
    }

    /// ICC version, e.g. `"4.3"`.
    pub fn profile_icc_version(&self) -> &str {
        &self.metadata.icc_version
    }

    /// Whether the profile has a matrix-shaper component.
    pub fn profile_has_matrix_shaper(&self) -> bool {
        self.metadata.has_matrix_shaper
    }

    /// Device class signature.
    pub fn profile_class(&self) -> &str {
        &self.metadata.device_class
    }

    /// Device color model signature.
    pub fn profile_color_model(&self) -> &str {
        &self.metadata.color_model
    }

    /// Profile connection space signature.
    pub fn profile_pcs_color_model(&self) -> &str {
        &self.metadata.pcs_color_model
    }

    /// Absolute path of the profile file, if loaded from one.
    pub fn profile_absolute_file_path(&self) -> Option<&Path> {
        self.metadata.absolute_file_path.as_deref()
    }

    /// Size of the profile file in bytes, if loaded from one.
    pub fn profile_file_size(&self) -> Option<u64> {
        self.metadata.file_size
    }

    /// Detected maximum CIELCh-D50 chroma, including the safety margin.
    pub fn profile_maximum_cielch_d50_chroma(&self) -> f64 {
        self.maximum_cielch_d50_chroma
    }

    /// Detected maximum Oklch chroma, including the safety margin.
    pub fn profile_maximum_oklch_chroma(&self) -> f64 {
        self.maximum_oklch_chroma
    }

    /// Lowest in-gamut CIELab lightness on the achromatic axis.
    pub fn cielab_d50_blackpoint_l(&self) -> f64 {
        self.cielab_d50_blackpoint_l
    }

    /// Highest in-gamut CIELab lightness on the achromatic axis.
    pub fn cielab_d50_whitepoint_l(&self) -> f64 {
        self.cielab_d50_whitepoint_l
    }

    /// Lowest in-gamut Oklab lightness on the achromatic axis.
    pub fn oklab_blackpoint_l(&self) -> f64 {
        self.oklab_blackpoint_l
    }

    /// Highest in-gamut Oklab lightness on the achromatic axis.
    pub fn oklab_whitepoint_l(&self) -> f64 {
        self.oklab_whitepoint_l
    }
}

impl std::fmt::Debug for RgbColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbColorSpace")
            .field("name", &self.metadata.name)
            .field("maximum_cielch_d50_chroma", &self.maximum_cielch_d50_chroma)
            .field("maximum_oklch_chroma", &self.maximum_oklch_chroma)
            .finish_non_exhaustive()
    }
}

/// Bisects chroma between the achromatic axis and the clamped input.
fn reduce_chroma(
    lch: &GenericColor,
    maximum_chroma: f64,
    blackpoint_l: f64,
    whitepoint_l: f64,
    precision: f64,
    in_gamut: impl Fn(&GenericColor) -> bool,
) -> GenericColor {
    let polar = PolarPoint::from_chroma_hue(lch);
    let mut reference = polar.to_lch(lch.first);
    reference.second = reference.second.min(maximum_chroma);
    // NaN lightness is left alone; it fails the gamut test below
    if !reference.first.is_nan() {
        reference.first = reference.first.clamp(blackpoint_l, whitepoint_l);
    }
    if in_gamut(&reference) {
        return reference;
    }

    let mut lower = GenericColor::new(reference.first, 0.0, reference.third);
    if !in_gamut(&lower) {
        reference.first = blackpoint_l;
        lower.first = blackpoint_l;
    }

    let mut upper = reference;
    while upper.second - lower.second > precision {
        let mut candidate = upper;
        candidate.second = (lower.second + upper.second) / 2.0;
        if in_gamut(&candidate) {
            lower = candidate;
        } else {
            upper = candidate;
        }
    }
    lower
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_chroma_on_disk() {
        // Unit disk around the achromatic axis, lightness in [0, 100]
        let in_disk = |c: &GenericColor| is_in_range(0.0, c.first, 100.0) && c.second <= 1.0;
        let reduced = reduce_chroma(
            &GenericColor::new(50.0, 5.0, 400.0),
            10.0,
            0.0,
            100.0,
            0.001,
            in_disk,
        );
        assert_eq!(reduced.first, 50.0);
        assert!(reduced.second <= 1.0 && reduced.second > 0.998);
        assert!((reduced.third - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_reduce_chroma_negative_chroma_flips_hue() {
        let always = |_: &GenericColor| true;
        let reduced = reduce_chroma(&GenericColor::new(50.0, -3.0, 10.0), 10.0, 0.0, 100.0, 0.001, always);
        assert_eq!(reduced.second, 3.0);
        assert!((reduced.third - 190.0).abs() < 1e-9);
    }

    #[test]
    fn test_reduce_chroma_clamps_lightness_and_chroma() {
        let always = |_: &GenericColor| true;
        let reduced = reduce_chroma(&GenericColor::new(150.0, 50.0, 0.0), 10.0, 2.0, 98.0, 0.001, always);
        assert_eq!(reduced.first, 98.0);
        assert_eq!(reduced.second, 10.0);

        let reduced = reduce_chroma(&GenericColor::new(-5.0, 1.0, 0.0), 10.0, 2.0, 98.0, 0.001, always);
        assert_eq!(reduced.first, 2.0);
    }

    #[test]
    fn test_reduce_chroma_falls_back_to_blackpoint() {
        // Only the blackpoint lightness is in gamut
        let only_black = |c: &GenericColor| c.first == 2.0 && c.second <= 0.5;
        let reduced = reduce_chroma(&GenericColor::new(60.0, 5.0, 90.0), 10.0, 2.0, 98.0, 0.001, only_black);
        assert_eq!(reduced.first, 2.0);
        assert!(reduced.second <= 0.5);
        assert!(only_black(&reduced));
    }
}
