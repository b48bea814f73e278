//! Conversions between the perceptual color models.
//!
//! ```text
//! CIELCh-D50 <-> CIELab-D50 <-> XYZ-D50 <-> XYZ-D65 <-> Oklab <-> Oklch
//! ```
//!
//! LCh-like values are [`GenericColor`]s with `(L, C, h)`; Lab-like values
//! use `(L, a, b)`. CIELab lightness is in `[0, 100]`, Oklab lightness in
//! `[0, 1]`.

use crate::{
    D50, Mat3, OKLAB_M1, OKLAB_M1_INVERSE, OKLAB_M2, OKLAB_M2_INVERSE, PolarPoint, Trio,
    XYZ_D50_TO_D65, XYZ_D65_TO_D50,
};
use perceptual_core::GenericColor;

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// Converts Lab-like `(L, a, b)` to LCh-like `(L, C, h)`.
pub fn lab_to_lch(lab: &GenericColor) -> GenericColor {
    PolarPoint::from_cartesian(lab.second, lab.third).to_lch(lab.first)
}

/// Converts LCh-like `(L, C, h)` to Lab-like `(L, a, b)`.
///
/// Negative chroma is interpreted as the opposite hue.
pub fn lch_to_lab(lch: &GenericColor) -> GenericColor {
    let (a, b) = PolarPoint::from_chroma_hue(lch).to_cartesian();
    GenericColor::new(lch.first, a, b)
}

/// CIELab (D50) to XYZ (D50).
pub fn cielab_d50_to_xyz_d50(lab: &GenericColor) -> Trio {
    let fy = (lab.first + 16.0) / 116.0;
    let fx = fy + lab.second / 500.0;
    let fz = fy - lab.third / 200.0;
    let inverse = |f: f64| {
        let cubed = f * f * f;
        if cubed > LAB_EPSILON {
            cubed
        } else {
            (116.0 * f - 16.0) / LAB_KAPPA
        }
    };
    let y = if lab.first > LAB_KAPPA * LAB_EPSILON {
        fy * fy * fy
    } else {
        lab.first / LAB_KAPPA
    };
    Trio::new(inverse(fx) * D50.x, y * D50.y, inverse(fz) * D50.z)
}

/// XYZ (D50) to CIELab (D50).
pub fn xyz_d50_to_cielab_d50(xyz: Trio) -> GenericColor {
    let forward = |t: f64| {
        if t > LAB_EPSILON {
            t.cbrt()
        } else {
            (LAB_KAPPA * t + 16.0) / 116.0
        }
    };
    let fx = forward(xyz.x / D50.x);
    let fy = forward(xyz.y / D50.y);
    let fz = forward(xyz.z / D50.z);
    GenericColor::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// XYZ (D65) to Oklab.
pub fn xyz_d65_to_oklab(xyz: Trio) -> GenericColor {
    let lms = OKLAB_M1 * xyz;
    let lms_nonlinear = Trio::new(lms.x.cbrt(), lms.y.cbrt(), lms.z.cbrt());
    let lab = OKLAB_M2 * lms_nonlinear;
    GenericColor::new(lab.x, lab.y, lab.z)
}

/// Oklab to XYZ (D65).
pub fn oklab_to_xyz_d65(oklab: &GenericColor) -> Trio {
    let lms_nonlinear = OKLAB_M2_INVERSE * Mat3::create_trio(oklab.first, oklab.second, oklab.third);
    let lms = lms_nonlinear * lms_nonlinear * lms_nonlinear;
    OKLAB_M1_INVERSE * lms
}

/// CIELab (D50) to Oklab.
pub fn cielab_d50_to_oklab(lab: &GenericColor) -> GenericColor {
    xyz_d65_to_oklab(XYZ_D50_TO_D65 * cielab_d50_to_xyz_d50(lab))
}

/// Oklab to CIELab (D50).
pub fn oklab_to_cielab_d50(oklab: &GenericColor) -> GenericColor {
    xyz_d50_to_cielab_d50(XYZ_D65_TO_D50 * oklab_to_xyz_d65(oklab))
}

/// CIELCh (D50) to Oklch.
pub fn cielch_d50_to_oklch(lch: &GenericColor) -> GenericColor {
    lab_to_lch(&cielab_d50_to_oklab(&lch_to_lab(lch)))
}

/// Oklch to CIELCh (D50).
pub fn oklch_to_cielch_d50(lch: &GenericColor) -> GenericColor {
    lab_to_lch(&oklab_to_cielab_d50(&lch_to_lab(lch)))
}
