//! White points and fixed matrices.
//!
//! CIELab values in this workspace are relative to the ICC D50 white; Oklab
//! is defined on D65 XYZ. The Bradford matrices below bridge the two.
//!
//! # Usage
//!
//! ```rust
//! use perceptual_math::{D50, XYZ_D50_TO_D65};
//!
//! let d65 = XYZ_D50_TO_D65 * D50;
//! assert!((d65.y - 1.0).abs() < 1e-3);
//! ```

use crate::{Mat3, Trio};

/// ICC profile connection space white (D50), as used by LittleCMS.
pub const D50: Trio = Trio::new(0.9642, 1.0, 0.8249);

/// CIE Standard Illuminant D65.
pub const D65: Trio = Trio::new(0.95047, 1.0, 1.08883);

/// Bradford adaptation from D50 XYZ to D65 XYZ.
pub const XYZ_D50_TO_D65: Mat3 = Mat3::from_rows([
    [0.955512609517083, -0.023073214184645, 0.063308961782107],
    [-0.028324949364887, 1.009942432477107, 0.021054814890112],
    [0.012328875695483, -0.020535835374141, 1.330713916450354],
]);

/// Bradford adaptation from D65 XYZ to D50 XYZ.
pub const XYZ_D65_TO_D50: Mat3 = Mat3::from_rows([
    [1.047886, 0.022919, -0.050216],
    [0.029582, 0.990484, -0.017079],
    [-0.009252, 0.015073, 0.751678],
]);

/// Oklab M1: D65 XYZ to cone response (LMS).
pub const OKLAB_M1: Mat3 = Mat3::from_rows([
    [0.8189330101, 0.3618667424, -0.1288597137],
    [0.0329845436, 0.9293118715, 0.0361456387],
    [0.0482003018, 0.2643662691, 0.6338517070],
]);

/// Inverse of [`OKLAB_M1`].
pub const OKLAB_M1_INVERSE: Mat3 = Mat3::from_rows([
    [1.2270138511035211, -0.5577999806518222, 0.2812561489664678],
    [-0.0405801784232806, 1.1122568696168302, -0.0716766786656012],
    [-0.0763812845057069, -0.4214819784180127, 1.5861632204407947],
]);

/// Oklab M2: non-linear LMS to Lab.
pub const OKLAB_M2: Mat3 = Mat3::from_rows([
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
]);

/// Inverse of [`OKLAB_M2`].
pub const OKLAB_M2_INVERSE: Mat3 = Mat3::from_rows([
    [0.9999999984505199, 0.3963377921737679, 0.2158037580607588],
    [1.0000000088817609, -0.1055613423236564, -0.0638541747717059],
    [1.0000000546724110, -0.0894841820949658, -1.2914855378640920],
]);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_identity(m: Mat3, epsilon: f64) {
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(m[i][j], expected, epsilon = epsilon);
            }
        }
    }

    #[test]
    fn test_adaptation_matrices_are_inverse() {
        assert_identity(XYZ_D50_TO_D65 * XYZ_D65_TO_D50, 1e-8);
    }

    #[test]
    fn test_oklab_inverses_match_computed() {
        assert_identity(OKLAB_M1 * OKLAB_M1_INVERSE, 1e-9);
        assert_identity(OKLAB_M2 * OKLAB_M2_INVERSE, 1e-9);
        let computed = OKLAB_M2.inverse().unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_abs_diff_eq!(computed[i][j], OKLAB_M2_INVERSE[i][j], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_d50_maps_near_d65() {
        let d65 = XYZ_D50_TO_D65 * D50;
        assert_abs_diff_eq!(d65.x, D65.x, epsilon = 2e-3);
        assert_abs_diff_eq!(d65.z, D65.z, epsilon = 3e-3);
    }
}
