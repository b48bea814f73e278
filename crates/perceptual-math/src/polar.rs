//! Polar coordinates on the chroma/hue plane.

use crate::normalized_angle_degree;
use perceptual_core::GenericColor;
use std::fmt;

/// A point in polar coordinates.
///
/// Always normalized: `radius >= 0` and `angle_degree` in `[0, 360)`.
/// The angle is meaningless when the radius is 0.
///
/// # Example
///
/// ```rust
/// use perceptual_math::PolarPoint;
///
/// let p = PolarPoint::new(-2.0, 30.0);
/// assert_eq!(p.radius(), 2.0);
/// assert_eq!(p.angle_degree(), 210.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarPoint {
    radius: f64,
    angle_degree: f64,
}

impl PolarPoint {
    /// Creates a normalized polar point.
    ///
    /// A negative radius is made positive and the angle turned by 180°.
    pub fn new(radius: f64, angle_degree: f64) -> Self {
        if radius < 0.0 {
            Self {
                radius: -radius,
                angle_degree: normalized_angle_degree(angle_degree + 180.0),
            }
        } else {
            Self {
                radius,
                angle_degree: normalized_angle_degree(angle_degree),
            }
        }
    }

    /// Converts from Cartesian coordinates. The origin maps to angle 0.
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        let radius = (x * x + y * y).sqrt();
        if radius == 0.0 {
            return Self {
                radius,
                angle_degree: 0.0,
            };
        }
        let angle = (x / radius).acos().to_degrees();
        let angle_degree = if y >= 0.0 { angle } else { 360.0 - angle };
        Self {
            radius,
            // acos may land exactly on 360 for tiny negative y
            angle_degree: normalized_angle_degree(angle_degree),
        }
    }

    /// Reads chroma (`second`) and hue (`third`) of an LCh-like color.
    pub fn from_chroma_hue(lch: &GenericColor) -> Self {
        Self::new(lch.second, lch.third)
    }

    /// Builds an LCh-like color from this point and a lightness.
    pub fn to_lch(&self, lightness: f64) -> GenericColor {
        GenericColor::new(lightness, self.radius, self.angle_degree)
    }

    /// Radius, never negative.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Angle in `[0, 360)`.
    #[inline]
    pub fn angle_degree(&self) -> f64 {
        self.angle_degree
    }

    /// Returns `true` if both points denote the same location.
    ///
    /// Points with radius 0 are equal regardless of their angle.
    pub fn is_same_point(&self, other: &Self) -> bool {
        self.radius == other.radius
            && (self.angle_degree == other.angle_degree || self.radius == 0.0)
    }

    /// Converts to Cartesian `(x, y)`.
    pub fn to_cartesian(&self) -> (f64, f64) {
        let angle = self.angle_degree.to_radians();
        (self.radius * angle.cos(), self.radius * angle.sin())
    }
}

impl fmt::Display for PolarPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PolarPoint(radius: {}, angleDegree: {}°)",
            self.radius, self.angle_degree
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalizes_angle() {
        let p = PolarPoint::new(1.0, 370.0);
        assert_abs_diff_eq!(p.angle_degree(), 10.0, epsilon = 1e-12);
        let q = PolarPoint::new(1.0, -90.0);
        assert_eq!(q.angle_degree(), 270.0);
    }

    #[test]
    fn test_negative_radius() {
        let p = PolarPoint::new(-1.0, 0.0);
        assert_eq!(p.radius(), 1.0);
        assert_eq!(p.angle_degree(), 180.0);
        let q = PolarPoint::new(-1.0, 270.0);
        assert_eq!(q.angle_degree(), 90.0);
    }

    #[test]
    fn test_negated_radius_is_same_point() {
        for radius in [0.0, 0.5, 3.0, 250.0] {
            for angle in [-400.0, -90.0, 0.0, 45.0, 179.0, 180.0, 359.0, 720.0] {
                let p = PolarPoint::new(radius, angle);
                let q = PolarPoint::new(-radius, angle + 180.0);
                assert!(p.is_same_point(&q), "{p} vs {q}");
            }
        }
    }

    #[test]
    fn test_from_cartesian() {
        let p = PolarPoint::from_cartesian(0.0, 1.0);
        assert_abs_diff_eq!(p.radius(), 1.0);
        assert_abs_diff_eq!(p.angle_degree(), 90.0, epsilon = 1e-12);

        let q = PolarPoint::from_cartesian(0.0, -2.0);
        assert_abs_diff_eq!(q.radius(), 2.0);
        assert_abs_diff_eq!(q.angle_degree(), 270.0, epsilon = 1e-12);

        let r = PolarPoint::from_cartesian(-1.0, 0.0);
        assert_abs_diff_eq!(r.angle_degree(), 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_origin() {
        let p = PolarPoint::from_cartesian(0.0, 0.0);
        assert_eq!(p.radius(), 0.0);
        assert_eq!(p.angle_degree(), 0.0);
    }

    #[test]
    fn test_is_same_point() {
        assert!(PolarPoint::new(0.0, 10.0).is_same_point(&PolarPoint::new(0.0, 200.0)));
        assert!(PolarPoint::new(1.0, 360.0).is_same_point(&PolarPoint::new(1.0, 0.0)));
        assert!(PolarPoint::new(-1.0, 0.0).is_same_point(&PolarPoint::new(1.0, 180.0)));
        assert!(!PolarPoint::new(1.0, 10.0).is_same_point(&PolarPoint::new(1.0, 11.0)));
    }

    #[test]
    fn test_cartesian_roundtrip() {
        for &(x, y) in &[(3.0, 4.0), (-3.0, 4.0), (-3.0, -4.0), (3.0, -4.0)] {
            let (x2, y2) = PolarPoint::from_cartesian(x, y).to_cartesian();
            assert_abs_diff_eq!(x2, x, epsilon = 1e-12);
            assert_abs_diff_eq!(y2, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lch_conversion() {
        let lch = GenericColor::new(50.0, -10.0, 90.0);
        let p = PolarPoint::from_chroma_hue(&lch);
        assert_eq!(p.radius(), 10.0);
        assert_eq!(p.angle_degree(), 270.0);
        assert_eq!(p.to_lch(50.0), GenericColor::new(50.0, 10.0, 270.0));
    }

    #[test]
    fn test_display() {
        let text = PolarPoint::new(2.0, 45.0).to_string();
        assert_eq!(text, "PolarPoint(radius: 2, angleDegree: 45°)");
    }
}
