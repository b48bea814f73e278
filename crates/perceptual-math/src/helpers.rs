//! Small numeric helpers.

use std::ops::Rem;

/// Returns `true` if `low <= x <= high`.
///
/// Any NaN argument yields `false`.
///
/// ```rust
/// use perceptual_math::is_in_range;
///
/// assert!(is_in_range(0, 5, 10));
/// assert!(is_in_range(3.0, 3.0, 3.0));
/// assert!(!is_in_range(0.0, f64::NAN, 1.0));
/// ```
#[inline]
pub fn is_in_range<T: PartialOrd>(low: T, x: T, high: T) -> bool {
    low <= x && x <= high
}

/// Returns `true` if `number` is odd.
#[inline]
pub fn is_odd<T>(number: T) -> bool
where
    T: Copy + Rem<Output = T> + PartialEq + From<u8>,
{
    number % T::from(2) != T::from(0)
}

/// Rounds `value` to `precision` decimal places.
///
/// Negative precision rounds to tens, hundreds, and so on.
///
/// ```rust
/// use perceptual_math::round_to_digits;
///
/// assert_eq!(round_to_digits(12.345, 1), 12.3);
/// assert_eq!(round_to_digits(1234.0, -2), 1200.0);
/// ```
#[inline]
pub fn round_to_digits(value: f64, precision: i32) -> f64 {
    let multiplier = 10f64.powi(precision);
    (value * multiplier).round() / multiplier
}

/// Normalizes an angle into `[0, 360)`.
///
/// ```rust
/// use perceptual_math::normalized_angle_degree;
///
/// assert_eq!(normalized_angle_degree(-90.0), 270.0);
/// assert_eq!(normalized_angle_degree(720.0), 0.0);
/// ```
#[inline]
pub fn normalized_angle_degree(value: f64) -> f64 {
    let mut angle = value % 360.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    // Tiny negative inputs round up to exactly 360 above.
    if angle >= 360.0 { 0.0 } else { angle }
}

/// Relative float comparison with an explicit epsilon.
///
/// Epsilon values smaller than the machine epsilon of `f64` are raised to it.
/// The tolerance grows with the magnitude of the operands.
pub fn is_nearly_equal_eps(a: f64, b: f64, epsilon: f64) -> bool {
    let actual_epsilon = f64::EPSILON.max(epsilon);
    if a == b && !epsilon.is_nan() {
        return true;
    }
    let norm = (a.abs() + b.abs()).min(f64::MAX);
    (a - b).abs() < actual_epsilon.max(actual_epsilon * norm)
}

/// Floating point types accepted by [`is_nearly_equal`].
pub trait NearlyEqualFloat: Copy {
    /// Machine epsilon of the type, widened to `f64`.
    const EPSILON: f64;

    /// Lossless widening to `f64`.
    fn to_f64(self) -> f64;
}

impl NearlyEqualFloat for f32 {
    const EPSILON: f64 = f32::EPSILON as f64;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl NearlyEqualFloat for f64 {
    const EPSILON: f64 = f64::EPSILON;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Relative float comparison with a default epsilon.
///
/// The epsilon is 100 times the machine epsilon of the *less* precise of
/// the two operand types.
///
/// ```rust
/// use perceptual_math::is_nearly_equal;
///
/// assert!(is_nearly_equal(0.1f64 + 0.2, 0.3f64));
/// assert!(is_nearly_equal(0.3f32, 0.3f64));
/// assert!(!is_nearly_equal(1.0f64, 1.001f64));
/// ```
#[inline]
pub fn is_nearly_equal<A: NearlyEqualFloat, B: NearlyEqualFloat>(a: A, b: B) -> bool {
    const FACTOR: f64 = 100.0;
    let epsilon = A::EPSILON.max(B::EPSILON) * FACTOR;
    is_nearly_equal_eps(a.to_f64(), b.to_f64(), epsilon)
}

/// Splits `count` elements into at most `parts` contiguous ranges.
///
/// Range lengths differ by at most one, longer ranges first. No range is
/// empty, so fewer than `parts` ranges are returned when `count < parts`.
///
/// ```rust
/// use perceptual_math::split_elements;
///
/// assert_eq!(split_elements(10, 3), vec![0..4, 4..7, 7..10]);
/// assert!(split_elements(0, 4).is_empty());
/// ```
pub fn split_elements(count: usize, parts: usize) -> Vec<std::ops::Range<usize>> {
    let parts = parts.max(1).min(count);
    if parts == 0 {
        return Vec::new();
    }
    let base = count / parts;
    let remainder = count % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let len = base + usize::from(i < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Splits a slice into at most `parts` non-empty sub-slices of near-equal size.
pub fn split_list<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    split_elements(items.len(), parts)
        .into_iter()
        .map(|range| &items[range])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_in_range() {
        assert!(is_in_range(3, 3, 3));
        assert!(is_in_range(-1.0, 0.0, 1.0));
        assert!(!is_in_range(0, 11, 10));
        assert!(!is_in_range(f64::NAN, 0.0, 1.0));
        assert!(!is_in_range(0.0, 0.0, f64::NAN));
        assert!(!is_in_range(0.0, f64::NAN, 1.0));
        assert!(!is_in_range(f64::NAN, f64::NAN, f64::NAN));
    }

    #[test]
    fn test_is_odd() {
        assert!(is_odd(1));
        assert!(is_odd(-3i32));
        assert!(!is_odd(0u8));
        assert!(!is_odd(-4i64));
    }

    #[test]
    fn test_round_to_digits() {
        assert_eq!(round_to_digits(0.5, 0), 1.0);
        assert_eq!(round_to_digits(1.2345, 2), 1.23);
        assert_eq!(round_to_digits(-12.5, 0), -13.0);
        assert_eq!(round_to_digits(155.0, -1), 160.0);
    }

    #[test]
    fn test_normalized_angle() {
        assert_eq!(normalized_angle_degree(0.0), 0.0);
        assert_eq!(normalized_angle_degree(360.0), 0.0);
        assert_eq!(normalized_angle_degree(361.0), 1.0);
        assert_eq!(normalized_angle_degree(-360.0), 0.0);
        assert_eq!(normalized_angle_degree(-1.0), 359.0);
        let tiny = normalized_angle_degree(-1e-20);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_normalized_angle_nan() {
        assert!(normalized_angle_degree(f64::NAN).is_nan());
    }

    #[test]
    fn test_nearly_equal() {
        assert!(is_nearly_equal(1.0f64, 1.0f64));
        assert!(is_nearly_equal(1e10f64, 1e10f64 + 1e-5));
        assert!(!is_nearly_equal(0.0f64, 1e-10f64));
        assert!(!is_nearly_equal(f64::NAN, f64::NAN));
    }

    #[test]
    fn test_nearly_equal_mixed_precision() {
        // f32 epsilon * 100 is about 1.2e-5
        assert!(is_nearly_equal(1.0f32, 1.000_001f64));
        assert!(!is_nearly_equal(1.0f64, 1.000_001f64));
    }

    #[test]
    fn test_nearly_equal_eps() {
        assert!(is_nearly_equal_eps(1.0, 1.05, 0.1));
        assert!(!is_nearly_equal_eps(1.0, 1.5, 0.1));
    }

    #[test]
    fn test_nearly_equal_infinity() {
        for epsilon in [0.0, 1e-6, 1.0, 1e300] {
            assert!(is_nearly_equal_eps(f64::INFINITY, f64::INFINITY, epsilon));
            assert!(is_nearly_equal_eps(f64::NEG_INFINITY, f64::NEG_INFINITY, epsilon));
            assert!(!is_nearly_equal_eps(f64::INFINITY, f64::NEG_INFINITY, epsilon));
            assert!(is_nearly_equal_eps(-42.5, -42.5, epsilon));
        }
    }

    #[test]
    fn test_split_elements_covers_everything() {
        for count in 0..40 {
            for parts in 0..9 {
                let ranges = split_elements(count, parts);
                let mut covered = 0;
                for range in &ranges {
                    assert_eq!(range.start, covered);
                    assert!(!range.is_empty());
                    covered = range.end;
                }
                assert_eq!(covered, count);
                assert!(ranges.len() <= parts.max(1));
            }
        }
    }

    #[test]
    fn test_split_list() {
        let items = [1, 2, 3, 4, 5];
        let parts = split_list(&items, 2);
        assert_eq!(parts, vec![&items[0..3], &items[3..5]]);
        assert_eq!(split_list(&items, 10).len(), 5);
    }
}
