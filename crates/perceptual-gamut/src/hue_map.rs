//! Ordered hue to most-saturated-color lookup.

use crate::constants::HUE_KEYS_PER_DEGREE;
use perceptual_core::Rgba8;
use perceptual_math::normalized_angle_degree;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HueEntry {
    chroma: f64,
    color: Rgba8,
}

/// Maps hue keys to the most saturated device color seen at that hue.
///
/// Keys are hues in tenths of a degree. After [`HueMap::close_wrap`] the
/// lowest entry is repeated at +360° and the highest at −360°, so a nearest
/// key lookup never has to special-case the 0°/360° seam.
///
/// # Example
///
/// ```rust
/// use perceptual_core::Rgba8;
/// use perceptual_gamut::HueMap;
///
/// let mut map = HueMap::new();
/// map.record(10.0, 50.0, Rgba8::opaque(255, 0, 0));
/// map.record(350.0, 40.0, Rgba8::opaque(255, 0, 128));
/// map.close_wrap();
/// // 359° is 9° from 350° and 11° from 10° + 360°
/// assert_eq!(map.nearest(359.0), Some(Rgba8::opaque(255, 0, 128)));
/// assert_eq!(map.nearest(5.0), Some(Rgba8::opaque(255, 0, 0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HueMap {
    entries: BTreeMap<i64, HueEntry>,
}

impl HueMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(hue: f64) -> i64 {
        (hue * HUE_KEYS_PER_DEGREE).round() as i64
    }

    /// Records a sample, keeping only the most saturated color per key.
    pub fn record(&mut self, hue: f64, chroma: f64, color: Rgba8) {
        let key = Self::key(normalized_angle_degree(hue));
        let candidate = HueEntry { chroma, color };
        self.entries
            .entry(key)
            .and_modify(|entry| {
                if chroma > entry.chroma {
                    *entry = candidate;
                }
            })
            .or_insert(candidate);
    }

    /// Duplicates the boundary entries at ±360°.
    ///
    /// Does nothing on an empty map.
    pub fn close_wrap(&mut self) {
        let full_turn = Self::key(360.0);
        let first = self.entries.first_key_value().map(|(k, v)| (*k, *v));
        let last = self.entries.last_key_value().map(|(k, v)| (*k, *v));
        if let (Some((first_key, first_entry)), Some((last_key, last_entry))) = (first, last) {
            self.entries.insert(first_key + full_turn, first_entry);
            self.entries.insert(last_key - full_turn, last_entry);
        }
    }

    /// Number of keys, including wrap duplicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no sample was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if samples at hues `a` and `b` leave at least one key
    /// empty between them, going the short way round.
    pub fn leaves_gap(a: f64, b: f64) -> bool {
        let full_turn = Self::key(360.0);
        let d = (Self::key(normalized_angle_degree(a)) - Self::key(normalized_angle_degree(b)))
            .rem_euclid(full_turn);
        d.min(full_turn - d) > 1
    }

    /// Returns the most saturated color whose key lies within `tolerance`
    /// degrees of `hue`, or the [nearest](Self::nearest) one if that window
    /// is empty.
    ///
    /// The window wraps across 0°/360°.
    pub fn most_saturated_near(&self, hue: f64, tolerance: f64) -> Option<Rgba8> {
        let key = Self::key(normalized_angle_degree(hue));
        let reach = Self::key(tolerance.abs());
        let full_turn = Self::key(360.0);
        [-full_turn, 0, full_turn]
            .into_iter()
            .flat_map(|shift| self.entries.range(key + shift - reach..=key + shift + reach))
            .map(|(_, entry)| entry)
            .max_by(|a, b| a.chroma.total_cmp(&b.chroma))
            .map(|entry| entry.color)
            .or_else(|| self.nearest(hue))
    }

    /// Returns the color whose key is nearest to `hue`.
    ///
    /// `hue` is normalized to `[0, 360)` first. Ties go to the upper key.
    pub fn nearest(&self, hue: f64) -> Option<Rgba8> {
        let key = Self::key(normalized_angle_degree(hue));
        let upper = self.entries.range(key..).next();
        let lower = self.entries.range(..key).next_back();
        let entry = match (lower, upper) {
            (None, None) => return None,
            (Some((_, lower)), None) => lower,
            (None, Some((_, upper))) => upper,
            (Some((lower_key, lower)), Some((upper_key, upper))) => {
                if key - lower_key < upper_key - key {
                    lower
                } else {
                    upper
                }
            }
        };
        Some(entry.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
    const GREEN: Rgba8 = Rgba8::opaque(0, 255, 0);
    const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

    #[test]
    fn test_empty() {
        let mut map = HueMap::new();
        map.close_wrap();
        assert!(map.is_empty());
        assert_eq!(map.nearest(10.0), None);
    }

    #[test]
    fn test_keeps_most_saturated() {
        let mut map = HueMap::new();
        map.record(120.0, 10.0, RED);
        map.record(120.02, 30.0, GREEN);
        map.record(119.98, 20.0, BLUE);
        assert_eq!(map.len(), 1);
        assert_eq!(map.nearest(120.0), Some(GREEN));
    }

    #[test]
    fn test_wrap_duplicates() {
        let mut map = HueMap::new();
        map.record(40.0, 1.0, RED);
        map.record(200.0, 1.0, GREEN);
        map.record(300.0, 1.0, BLUE);
        map.close_wrap();
        assert_eq!(map.len(), 5);
        // 355° is 55° from 40°+360° and 55° from 300°: tie goes up
        assert_eq!(map.nearest(355.0), Some(RED));
        // 5° is 35° from 40° and 65° from 300°-360°
        assert_eq!(map.nearest(5.0), Some(RED));
        assert_eq!(map.nearest(350.0), Some(BLUE));
    }

    #[test]
    fn test_wrap_picks_last_entry_below_zero() {
        let mut map = HueMap::new();
        map.record(100.0, 1.0, RED);
        map.record(358.0, 1.0, BLUE);
        map.close_wrap();
        // 1° is 3° from 358°-360° and 99° from 100°
        assert_eq!(map.nearest(1.0), Some(BLUE));
    }

    #[test]
    fn test_nearest_normalizes_hue() {
        let mut map = HueMap::new();
        map.record(90.0, 1.0, RED);
        map.record(270.0, 1.0, GREEN);
        map.close_wrap();
        assert_eq!(map.nearest(-90.0), Some(GREEN));
        assert_eq!(map.nearest(450.0), Some(RED));
    }

    #[test]
    fn test_most_saturated_in_window() {
        let mut map = HueMap::new();
        map.record(100.0, 40.0, RED);
        map.record(100.4, 60.0, GREEN);
        map.record(101.0, 90.0, BLUE);
        map.close_wrap();
        assert_eq!(map.nearest(100.0), Some(RED));
        assert_eq!(map.most_saturated_near(100.0, 0.5), Some(GREEN));
        assert_eq!(map.most_saturated_near(100.6, 0.5), Some(BLUE));
        // Nothing within 0.5° of 200°: falls back to the nearest key
        assert_eq!(map.most_saturated_near(200.0, 0.5), Some(BLUE));
    }

    #[test]
    fn test_window_wraps_across_zero() {
        let mut map = HueMap::new();
        map.record(0.2, 10.0, RED);
        map.record(180.0, 10.0, GREEN);
        map.record(359.7, 30.0, BLUE);
        map.close_wrap();
        assert_eq!(map.most_saturated_near(0.1, 0.5), Some(BLUE));
        assert_eq!(map.most_saturated_near(359.9, 0.5), Some(BLUE));
        assert_eq!(map.most_saturated_near(0.6, 0.5), Some(RED));
    }

    #[test]
    fn test_gap_detection() {
        assert!(!HueMap::leaves_gap(10.0, 10.1));
        assert!(!HueMap::leaves_gap(10.0, 10.0));
        assert!(HueMap::leaves_gap(10.0, 10.2));
        assert!(!HueMap::leaves_gap(359.98, 0.02));
        assert!(HueMap::leaves_gap(359.8, 0.1));
        assert!(HueMap::leaves_gap(90.0, 270.0));
    }

    #[test]
    fn test_single_entry() {
        let mut map = HueMap::new();
        map.record(180.0, 1.0, RED);
        map.close_wrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.nearest(0.0), Some(RED));
        assert_eq!(map.nearest(359.9), Some(RED));
    }
}
