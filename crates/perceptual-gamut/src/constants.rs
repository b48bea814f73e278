//! Tunable constants of the gamut engine.
//!
//! The deviation limits are empirical safety margins for the Lab/RGB
//! roundtrip, not formal error bounds of the underlying transform.

/// Step of the CIELab lightness scans and the CIELCh chroma bisection.
pub const CIELAB_GAMUT_PRECISION: f64 = 0.001;

/// Step of the Oklab lightness scans and the Oklch chroma bisection.
pub const OKLAB_GAMUT_PRECISION: f64 = 0.00001;

/// Maximum Euclidean CIELab deviation accepted after a Lab/RGB/Lab roundtrip.
pub const CIELAB_DEVIATION_LIMIT: f64 = 0.5;

/// Maximum Euclidean Oklab deviation accepted after a roundtrip.
pub const OKLAB_DEVIATION_LIMIT: f64 = 0.005;

/// Inflation applied to the detected maximum chroma.
pub const CHROMA_DETECTION_INCREMENT_FACTOR: f64 = 1.02;

/// Absolute ceiling of the CIELCh-D50 maximum chroma.
pub const CIELCH_D50_CHROMA_CEILING: f64 = 255.0;

/// Absolute ceiling of the Oklch maximum chroma.
pub const OKLCH_CHROMA_CEILING: f64 = 2.0;

/// Samples per edge when tracing the outer surface of the RGB cube.
pub const SURFACE_SAMPLES_PER_EDGE: u32 = 256;

/// Hue map keys per degree (keys are tenths of a degree).
pub const HUE_KEYS_PER_DEGREE: f64 = 10.0;

/// Deepest bisection between two surface samples that skip a hue key.
pub const HUE_GAP_MAX_BISECTIONS: u32 = 12;

/// Half width of the hue window searched by the most-saturated-color lookup.
pub const HUE_LOOKUP_TOLERANCE_DEGREES: f64 = 0.5;

/// A neutral gray in CIELCh-D50, used as diagram background.
pub const NEUTRAL_GRAY_LCH: [f64; 3] = [50.0, 0.0, 0.0];

/// A chroma every sRGB hue can display at lightness 50.
pub const SRGB_VERSATILE_CHROMA: f64 = 32.0;
