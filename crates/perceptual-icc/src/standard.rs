//! Built-in RGB profile definitions.

use crate::{IccError, IccResult, Profile};
use lcms2::{CIExyY, CIExyYTRIPLE, Profile as LcmsProfile, ToneCurve};
use std::fmt;
use std::str::FromStr;

/// Built-in RGB color spaces.
///
/// Useful when no profile file is at hand, and for comparing the sRGB gamut
/// against wider ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardProfile {
    /// IEC 61966-2-1 sRGB (LittleCMS built-in).
    #[default]
    Srgb,
    /// Adobe RGB (1998).
    AdobeRgb,
    /// Display P3 with a 2.2 gamma approximation.
    DisplayP3,
    /// ITU-R BT.2020 with a 2.4 gamma approximation.
    Rec2020,
    /// Adobe Wide Gamut RGB (D50 white).
    WideGamutRgb,
}

impl StandardProfile {
    /// All built-in profiles.
    pub const ALL: [Self; 5] = [
        Self::Srgb,
        Self::AdobeRgb,
        Self::DisplayP3,
        Self::Rec2020,
        Self::WideGamutRgb,
    ];

    /// Command-line name, e.g. `"display-p3"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::AdobeRgb => "adobe-rgb",
            Self::DisplayP3 => "display-p3",
            Self::Rec2020 => "rec2020",
            Self::WideGamutRgb => "wide-gamut",
        }
    }

    /// Creates an ICC profile from this standard.
    pub fn to_profile(self) -> IccResult<Profile> {
        let (white, primaries, gamma) = match self {
            Self::Srgb => return Ok(Profile::srgb()),
            Self::AdobeRgb => (
                d65_white(),
                triple([0.6400, 0.3300], [0.2100, 0.7100], [0.1500, 0.0600]),
                563.0 / 256.0,
            ),
            Self::DisplayP3 => (
                d65_white(),
                triple([0.680, 0.320], [0.265, 0.690], [0.150, 0.060]),
                2.2,
            ),
            Self::Rec2020 => (
                d65_white(),
                triple([0.708, 0.292], [0.170, 0.797], [0.131, 0.046]),
                2.4,
            ),
            Self::WideGamutRgb => (
                CIExyY { x: 0.3457, y: 0.3585, Y: 1.0 },
                triple([0.7347, 0.2653], [0.1152, 0.8264], [0.1566, 0.0177]),
                563.0 / 256.0,
            ),
        };
        let curve = ToneCurve::new(gamma);
        let curves = [&curve, &curve, &curve];
        let inner = LcmsProfile::new_rgb(&white, &primaries, &curves)
            .map_err(|e| IccError::CreateFailed {
                what: self.name().into(),
                reason: e.to_string(),
            })?;
        Ok(Profile::from_lcms(inner))
    }
}

impl fmt::Display for StandardProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|standard| standard.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|s| s.name()).collect();
                format!("unknown profile '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// D65 white point.
fn d65_white() -> CIExyY {
    CIExyY { x: 0.3127, y: 0.3290, Y: 1.0 }
}

fn triple(red: [f64; 2], green: [f64; 2], blue: [f64; 2]) -> CIExyYTRIPLE {
    CIExyYTRIPLE {
        Red: CIExyY { x: red[0], y: red[1], Y: 1.0 },
        Green: CIExyY { x: green[0], y: green[1], Y: 1.0 },
        Blue: CIExyY { x: blue[0], y: blue[1], Y: 1.0 },
    }
}
