//! ICC profile wrapper.

use crate::{IccError, IccResult, StandardProfile};
use lcms2::{ColorSpaceSignature, Profile as LcmsProfile, TagSignature};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An ICC color profile.
///
/// Profiles can be loaded from files, created from raw ICC data, or
/// generated from [`StandardProfile`] definitions. A profile loaded from
/// a file remembers its absolute path and size.
///
/// # Example
///
/// ```rust
/// use perceptual_icc::Profile;
///
/// let srgb = Profile::srgb();
/// assert!(srgb.is_rgb());
/// assert!(!srgb.has_vcgt());
/// println!("Description: {}", srgb.description());
/// ```
pub struct Profile {
    /// Internal lcms2 profile handle.
    pub(crate) inner: LcmsProfile,
    source: Option<PathBuf>,
    file_size: Option<u64>,
}

impl Profile {
    /// Loads a profile from an ICC file.
    ///
    /// The whole file is read into memory first; the file is closed before
    /// this function returns.
    ///
    /// # Errors
    ///
    /// Returns [`IccError::LoadFailed`] if the file cannot be read and
    /// [`IccError::InvalidProfile`] if it contains invalid data.
    pub fn from_file(path: &Path) -> IccResult<Self> {
        let data = std::fs::read(path)
            .map_err(|source| IccError::LoadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let mut profile = Self::from_icc(&data)?;
        profile.source = Some(std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()));
        profile.file_size = Some(data.len() as u64);
        debug!(path = %path.display(), size = data.len(), "loaded ICC profile");
        Ok(profile)
    }

    /// Creates a profile from raw ICC data.
    pub fn from_icc(data: &[u8]) -> IccResult<Self> {
        let inner = LcmsProfile::new_icc(data).map_err(|e| IccError::InvalidProfile(e.to_string()))?;
        Ok(Self::from_lcms(inner))
    }

    /// Creates the built-in sRGB profile.
    pub fn srgb() -> Self {
        Self::from_lcms(LcmsProfile::new_srgb())
    }

    /// Creates a profile from a built-in definition.
    pub fn from_standard(standard: StandardProfile) -> IccResult<Self> {
        standard.to_profile()
    }

    /// Creates a CIE Lab v4 profile with D50 white.
    pub fn lab() -> IccResult<Self> {
        let inner = LcmsProfile::new_lab4_context(lcms2::GlobalContext::new(), &lcms2::CIExyY::d50())
            .map_err(|e| IccError::CreateFailed {
                what: "Lab".into(),
                reason: e.to_string(),
            })?;
        Ok(Self::from_lcms(inner))
    }

    pub(crate) fn from_lcms(inner: LcmsProfile) -> Self {
        Self {
            inner,
            source: None,
            file_size: None,
        }
    }

    /// Returns the profile description.
    pub fn description(&self) -> String {
        self.info(lcms2::InfoType::Description)
    }

    /// Returns the profile manufacturer.
    pub fn manufacturer(&self) -> String {
        self.info(lcms2::InfoType::Manufacturer)
    }

    /// Returns the profile model.
    pub fn model(&self) -> String {
        self.info(lcms2::InfoType::Model)
    }

    /// Returns the profile copyright.
    pub fn copyright(&self) -> String {
        self.info(lcms2::InfoType::Copyright)
    }

    fn info(&self, kind: lcms2::InfoType) -> String {
        self.inner
            .info(kind, lcms2::Locale::none())
            .map(|text| text.trim_end_matches('\0').trim().to_string())
            .unwrap_or_default()
    }

    /// Returns the ICC version with one decimal, e.g. `"4.3"`.
    pub fn icc_version(&self) -> String {
        format!("{:.1}", self.inner.version())
    }

    /// Returns the device class signature, e.g. `"DisplayClass"`.
    pub fn device_class(&self) -> String {
        format!("{:?}", self.inner.device_class())
    }

    /// Returns the color space signature, e.g. `"RgbData"`.
    pub fn color_space(&self) -> String {
        format!("{:?}", self.inner.color_space())
    }

    /// Returns the profile connection space signature, e.g. `"LabData"`.
    pub fn pcs(&self) -> String {
        format!("{:?}", self.inner.pcs())
    }

    /// Returns true if this is an RGB profile.
    pub fn is_rgb(&self) -> bool {
        matches!(self.inner.color_space(), ColorSpaceSignature::RgbData)
    }

    /// Returns true if the profile is implemented as a matrix-shaper.
    pub fn is_matrix_shaper(&self) -> bool {
        self.inner.is_matrix_shaper()
    }

    /// Returns true if the profile carries a video card gamma table.
    pub fn has_vcgt(&self) -> bool {
        self.inner.has_tag(TagSignature::VcgtTag)
    }

    /// Absolute path of the file this profile was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Size in bytes of the file this profile was loaded from.
    pub fn file_size(&self) -> Option<u64> {
        self.file_size
    }

    /// Exports the profile as ICC data.
    pub fn to_icc(&self) -> IccResult<Vec<u8>> {
        self.inner
            .icc()
            .map_err(|e| IccError::CreateFailed {
                what: self.description(),
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("description", &self.description())
            .field("color_space", &self.color_space())
            .field("source", &self.source)
            .finish()
    }
}
