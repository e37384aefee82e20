//! The six base values a repository supplies for every build.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::prerelease::{PrereleaseVersion, MAX_PRERELEASE_NUMBER};
use crate::validate::check_u32_range;

/// Base version numbers and pre-release qualifier, before CI info and
/// metadata are layered on.
///
/// Values are range checked only when turned into a [`crate::CSemVer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseVersion {
    pub build_major: u32,
    pub build_minor: u32,
    pub build_patch: u32,
    #[serde(rename = "PreReleaseName")]
    pub prerelease_name: String,
    #[serde(rename = "PreReleaseNumber")]
    pub prerelease_number: u32,
    #[serde(rename = "PreReleaseFix")]
    pub prerelease_fix: u32,
}

impl BaseVersion {
    /// Apply the one normalization rule: a blank pre-release name forces the
    /// pre-release number and fix to zero.
    pub fn normalized(mut self) -> Self {
        if self.prerelease_name.trim().is_empty() {
            self.prerelease_name.clear();
            self.prerelease_number = 0;
            self.prerelease_fix = 0;
        }
        self
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease_name.trim().is_empty()
    }

    /// The validated pre-release, or `None` for a release build.
    pub fn prerelease(&self) -> Result<Option<PrereleaseVersion>> {
        if !self.is_prerelease() {
            return Ok(None);
        }
        let max = u32::from(MAX_PRERELEASE_NUMBER);
        let number =
            check_u32_range("pre-release number", self.prerelease_number.into(), max)?;
        let fix = check_u32_range("pre-release fix", self.prerelease_fix.into(), max)?;
        // Both were just checked against 99.
        PrereleaseVersion::from_name(&self.prerelease_name, number as u8, fix as u8).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CSemVerError;

    fn base(name: &str, number: u32, fix: u32) -> BaseVersion {
        BaseVersion {
            build_major: 1,
            build_minor: 2,
            build_patch: 3,
            prerelease_name: name.to_string(),
            prerelease_number: number,
            prerelease_fix: fix,
        }
    }

    #[test]
    fn test_blank_name_forces_zero_number_and_fix() {
        let b = base("  ", 4, 5).normalized();
        assert_eq!(b.prerelease_name, "");
        assert_eq!(b.prerelease_number, 0);
        assert_eq!(b.prerelease_fix, 0);
        assert_eq!(b.prerelease(), Ok(None));
    }

    #[test]
    fn test_named_prerelease_is_kept() {
        let b = base("Beta", 4, 5).normalized();
        assert_eq!(b.prerelease_number, 4);
        let pre = b.prerelease().expect("valid").expect("present");
        assert_eq!(pre.name(), "beta");
        assert_eq!(pre.number(), 4);
        assert_eq!(pre.fix(), 5);
    }

    #[test]
    fn test_prerelease_range_checked() {
        assert!(matches!(
            base("rc", 100, 0).prerelease(),
            Err(CSemVerError::OutOfRange { field: "pre-release number", value: 100, .. })
        ));
        assert!(matches!(
            base("rc", 0, 1000).prerelease(),
            Err(CSemVerError::OutOfRange { field: "pre-release fix", .. })
        ));
        assert!(matches!(
            base("zeta", 0, 0).prerelease(),
            Err(CSemVerError::InvalidPrereleaseName(_))
        ));
    }

    #[test]
    fn test_serde_uses_descriptor_names() {
        let json = serde_json::to_value(base("gamma", 1, 0)).expect("serialize");
        assert_eq!(json["BuildMajor"], 1);
        assert_eq!(json["PreReleaseName"], "gamma");
        assert_eq!(json["PreReleaseNumber"], 1);
        assert_eq!(json["PreReleaseFix"], 0);
    }
}
