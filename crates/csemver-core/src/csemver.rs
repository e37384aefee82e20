//! The Constrained Semantic Version aggregate.
//!
//! A CSemVer maps bijectively onto an "ordered version" integer:
//!
//! ```text
//! ordered = major * MUL_MAJOR + minor * MUL_MINOR + (patch + 1) * MUL_PATCH
//! if pre-release:
//!     ordered -= MUL_PATCH - 1
//!     ordered += index * MUL_NAME + number * MUL_NUM + fix
//! ```
//!
//! Each patch owns `MUL_PATCH` slots. The top slot is the release, the
//! `MUL_PATCH - 1 = 8 * 100 * 100` slots below it hold every pre-release of
//! that patch. The file version is the ordered version shifted left one bit,
//! with the CI-build flag in the low bit.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, TimeZone};
use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::base_version::BaseVersion;
use crate::build_index::build_index;
use crate::ci::{CiBuildInfo, CiFormat};
use crate::error::{CSemVerError, Result};
use crate::file_version::FileVersionQuad;
use crate::prerelease::{PrereleaseFormat, PrereleaseName, PrereleaseVersion, MAX_PRERELEASE_NUMBER};
use crate::validate::{check_metadata, check_range, check_u32_range};

pub const MAX_MAJOR: u32 = 99_999;
pub const MAX_MINOR: u32 = 49_999;
pub const MAX_PATCH: u32 = 9_999;

const MUL_NUM: u64 = 100;
const MUL_NAME: u64 = MUL_NUM * 100;
const MUL_PATCH: u64 = MUL_NAME * 8 + 1;
const MUL_MINOR: u64 = MUL_PATCH * 10_000;
const MUL_MAJOR: u64 = MUL_MINOR * 50_000;

/// Rendering options for [`CSemVer::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionFormat {
    /// Append `+{metadata}` when metadata is present (`M`).
    pub include_metadata: bool,
    /// Use single letter pre-release names (`S`).
    pub short_names: bool,
}

impl Default for VersionFormat {
    fn default() -> Self {
        Self {
            include_metadata: true,
            short_names: false,
        }
    }
}

impl VersionFormat {
    /// Parse any combination of `M` and `S`, at most two characters.
    /// `None` means `M`.
    pub fn parse(spec: Option<&str>) -> Result<Self> {
        let spec = spec.unwrap_or("M");
        if spec.chars().count() > 2 || spec.chars().any(|c| c != 'M' && c != 'S') {
            return Err(CSemVerError::InvalidFormat {
                spec: spec.to_string(),
            });
        }
        Ok(Self {
            include_metadata: spec.contains('M'),
            short_names: spec.contains('S'),
        })
    }
}

/// A Constrained Semantic Version value.
///
/// Equality, hashing and ordering follow the file version: two values are
/// equal when their ordered version and CI status match. Build metadata and
/// the CI index/name strings never affect comparison.
#[derive(Debug, Clone)]
pub struct CSemVer {
    major: u32,
    minor: u32,
    patch: u32,
    prerelease: Option<PrereleaseVersion>,
    ci_build: Option<CiBuildInfo>,
    is_ci_build: bool,
    build_metadata: String,
}

impl CSemVer {
    /// Create a fully specified version.
    ///
    /// Ranges: major `[0-99999]`, minor `[0-49999]`, patch `[0-9999]`,
    /// build metadata empty or at most 20 characters of `[0-9A-Za-z.-]`.
    pub fn new(
        major: u32,
        minor: u32,
        patch: u32,
        prerelease: Option<PrereleaseVersion>,
        ci_build: Option<CiBuildInfo>,
        build_metadata: impl Into<String>,
    ) -> Result<Self> {
        let is_ci_build = ci_build.is_some();
        let mut version = Self::with_ci_flag(
            major,
            minor,
            patch,
            prerelease,
            is_ci_build,
            build_metadata.into(),
        )?;
        version.ci_build = ci_build;
        Ok(version)
    }

    /// Create a plain release version with no metadata.
    pub fn release(major: u32, minor: u32, patch: u32) -> Result<Self> {
        Self::new(major, minor, patch, None, None, String::new())
    }

    fn with_ci_flag(
        major: u32,
        minor: u32,
        patch: u32,
        prerelease: Option<PrereleaseVersion>,
        is_ci_build: bool,
        build_metadata: String,
    ) -> Result<Self> {
        check_range("major", major, 0, MAX_MAJOR)?;
        check_range("minor", minor, 0, MAX_MINOR)?;
        check_range("patch", patch, 0, MAX_PATCH)?;
        check_metadata(&build_metadata)?;
        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
            ci_build: None,
            is_ci_build,
            build_metadata,
        })
    }

    /// Decode a file version (as a `u64` or a [`FileVersionQuad`]).
    ///
    /// The low bit restores [`CSemVer::is_ci_build`]; the CI index and name
    /// cannot be recovered.
    pub fn from_file_version(
        file_version: impl Into<u64>,
        build_metadata: Option<&str>,
    ) -> Result<Self> {
        let file_version = file_version.into();
        let is_ci_build = file_version & 1 == 1;
        Self::from_ordered_version(file_version >> 1, is_ci_build, build_metadata)
    }

    /// Decode an ordered version value.
    pub fn from_ordered_version(
        ordered_version: u64,
        is_ci_build: bool,
        build_metadata: Option<&str>,
    ) -> Result<Self> {
        let mut accumulator = ordered_version;
        let mut pre_rel_part = accumulator % MUL_PATCH;
        let prerelease = if pre_rel_part != 0 {
            pre_rel_part -= 1;
            let index = pre_rel_part / MUL_NAME;
            pre_rel_part %= MUL_NAME;
            let number = pre_rel_part / MUL_NUM;
            let fix = pre_rel_part % MUL_NUM;
            // index < 8 and number, fix < 100 by construction of the moduli.
            Some(PrereleaseVersion::new(index as u8, number as u8, fix as u8)?)
        } else {
            accumulator = accumulator
                .checked_sub(MUL_PATCH)
                .ok_or(CSemVerError::OutOfRange {
                    field: "ordered version",
                    value: ordered_version,
                    min: 1,
                    max: u64::MAX,
                })?;
            None
        };

        let major = check_u32_range("major", accumulator / MUL_MAJOR, MAX_MAJOR)?;
        accumulator %= MUL_MAJOR;
        let minor = check_u32_range("minor", accumulator / MUL_MINOR, MAX_MINOR)?;
        accumulator %= MUL_MINOR;
        let patch = check_u32_range("patch", accumulator / MUL_PATCH, MAX_PATCH)?;

        Self::with_ci_flag(
            major,
            minor,
            patch,
            prerelease,
            is_ci_build,
            build_metadata.unwrap_or_default().to_string(),
        )
    }

    /// Compose a CI build version from a repository's base version, using a
    /// build index derived from `timestamp`.
    pub fn from_base_version<Tz: TimeZone>(
        base: &BaseVersion,
        timestamp: &DateTime<Tz>,
        ci_build_name: &str,
        build_metadata: &str,
    ) -> Result<Self> {
        let ci_build = CiBuildInfo::new(build_index(timestamp)?, ci_build_name)?;
        Self::new(
            base.build_major,
            base.build_minor,
            base.build_patch,
            base.prerelease()?,
            Some(ci_build),
            build_metadata,
        )
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn prerelease(&self) -> Option<&PrereleaseVersion> {
        self.prerelease.as_ref()
    }

    pub fn ci_build(&self) -> Option<&CiBuildInfo> {
        self.ci_build.as_ref()
    }

    pub fn build_metadata(&self) -> &str {
        &self.build_metadata
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// True for CI builds, including values decoded from a file version
    /// whose CI index and name were lost.
    pub fn is_ci_build(&self) -> bool {
        self.is_ci_build
    }

    /// Ordered version number; independent of CI status.
    pub fn ordered_version(&self) -> u64 {
        let mut ordered = u64::from(self.major) * MUL_MAJOR
            + u64::from(self.minor) * MUL_MINOR
            + (u64::from(self.patch) + 1) * MUL_PATCH;

        if let Some(pre) = &self.prerelease {
            ordered -= MUL_PATCH - 1;
            ordered += u64::from(pre.index()) * MUL_NAME;
            ordered += u64::from(pre.number()) * MUL_NUM;
            ordered += u64::from(pre.fix());
        }
        ordered
    }

    /// Ordered version shifted left one bit, CI status in the low bit.
    pub fn file_version_u64(&self) -> u64 {
        self.ordered_version() << 1 | u64::from(self.is_ci_build)
    }

    pub fn file_version(&self) -> FileVersionQuad {
        FileVersionQuad::from_u64(self.file_version_u64())
    }

    pub fn render(&self, format: VersionFormat) -> String {
        let mut out = format!("v{}.{}.{}", self.major, self.minor, self.patch);

        if let Some(pre) = &self.prerelease {
            out.push_str(&pre.render(PrereleaseFormat {
                short_name: format.short_names,
                zero_fill: self.ci_build.is_some(),
            }));
        }

        if let Some(ci) = &self.ci_build {
            out.push_str(&ci.render(if self.is_prerelease() {
                CiFormat::Prerelease
            } else {
                CiFormat::Release
            }));
        }

        if format.include_metadata && !self.build_metadata.is_empty() {
            out.push('+');
            out.push_str(&self.build_metadata);
        }
        out
    }

    /// Render with a format specifier: any combination of `M` (metadata) and
    /// `S` (short names). `None` means `M`.
    pub fn to_string_with(&self, spec: Option<&str>) -> Result<String> {
        Ok(self.render(VersionFormat::parse(spec)?))
    }
}

impl PartialEq for CSemVer {
    fn eq(&self, other: &Self) -> bool {
        self.file_version_u64() == other.file_version_u64()
    }
}

impl Eq for CSemVer {}

impl Hash for CSemVer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.file_version_u64().hash(state);
    }
}

impl Ord for CSemVer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.file_version_u64().cmp(&other.file_version_u64())
    }
}

impl PartialOrd for CSemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CSemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(VersionFormat::default()))
    }
}

const VERSION_PATTERN: &str = r"^v?(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(?:-(?P<pre>[A-Za-z]+)(?:\.(?P<number>\d+)(?:\.(?P<fix>\d+))?)?)?(?:(?P<ci_sep>\.|--)ci\.(?P<ci_index>[0-9A-Za-z-]+)\.(?P<ci_name>[0-9A-Za-z-]+))?(?:\+(?P<meta>.+))?$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("CSemVer pattern is valid"))
}

fn numeric(caps: &Captures<'_>, group: &str, field: &'static str, max: u32) -> Result<u32> {
    match caps.name(group) {
        None => Ok(0),
        Some(m) => {
            let value: u64 = m.as_str().parse().map_err(|_| {
                CSemVerError::InvalidVersionString(format!("{field} '{}' is too large", m.as_str()))
            })?;
            check_u32_range(field, value, max)
        }
    }
}

impl FromStr for CSemVer {
    type Err = CSemVerError;

    /// Parse the canonical form produced by [`CSemVer::render`], accepting
    /// full or short pre-release names and an optional leading `v`.
    fn from_str(s: &str) -> Result<Self> {
        let caps = version_regex()
            .captures(s.trim())
            .ok_or_else(|| CSemVerError::InvalidVersionString(format!("'{s}' is malformed")))?;

        let major = numeric(&caps, "major", "major", MAX_MAJOR)?;
        let minor = numeric(&caps, "minor", "minor", MAX_MINOR)?;
        let patch = numeric(&caps, "patch", "patch", MAX_PATCH)?;

        let max_pre = u32::from(MAX_PRERELEASE_NUMBER);
        let prerelease = match caps.name("pre") {
            None => None,
            Some(m) => {
                let name = match PrereleaseName::from_short_name(m.as_str()) {
                    Some(name) => name,
                    None => m.as_str().parse()?,
                };
                let number = numeric(&caps, "number", "pre-release number", max_pre)?;
                let fix = numeric(&caps, "fix", "pre-release fix", max_pre)?;
                // Both were checked against 99 above.
                Some(PrereleaseVersion::with_name(name, number as u8, fix as u8)?)
            }
        };

        let ci_build = match (caps.name("ci_index"), caps.name("ci_name")) {
            (Some(index), Some(name)) => {
                let expected = if prerelease.is_some() { "." } else { "--" };
                let sep = caps.name("ci_sep").map(|m| m.as_str()).unwrap_or_default();
                if sep != expected {
                    return Err(CSemVerError::InvalidVersionString(format!(
                        "'{s}' uses '{sep}ci.' where '{expected}ci.' is required"
                    )));
                }
                Some(CiBuildInfo::new(index.as_str(), name.as_str())?)
            }
            _ => None,
        };

        let meta = caps.name("meta").map(|m| m.as_str()).unwrap_or_default();
        Self::new(major, minor, patch, prerelease, ci_build, meta)
    }
}

impl Serialize for CSemVer {
    /// Serializes the canonical string. A CI build without CI info (one
    /// decoded from a file version) has no string form and is refused.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.is_ci_build && self.ci_build.is_none() {
            return Err(serde::ser::Error::custom(format!(
                "{self} is a CI build without CI build info and has no canonical string"
            )));
        }
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CSemVer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
