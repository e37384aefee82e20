//! Build task entry points.
//!
//! Each task takes loosely typed inputs, the way a build system hands them
//! over, validates them, and returns plain outputs ready to be written into
//! build properties or version resources.

use std::path::Path;

use chrono::{DateTime, TimeZone};
use csemver_core::{build_index, BaseVersion, CSemVer, CiBuildInfo};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::build_version_xml;
use crate::error::{BuildError, Result};

/// Inputs for [`create_version_info`].
///
/// Major, minor and patch are required. Blank optional values are treated as
/// absent; blank pre-release number or fix means `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVersionInfo {
    pub build_major: String,
    pub build_minor: String,
    pub build_patch: String,
    #[serde(rename = "PreReleaseName")]
    pub prerelease_name: Option<String>,
    #[serde(rename = "PreReleaseNumber")]
    pub prerelease_number: Option<String>,
    #[serde(rename = "PreReleaseFix")]
    pub prerelease_fix: Option<String>,
    pub ci_build_name: Option<String>,
    pub ci_build_index: Option<String>,
    pub build_meta: Option<String>,
}

/// Outputs of [`create_version_info`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionInfo {
    /// Full canonical form, with metadata.
    #[serde(rename = "CSemVer")]
    pub csemver: String,
    /// Short-name form, with metadata.
    #[serde(rename = "ShortCSemVer")]
    pub short_csemver: String,
    pub file_version_major: u16,
    pub file_version_minor: u16,
    pub file_version_build: u16,
    pub file_version_revision: u16,
}

impl VersionInfo {
    pub fn from_version(version: &CSemVer) -> Self {
        let file_version = version.file_version();
        Self {
            csemver: version.to_string(),
            short_csemver: version.render(csemver_core::VersionFormat {
                include_metadata: true,
                short_names: true,
            }),
            file_version_major: file_version.major,
            file_version_minor: file_version.minor,
            file_version_build: file_version.build,
            file_version_revision: file_version.revision,
        }
    }
}

/// The six descriptor values of a `BuildVersionData` file, as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuildVersionProperties {
    pub build_major: String,
    pub build_minor: String,
    pub build_patch: String,
    #[serde(rename = "PreReleaseName")]
    pub prerelease_name: String,
    #[serde(rename = "PreReleaseNumber")]
    pub prerelease_number: String,
    #[serde(rename = "PreReleaseFix")]
    pub prerelease_fix: String,
}

impl From<&BaseVersion> for BuildVersionProperties {
    fn from(base: &BaseVersion) -> Self {
        Self {
            build_major: base.build_major.to_string(),
            build_minor: base.build_minor.to_string(),
            build_patch: base.build_patch.to_string(),
            prerelease_name: base.prerelease_name.clone(),
            prerelease_number: base.prerelease_number.to_string(),
            prerelease_fix: base.prerelease_fix.to_string(),
        }
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn required_number(name: &'static str, value: &str) -> Result<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BuildError::MissingInput(name));
    }
    parse_number(name, value)
}

fn optional_number(name: &'static str, value: Option<&String>) -> Result<u32> {
    non_blank(value).map_or(Ok(0), |v| parse_number(name, v))
}

fn parse_number(name: &'static str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| BuildError::InvalidNumber {
        attribute: name.to_string(),
        value: value.to_string(),
    })
}

/// Build a [`CSemVer`] from task inputs.
pub fn version_from_inputs(input: &CreateVersionInfo) -> Result<CSemVer> {
    let base = BaseVersion {
        build_major: required_number("BuildMajor", &input.build_major)?,
        build_minor: required_number("BuildMinor", &input.build_minor)?,
        build_patch: required_number("BuildPatch", &input.build_patch)?,
        prerelease_name: non_blank(input.prerelease_name.as_ref())
            .unwrap_or_default()
            .to_string(),
        prerelease_number: optional_number("PreReleaseNumber", input.prerelease_number.as_ref())?,
        prerelease_fix: optional_number("PreReleaseFix", input.prerelease_fix.as_ref())?,
    }
    .normalized();

    let ci_build = CiBuildInfo::from_pair(
        non_blank(input.ci_build_index.as_ref()),
        non_blank(input.ci_build_name.as_ref()),
    )?;

    let version = CSemVer::new(
        base.build_major,
        base.build_minor,
        base.build_patch,
        base.prerelease()?,
        ci_build,
        non_blank(input.build_meta.as_ref()).unwrap_or_default(),
    )?;
    Ok(version)
}

/// Compute the canonical strings and file version for a build.
pub fn create_version_info(input: &CreateVersionInfo) -> Result<VersionInfo> {
    debug!(?input, "creating version info");
    let version = version_from_inputs(input)?;
    let info = VersionInfo::from_version(&version);
    info!(
        csemver = %info.csemver,
        file_version = %version.file_version(),
        ci_build = version.is_ci_build(),
        "created version info"
    );
    Ok(info)
}

/// Decimal build index for `timestamp`.
pub fn get_build_index_from_time<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Result<String> {
    let index = build_index(timestamp)?;
    debug!(build_index = %index, "computed build index");
    Ok(index)
}

/// Read a `BuildVersionData` file and return its values as strings.
pub fn parse_build_version_xml(path: impl AsRef<Path>) -> Result<BuildVersionProperties> {
    let path = path.as_ref();
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(BuildError::MissingInput("BuildVersionXml"));
    }
    let base = build_version_xml::parse_file(path)?;
    info!(
        path = %path.display(),
        major = base.build_major,
        minor = base.build_minor,
        patch = base.build_patch,
        prerelease = %base.prerelease_name,
        "parsed build version descriptor"
    );
    Ok(BuildVersionProperties::from(&base))
}
