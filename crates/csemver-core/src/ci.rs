//! Continuous Integration (CI) marker for a CSemVer-CI value.
//!
//! CI info takes no part in ordering. It is only displayed, and contributes
//! the low "is CI build" bit of a file version.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CSemVerError, Result};
use crate::validate::check_ci_identifier;

/// Where the CI suffix is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CiFormat {
    /// After a pre-release: `.ci.{index}.{name}` (`P`).
    #[default]
    Prerelease,
    /// Directly after `major.minor.patch`: `--ci.{index}.{name}` (`R`).
    Release,
}

impl CiFormat {
    /// Parse `P` or `R`. `None` means `P`.
    pub fn parse(spec: Option<&str>) -> Result<Self> {
        match spec.unwrap_or("P") {
            "P" => Ok(CiFormat::Prerelease),
            "R" => Ok(CiFormat::Release),
            other => Err(CSemVerError::InvalidFormat {
                spec: other.to_string(),
            }),
        }
    }
}

/// A validated CI build index/name pair.
///
/// Both values are restricted to ASCII alphanumerics plus `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCiBuildInfo")]
pub struct CiBuildInfo {
    build_index: String,
    build_name: String,
}

#[derive(Deserialize)]
struct RawCiBuildInfo {
    build_index: String,
    build_name: String,
}

impl TryFrom<RawCiBuildInfo> for CiBuildInfo {
    type Error = CSemVerError;

    fn try_from(raw: RawCiBuildInfo) -> Result<Self> {
        Self::new(raw.build_index, raw.build_name)
    }
}

impl CiBuildInfo {
    pub fn new(build_index: impl Into<String>, build_name: impl Into<String>) -> Result<Self> {
        let build_index = build_index.into();
        let build_name = build_name.into();
        check_ci_identifier("build index", &build_index)?;
        check_ci_identifier("build name", &build_name)?;
        Ok(Self {
            build_index,
            build_name,
        })
    }

    /// Build from optional inputs, where blank counts as absent.
    ///
    /// Both absent yields `Ok(None)`; exactly one present is
    /// [`CSemVerError::InconsistentCiPair`].
    pub fn from_pair(build_index: Option<&str>, build_name: Option<&str>) -> Result<Option<Self>> {
        let index = build_index.map(str::trim).filter(|s| !s.is_empty());
        let name = build_name.map(str::trim).filter(|s| !s.is_empty());
        match (index, name) {
            (None, None) => Ok(None),
            (Some(index), Some(name)) => Self::new(index, name).map(Some),
            (Some(_), None) => Err(CSemVerError::InconsistentCiPair { missing: "name" }),
            (None, Some(_)) => Err(CSemVerError::InconsistentCiPair { missing: "index" }),
        }
    }

    pub fn build_index(&self) -> &str {
        &self.build_index
    }

    pub fn build_name(&self) -> &str {
        &self.build_name
    }

    pub fn render(&self, format: CiFormat) -> String {
        let lead = match format {
            CiFormat::Prerelease => ".",
            CiFormat::Release => "--",
        };
        format!("{lead}ci.{}.{}", self.build_index, self.build_name)
    }

    /// Render using a format specifier string (see [`CiFormat::parse`]).
    pub fn to_string_with(&self, spec: Option<&str>) -> Result<String> {
        Ok(self.render(CiFormat::parse(spec)?))
    }
}

impl fmt::Display for CiBuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(CiFormat::Prerelease))
    }
}
