//! Pre-release portion of a Constrained Semantic Version.
//!
//! A pre-release is one of eight well-known names (ordered by precedence),
//! a number `[0-99]` and a fix `[0-99]`. "No pre-release" is expressed by the
//! owner as `Option::None`, never by a sentinel value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CSemVerError, Result};
use crate::validate::check_range;

/// Largest pre-release number or fix value.
pub const MAX_PRERELEASE_NUMBER: u8 = 99;

/// The eight pre-release names, in ascending precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrereleaseName {
    Alpha,
    Beta,
    Delta,
    Epsilon,
    Gamma,
    Kappa,
    Prerelease,
    Rc,
}

impl PrereleaseName {
    /// All names, indexed by their precedence.
    pub const ALL: [PrereleaseName; 8] = [
        PrereleaseName::Alpha,
        PrereleaseName::Beta,
        PrereleaseName::Delta,
        PrereleaseName::Epsilon,
        PrereleaseName::Gamma,
        PrereleaseName::Kappa,
        PrereleaseName::Prerelease,
        PrereleaseName::Rc,
    ];

    /// Look up a name by index `[0-7]`.
    pub fn from_index(index: u8) -> Result<Self> {
        check_range("pre-release index", index, 0, 7)?;
        Ok(Self::ALL[usize::from(index)])
    }

    /// Index of this name `[0-7]`.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Canonical (full) name.
    pub fn name(self) -> &'static str {
        match self {
            PrereleaseName::Alpha => "alpha",
            PrereleaseName::Beta => "beta",
            PrereleaseName::Delta => "delta",
            PrereleaseName::Epsilon => "epsilon",
            PrereleaseName::Gamma => "gamma",
            PrereleaseName::Kappa => "kappa",
            PrereleaseName::Prerelease => "prerelease",
            PrereleaseName::Rc => "rc",
        }
    }

    /// Single letter short name.
    pub fn short_name(self) -> &'static str {
        match self {
            PrereleaseName::Alpha => "a",
            PrereleaseName::Beta => "b",
            PrereleaseName::Delta => "d",
            PrereleaseName::Epsilon => "e",
            PrereleaseName::Gamma => "g",
            PrereleaseName::Kappa => "k",
            PrereleaseName::Prerelease => "p",
            PrereleaseName::Rc => "r",
        }
    }

    /// Case-insensitive lookup of a short name.
    pub fn from_short_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.short_name().eq_ignore_ascii_case(s))
    }
}

impl FromStr for PrereleaseName {
    type Err = CSemVerError;

    /// Case-insensitive lookup of a full name.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CSemVerError::InvalidPrereleaseName(s.to_string()))
    }
}

impl fmt::Display for PrereleaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rendering options for a [`PrereleaseVersion`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrereleaseFormat {
    /// Use the single letter name (`S`).
    pub short_name: bool,
    /// Always emit `.number.fix`, even when zero (`Z`).
    pub zero_fill: bool,
}

impl PrereleaseFormat {
    /// Parse a format specifier: `F`, `S`, `Z`, `SZ` or `ZS`. `None` means `F`.
    pub fn parse(spec: Option<&str>) -> Result<Self> {
        let (short_name, zero_fill) = match spec.unwrap_or("F") {
            "F" => (false, false),
            "S" => (true, false),
            "Z" => (false, true),
            "SZ" | "ZS" => (true, true),
            other => {
                return Err(CSemVerError::InvalidFormat {
                    spec: other.to_string(),
                })
            }
        };
        Ok(Self {
            short_name,
            zero_fill,
        })
    }
}

/// A validated pre-release qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPrerelease")]
pub struct PrereleaseVersion {
    name: PrereleaseName,
    number: u8,
    fix: u8,
}

#[derive(Deserialize)]
struct RawPrerelease {
    name: PrereleaseName,
    number: u8,
    fix: u8,
}

impl TryFrom<RawPrerelease> for PrereleaseVersion {
    type Error = CSemVerError;

    fn try_from(raw: RawPrerelease) -> Result<Self> {
        Self::with_name(raw.name, raw.number, raw.fix)
    }
}

impl PrereleaseVersion {
    /// Create from a name index `[0-7]`, number `[0-99]` and fix `[0-99]`.
    pub fn new(index: u8, number: u8, fix: u8) -> Result<Self> {
        let name = PrereleaseName::from_index(index)?;
        Self::with_name(name, number, fix)
    }

    /// Create from a well-known name, compared case-insensitively.
    pub fn from_name(name: &str, number: u8, fix: u8) -> Result<Self> {
        let name: PrereleaseName = name.trim().parse()?;
        Self::with_name(name, number, fix)
    }

    pub fn with_name(name: PrereleaseName, number: u8, fix: u8) -> Result<Self> {
        check_range("pre-release number", number, 0, MAX_PRERELEASE_NUMBER)?;
        check_range("pre-release fix", fix, 0, MAX_PRERELEASE_NUMBER)?;
        Ok(Self { name, number, fix })
    }

    pub fn kind(&self) -> PrereleaseName {
        self.name
    }

    pub fn index(&self) -> u8 {
        self.name.index()
    }

    pub fn name(&self) -> &'static str {
        self.name.name()
    }

    pub fn short_name(&self) -> &'static str {
        self.name.short_name()
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn fix(&self) -> u8 {
        self.fix
    }

    /// Render with explicit options, including the leading `-`.
    pub fn render(&self, format: PrereleaseFormat) -> String {
        let mut out = String::with_capacity(16);
        out.push('-');
        out.push_str(if format.short_name {
            self.short_name()
        } else {
            self.name()
        });

        if self.number > 0 || self.fix > 0 || format.zero_fill {
            out.push('.');
            out.push_str(&self.number.to_string());
            if self.fix > 0 || format.zero_fill {
                out.push('.');
                out.push_str(&self.fix.to_string());
            }
        }
        out
    }

    /// Render using a format specifier string (see [`PrereleaseFormat::parse`]).
    pub fn to_string_with(&self, spec: Option<&str>) -> Result<String> {
        Ok(self.render(PrereleaseFormat::parse(spec)?))
    }
}

impl fmt::Display for PrereleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(PrereleaseFormat::default()))
    }
}
