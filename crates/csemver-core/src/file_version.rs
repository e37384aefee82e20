//! Four 16-bit "file version" fields packed into a `u64`.
//!
//! The packing is by value, not by memory layout, so it does not depend on
//! the host byte order:
//!
//! ```text
//! bits 48-63: major
//! bits 32-47: minor
//! bits 16-31: build
//! bits  0-15: revision
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CSemVerError;

/// A `major.minor.build.revision` quad of 16-bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FileVersionQuad {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl FileVersionQuad {
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Split a `u64` into its four 16-bit fields.
    pub const fn from_u64(value: u64) -> Self {
        Self {
            major: (value >> 48) as u16,
            minor: (value >> 32) as u16,
            build: (value >> 16) as u16,
            revision: value as u16,
        }
    }

    pub const fn to_u64(self) -> u64 {
        (self.major as u64) << 48
            | (self.minor as u64) << 32
            | (self.build as u64) << 16
            | self.revision as u64
    }

    /// Low bit of the revision field; set for CI builds when derived from a CSemVer.
    pub const fn is_ci_build(self) -> bool {
        self.revision & 1 == 1
    }
}

impl From<u64> for FileVersionQuad {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<FileVersionQuad> for u64 {
    fn from(quad: FileVersionQuad) -> Self {
        quad.to_u64()
    }
}

impl Ord for FileVersionQuad {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_u64().cmp(&other.to_u64())
    }
}

impl PartialOrd for FileVersionQuad {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FileVersionQuad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for FileVersionQuad {
    type Err = CSemVerError;

    /// Parse the dotted `major.minor.build.revision` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CSemVerError::InvalidVersionString(format!("'{s}' is not a file version quad"));
        let mut parts = [0u16; 4];
        let mut fields = s.trim().split('.');
        for part in parts.iter_mut() {
            *part = fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(invalid)?;
        }
        if fields.next().is_some() {
            return Err(invalid());
        }
        let [major, minor, build, revision] = parts;
        Ok(Self::new(major, minor, build, revision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let x = FileVersionQuad::new(0x1234, 0x5678, 0x9ABC, 0xDEF0);
        assert_eq!(x.major, 0x1234);
        assert_eq!(x.minor, 0x5678);
        assert_eq!(x.build, 0x9ABC);
        assert_eq!(x.revision, 0xDEF0);
    }

    #[test]
    fn test_to_u64_major_is_most_significant() {
        let x = FileVersionQuad::new(0x1234, 0x5678, 0x9ABC, 0xDEF0);
        assert_eq!(x.to_u64(), 0x1234_5678_9ABC_DEF0);
        assert_eq!(u64::from(x), 0x1234_5678_9ABC_DEF0);
    }

    #[test]
    fn test_from_u64() {
        let x = FileVersionQuad::from(0x1234_5678_9ABC_DEF0u64);
        assert_eq!(x, FileVersionQuad::new(0x1234, 0x5678, 0x9ABC, 0xDEF0));
        assert_eq!(FileVersionQuad::from_u64(u64::MAX).to_u64(), u64::MAX);
        assert_eq!(FileVersionQuad::from_u64(0), FileVersionQuad::default());
    }

    #[test]
    fn test_ordering_is_numeric() {
        let valm1 = FileVersionQuad::new(0x1234, 0x5678, 0x9ABC, 0xDEEF);
        let val = FileVersionQuad::new(0x1234, 0x5678, 0x9ABC, 0xDEF0);
        let valp1 = FileVersionQuad::new(0x1234, 0x5678, 0x9ABC, 0xDEF1);

        assert_eq!(valm1.cmp(&val), Ordering::Less);
        assert_eq!(valm1.cmp(&valp1), Ordering::Less);
        assert_eq!(val.cmp(&valm1), Ordering::Greater);
        assert_eq!(valp1.cmp(&val), Ordering::Greater);
        assert_eq!(val.cmp(&val), Ordering::Equal);

        // A higher minor wins regardless of lower fields.
        assert!(FileVersionQuad::new(1, 2, 0, 0) > FileVersionQuad::new(1, 1, 0xFFFF, 0xFFFF));
    }

    #[test]
    fn test_ci_bit() {
        assert!(FileVersionQuad::from_u64(3).is_ci_build());
        assert!(!FileVersionQuad::from_u64(2).is_ci_build());
    }

    #[test]
    fn test_display_and_parse() {
        let x = FileVersionQuad::new(1, 2, 3, 4);
        assert_eq!(x.to_string(), "1.2.3.4");
        assert_eq!("1.2.3.4".parse::<FileVersionQuad>(), Ok(x));
        assert!("1.2.3".parse::<FileVersionQuad>().is_err());
        assert!("1.2.3.4.5".parse::<FileVersionQuad>().is_err());
        assert!("1.2.3.65536".parse::<FileVersionQuad>().is_err());
    }
}
