//! Shared argument checks used by the value constructors.

use crate::error::{CSemVerError, Result};

/// Maximum number of characters allowed in build metadata.
pub const MAX_BUILD_METADATA_LEN: usize = 20;

/// Reject `value` unless it lies within `[min, max]`.
pub(crate) fn check_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T>
where
    T: Copy + PartialOrd + Into<u64>,
{
    if value < min || value > max {
        return Err(CSemVerError::OutOfRange {
            field,
            value: value.into(),
            min: min.into(),
            max: max.into(),
        });
    }
    Ok(value)
}

/// Narrow a `u64` into a `u32` lying within `[0, max]`.
pub(crate) fn check_u32_range(field: &'static str, value: u64, max: u32) -> Result<u32> {
    match u32::try_from(value) {
        Ok(v) if v <= max => Ok(v),
        _ => Err(CSemVerError::OutOfRange {
            field,
            value,
            min: 0,
            max: max.into(),
        }),
    }
}

/// True when `s` is non-empty and only holds ASCII alphanumerics or `-`.
pub(crate) fn is_ci_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

pub(crate) fn check_ci_identifier(field: &'static str, value: &str) -> Result<()> {
    if is_ci_identifier(value) {
        Ok(())
    } else {
        Err(CSemVerError::InvalidCiIdentifier {
            field,
            value: value.to_string(),
        })
    }
}

/// True when every character of `s` is an ASCII alphanumeric, `.` or `-`.
pub(crate) fn is_metadata(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-')
}

/// Build metadata: empty, or at most 20 characters of `[0-9A-Za-z.-]`.
pub(crate) fn check_metadata(meta: &str) -> Result<()> {
    let len = meta.chars().count();
    if len > MAX_BUILD_METADATA_LEN {
        return Err(CSemVerError::MetadataTooLong {
            len,
            max: MAX_BUILD_METADATA_LEN,
        });
    }
    if !is_metadata(meta) {
        return Err(CSemVerError::InvalidMetadata(meta.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_bounds_inclusive() {
        assert_eq!(check_range("patch", 0u32, 0, 9999), Ok(0));
        assert_eq!(check_range("patch", 9999u32, 0, 9999), Ok(9999));
        assert!(matches!(
            check_range("patch", 10000u32, 0, 9999),
            Err(CSemVerError::OutOfRange { field: "patch", value: 10000, .. })
        ));
    }

    #[test]
    fn test_check_u32_range_rejects_wide_values() {
        assert_eq!(check_u32_range("major", 99999, 99999), Ok(99999));
        assert!(check_u32_range("major", 100000, 99999).is_err());
        assert!(check_u32_range("major", u64::MAX, 99999).is_err());
    }

    #[test]
    fn test_ci_identifier_charset() {
        assert!(is_ci_identifier("abc-123-XYZ"));
        assert!(is_ci_identifier("-"));
        assert!(!is_ci_identifier(""));
        assert!(!is_ci_identifier("na~me"));
        assert!(!is_ci_identifier("a.b"));
        assert!(!is_ci_identifier("a b"));
        assert!(!is_ci_identifier("ümlaut"));
    }

    #[test]
    fn test_metadata_length_limit() {
        assert!(check_metadata("").is_ok());
        assert!(check_metadata("01234567890123456789").is_ok());
        assert_eq!(
            check_metadata("012345678901234567890"),
            Err(CSemVerError::MetadataTooLong { len: 21, max: 20 })
        );
    }

    #[test]
    fn test_metadata_charset() {
        assert!(check_metadata("sha.1a2b-dirty").is_ok());
        for bad in [" ", "   ", " a ", "a ", " a", "a+b", "a_b", "ümlaut", "a\tb"] {
            assert_eq!(
                check_metadata(bad),
                Err(CSemVerError::InvalidMetadata(bad.to_string())),
                "{bad:?}"
            );
        }
    }
}
