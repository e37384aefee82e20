//! Error taxonomy for CSemVer construction, decoding and formatting.

/// Errors produced while building, decoding, parsing or formatting a version.
///
/// Every variant is a synchronous input-validation failure; callers must
/// supply corrected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CSemVerError {
    #[error("{field} value {value} is out of range [{min}-{max}]")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    #[error("build metadata length of {len} exceeds limit {max}")]
    MetadataTooLong { len: usize, max: usize },

    #[error("build metadata '{0}' does not match [0-9A-Za-z.-]*")]
    InvalidMetadata(String),

    #[error("invalid pre-release name: '{0}'")]
    InvalidPrereleaseName(String),

    #[error("CI {field} '{value}' does not match [0-9A-Za-z-]+")]
    InvalidCiIdentifier { field: &'static str, value: String },

    #[error("CI build {missing} must be provided when the other CI value is")]
    InconsistentCiPair { missing: &'static str },

    #[error("timestamp {0} is outside the build index range (2000-01-01 + 65535 days)")]
    TimestampOutOfRange(String),

    #[error("invalid format specifier: '{spec}'")]
    InvalidFormat { spec: String },

    #[error("invalid CSemVer string: {0}")]
    InvalidVersionString(String),
}

/// Result type for CSemVer operations.
pub type Result<T> = std::result::Result<T, CSemVerError>;
