//! Error taxonomy for build-time version tasks.

use csemver_core::CSemVerError;

/// Errors produced while reading version descriptors or running a task.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Core(#[from] CSemVerError),

    #[error("XML element '{0}' element not found")]
    MissingElement(&'static str),

    #[error("unexpected attribute {0}")]
    UnexpectedAttribute(String),

    #[error("{attribute} value '{value}' is not a valid number")]
    InvalidNumber { attribute: String, value: String },

    #[error("{0} is required, and cannot be empty or all whitespace")]
    MissingInput(&'static str),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for build task operations.
pub type Result<T> = std::result::Result<T, BuildError>;
