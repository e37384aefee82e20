//! Constrained Semantic Versioning (CSemVer).
//!
//! CSemVer is a strict subset of Semantic Versioning in which every version
//! maps to a unique 63-bit "ordered version" number. Shifting that number left
//! one bit and storing the CI-build flag in the low bit gives a 64-bit "file
//! version", which splits into four 16-bit fields for platform version
//! resources.
//!
//! Everything here is a pure value type: no I/O, no clock, no logging.

pub mod base_version;
pub mod build_index;
pub mod ci;
pub mod csemver;
pub mod error;
pub mod file_version;
pub mod prerelease;
mod validate;

pub use base_version::BaseVersion;
pub use build_index::{build_index, build_index_hex, build_index_value};
pub use ci::{CiBuildInfo, CiFormat};
pub use csemver::{CSemVer, VersionFormat, MAX_MAJOR, MAX_MINOR, MAX_PATCH};
pub use error::{CSemVerError, Result};
pub use file_version::FileVersionQuad;
pub use prerelease::{PrereleaseFormat, PrereleaseName, PrereleaseVersion, MAX_PRERELEASE_NUMBER};
pub use validate::MAX_BUILD_METADATA_LEN;

/// Library version, from Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
