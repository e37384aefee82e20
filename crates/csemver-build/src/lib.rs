//! Build-time tasks for Constrained Semantic Versioning.
//!
//! Turns a repository's `BuildVersionData` descriptor, a build timestamp and
//! optional CI values into canonical CSemVer strings and file-version fields.
//!
//! # Modules
//!
//! - [`build_version_xml`]: reads `BuildVersionData` XML descriptors
//! - [`tasks`]: version info, build index and descriptor tasks
//! - [`telemetry`]: tracing subscriber setup

pub mod build_version_xml;
pub mod error;
pub mod tasks;
pub mod telemetry;

pub use error::{BuildError, Result};
pub use tasks::{
    create_version_info, get_build_index_from_time, parse_build_version_xml, version_from_inputs,
    BuildVersionProperties, CreateVersionInfo, VersionInfo,
};
pub use telemetry::init_tracing;
