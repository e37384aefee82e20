//! csemver - Constrained Semantic Version tool
//!
//! ## Commands
//!
//! - `create`: Build version strings and file version fields from raw values
//! - `build-index`: Compute the CI build index for a timestamp
//! - `parse-xml`: Print the values of a `BuildVersionData` descriptor
//! - `from-xml`: Build a version from a descriptor, optionally as a CI build
//! - `decode`: Decode a file version or ordered version number
//! - `parse`: Break a CSemVer string into its parts

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use csemver_build::{
    build_version_xml, create_version_info, get_build_index_from_time, parse_build_version_xml,
    CreateVersionInfo, VersionInfo,
};
use csemver_core::{build_index_hex, CSemVer, FileVersionQuad, VersionFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};

#[derive(Parser)]
#[command(name = "csemver")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Constrained Semantic Version (CSemVer) tool", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines and JSON results
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create version info from raw build values
    Create {
        /// Major version [0-99999]
        #[arg(long)]
        major: String,

        /// Minor version [0-49999]
        #[arg(long)]
        minor: String,

        /// Patch version [0-9999]
        #[arg(long)]
        patch: String,

        /// Pre-release name (alpha, beta, delta, epsilon, gamma, kappa, prerelease, rc)
        #[arg(long)]
        pre_release_name: Option<String>,

        /// Pre-release number [0-99]
        #[arg(long)]
        pre_release_number: Option<String>,

        /// Pre-release fix [0-99]
        #[arg(long)]
        pre_release_fix: Option<String>,

        #[command(flatten)]
        ci: CiArgs,

        /// Build metadata (at most 20 characters of [0-9A-Za-z.-])
        #[arg(long, env = "CSEMVER_BUILD_META")]
        build_meta: Option<String>,
    },

    /// Compute the build index for a timestamp (default: now)
    BuildIndex {
        /// RFC 3339 timestamp, e.g. 2025-05-19T17:09:00Z
        #[arg(long)]
        timestamp: Option<String>,

        /// Print as 8 digit hexadecimal
        #[arg(long)]
        hex: bool,
    },

    /// Print the values from a BuildVersionData XML descriptor
    ParseXml {
        /// Path to the descriptor
        #[arg(env = "CSEMVER_BUILD_VERSION_XML")]
        path: PathBuf,
    },

    /// Create version info from a BuildVersionData XML descriptor
    FromXml {
        /// Path to the descriptor
        #[arg(env = "CSEMVER_BUILD_VERSION_XML")]
        path: PathBuf,

        /// CI build name; when set, the build index is derived from --timestamp
        #[arg(long, env = "CSEMVER_CI_BUILD_NAME")]
        ci_build_name: Option<String>,

        /// RFC 3339 timestamp for the build index (default: now)
        #[arg(long)]
        timestamp: Option<String>,

        /// Build metadata (at most 20 characters of [0-9A-Za-z.-])
        #[arg(long, env = "CSEMVER_BUILD_META")]
        build_meta: Option<String>,
    },

    /// Decode a file version (u64 or major.minor.build.revision)
    Decode {
        /// Value to decode
        value: String,

        /// Treat the value as an ordered version rather than a file version
        #[arg(long)]
        ordered: bool,

        /// Build metadata to attach to the decoded version
        #[arg(long)]
        build_meta: Option<String>,
    },

    /// Parse a CSemVer string
    Parse {
        /// Version string, e.g. v1.2.3-beta.1
        version: String,
    },
}

#[derive(clap::Args)]
struct CiArgs {
    /// CI build index ([0-9A-Za-z-]+)
    #[arg(long, env = "CSEMVER_CI_BUILD_INDEX")]
    ci_build_index: Option<String>,

    /// CI build name ([0-9A-Za-z-]+)
    #[arg(long, env = "CSEMVER_CI_BUILD_NAME")]
    ci_build_name: Option<String>,
}

/// Everything a version value exposes, for `decode` and `parse`.
#[derive(Debug, Serialize)]
struct VersionReport {
    csemver: String,
    short_csemver: String,
    major: u32,
    minor: u32,
    patch: u32,
    prerelease: Option<String>,
    ci_build_index: Option<String>,
    ci_build_name: Option<String>,
    is_ci_build: bool,
    build_metadata: String,
    ordered_version: u64,
    file_version: String,
    file_version_u64: u64,
}

impl VersionReport {
    fn new(version: &CSemVer) -> Self {
        Self {
            csemver: version.to_string(),
            short_csemver: version.render(VersionFormat {
                include_metadata: true,
                short_names: true,
            }),
            major: version.major(),
            minor: version.minor(),
            patch: version.patch(),
            prerelease: version.prerelease().map(|p| p.to_string()),
            ci_build_index: version.ci_build().map(|c| c.build_index().to_string()),
            ci_build_name: version.ci_build().map(|c| c.build_name().to_string()),
            is_ci_build: version.is_ci_build(),
            build_metadata: version.build_metadata().to_string(),
            ordered_version: version.ordered_version(),
            file_version: version.file_version().to_string(),
            file_version_u64: version.file_version_u64(),
        }
    }

    fn to_text(&self) -> String {
        let mut lines = vec![
            format!("CSemVer:         {}", self.csemver),
            format!("Short CSemVer:   {}", self.short_csemver),
            format!("Ordered version: {}", self.ordered_version),
            format!(
                "File version:    {} ({})",
                self.file_version, self.file_version_u64
            ),
            format!("CI build:        {}", self.is_ci_build),
        ];
        if let Some(pre) = &self.prerelease {
            lines.push(format!("Pre-release:     {}", pre.trim_start_matches('-')));
        }
        lines.join("\n")
    }
}

fn version_info_text(info: &VersionInfo) -> String {
    format!(
        "CSemVer:       {}\nShort CSemVer: {}\nFile version:  {}.{}.{}.{}",
        info.csemver,
        info.short_csemver,
        info.file_version_major,
        info.file_version_minor,
        info.file_version_build,
        info.file_version_revision
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    csemver_build::init_tracing(cli.json, level);

    match cli.command {
        Commands::Create {
            major,
            minor,
            patch,
            pre_release_name,
            pre_release_number,
            pre_release_fix,
            ci,
            build_meta,
        } => {
            let input = CreateVersionInfo {
                build_major: major,
                build_minor: minor,
                build_patch: patch,
                prerelease_name: pre_release_name,
                prerelease_number: pre_release_number,
                prerelease_fix: pre_release_fix,
                ci_build_name: ci.ci_build_name,
                ci_build_index: ci.ci_build_index,
                build_meta,
            };
            cmd_create(&input, cli.json)
        }
        Commands::BuildIndex { timestamp, hex } => {
            cmd_build_index(timestamp.as_deref(), hex, cli.json)
        }
        Commands::ParseXml { path } => cmd_parse_xml(&path, cli.json),
        Commands::FromXml {
            path,
            ci_build_name,
            timestamp,
            build_meta,
        } => cmd_from_xml(
            &path,
            ci_build_name.as_deref(),
            timestamp.as_deref(),
            build_meta.as_deref(),
            cli.json,
        ),
        Commands::Decode {
            value,
            ordered,
            build_meta,
        } => cmd_decode(&value, ordered, build_meta.as_deref(), cli.json),
        Commands::Parse { version } => cmd_parse(&version, cli.json),
    }
}

/// Print `value` as pretty JSON, or as the given text rendering.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(value).context("Failed to serialize output")?
        );
    } else {
        println!("{}", text(value));
    }
    Ok(())
}

/// Parse an RFC 3339 timestamp, defaulting to the current time.
fn parse_timestamp(timestamp: Option<&str>) -> Result<DateTime<Utc>> {
    match timestamp {
        None => Ok(Utc::now()),
        Some(s) => Ok(DateTime::parse_from_rfc3339(s.trim())
            .with_context(|| format!("Invalid RFC 3339 timestamp: {s}"))?
            .with_timezone(&Utc)),
    }
}

/// Accept a file version as a plain integer or a dotted quad.
fn parse_file_version(value: &str) -> Result<u64> {
    let value = value.trim();
    if value.contains('.') {
        let quad: FileVersionQuad = value
            .parse()
            .with_context(|| format!("Invalid file version quad: {value}"))?;
        Ok(quad.to_u64())
    } else {
        value
            .parse()
            .with_context(|| format!("Invalid file version number: {value}"))
    }
}

fn create(input: &CreateVersionInfo) -> Result<VersionInfo> {
    create_version_info(input).context("Failed to create version info")
}

fn cmd_create(input: &CreateVersionInfo, json: bool) -> Result<()> {
    let info = create(input)?;
    emit(json, &info, version_info_text)
}

fn build_index_for(timestamp: Option<&str>, hex: bool) -> Result<String> {
    let ts = parse_timestamp(timestamp)?;
    debug!(timestamp = %ts.to_rfc3339(), hex, "computing build index");
    if hex {
        Ok(build_index_hex(&ts)?)
    } else {
        Ok(get_build_index_from_time(&ts)?)
    }
}

fn cmd_build_index(timestamp: Option<&str>, hex: bool, json: bool) -> Result<()> {
    let index = build_index_for(timestamp, hex)?;
    emit(json, &index, |i| i.clone())
}

fn cmd_parse_xml(path: &Path, json: bool) -> Result<()> {
    let props = parse_build_version_xml(path)
        .with_context(|| format!("Failed to parse build version descriptor: {:?}", path))?;
    emit(json, &props, |p| {
        format!(
            "BuildMajor:       {}\nBuildMinor:       {}\nBuildPatch:       {}\nPreReleaseName:   {}\nPreReleaseNumber: {}\nPreReleaseFix:    {}",
            p.build_major,
            p.build_minor,
            p.build_patch,
            p.prerelease_name,
            p.prerelease_number,
            p.prerelease_fix
        )
    })
}

fn from_xml(
    path: &Path,
    ci_build_name: Option<&str>,
    timestamp: Option<&str>,
    build_meta: Option<&str>,
) -> Result<VersionInfo> {
    let base = build_version_xml::parse_file(path)
        .with_context(|| format!("Failed to read build version descriptor: {:?}", path))?;
    let build_meta = build_meta.map(str::trim).unwrap_or_default();

    let version = match ci_build_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => {
            let ts = parse_timestamp(timestamp)?;
            info!(ci_build_name = %name, timestamp = %ts.to_rfc3339(), "creating CI build version");
            CSemVer::from_base_version(&base, &ts, name, build_meta)?
        }
        None => CSemVer::new(
            base.build_major,
            base.build_minor,
            base.build_patch,
            base.prerelease()?,
            None,
            build_meta,
        )?,
    };
    Ok(VersionInfo::from_version(&version))
}

fn cmd_from_xml(
    path: &Path,
    ci_build_name: Option<&str>,
    timestamp: Option<&str>,
    build_meta: Option<&str>,
    json: bool,
) -> Result<()> {
    let info = from_xml(path, ci_build_name, timestamp, build_meta)?;
    emit(json, &info, version_info_text)
}

fn decode(value: &str, ordered: bool, build_meta: Option<&str>) -> Result<VersionReport> {
    let version = if ordered {
        let ordered: u64 = value
            .trim()
            .parse()
            .with_context(|| format!("Invalid ordered version: {value}"))?;
        CSemVer::from_ordered_version(ordered, false, build_meta)?
    } else {
        CSemVer::from_file_version(parse_file_version(value)?, build_meta)?
    };
    Ok(VersionReport::new(&version))
}

fn cmd_decode(value: &str, ordered: bool, build_meta: Option<&str>, json: bool) -> Result<()> {
    let report = decode(value, ordered, build_meta)?;
    emit(json, &report, VersionReport::to_text)
}

fn parse(version: &str) -> Result<VersionReport> {
    let version: CSemVer = version
        .parse()
        .with_context(|| format!("Failed to parse version: {version}"))?;
    Ok(VersionReport::new(&version))
}

fn cmd_parse(version: &str, json: bool) -> Result<()> {
    let report = parse(version)?;
    emit(json, &report, VersionReport::to_text)
}
