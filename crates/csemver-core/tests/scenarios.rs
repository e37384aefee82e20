use chrono::{TimeZone, Utc};
use csemver_core::{
    build_index, CSemVer, CSemVerError, CiBuildInfo, FileVersionQuad, PrereleaseVersion,
};

fn pre(index: u8, number: u8, fix: u8) -> Option<PrereleaseVersion> {
    Some(PrereleaseVersion::new(index, number, fix).expect("valid pre-release"))
}

// ── Literal encodings ───────────────────────────────────────────────────

#[test]
fn first_alpha_encodes_to_one() {
    let v = CSemVer::new(0, 0, 0, pre(0, 0, 0), None, "").expect("valid");
    assert_eq!(v.ordered_version(), 1);
    assert_eq!(v.file_version_u64(), 2);
    assert_eq!(v.file_version(), FileVersionQuad::new(0, 0, 0, 2));
}

#[test]
fn release_sits_between_its_prereleases_and_next_patch() {
    let beta = CSemVer::new(20, 1, 4, pre(1, 0, 0), None, "").expect("valid");
    let release = CSemVer::release(20, 1, 4).expect("valid");
    let next_alpha = CSemVer::new(20, 1, 5, pre(0, 0, 0), None, "").expect("valid");

    assert_eq!(beta.ordered_version(), 800_010_800_340_005);
    assert_eq!(release.ordered_version(), 800_010_800_410_005);
    assert_eq!(next_alpha.ordered_version(), 800_010_800_410_006);
    assert!(beta < release && release < next_alpha);
}

#[test]
fn largest_version_decodes() {
    let max = CSemVer::new(99_999, 49_999, 9_999, None, None, "").expect("valid");
    let back = CSemVer::from_ordered_version(max.ordered_version(), false, None).expect("decodes");
    assert_eq!(back.to_string(), "v99999.49999.9999");
}

// ── Decoding ────────────────────────────────────────────────────────────

#[test]
fn decoding_zero_is_rejected() {
    assert!(matches!(
        CSemVer::from_file_version(0u64, None),
        Err(CSemVerError::OutOfRange { .. })
    ));
    assert!(CSemVer::from_file_version(1u64, None).is_err());
}

#[test]
fn decoding_loses_ci_strings_but_keeps_flag() {
    let ci = CiBuildInfo::new("24367896", "local").expect("valid");
    let v = CSemVer::new(1, 2, 3, pre(7, 0, 0), Some(ci), "").expect("valid");
    let back = CSemVer::from_file_version(v.file_version(), Some("meta")).expect("decodes");
    assert!(back.is_ci_build());
    assert!(back.ci_build().is_none());
    assert_eq!(back, v);
    assert_eq!(back.to_string(), "v1.2.3-rc+meta");
}

// ── Strings ─────────────────────────────────────────────────────────────

#[test]
fn ci_release_uses_double_dash() {
    let ci = CiBuildInfo::new("ABCD", "pr-17").expect("valid");
    let v = CSemVer::new(3, 0, 0, None, Some(ci), "").expect("valid");
    assert_eq!(v.to_string(), "v3.0.0--ci.ABCD.pr-17");
    assert_eq!(v.to_string().parse::<CSemVer>().expect("parses"), v);
}

#[test]
fn short_names_parse_case_insensitively() {
    let v: CSemVer = "v2.0.0-K.3".parse().expect("parses");
    assert_eq!(v.prerelease().map(|p| p.name()), Some("kappa"));
    let v: CSemVer = "v2.0.0-Gamma".parse().expect("parses");
    assert_eq!(v.prerelease().map(|p| p.name()), Some("gamma"));
}

#[test]
fn ci_pair_must_be_complete() {
    assert_eq!(CiBuildInfo::from_pair(None, Some("  ")), Ok(None));
    assert!(matches!(
        CiBuildInfo::from_pair(Some("1"), None),
        Err(CSemVerError::InconsistentCiPair { missing: "name" })
    ));
}

// ── Build index ─────────────────────────────────────────────────────────

#[test]
fn build_index_feeds_ci_identifier() {
    let ts = Utc.with_ymd_and_hms(2025, 5, 19, 17, 9, 0).single().expect("valid date");
    let index = build_index(&ts).expect("index");
    let ci = CiBuildInfo::new(index, "ZZZ").expect("decimal index is a valid identifier");
    let v = CSemVer::new(20, 1, 4, pre(0, 0, 0), Some(ci), "").expect("valid");
    assert_eq!(v.to_string(), "v20.1.4-alpha.0.0.ci.607549590.ZZZ");
}
