//! Reader for `BuildVersionData` XML descriptors.
//!
//! A descriptor is a single root element with up to six optional attributes:
//!
//! ```xml
//! <BuildVersionData
//!     BuildMajor="1" BuildMinor="2" BuildPatch="3"
//!     PreReleaseName="beta" PreReleaseNumber="4" PreReleaseFix="5" />
//! ```
//!
//! Missing attributes default to `0` or the empty string. Child elements are
//! ignored, but any other attribute on the root is an error.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csemver_core::BaseVersion;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{BuildError, Result};

/// Name of the required root element.
pub const ROOT_ELEMENT: &str = "BuildVersionData";

/// Parse a descriptor held in a string.
pub fn parse(xml: &str) -> Result<BaseVersion> {
    parse_reader(xml.as_bytes())
}

/// Parse a descriptor from a file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<BaseVersion> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading build version descriptor");
    let file = File::open(path)?;
    parse_reader(BufReader::new(file))
}

/// Parse a descriptor from any buffered reader.
pub fn parse_reader<R: BufRead>(input: R) -> Result<BaseVersion> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(element) | Event::Empty(element) => {
                if element.local_name().as_ref() != ROOT_ELEMENT.as_bytes() {
                    return Err(BuildError::MissingElement(ROOT_ELEMENT));
                }
                return read_attributes(&element);
            }
            Event::Eof => return Err(BuildError::MissingElement(ROOT_ELEMENT)),
            _ => {}
        }
        buf.clear();
    }
}

fn read_attributes(element: &BytesStart<'_>) -> Result<BaseVersion> {
    let mut base = BaseVersion::default();
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value()?;
        match key.as_str() {
            "BuildMajor" => base.build_major = number(&key, &value)?,
            "BuildMinor" => base.build_minor = number(&key, &value)?,
            "BuildPatch" => base.build_patch = number(&key, &value)?,
            "PreReleaseName" => base.prerelease_name = value.into_owned(),
            "PreReleaseNumber" => base.prerelease_number = number(&key, &value)?,
            "PreReleaseFix" => base.prerelease_fix = number(&key, &value)?,
            _ => return Err(BuildError::UnexpectedAttribute(key)),
        }
    }
    Ok(base.normalized())
}

fn number(attribute: &str, value: &Cow<'_, str>) -> Result<u32> {
    value.trim().parse().map_err(|_| BuildError::InvalidNumber {
        attribute: attribute.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<BuildVersionData
    BuildMajor="1"
    BuildMinor="2"
    BuildPatch="3"
    PreReleaseName="beta"
    PreReleaseNumber="4"
    PreReleaseFix="5" />
"#;

    #[test]
    fn test_parse_all_attributes() {
        let base = parse(FULL_XML).expect("parses");
        assert_eq!(base.build_major, 1);
        assert_eq!(base.build_minor, 2);
        assert_eq!(base.build_patch, 3);
        assert_eq!(base.prerelease_name, "beta");
        assert_eq!(base.prerelease_number, 4);
        assert_eq!(base.prerelease_fix, 5);
    }

    #[test]
    fn test_minimal_element_gives_defaults() {
        let base = parse("<BuildVersionData/>").expect("parses");
        assert_eq!(base, BaseVersion::default());
    }

    #[test]
    fn test_extra_attribute_fails() {
        let xml = r#"<BuildVersionData BuildMajor="1" BuildMinor="2" BuildPatch="3"
            PreReleaseName="gamma" PreReleaseNumber="4" PreReleaseFix="5" foo="bar"/>"#;
        let err = parse(xml).expect_err("unknown attribute");
        assert!(matches!(&err, BuildError::UnexpectedAttribute(name) if name == "foo"));
        assert_eq!(err.to_string(), "unexpected attribute foo");
    }

    #[test]
    fn test_empty_document_fails() {
        let err = parse("").expect_err("no root");
        assert_eq!(
            err.to_string(),
            "XML element 'BuildVersionData' element not found"
        );
        assert!(matches!(
            parse("<?xml version=\"1.0\"?><!-- nothing -->"),
            Err(BuildError::MissingElement(ROOT_ELEMENT))
        ));
    }

    #[test]
    fn test_wrong_root_fails() {
        assert!(matches!(
            parse(r#"<Version BuildMajor="1"/>"#),
            Err(BuildError::MissingElement(_))
        ));
    }

    #[test]
    fn test_child_elements_ignored() {
        let xml = r#"<BuildVersionData BuildMajor="7"><Notes text="ignored"/></BuildVersionData>"#;
        let base = parse(xml).expect("parses");
        assert_eq!(base.build_major, 7);
    }

    #[test]
    fn test_blank_name_clears_number_and_fix() {
        let xml = r#"<BuildVersionData PreReleaseName=" " PreReleaseNumber="4" PreReleaseFix="5"/>"#;
        let base = parse(xml).expect("parses");
        assert_eq!(base.prerelease_name, "");
        assert_eq!(base.prerelease_number, 0);
        assert_eq!(base.prerelease_fix, 0);
    }

    #[test]
    fn test_invalid_number_names_attribute() {
        let err = parse(r#"<BuildVersionData BuildMinor="two"/>"#).expect_err("not a number");
        match err {
            BuildError::InvalidNumber { attribute, value } => {
                assert_eq!(attribute, "BuildMinor");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
