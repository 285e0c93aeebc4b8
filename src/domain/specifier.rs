//! Dependency pin specifiers
//!
//! Handles pins of the form `<name><comparator><version>`:
//! - Arbitrary equality: `foo===1.0`
//! - Exact: `foo==1.0`
//! - Compatible release: `foo~=1.0`
//!
//! Whitespace around the name and the version is kept so an unmodified pin
//! formats back to exactly the original text.

use crate::error::SpecifierError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(\S*)(\s*)$").unwrap());
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?$").unwrap());
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.*+!-]+$").unwrap());

/// Supported comparators
///
/// Variant order is the matching priority: `===` must be tried before `==`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `===`
    ArbitraryEqual,
    /// `==`
    Equal,
    /// `~=`
    Compatible,
}

impl Comparator {
    /// All comparators in matching priority order
    pub const ALL: [Comparator; 3] = [
        Comparator::ArbitraryEqual,
        Comparator::Equal,
        Comparator::Compatible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::ArbitraryEqual => "===",
            Comparator::Equal => "==",
            Comparator::Compatible => "~=",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pin decomposed into its parts, incidental whitespace included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSpecifier {
    pub leading_whitespace: String,
    pub package_name: String,
    pub before_comparator_whitespace: String,
    pub comparator: Comparator,
    pub after_comparator_whitespace: String,
    pub version: String,
    pub trailing_whitespace: String,
}

impl ParsedSpecifier {
    /// Reassembles the pin; the inverse of `parse_specifier`
    pub fn format(&self) -> String {
        [
            self.leading_whitespace.as_str(),
            self.package_name.as_str(),
            self.before_comparator_whitespace.as_str(),
            self.comparator.as_str(),
            self.after_comparator_whitespace.as_str(),
            self.version.as_str(),
            self.trailing_whitespace.as_str(),
        ]
        .concat()
    }

    /// Returns a copy with only the version replaced
    pub fn update_version(&self, new_version: impl Into<String>) -> Self {
        Self {
            version: new_version.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for ParsedSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Parses a dependency pin
///
/// Returns `SpecifierError::Unsupported` when no supported comparator occurs
/// (the string is not a pin and must be left alone) and
/// `SpecifierError::Parse` when a comparator is present but the rest is
/// malformed.
pub fn parse_specifier(specifier: &str) -> Result<ParsedSpecifier, SpecifierError> {
    let (comparator, split_at) = Comparator::ALL
        .iter()
        .find_map(|c| specifier.find(c.as_str()).map(|idx| (*c, idx)))
        .ok_or_else(|| SpecifierError::unsupported(specifier))?;

    let name_part = &specifier[..split_at];
    let version_part = &specifier[split_at + comparator.as_str().len()..];

    let (leading_whitespace, package_name, before_comparator_whitespace) =
        split_whitespace(specifier, name_part)?;
    let (after_comparator_whitespace, version, trailing_whitespace) =
        split_whitespace(specifier, version_part)?;

    if !NAME_RE.is_match(package_name) {
        return Err(SpecifierError::parse(
            specifier,
            format!("'{}' is not a valid package name", package_name),
        ));
    }
    if !VERSION_RE.is_match(version) {
        return Err(SpecifierError::parse(
            specifier,
            format!("'{}' is not a valid version", version),
        ));
    }

    Ok(ParsedSpecifier {
        leading_whitespace: leading_whitespace.to_string(),
        package_name: package_name.to_string(),
        before_comparator_whitespace: before_comparator_whitespace.to_string(),
        comparator,
        after_comparator_whitespace: after_comparator_whitespace.to_string(),
        version: version.to_string(),
        trailing_whitespace: trailing_whitespace.to_string(),
    })
}

/// Splits `part` into (leading whitespace, token, trailing whitespace)
fn split_whitespace<'a>(
    specifier: &str,
    part: &'a str,
) -> Result<(&'a str, &'a str, &'a str), SpecifierError> {
    let caps = WHITESPACE_RE.captures(part).ok_or_else(|| {
        SpecifierError::parse(
            specifier,
            format!("unexpected whitespace inside '{}'", part.trim()),
        )
    })?;
    let group = |i| caps.get(i).map_or("", |m| m.as_str());
    Ok((group(1), group(2), group(3)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format_roundtrips() {
        for specifier in [
            "xyz===1.0",
            "xyz===   1.0",
            "xyz ~= 2.1-dev0",
            "foo==1",
            "foo == 1.0",
            "foo==2.2 ",
            "  foo==1.1b0",
            "\tfoo\t==\t1.0\t",
            "Foo.Bar_baz==1!2.0+local.1",
        ] {
            let parsed = parse_specifier(specifier).unwrap();
            assert_eq!(parsed.format(), specifier);
            assert_eq!(parsed.to_string(), specifier);
        }
    }

    #[test]
    fn test_parse_splits_fields() {
        let parsed = parse_specifier("  foo ==  1.0 ").unwrap();
        assert_eq!(parsed.leading_whitespace, "  ");
        assert_eq!(parsed.package_name, "foo");
        assert_eq!(parsed.before_comparator_whitespace, " ");
        assert_eq!(parsed.comparator, Comparator::Equal);
        assert_eq!(parsed.after_comparator_whitespace, "  ");
        assert_eq!(parsed.version, "1.0");
        assert_eq!(parsed.trailing_whitespace, " ");
    }

    #[test]
    fn test_parse_prefers_arbitrary_equality() {
        let parsed = parse_specifier("pkg===1.0").unwrap();
        assert_eq!(parsed.comparator, Comparator::ArbitraryEqual);
        assert_eq!(parsed.package_name, "pkg");
        assert_eq!(parsed.version, "1.0");
    }

    #[test]
    fn test_parse_compatible_release() {
        let parsed = parse_specifier("pkg~=2.1").unwrap();
        assert_eq!(parsed.comparator, Comparator::Compatible);
        assert_eq!(parsed.version, "2.1");
    }

    #[test]
    fn test_parse_requires_supported_comparator() {
        for specifier in [
            "xyz=1.0",
            "xyz>=1.0",
            "xyz<=1.0",
            "xyz>=1.0,<=1.0",
            "xyz!=1.0",
            "xyz",
        ] {
            assert!(
                matches!(
                    parse_specifier(specifier),
                    Err(SpecifierError::Unsupported { .. })
                ),
                "{} should be unsupported",
                specifier
            );
        }
    }

    #[test]
    fn test_parse_rejects_invalid_whitespace() {
        for specifier in ["xyz abc == 1.0", "xyz==1.0 2.1"] {
            assert!(matches!(
                parse_specifier(specifier),
                Err(SpecifierError::Parse { .. })
            ));
        }
    }

    #[test]
    fn test_parse_rejects_invalid_name_or_version() {
        for specifier in [
            "-foo==1.0",
            "foo-==1.0",
            "==1.0",
            "foo==",
            "foo==1.0;extra",
            "foo[bar]==1.0",
        ] {
            assert!(
                matches!(
                    parse_specifier(specifier),
                    Err(SpecifierError::Parse { .. })
                ),
                "{} should fail to parse",
                specifier
            );
        }
    }

    #[test]
    fn test_parse_and_update_version() {
        for comparator in ["===", "==", "~="] {
            let spec = parse_specifier(&format!("foo{}1.0.0", comparator)).unwrap();
            let spec2 = spec.update_version("1.1.1");
            // unchanged
            assert_eq!(spec.format(), format!("foo{}1.0.0", comparator));
            // changed!
            assert_eq!(spec2.format(), format!("foo{}1.1.1", comparator));
        }
    }

    #[test]
    fn test_update_version_preserves_whitespace() {
        let spec = parse_specifier(" foo  ~=\t1.0 ").unwrap();
        assert_eq!(spec.update_version("10.20.30").format(), " foo  ~=\t10.20.30 ");
    }

    #[test]
    fn test_comparator_display() {
        assert_eq!(Comparator::ArbitraryEqual.to_string(), "===");
        assert_eq!(Comparator::Equal.to_string(), "==");
        assert_eq!(Comparator::Compatible.to_string(), "~=");
    }
}
