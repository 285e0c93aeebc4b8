//! Latest release tag selection
//!
//! Tags are ordered by PEP 440 precedence, not lexically, so `v10.0.0`
//! beats `v9.0.0`. Tags that do not parse as a version, and pre or dev
//! releases, are never candidates.

use crate::registry::TagInfo;
use pep508_rs::pep440_rs::Version;
use std::str::FromStr;

/// Parses a tag name as a stable release version
fn release_version(tag: &str) -> Option<Version> {
    let version = Version::from_str(tag).ok()?;
    if version.is_pre() || version.is_dev() {
        return None;
    }
    Some(version)
}

/// Picks the highest stable release among `tags`
///
/// On equal versions (`1.0` and `v1.0`) the first one listed wins.
pub fn select_latest_tag(tags: &[TagInfo]) -> Option<&TagInfo> {
    let mut best: Option<(Version, &TagInfo)> = None;
    for tag in tags {
        let Some(version) = release_version(&tag.name) else {
            continue;
        };
        match &best {
            Some((current, _)) if version <= *current => {}
            _ => best = Some((version, tag)),
        }
    }
    best.map(|(_, tag)| tag)
}
