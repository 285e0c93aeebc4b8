//! Dependency classification and name normalization

use regex::Regex;
use std::sync::LazyLock;

/// Host whose tag listings can be resolved
pub const GITHUB_HOST: &str = "github.com";

static SEPARATOR_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());
static TAGGED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<uri>(?P<host>[^/@\s]+)/(?P<owner>[^/@\s]+)/(?P<repo>[^/@\s]+)(?:/[^@\s]*)?)@(?P<reference>[^@\s]+)$",
    )
    .unwrap()
});

/// Normalizes a package name for registry lookups and caching
///
/// Lowercases and collapses runs of `-`, `_` and `.` into a single `-`.
pub fn normalize_package_name(name: &str) -> String {
    SEPARATOR_RUN_RE
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Normalizes a repository URL for matching
///
/// Case-folds and strips a trailing `.git`.
pub fn normalize_repo(repo: &str) -> String {
    let folded = repo.to_lowercase();
    match folded.strip_suffix(".git") {
        Some(stripped) => stripped.to_string(),
        None => folded,
    }
}

/// A `<host>/<owner>/<repo>[/<subpath>]@<ref>` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedReference {
    /// Everything before the `@`
    pub uri: String,
    pub host: String,
    pub owner: String,
    pub repo: String,
    pub reference: String,
}

impl TaggedReference {
    /// Parses a reference on any host; `None` if the shape does not match
    pub fn parse(text: &str) -> Option<Self> {
        let caps = TAGGED_RE.captures(text)?;
        Some(Self {
            uri: caps["uri"].to_string(),
            host: caps["host"].to_string(),
            owner: caps["owner"].to_string(),
            repo: caps["repo"].to_string(),
            reference: caps["reference"].to_string(),
        })
    }

    pub fn is_github(&self) -> bool {
        self.host == GITHUB_HOST
    }

    /// Rebuilds the reference pointing at a different ref
    pub fn with_reference(&self, reference: &str) -> String {
        format!("{}@{}", self.uri, reference)
    }
}

/// How a dependency string is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyKind {
    /// GitHub tag-pinned tool reference
    Tagged(TaggedReference),
    /// Anything else; may or may not be a `name==version` pin
    Pinned,
}

impl DependencyKind {
    /// Classifies a dependency string by shape
    ///
    /// Only GitHub-hosted references are tag-backed; references on other
    /// hosts are treated like any other non-pin string.
    pub fn classify(dependency: &str) -> Self {
        match TaggedReference::parse(dependency) {
            Some(reference) if reference.is_github() => DependencyKind::Tagged(reference),
            _ => DependencyKind::Pinned,
        }
    }
}
