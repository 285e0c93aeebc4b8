//! Registry adapters for fetching version information
//!
//! This module provides:
//! - HTTP client shared foundation
//! - PyPI JSON API package index
//! - GitHub REST API tag source
//! - GitHub CLI (`gh api`) tag source with a memoized availability check

mod client;
mod github_api;
mod github_cli;
mod pypi;

pub use client::HttpClient;
pub use github_api::GitHubApiTags;
pub use github_cli::{GhAuthCheck, GhCliTags};
pub use pypi::PyPIIndex;

use crate::error::RegistryError;
use async_trait::async_trait;
use serde::Deserialize;

/// Media type requested from the GitHub API
pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Pinned GitHub REST API version
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// A repository tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "TagPayload")]
pub struct TagInfo {
    pub name: String,
    pub commit_sha: String,
}

impl TagInfo {
    pub fn new(name: impl Into<String>, commit_sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_sha: commit_sha.into(),
        }
    }
}

/// Wire shape of one entry of `/repos/{owner}/{repo}/tags`
#[derive(Deserialize)]
struct TagPayload {
    name: String,
    commit: CommitPayload,
}

#[derive(Deserialize)]
struct CommitPayload {
    sha: String,
}

impl From<TagPayload> for TagInfo {
    fn from(payload: TagPayload) -> Self {
        TagInfo::new(payload.name, payload.commit.sha)
    }
}

/// Trait for package indexes that publish a single latest version
#[async_trait]
pub trait PackageIndex: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the latest version string for an already-normalized package name
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError>;
}

/// Trait for sources of repository tag listings
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Get the source name
    fn source_name(&self) -> &'static str;

    /// Fetch all tags of `owner/repo`
    async fn fetch_tags(&self, owner: &str, repo: &str) -> Result<Vec<TagInfo>, RegistryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_info_deserializes_github_shape() {
        let tags: Vec<TagInfo> = serde_json::from_str(
            r#"[
                {"name": "v1.0.0", "commit": {"sha": "abc123", "url": "https://example.invalid"},
                 "zipball_url": "https://example.invalid/zip", "node_id": "x"},
                {"name": "v0.9.0", "commit": {"sha": "def456"}}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            tags,
            vec![TagInfo::new("v1.0.0", "abc123"), TagInfo::new("v0.9.0", "def456")]
        );
    }

    #[test]
    fn test_tag_info_requires_commit_sha() {
        let result: Result<Vec<TagInfo>, _> = serde_json::from_str(r#"[{"name": "v1"}]"#);
        assert!(result.is_err());
    }
}
