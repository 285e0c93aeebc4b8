//! Version resolution
//!
//! `VersionResolver` is the single place that decides where a latest
//! version comes from:
//! - `name==version` pins go to the package index, cached by normalized name
//! - `github.com/<owner>/<repo>@<ref>` references go to a tag source, either
//!   the `gh` CLI when it is usable or the REST API otherwise
//!
//! Every distinct key costs at most one lookup per run.

use crate::command::CommandRunner;
use crate::domain::{normalize_package_name, TaggedReference};
use crate::error::ResolveError;
use crate::registry::{
    GhAuthCheck, GhCliTags, GitHubApiTags, HttpClient, PackageIndex, PyPIIndex, TagInfo, TagSource,
};
use crate::update::tags::select_latest_tag;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// What a tag reference is rewritten to point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    /// `@<tag name>`
    #[default]
    Name,
    /// `@<commit sha>` of the selected tag
    Freeze,
}

/// Latest versions keyed by normalized package name
#[derive(Debug, Default)]
pub struct VersionCache {
    entries: HashMap<String, String>,
}

impl VersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a name, normalizing it first
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&normalize_package_name(name))
            .map(String::as_str)
    }

    pub fn insert(&mut self, name: &str, version: impl Into<String>) {
        self.entries
            .insert(normalize_package_name(name), version.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Where tag listings come from
pub struct TagSources {
    /// Direct HTTPS source, always usable
    pub api: Box<dyn TagSource>,
    /// Local CLI source, used only when `gh_check` succeeds
    pub cli: Box<dyn TagSource>,
    pub gh_check: GhAuthCheck,
}

/// Resolves dependency strings to their latest form
pub struct VersionResolver {
    index: Box<dyn PackageIndex>,
    tags: TagSources,
    mode: TagMode,
    versions: VersionCache,
    tag_cache: HashMap<String, Vec<TagInfo>>,
}

impl VersionResolver {
    pub fn new(index: Box<dyn PackageIndex>, tags: TagSources, mode: TagMode) -> Self {
        Self {
            index,
            tags,
            mode,
            versions: VersionCache::new(),
            tag_cache: HashMap::new(),
        }
    }

    /// PyPI for packages, GitHub (CLI or API) for tags
    pub fn with_defaults(
        client: HttpClient,
        runner: Arc<dyn CommandRunner>,
        mode: TagMode,
    ) -> Self {
        let tags = TagSources {
            api: Box::new(GitHubApiTags::new(client.clone())),
            cli: Box::new(GhCliTags::new(runner.clone())),
            gh_check: GhAuthCheck::new(runner),
        };
        Self::new(Box::new(PyPIIndex::new(client)), tags, mode)
    }

    /// Latest version of a package on the index
    pub async fn latest_version(&mut self, name: &str) -> Result<String, ResolveError> {
        if let Some(version) = self.versions.get(name) {
            return Ok(version.to_string());
        }

        let normalized = normalize_package_name(name);
        let version = self.index.latest_version(&normalized).await?;
        debug!(
            package = %normalized,
            version = %version,
            registry = self.index.registry_name(),
            "resolved latest version"
        );
        self.versions.insert(&normalized, version.clone());
        Ok(version)
    }

    /// `dependency` rewritten to point at the latest release tag
    ///
    /// Returns the input unchanged when the repository has no stable
    /// release tags.
    pub async fn latest_tag(&mut self, dependency: &str) -> Result<String, ResolveError> {
        let reference = TaggedReference::parse(dependency).ok_or_else(|| {
            ResolveError::MalformedReference {
                dependency: dependency.to_string(),
            }
        })?;
        if !reference.is_github() {
            return Err(ResolveError::UnsupportedHost {
                dependency: dependency.to_string(),
            });
        }

        let key = format!("{}/{}", reference.owner, reference.repo).to_lowercase();
        if !self.tag_cache.contains_key(&key) {
            let tags = self.fetch_tags(&reference).await?;
            self.tag_cache.insert(key.clone(), tags);
        }

        let tags = self.tag_cache.get(&key).map(Vec::as_slice).unwrap_or_default();
        let Some(latest) = select_latest_tag(tags) else {
            debug!(dependency, "no release tags");
            return Ok(dependency.to_string());
        };

        Ok(match self.mode {
            TagMode::Name => reference.with_reference(&latest.name),
            TagMode::Freeze => reference.with_reference(&latest.commit_sha),
        })
    }

    async fn fetch_tags(
        &mut self,
        reference: &TaggedReference,
    ) -> Result<Vec<TagInfo>, ResolveError> {
        let source = if self.tags.gh_check.is_available().await {
            &self.tags.cli
        } else {
            &self.tags.api
        };
        debug!(
            owner = %reference.owner,
            repo = %reference.repo,
            source = source.source_name(),
            "fetching tags"
        );
        Ok(source.fetch_tags(&reference.owner, &reference.repo).await?)
    }
}
