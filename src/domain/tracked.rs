//! Tracked repository/hook pairs

use super::normalize_repo;
use std::collections::{HashMap, HashSet};

/// Normalized repo URL → hook ids whose dependencies are updated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoHookIndex {
    repos: HashMap<String, HashSet<String>>,
}

impl RepoHookIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracks `hook_id` of `repo`; the repo is normalized
    pub fn insert(&mut self, repo: &str, hook_id: impl Into<String>) {
        self.repos
            .entry(normalize_repo(repo))
            .or_default()
            .insert(hook_id.into());
    }

    /// Returns true if any hook of `repo` is tracked
    pub fn tracks_repo(&self, repo: &str) -> bool {
        self.repos.contains_key(&normalize_repo(repo))
    }

    /// Returns true if `hook_id` of `repo` is tracked
    pub fn contains(&self, repo: &str, hook_id: &str) -> bool {
        self.repos
            .get(&normalize_repo(repo))
            .is_some_and(|hooks| hooks.contains(hook_id))
    }

    /// Number of tracked repositories
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_normalized() {
        let mut index = RepoHookIndex::new();
        index.insert("https://github.com/org/repo", "lint");

        assert!(index.tracks_repo("https://github.com/Org/Repo.git"));
        assert!(index.contains("https://github.com/Org/Repo.git", "lint"));
        assert!(!index.contains("https://github.com/org/repo", "format"));
        assert!(!index.tracks_repo("https://github.com/org/other"));
    }

    #[test]
    fn test_hook_sets_are_unioned() {
        let mut index = RepoHookIndex::new();
        index.insert("https://github.com/org/repo", "a");
        index.insert("https://github.com/ORG/repo.git", "b");

        assert_eq!(index.len(), 1);
        assert!(index.contains("https://github.com/org/repo", "a"));
        assert!(index.contains("https://github.com/org/repo", "b"));
    }

    #[test]
    fn test_hook_ids_are_case_sensitive() {
        let mut index = RepoHookIndex::new();
        index.insert("local", "Flake8");
        assert!(!index.contains("local", "flake8"));
    }
}
