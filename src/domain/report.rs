//! Update result summary types
//!
//! Provides structures for tracking results per hook and per run.

use super::Edit;

/// A dependency left untouched because its pin could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDependency {
    /// The dependency string as written
    pub dependency: String,
    /// Why it was skipped
    pub reason: String,
}

/// Result of scanning one hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookReport {
    /// Repository URL as written in the config
    pub repo: String,
    /// Hook id
    pub hook_id: String,
    /// Edits for this hook, in encounter order
    pub edits: Vec<Edit>,
    /// Malformed pins that were skipped
    pub skipped: Vec<SkippedDependency>,
}

impl HookReport {
    /// Creates an empty report for a hook
    pub fn new(repo: impl Into<String>, hook_id: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            hook_id: hook_id.into(),
            edits: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Records an edit
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Records a skipped dependency
    pub fn add_skip(&mut self, dependency: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedDependency {
            dependency: dependency.into(),
            reason: reason.into(),
        });
    }

    /// Returns the number of updates
    pub fn update_count(&self) -> usize {
        self.edits.len()
    }

    /// Returns true if any dependency of this hook changes
    pub fn has_updates(&self) -> bool {
        !self.edits.is_empty()
    }

    /// `(old, new)` pairs for display
    pub fn changes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edits
            .iter()
            .map(|e| (e.original.as_str(), e.replacement.as_str()))
    }
}

/// Overall summary of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Reports for each scanned hook
    pub hooks: Vec<HookReport>,
    /// Whether this was a check-only run
    pub check: bool,
}

impl UpdateSummary {
    /// Creates a new UpdateSummary
    pub fn new(check: bool) -> Self {
        Self {
            hooks: Vec::new(),
            check,
        }
    }

    /// Adds a hook report
    pub fn add_hook(&mut self, report: HookReport) {
        self.hooks.push(report);
    }

    /// Returns the number of hooks scanned
    pub fn hooks_scanned(&self) -> usize {
        self.hooks.len()
    }

    /// Returns the total number of dependencies updated
    pub fn total_updates(&self) -> usize {
        self.hooks.iter().map(HookReport::update_count).sum()
    }

    /// Returns the total number of dependencies skipped with a warning
    pub fn total_skips(&self) -> usize {
        self.hooks.iter().map(|h| h.skipped.len()).sum()
    }

    /// Returns true if any hook has pending updates
    pub fn has_updates(&self) -> bool {
        self.total_updates() > 0
    }

    /// All edits across all hooks, in encounter order
    pub fn all_edits(&self) -> impl Iterator<Item = &Edit> {
        self.hooks.iter().flat_map(|h| h.edits.iter())
    }
}
