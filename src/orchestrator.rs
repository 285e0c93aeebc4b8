//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: scan → plan → (diff) → patch
//! - Check mode support (diff only, no writes)
//! - Per-hook progress output
//!
//! Every phase runs once and in order. Any error aborts the run before the
//! file is written.

use crate::command::SystemCommandRunner;
use crate::config::Settings;
use crate::domain::{sort_edits, Edit, UpdateSummary};
use crate::error::AppError;
use crate::manifest::{read_manifest, LineEnding, ManifestWriter, WriteResult};
use crate::output::{DiffFormatter, TextFormatter, Verbosity};
use crate::progress::Progress;
use crate::registry::HttpClient;
use crate::update::{TagMode, UpdatePlanner, VersionResolver};
use crate::yaml::load_document;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Options for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Pre-commit config to update
    pub file: PathBuf,
    /// Show a diff instead of writing
    pub check: bool,
    /// Tag names or commit shas for tag references
    pub tag_mode: TagMode,
    pub verbosity: Verbosity,
    /// Whether to use colors
    pub color: bool,
    /// Whether to show a spinner during lookups
    pub progress: bool,
}

/// Result of running the orchestrator
#[derive(Debug)]
pub struct OrchestratorResult {
    /// Per-hook results
    pub summary: UpdateSummary,
    /// Patch result; `None` when there was nothing to change
    pub write_result: Option<WriteResult>,
    /// Rendered diff in check mode
    pub diff: Option<String>,
}

impl OrchestratorResult {
    /// Returns true if check mode found pending updates
    pub fn updates_pending(&self) -> bool {
        self.summary.check && self.summary.has_updates()
    }
}

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    options: RunOptions,
    settings: Settings,
    resolver: VersionResolver,
}

impl Orchestrator {
    /// Create an orchestrator that queries PyPI and GitHub
    pub fn new(options: RunOptions, settings: Settings) -> Result<Self, AppError> {
        let client = HttpClient::new()?;
        let resolver = VersionResolver::with_defaults(
            client,
            Arc::new(SystemCommandRunner::new()),
            options.tag_mode,
        );
        Ok(Self::with_resolver(options, settings, resolver))
    }

    /// Create an orchestrator with a custom resolver (for testing)
    pub fn with_resolver(
        options: RunOptions,
        settings: Settings,
        resolver: VersionResolver,
    ) -> Self {
        Self {
            options,
            settings,
            resolver,
        }
    }

    /// Run the update workflow, writing user-facing output to `out`
    pub async fn run(&mut self, out: &mut dyn Write) -> Result<OrchestratorResult, AppError> {
        let text = TextFormatter::with_color(self.options.verbosity, self.options.color);
        let mut summary = UpdateSummary::new(self.options.check);

        // Scan
        let original = read_manifest(&self.options.file)?;
        debug!(
            path = %self.options.file.display(),
            newline = ?LineEnding::detect(&original),
            "read config"
        );
        let document = load_document(&original)?;
        let planner = UpdatePlanner::new(
            self.settings.repo_hook_index(),
            &self.settings.skip_repos,
        );
        let entries = planner.scan(&document)?;
        debug!(hooks = entries.len(), "tracked hooks found");

        // Plan
        let mut progress = Progress::new(self.options.progress, entries.len());
        for entry in &entries {
            progress.start_hook(&entry.hook_id);
            let report = planner.plan_hook(entry, &mut self.resolver).await;
            progress.finish_hook();
            let report = report?;

            text.hook_started(&report.hook_id, out)?;
            text.hook_result(&report, out)?;
            summary.add_hook(report);
        }

        let mut edits: Vec<Edit> = summary.all_edits().cloned().collect();
        sort_edits(&mut edits);

        if edits.is_empty() {
            text.nothing_to_do(out)?;
            text.format_summary(&summary, out)?;
            return Ok(OrchestratorResult {
                summary,
                write_result: None,
                diff: None,
            });
        }

        // Diff or patch
        let writer = ManifestWriter::new(self.options.check);
        let mut diff = None;
        let write_result = if self.options.check {
            let result = writer.apply(&self.options.file, original, &edits)?;
            let rendered = DiffFormatter::default().render(
                &self.display_name(),
                &result.original,
                &result.updated,
            );
            write!(out, "{}", rendered)?;
            diff = Some(rendered);
            result
        } else {
            text.apply_started(out)?;
            let result = writer.apply(&self.options.file, original, &edits)?;
            text.apply_finished(out)?;
            result
        };

        text.format_summary(&summary, out)?;
        Ok(OrchestratorResult {
            summary,
            write_result: Some(write_result),
            diff,
        })
    }

    /// File name used as both diff labels
    fn display_name(&self) -> String {
        self.options
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.options.file.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TagInfo;
    use crate::update::fakes::{resolver_with, FakeIndex, FakeTags};
    use std::fs;
    use tempfile::TempDir;

    const CONFIG: &str = "\
repos:
  - repo: https://github.com/PyCQA/flake8
    rev: 7.0.0
    hooks:
      - id: flake8
        additional_dependencies:
          - 'flake8-bugbear==22.12.6'
          - flake8-comprehensions==3.14.0
  - repo: https://github.com/asottile/blacken-docs
    rev: 1.16.0
    hooks:
      - id: blacken-docs
        additional_dependencies: [black==22.12.0]
";

    fn options(dir: &TempDir, check: bool) -> RunOptions {
        RunOptions {
            file: dir.path().join(".pre-commit-config.yaml"),
            check,
            tag_mode: TagMode::Name,
            verbosity: Verbosity::Normal,
            color: false,
            progress: false,
        }
    }

    fn resolver() -> VersionResolver {
        resolver_with(
            FakeIndex::new(&[
                ("flake8-bugbear", "24.2.6"),
                ("flake8-comprehensions", "3.14.0"),
                ("black", "24.1.1"),
            ]),
            FakeTags::new(&[("o/r", vec![TagInfo::new("v1.0.0", "abc")])]),
            FakeTags::empty(),
            false,
            TagMode::Name,
        )
    }

    fn setup(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".pre-commit-config.yaml"), content).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_run_applies_updates() {
        let dir = setup(CONFIG);
        let mut orchestrator =
            Orchestrator::with_resolver(options(&dir, false), Settings::default(), resolver());
        let mut out = Vec::new();

        let result = orchestrator.run(&mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert_eq!(
            output,
            "upadup is checking additional_dependencies of flake8...\n  \
             flake8-bugbear==22.12.6 => flake8-bugbear==24.2.6\n\
             upadup is checking additional_dependencies of blacken-docs...\n  \
             black==22.12.0 => black==24.1.1\n\
             apply updates...done\n"
        );
        assert!(!result.updates_pending());
        assert_eq!(result.summary.total_updates(), 2);

        let written = fs::read_to_string(dir.path().join(".pre-commit-config.yaml")).unwrap();
        assert_eq!(
            written,
            CONFIG
                .replace("'flake8-bugbear==22.12.6'", "'flake8-bugbear==24.2.6'")
                .replace("[black==22.12.0]", "[black==24.1.1]")
        );
    }

    #[tokio::test]
    async fn test_run_check_mode_renders_diff_without_writing() {
        let dir = setup(CONFIG);
        let mut orchestrator =
            Orchestrator::with_resolver(options(&dir, true), Settings::default(), resolver());
        let mut out = Vec::new();

        let result = orchestrator.run(&mut out).await.unwrap();

        assert!(result.updates_pending());
        let diff = result.diff.unwrap();
        assert!(diff.starts_with("--- .pre-commit-config.yaml\n+++ .pre-commit-config.yaml\n"));
        assert!(diff.contains("-          - 'flake8-bugbear==22.12.6'\n"));
        assert!(diff.contains("+          - 'flake8-bugbear==24.2.6'\n"));
        assert!(String::from_utf8(out).unwrap().ends_with(&diff));

        let on_disk = fs::read_to_string(dir.path().join(".pre-commit-config.yaml")).unwrap();
        assert_eq!(on_disk, CONFIG);
    }

    #[tokio::test]
    async fn test_run_nothing_to_do() {
        let dir = setup("repos:\n  - repo: local\n    hooks:\n      - id: mine\n");
        let mut orchestrator =
            Orchestrator::with_resolver(options(&dir, true), Settings::default(), resolver());
        let mut out = Vec::new();

        let result = orchestrator.run(&mut out).await.unwrap();

        assert!(!result.updates_pending());
        assert!(result.write_result.is_none());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "no updates needed in any hook configs\n"
        );
    }

    #[tokio::test]
    async fn test_run_skip_repos() {
        let dir = setup(CONFIG);
        let settings = Settings {
            skip_repos: vec![
                "https://github.com/pycqa/flake8".to_string(),
                "https://github.com/asottile/blacken-docs.git".to_string(),
            ],
            ..Settings::default()
        };
        let mut orchestrator =
            Orchestrator::with_resolver(options(&dir, false), settings, resolver());
        let mut out = Vec::new();

        let result = orchestrator.run(&mut out).await.unwrap();

        assert_eq!(result.summary.hooks_scanned(), 0);
        let on_disk = fs::read_to_string(dir.path().join(".pre-commit-config.yaml")).unwrap();
        assert_eq!(on_disk, CONFIG);
    }

    #[tokio::test]
    async fn test_run_aliased_dependencies_are_patched_once() {
        let content = "\
repos:
  - repo: https://github.com/PyCQA/flake8
    rev: 7.0.0
    hooks:
      - id: flake8
        additional_dependencies: &deps
          - flake8-bugbear==22.12.6
  - repo: https://github.com/asottile/blacken-docs
    rev: 1.16.0
    hooks:
      - id: blacken-docs
        additional_dependencies: *deps
";
        let dir = setup(content);
        let mut orchestrator =
            Orchestrator::with_resolver(options(&dir, false), Settings::default(), resolver());
        let mut out = Vec::new();

        let result = orchestrator.run(&mut out).await.unwrap();

        assert_eq!(result.summary.total_updates(), 2);
        let on_disk = fs::read_to_string(dir.path().join(".pre-commit-config.yaml")).unwrap();
        assert_eq!(on_disk, content.replace("22.12.6", "24.2.6"));
    }

    #[tokio::test]
    async fn test_run_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut orchestrator =
            Orchestrator::with_resolver(options(&dir, false), Settings::default(), resolver());
        let mut out = Vec::new();

        let err = orchestrator.run(&mut out).await.unwrap_err();
        assert!(err.to_string().contains("cannot run without"));
    }

    #[tokio::test]
    async fn test_run_registry_failure_writes_nothing() {
        let content = CONFIG.replace("black==22.12.0", "unknown-package==1.0");
        let dir = setup(&content);
        let mut orchestrator =
            Orchestrator::with_resolver(options(&dir, false), Settings::default(), resolver());
        let mut out = Vec::new();

        let result = orchestrator.run(&mut out).await;

        assert!(matches!(result, Err(AppError::Resolve(_))));
        let on_disk = fs::read_to_string(dir.path().join(".pre-commit-config.yaml")).unwrap();
        assert_eq!(on_disk, content);
    }
}
