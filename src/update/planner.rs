//! Update planning
//!
//! Planning runs in two steps:
//! - `scan` walks `repos[].hooks[]` and keeps the tracked, non-skipped hooks
//! - `plan_hook` resolves each dependency of one hook into edits
//!
//! Nothing is written here; the edits are applied by the manifest patcher.

use crate::domain::{
    normalize_repo, parse_specifier, sort_edits, DependencyKind, Edit, HookReport, RepoHookIndex,
};
use crate::error::{AppError, DocumentError, ResolveError, SpecifierError};
use crate::update::VersionResolver;
use crate::yaml::{LocatedString, YamlValue};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A tracked hook found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEntry {
    /// Repository URL as written
    pub repo: String,
    pub hook_id: String,
    /// String items of `additional_dependencies`, in document order
    pub dependencies: Vec<LocatedString>,
}

/// Every hook report of a document and the edits they add up to
#[derive(Debug, Default)]
pub struct Plan {
    pub reports: Vec<HookReport>,
    /// Sorted by `(line, column)`
    pub edits: Vec<Edit>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

/// Turns a parsed pre-commit document into edits
pub struct UpdatePlanner {
    tracked: RepoHookIndex,
    skip_repos: HashSet<String>,
}

impl UpdatePlanner {
    /// `skip_repos` may be written in any case and with or without `.git`
    pub fn new<I, S>(tracked: RepoHookIndex, skip_repos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tracked,
            skip_repos: skip_repos
                .into_iter()
                .map(|r| normalize_repo(r.as_ref()))
                .collect(),
        }
    }

    /// Finds every tracked hook of every non-skipped repo
    pub fn scan(&self, document: &YamlValue) -> Result<Vec<HookEntry>, DocumentError> {
        let repos = expect_sequence(document.get("repos"), "repos")?;

        let mut entries = Vec::new();
        for (i, repo_config) in repos.iter().enumerate() {
            let path = format!("repos[{}]", i);
            let repo = expect_string(repo_config.get("repo"), &format!("{}.repo", path))?;

            let normalized = normalize_repo(repo);
            if self.skip_repos.contains(&normalized) {
                debug!(repo, "skipping repo");
                continue;
            }
            if !self.tracked.tracks_repo(&normalized) {
                continue;
            }

            let hooks = expect_sequence(repo_config.get("hooks"), &format!("{}.hooks", path))?;
            for (j, hook) in hooks.iter().enumerate() {
                let hook_path = format!("{}.hooks[{}]", path, j);
                let hook_id = expect_string(hook.get("id"), &format!("{}.id", hook_path))?;
                if !self.tracked.contains(&normalized, hook_id) {
                    continue;
                }

                entries.push(HookEntry {
                    repo: repo.to_string(),
                    hook_id: hook_id.to_string(),
                    dependencies: dependencies_of(hook, &hook_path)?,
                });
            }
        }
        Ok(entries)
    }

    /// Scans the document and plans every tracked hook
    pub async fn plan(
        &self,
        document: &YamlValue,
        resolver: &mut VersionResolver,
    ) -> Result<Plan, AppError> {
        let mut plan = Plan::default();
        for entry in self.scan(document)? {
            let report = self.plan_hook(&entry, resolver).await?;
            plan.edits.extend(report.edits.iter().cloned());
            plan.reports.push(report);
        }
        sort_edits(&mut plan.edits);
        Ok(plan)
    }

    /// Resolves the dependencies of one hook
    ///
    /// Pins without a supported comparator are left alone; malformed pins
    /// are reported as skipped and do not stop the run.
    pub async fn plan_hook(
        &self,
        entry: &HookEntry,
        resolver: &mut VersionResolver,
    ) -> Result<HookReport, ResolveError> {
        let mut report = HookReport::new(&entry.repo, &entry.hook_id);

        for dependency in &entry.dependencies {
            match DependencyKind::classify(dependency.as_str()) {
                DependencyKind::Tagged(_) => {
                    let latest = resolver.latest_tag(dependency.as_str()).await?;
                    if latest != dependency.as_str() {
                        propose_edit(&mut report, dependency, latest);
                    }
                }
                DependencyKind::Pinned => match parse_specifier(dependency.as_str()) {
                    Err(SpecifierError::Unsupported { .. }) => {
                        debug!(dependency = dependency.as_str(), "not a pin");
                    }
                    Err(err) => {
                        let (line, column) = dependency.position();
                        warn!(line = line + 1, column = column + 1, "{}", err);
                        report.add_skip(dependency.as_str(), err.to_string());
                    }
                    Ok(specifier) => {
                        let latest = resolver.latest_version(&specifier.package_name).await?;
                        if latest != specifier.version {
                            let replacement = specifier.update_version(latest).format();
                            propose_edit(&mut report, dependency, replacement);
                        }
                    }
                },
            }
        }

        Ok(report)
    }
}

/// Adds the edit, or a skip when the source does not spell out the value
fn propose_edit(report: &mut HookReport, dependency: &LocatedString, replacement: String) {
    if dependency.is_verbatim() {
        report.add_edit(Edit::new(dependency.clone(), replacement));
        return;
    }
    let (line, column) = dependency.position();
    warn!(
        line = line + 1,
        column = column + 1,
        "'{}' is written with escapes or line breaks and cannot be updated in place",
        dependency.as_str()
    );
    report.add_skip(
        dependency.as_str(),
        format!("cannot be updated in place, change it to {}", replacement),
    );
}

fn dependencies_of(
    hook: &YamlValue,
    hook_path: &str,
) -> Result<Vec<LocatedString>, DocumentError> {
    let path = format!("{}.additional_dependencies", hook_path);
    let items = match hook.get("additional_dependencies") {
        None => return Ok(Vec::new()),
        Some(value) if value.is_null() => return Ok(Vec::new()),
        Some(value) => expect_sequence(Some(value), &path)?,
    };
    Ok(items
        .iter()
        .filter_map(YamlValue::as_located)
        .cloned()
        .collect())
}

fn expect_sequence<'a>(
    value: Option<&'a YamlValue>,
    path: &str,
) -> Result<&'a [YamlValue], DocumentError> {
    match value {
        None => Err(DocumentError::shape(path, "missing required key")),
        Some(value) => value.as_sequence().ok_or_else(|| {
            DocumentError::shape(path, format!("expected a sequence, found {}", value.type_name()))
        }),
    }
}

fn expect_string<'a>(value: Option<&'a YamlValue>, path: &str) -> Result<&'a str, DocumentError> {
    match value {
        None => Err(DocumentError::shape(path, "missing required key")),
        Some(value) => value.as_str().ok_or_else(|| {
            DocumentError::shape(path, format!("expected a string, found {}", value.type_name()))
        }),
    }
}
