//! upadup settings
//!
//! Settings live in the `[tool.upadup]` table of `.upadup.toml`, or of
//! `pyproject.toml` when there is no `.upadup.toml`:
//!
//! ```toml
//! [tool.upadup]
//! skip_repos = ["https://github.com/pycqa/flake8"]
//! extends_default = true
//!
//! [[tool.upadup.repos]]
//! repo = "https://github.com/pre-commit/mirrors-mypy"
//! hooks = [{ id = "mypy", additional_dependencies = ["types-requests"] }]
//! ```
//!
//! Missing files and missing tables mean "built-in defaults only".

use crate::domain::RepoHookIndex;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use toml::{Table, Value};
use tracing::debug;

/// Dedicated settings file, checked first
pub const LOCAL_CONFIG_FILE: &str = ".upadup.toml";

/// Fallback settings file
pub const PYPROJECT_FILE: &str = "pyproject.toml";

const DEFAULT_REPOS: &[(&str, &str, &[&str])] = &[
    (
        "https://github.com/pycqa/flake8",
        "flake8",
        &[
            "flake8-bandit",
            "flake8-bugbear",
            "flake8-comprehensions",
            "flake8-pyi",
            "flake8-typing-imports",
            "flake8-docstrings",
            "flake8-builtins",
        ],
    ),
    (
        "https://github.com/asottile/blacken-docs",
        "blacken-docs",
        &["black"],
    ),
];

/// A hook whose `additional_dependencies` are kept up to date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedHook {
    pub id: String,
    /// Packages this hook is expected to carry; informational
    pub additional_dependencies: Vec<String>,
}

/// A repository with tracked hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRepo {
    pub repo: String,
    pub hooks: Vec<TrackedHook>,
}

/// Validated `[tool.upadup]` settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub skip_repos: Vec<String>,
    /// Merge user repos onto the built-in ones
    pub extends_default: bool,
    pub repos: Vec<TrackedRepo>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skip_repos: Vec::new(),
            extends_default: true,
            repos: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads settings from `dir`
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        for name in [LOCAL_CONFIG_FILE, PYPROJECT_FILE] {
            let path = dir.join(name);
            if path.is_file() {
                debug!(path = %path.display(), "loading settings");
                let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
                    path: path.clone(),
                    source: e,
                })?;
                return Self::from_toml_str(&content, &path);
            }
        }
        Ok(Self::default())
    }

    /// Parses a whole TOML document and validates its `[tool.upadup]` table
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let document: Table = content.parse().map_err(|e: toml::de::Error| {
            ConfigError::TomlParseError {
                path: PathBuf::from(path),
                message: e.to_string(),
            }
        })?;

        let Some(tool) = document.get("tool") else {
            return Ok(Self::default());
        };
        if !tool.is_table() {
            return Err(ConfigError::malformed("'tool' was not a table"));
        }
        let Some(upadup) = tool.get("upadup") else {
            return Ok(Self::default());
        };
        Self::from_table(upadup)
    }

    /// Validates the content of `[tool.upadup]`
    fn from_table(value: &Value) -> Result<Self, ConfigError> {
        const PATH: &str = "tool.upadup";
        let table = value
            .as_table()
            .ok_or_else(|| ConfigError::malformed(format!("'{}' was not a table", PATH)))?;

        let mut unexpected: Vec<&str> = table
            .keys()
            .map(String::as_str)
            .filter(|k| !matches!(*k, "skip_repos" | "extends_default" | "repos"))
            .collect();
        if !unexpected.is_empty() {
            unexpected.sort_unstable();
            return Err(ConfigError::malformed(format!(
                "'{}' contained unexpected keys: {:?}",
                PATH, unexpected
            )));
        }

        let mut settings = Self::default();
        if let Some(skip_repos) = table.get("skip_repos") {
            settings.skip_repos = string_list(skip_repos, &format!("{}.skip_repos", PATH))?;
        }
        if let Some(extends_default) = table.get("extends_default") {
            settings.extends_default = extends_default.as_bool().ok_or_else(|| {
                ConfigError::malformed(format!("'{}.extends_default' should be a boolean", PATH))
            })?;
        }
        if let Some(repos) = table.get("repos") {
            let path = format!("{}.repos", PATH);
            settings.repos = list(repos, &path)?
                .iter()
                .enumerate()
                .map(|(i, repo)| tracked_repo(repo, &format!("{}[{}]", path, i)))
                .collect::<Result<_, _>>()?;
        }
        Ok(settings)
    }

    /// The built-in tracked repositories
    pub fn default_repos() -> Vec<TrackedRepo> {
        DEFAULT_REPOS
            .iter()
            .map(|(repo, hook, deps)| TrackedRepo {
                repo: repo.to_string(),
                hooks: vec![TrackedHook {
                    id: hook.to_string(),
                    additional_dependencies: deps.iter().map(|d| d.to_string()).collect(),
                }],
            })
            .collect()
    }

    /// Built-in repositories (when extended) followed by user repositories
    pub fn tracked_repos(&self) -> Vec<TrackedRepo> {
        let mut repos = if self.extends_default {
            Self::default_repos()
        } else {
            Vec::new()
        };
        repos.extend(self.repos.iter().cloned());
        repos
    }

    /// Index of every tracked (repo, hook) pair
    pub fn repo_hook_index(&self) -> RepoHookIndex {
        let mut index = RepoHookIndex::new();
        for repo in self.tracked_repos() {
            for hook in repo.hooks {
                index.insert(&repo.repo, hook.id);
            }
        }
        index
    }
}

fn list<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], ConfigError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ConfigError::malformed(format!("'{}' should be a list", path)))
}

fn string<'a>(value: &'a Value, path: &str) -> Result<&'a str, ConfigError> {
    value
        .as_str()
        .ok_or_else(|| ConfigError::malformed(format!("'{}' was not a string", path)))
}

fn string_list(value: &Value, path: &str) -> Result<Vec<String>, ConfigError> {
    list(value, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| string(item, &format!("{}[{}]", path, i)).map(str::to_string))
        .collect()
}

fn required<'a>(table: &'a Value, key: &str, path: &str) -> Result<&'a Value, ConfigError> {
    table
        .get(key)
        .ok_or_else(|| ConfigError::malformed(format!("'{}' is missing '{}'", path, key)))
}

fn tracked_repo(value: &Value, path: &str) -> Result<TrackedRepo, ConfigError> {
    if !value.is_table() {
        return Err(ConfigError::malformed(format!("'{}' was not a table", path)));
    }
    let repo = string(required(value, "repo", path)?, &format!("{}.repo", path))?;

    let hooks_path = format!("{}.hooks", path);
    let hooks = list(required(value, "hooks", path)?, &hooks_path)?
        .iter()
        .enumerate()
        .map(|(i, hook)| tracked_hook(hook, &format!("{}[{}]", hooks_path, i)))
        .collect::<Result<_, _>>()?;

    Ok(TrackedRepo {
        repo: repo.to_string(),
        hooks,
    })
}

fn tracked_hook(value: &Value, path: &str) -> Result<TrackedHook, ConfigError> {
    if !value.is_table() {
        return Err(ConfigError::malformed(format!("'{}' was not a table", path)));
    }
    let id = string(required(value, "id", path)?, &format!("{}.id", path))?;
    let additional_dependencies = match value.get("additional_dependencies") {
        Some(deps) => string_list(deps, &format!("{}.additional_dependencies", path))?,
        None => Vec::new(),
    };

    Ok(TrackedHook {
        id: id.to_string(),
        additional_dependencies,
    })
}
