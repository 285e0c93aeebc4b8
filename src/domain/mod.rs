//! Core domain models for upadup
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependency pin specifiers and their comparators
//! - Dependency classification (index-backed pins vs. tag-backed references)
//! - Edits produced by planning and consumed by patching
//! - Per-hook reports
//! - The set of tracked repository hooks

mod dependency;
mod edit;
mod report;
mod specifier;
mod tracked;

pub use dependency::{normalize_package_name, normalize_repo, DependencyKind, TaggedReference};
pub use edit::{sort_edits, Edit};
pub use report::{HookReport, SkippedDependency, UpdateSummary};
pub use specifier::{parse_specifier, Comparator, ParsedSpecifier};
pub use tracked::RepoHookIndex;
