//! Update planning and version resolution
//!
//! This module provides:
//! - Latest release tag selection by PEP 440 precedence
//! - The version resolver that routes lookups and caches results
//! - The planner that turns tracked hooks into located edits

mod planner;
mod resolver;
mod tags;

pub use planner::{HookEntry, Plan, UpdatePlanner};
pub use resolver::{TagMode, TagSources, VersionCache, VersionResolver};
pub use tags::select_latest_tag;

#[cfg(test)]
pub(crate) use resolver::tests as fakes;
