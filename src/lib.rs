//! upadup - pre-commit additional_dependencies updater library
//!
//! This library keeps the `additional_dependencies` of tracked pre-commit
//! hooks up to date:
//! - `name==version` pins are bumped to the latest PyPI release
//! - `github.com/owner/repo@tag` references are moved to the latest release tag
//!
//! Every edit is applied in place, so quoting, comments and newlines of the
//! config survive untouched.

pub mod cli;
pub mod command;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod update;
pub mod yaml;
