//! Pre-commit config patching
//!
//! This module provides functionality to:
//! - Split file content into lines that keep their own terminators
//! - Apply located edits with per-line offset tracking
//! - Read and write the config file

mod lines;
mod patcher;
mod writer;

pub use lines::{split_lines_keep_ends, strip_terminator, LineEnding};
pub use patcher::{apply_edits, patch_lines};
pub use writer::{read_manifest, write_manifest, ManifestWriter, WriteResult};

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = ".pre-commit-config.yaml";
