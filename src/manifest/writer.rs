//! Pre-commit config reading and writing
//!
//! This module provides:
//! - Reading the config verbatim (line terminators untouched)
//! - ManifestWriter for applying edits, or only computing the result in
//!   check mode

use crate::domain::Edit;
use crate::error::{AppError, DocumentError};
use crate::manifest::patcher::apply_edits;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of applying edits to the config file
#[derive(Debug)]
pub struct WriteResult {
    /// Path to the config file
    pub path: PathBuf,
    /// Number of edits applied
    pub updates_applied: usize,
    /// Whether the file was actually modified
    pub file_modified: bool,
    /// Content before patching
    pub original: String,
    /// Content after patching
    pub updated: String,
}

impl WriteResult {
    /// Returns true if the patched content differs from the original
    pub fn has_changes(&self) -> bool {
        self.original != self.updated
    }
}

/// Writer that patches the config file
pub struct ManifestWriter {
    /// Check mode never touches the file
    check: bool,
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(check: bool) -> Self {
        Self { check }
    }

    /// Check if this writer is in check mode
    pub fn is_check(&self) -> bool {
        self.check
    }

    /// Applies `edits` to `original` and writes the result to `path` unless
    /// in check mode or nothing changed
    pub fn apply(
        &self,
        path: &Path,
        original: String,
        edits: &[Edit],
    ) -> Result<WriteResult, AppError> {
        let updated = apply_edits(&original, edits)?;
        let mut result = WriteResult {
            path: path.to_path_buf(),
            updates_applied: edits.len(),
            file_modified: false,
            original,
            updated,
        };

        if result.has_changes() && !self.check {
            write_manifest(path, &result.updated)?;
            result.file_modified = true;
            debug!(path = %path.display(), edits = edits.len(), "wrote config");
        }

        Ok(result)
    }
}

/// Read the config file content
pub fn read_manifest(path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DocumentError::not_found(path),
        _ => DocumentError::read_error(path, e),
    })
}

/// Write content to the config file
pub fn write_manifest(path: &Path, content: &str) -> Result<(), DocumentError> {
    fs::write(path, content).map_err(|e| DocumentError::write_error(path, e))
}
