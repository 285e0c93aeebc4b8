//! Located text replacements

use crate::yaml::LocatedString;

/// Replace the text of `original` with `replacement`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub original: LocatedString,
    pub replacement: String,
}

impl Edit {
    pub fn new(original: LocatedString, replacement: impl Into<String>) -> Self {
        Self {
            original,
            replacement: replacement.into(),
        }
    }

    /// Length change this edit applies to its line, in bytes
    pub fn delta(&self) -> isize {
        self.replacement.len() as isize - self.original.as_str().len() as isize
    }
}

/// Orders edits by (line, column) so same-line edits apply left to right
///
/// A span can be reached more than once through YAML aliases; only the
/// first edit of each span is kept.
pub fn sort_edits(edits: &mut Vec<Edit>) {
    edits.sort_by_key(|edit| edit.original.position());
    edits.dedup_by_key(|edit| edit.original.position());
}
