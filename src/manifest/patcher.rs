//! Located text substitution
//!
//! Each edit replaces exactly the bytes of its located string. Several
//! edits on one line are applied left to right while a per-line offset
//! tracks how far earlier replacements shifted the rest of the line.
//! Bytes outside the edited spans, line terminators included, are never
//! touched.

use crate::domain::{sort_edits, Edit};
use crate::error::PatchError;
use crate::manifest::lines::split_lines_keep_ends;
use std::collections::HashMap;

/// Applies `edits` to `lines` in place
///
/// `edits` must already be sorted by `(line, column)`.
pub fn patch_lines(lines: &mut [String], edits: &[Edit]) -> Result<(), PatchError> {
    let line_count = lines.len();
    let mut offsets: HashMap<usize, isize> = HashMap::new();

    for edit in edits {
        let (row, column) = edit.original.position();
        let expected = edit.original.as_str();
        let line = lines.get_mut(row).ok_or(PatchError::LineOutOfRange {
            line: row,
            line_count,
        })?;

        let offset = offsets.entry(row).or_insert(0);
        let begin = column as isize + *offset;
        let found = usize::try_from(begin)
            .ok()
            .and_then(|b| line.get(b..b + expected.len()).map(|s| (b, s)));

        let begin = match found {
            Some((begin, text)) if text == expected => begin,
            other => {
                return Err(PatchError::SpanMismatch {
                    line: row,
                    column,
                    expected: expected.to_string(),
                    found: other.map(|(_, s)| s.to_string()).unwrap_or_default(),
                })
            }
        };

        line.replace_range(begin..begin + expected.len(), &edit.replacement);
        *offset += edit.delta();
    }
    Ok(())
}

/// Returns `text` with `edits` applied; edits may be in any order
pub fn apply_edits(text: &str, edits: &[Edit]) -> Result<String, PatchError> {
    let mut sorted = edits.to_vec();
    sort_edits(&mut sorted);

    let mut lines: Vec<String> = split_lines_keep_ends(text)
        .into_iter()
        .map(str::to_string)
        .collect();
    patch_lines(&mut lines, &sorted)?;
    Ok(lines.concat())
}
