//! Unified diff rendering
//!
//! Patching never adds or removes lines, so old and new content pair up
//! line by line and hunks are built from the lines that differ.

use crate::manifest::{split_lines_keep_ends, strip_terminator};
use std::fmt::Write;

/// Lines of context around each change, as in `diff -u`
const DEFAULT_CONTEXT: usize = 3;

/// Unified diff formatter for check mode
pub struct DiffFormatter {
    context: usize,
}

impl Default for DiffFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT)
    }
}

impl DiffFormatter {
    /// Create a diff formatter with `context` lines around each change
    pub fn new(context: usize) -> Self {
        Self { context }
    }

    /// Renders a diff of `old` against `new`, labelling both sides `name`
    ///
    /// Returns an empty string when the contents are equal.
    pub fn render(&self, name: &str, old: &str, new: &str) -> String {
        if old == new {
            return String::new();
        }
        let old_lines: Vec<&str> = split_lines_keep_ends(old)
            .into_iter()
            .map(strip_terminator)
            .collect();
        let new_lines: Vec<&str> = split_lines_keep_ends(new)
            .into_iter()
            .map(strip_terminator)
            .collect();

        let mut out = String::new();
        let _ = writeln!(out, "--- {}", name);
        let _ = writeln!(out, "+++ {}", name);

        if old_lines.len() != new_lines.len() {
            write_replacement(&mut out, &old_lines, &new_lines);
            return out;
        }

        for (start, end) in self.hunks(&old_lines, &new_lines) {
            let _ = writeln!(
                out,
                "@@ -{} +{} @@",
                format_range(start, end - start),
                format_range(start, end - start)
            );
            let mut i = start;
            while i < end {
                if old_lines[i] == new_lines[i] {
                    let _ = writeln!(out, " {}", old_lines[i]);
                    i += 1;
                    continue;
                }
                // a run of changed lines is shown as all removals, then all additions
                let run_end = (i..end)
                    .find(|&j| old_lines[j] == new_lines[j])
                    .unwrap_or(end);
                for line in &old_lines[i..run_end] {
                    let _ = writeln!(out, "-{}", line);
                }
                for line in &new_lines[i..run_end] {
                    let _ = writeln!(out, "+{}", line);
                }
                i = run_end;
            }
        }
        out
    }

    /// Line ranges `[start, end)` covering every change plus context
    fn hunks(&self, old_lines: &[&str], new_lines: &[&str]) -> Vec<(usize, usize)> {
        let len = old_lines.len();
        let mut hunks: Vec<(usize, usize)> = Vec::new();
        for i in (0..len).filter(|&i| old_lines[i] != new_lines[i]) {
            let start = i.saturating_sub(self.context);
            let end = (i + 1 + self.context).min(len);
            match hunks.last_mut() {
                Some(last) if start <= last.1 => last.1 = end,
                _ => hunks.push((start, end)),
            }
        }
        hunks
    }
}

/// Writes a single hunk replacing all of `old` with all of `new`
fn write_replacement(out: &mut String, old: &[&str], new: &[&str]) {
    let _ = writeln!(
        out,
        "@@ -{} +{} @@",
        format_range(0, old.len()),
        format_range(0, new.len())
    );
    for line in old {
        let _ = writeln!(out, "-{}", line);
    }
    for line in new {
        let _ = writeln!(out, "+{}", line);
    }
}

/// `start,length` in 1-based form; length 1 is implied, empty ranges point
/// at the preceding line
fn format_range(start: usize, length: usize) -> String {
    match length {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_content_renders_nothing() {
        let formatter = DiffFormatter::default();
        assert_eq!(formatter.render("f", "a\nb\n", "a\nb\n"), "");
    }

    #[test]
    fn test_single_change_with_context() {
        let old = "1\n2\n3\n4\n5\n6\n7\n8\n9\n";
        let new = "1\n2\n3\n4\nfive\n6\n7\n8\n9\n";
        let diff = DiffFormatter::default().render(".pre-commit-config.yaml", old, new);
        assert_eq!(
            diff,
            "--- .pre-commit-config.yaml\n\
             +++ .pre-commit-config.yaml\n\
             @@ -2,7 +2,7 @@\n \
             2\n \
             3\n \
             4\n\
             -5\n\
             +five\n \
             6\n \
             7\n \
             8\n"
        );
    }

    #[test]
    fn test_nearby_changes_share_a_hunk() {
        let old = "a\nb\nc\nd\ne\n";
        let new = "A\nb\nc\nd\nE\n";
        let diff = DiffFormatter::new(2).render("f", old, new);
        assert_eq!(
            diff,
            "--- f\n+++ f\n@@ -1,5 +1,5 @@\n-a\n+A\n b\n c\n d\n-e\n+E\n"
        );
    }

    #[test]
    fn test_distant_changes_get_separate_hunks() {
        let old: String = (0..20).map(|i| format!("line{}\n", i)).collect();
        let new = old.replace("line1\n", "LINE1\n").replace("line18\n", "LINE18\n");
        let diff = DiffFormatter::default().render("f", &old, &new);
        assert!(diff.contains("@@ -1,5 +1,5 @@\n"));
        assert!(diff.contains("@@ -16,5 +16,5 @@\n"));
    }

    #[test]
    fn test_crlf_terminators_are_not_shown() {
        let diff = DiffFormatter::default().render("f", "x==1\r\n", "x==2\r\n");
        assert_eq!(diff, "--- f\n+++ f\n@@ -1 +1 @@\n-x==1\n+x==2\n");
    }

    #[test]
    fn test_line_count_change_falls_back_to_one_hunk() {
        let diff = DiffFormatter::default().render("f", "a\n", "a\nb\n");
        assert_eq!(diff, "--- f\n+++ f\n@@ -1 +1,2 @@\n-a\n+a\n+b\n");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range(0, 1), "1");
        assert_eq!(format_range(4, 7), "5,7");
        assert_eq!(format_range(3, 0), "3,0");
    }
}
