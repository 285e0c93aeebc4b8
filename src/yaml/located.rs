//! Located string scalars

use std::fmt;

/// The style a string scalar was written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle {
    /// Unquoted (`foo==1.0`)
    Plain,
    /// Single-quoted (`'foo==1.0'`)
    SingleQuoted,
    /// Double-quoted (`"foo==1.0"`)
    DoubleQuoted,
    /// Block literal (`|`)
    BlockLiteral,
    /// Block folded (`>`)
    BlockFolded,
}

/// A string value annotated with the position of its first content character
///
/// `line` and `column` are 0-based. The column is a byte offset inside the
/// line and already skips an opening quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatedString {
    value: String,
    line: usize,
    column: usize,
    style: ScalarStyle,
    verbatim: bool,
}

impl LocatedString {
    /// Creates a new LocatedString
    pub fn new(value: impl Into<String>, line: usize, column: usize, style: ScalarStyle) -> Self {
        Self {
            value: value.into(),
            line,
            column,
            style,
            verbatim: true,
        }
    }

    /// Marks whether the source text at the location spells out the value
    /// byte for byte
    pub fn with_verbatim(mut self, verbatim: bool) -> Self {
        self.verbatim = verbatim;
        self
    }

    /// False for values written with escapes or spread over several lines;
    /// those cannot be replaced in place
    pub fn is_verbatim(&self) -> bool {
        self.verbatim
    }

    /// The decoded string value
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// 0-based line of the first content character
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based byte column of the first content character
    pub fn column(&self) -> usize {
        self.column
    }

    /// Original quoting or block style
    pub fn style(&self) -> ScalarStyle {
        self.style
    }

    /// Sort key used to order edits left-to-right, top-to-bottom
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

impl fmt::Display for LocatedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl PartialEq<str> for LocatedString {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for LocatedString {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_located_string_accessors() {
        let s = LocatedString::new("black==24.1.0", 4, 12, ScalarStyle::DoubleQuoted);
        assert_eq!(s.as_str(), "black==24.1.0");
        assert_eq!(s.line(), 4);
        assert_eq!(s.column(), 12);
        assert_eq!(s.style(), ScalarStyle::DoubleQuoted);
        assert_eq!(s.position(), (4, 12));
    }

    #[test]
    fn test_located_string_compares_with_str() {
        let s = LocatedString::new("flake8", 0, 0, ScalarStyle::Plain);
        assert_eq!(s, "flake8");
        assert_eq!(s.to_string(), "flake8");
    }

    #[test]
    fn test_located_string_is_verbatim_by_default() {
        let s = LocatedString::new("a==1", 0, 0, ScalarStyle::Plain);
        assert!(s.is_verbatim());
        assert!(!s.with_verbatim(false).is_verbatim());
    }
}
