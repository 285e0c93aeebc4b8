//! Line splitting that keeps terminators

/// Newline convention of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// First terminator found in `text`, or the platform default
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        for (i, byte) in bytes.iter().enumerate() {
            match byte {
                b'\n' => return LineEnding::Lf,
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => return LineEnding::CrLf,
                b'\r' => return LineEnding::Cr,
                _ => {}
            }
        }
        Self::platform()
    }

    pub fn platform() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }
}

/// Splits on `\r\n`, `\r` and `\n`; every line keeps its own terminator
///
/// Concatenating the result gives back `text`. Line indices match the rows
/// reported by the YAML loader.
pub fn split_lines_keep_ends(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                lines.push(&text[start..i + 2]);
                i += 2;
                start = i;
            }
            b'\r' | b'\n' => {
                lines.push(&text[start..i + 1]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// `line` without its terminator
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}
