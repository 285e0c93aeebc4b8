//! Scalar decoding: quoting, escapes, line folding and block scalars

use regex::Regex;
use std::sync::LazyLock;

static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-+]?[0-9]+|0o[0-7]+|0x[0-9a-fA-F]+)$").unwrap());
static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)(?:[eE][-+]?[0-9]+)?|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
    )
    .unwrap()
});

/// Type of a plain scalar under the YAML 1.2 core schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlainKind {
    Null,
    Bool(bool),
    Number,
    String,
}

/// Resolves the core-schema type of an already folded plain scalar
pub(crate) fn resolve_plain(text: &str) -> PlainKind {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => PlainKind::Null,
        "true" | "True" | "TRUE" => PlainKind::Bool(true),
        "false" | "False" | "FALSE" => PlainKind::Bool(false),
        _ if INT_RE.is_match(text) || FLOAT_RE.is_match(text) => PlainKind::Number,
        _ => PlainKind::String,
    }
}

/// Folds a multi-line plain scalar: single breaks become spaces, blank lines
/// become newlines
pub(crate) fn fold_plain(raw: &str) -> String {
    fold_lines(raw, |line, out| out.push_str(line))
}

/// Decodes the content of a single-quoted scalar (quotes already removed)
pub(crate) fn decode_single_quoted(inner: &str) -> String {
    fold_lines(inner, |line, out| out.push_str(&line.replace("''", "'")))
}

/// Decodes the content of a double-quoted scalar (quotes already removed)
pub(crate) fn decode_double_quoted(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\n') => {
                    // escaped line break: join without a space
                    while matches!(chars.peek(), Some(' ') | Some('\t')) {
                        chars.next();
                    }
                }
                Some('x') => push_hex_escape(&mut out, &mut chars, 2, 'x'),
                Some('u') => push_hex_escape(&mut out, &mut chars, 4, 'u'),
                Some('U') => push_hex_escape(&mut out, &mut chars, 8, 'U'),
                Some(escaped) => match simple_escape(escaped) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push(escaped);
                    }
                },
                None => out.push('\\'),
            },
            '\n' => {
                while out.ends_with([' ', '\t']) {
                    out.pop();
                }
                let mut breaks = 0;
                loop {
                    while matches!(chars.peek(), Some(' ') | Some('\t')) {
                        chars.next();
                    }
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                        breaks += 1;
                    } else {
                        break;
                    }
                }
                push_folded_break(&mut out, breaks);
            }
            other => out.push(other),
        }
    }

    out
}

fn simple_escape(c: char) -> Option<char> {
    let decoded = match c {
        '0' => '\0',
        'a' => '\x07',
        'b' => '\x08',
        't' | '\t' => '\t',
        'n' => '\n',
        'v' => '\x0b',
        'f' => '\x0c',
        'r' => '\r',
        'e' => '\x1b',
        ' ' => ' ',
        '"' => '"',
        '/' => '/',
        '\\' => '\\',
        'N' => '\u{85}',
        '_' => '\u{a0}',
        'L' => '\u{2028}',
        'P' => '\u{2029}',
        _ => return None,
    };
    Some(decoded)
}

fn push_hex_escape(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    width: usize,
    marker: char,
) {
    let digits: String = chars.by_ref().take(width).collect();
    match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
        Some(decoded) if digits.len() == width => out.push(decoded),
        _ => {
            out.push('\\');
            out.push(marker);
            out.push_str(&digits);
        }
    }
}

fn push_folded_break(out: &mut String, breaks: usize) {
    if breaks == 0 {
        out.push(' ');
    } else {
        out.extend(std::iter::repeat_n('\n', breaks));
    }
}

/// Shared line folding for plain and single-quoted scalars
fn fold_lines(raw: &str, mut push_line: impl FnMut(&str, &mut String)) -> String {
    let mut lines = raw.split('\n');
    let mut out = String::with_capacity(raw.len());

    let Some(first) = lines.next() else {
        return out;
    };
    let mut rest = lines.peekable();
    if rest.peek().is_none() {
        push_line(first, &mut out);
        return out;
    }
    push_line(first.trim_end_matches([' ', '\t']), &mut out);

    let mut breaks = 0;
    let mut pending = false;
    for line in rest {
        pending = true;
        let trimmed = line.trim_matches([' ', '\t']);
        if trimmed.is_empty() {
            breaks += 1;
            continue;
        }
        push_folded_break(&mut out, breaks);
        push_line(trimmed, &mut out);
        breaks = 0;
        pending = false;
    }
    if pending {
        // the last line only held the closing quote
        push_folded_break(&mut out, breaks.saturating_sub(1));
    }

    out
}

/// Chomping indicator of a block scalar header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chomping {
    Strip,
    Clip,
    Keep,
}

/// A decoded block scalar
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockScalar {
    pub value: String,
    /// Lines between the header and the first content line, plus one
    pub first_content_line: usize,
    /// Indentation of the content
    pub indent: usize,
    pub literal: bool,
}

/// Decodes a block scalar from its full source text, header included
pub(crate) fn decode_block(raw: &str) -> BlockScalar {
    let mut lines = raw.split('\n');
    let header = lines.next().unwrap_or("");
    let literal = header.starts_with('|');
    let chomping = header
        .chars()
        .skip(1)
        .take_while(|c| !c.is_whitespace())
        .fold(Chomping::Clip, |acc, c| match c {
            '-' => Chomping::Strip,
            '+' => Chomping::Keep,
            _ => acc,
        });

    let body: Vec<&str> = lines.collect();
    let Some(first_content) = body.iter().position(|l| !l.trim().is_empty()) else {
        return BlockScalar {
            value: String::new(),
            first_content_line: 1,
            indent: 0,
            literal,
        };
    };
    let indent = body[first_content].len() - body[first_content].trim_start_matches(' ').len();

    let mut content: Vec<&str> = body
        .iter()
        .map(|line| line.get(indent..).unwrap_or(""))
        .collect();
    let mut trailing_blank = 0;
    while content.last().is_some_and(|l| l.trim().is_empty()) {
        content.pop();
        trailing_blank += 1;
    }

    let mut value = if literal {
        content.join("\n")
    } else {
        fold_block(&content)
    };
    match chomping {
        Chomping::Strip => {}
        Chomping::Clip => value.push('\n'),
        Chomping::Keep => value.extend(std::iter::repeat_n('\n', trailing_blank.max(1))),
    }

    BlockScalar {
        value,
        first_content_line: first_content + 1,
        indent,
        literal,
    }
}

fn fold_block(content: &[&str]) -> String {
    let mut out = String::new();
    let mut breaks = 0;
    let mut prev_more_indented = false;
    let mut started = false;

    for line in content {
        if line.is_empty() {
            breaks += 1;
            continue;
        }
        let more_indented = line.starts_with([' ', '\t']);
        if started {
            if breaks > 0 {
                out.extend(std::iter::repeat_n('\n', breaks));
            } else if more_indented || prev_more_indented {
                out.push('\n');
            } else {
                out.push(' ');
            }
        } else {
            out.extend(std::iter::repeat_n('\n', breaks));
        }
        out.push_str(line);
        started = true;
        breaks = 0;
        prev_more_indented = more_indented;
    }

    out
}
