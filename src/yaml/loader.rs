//! tree-sitter backed YAML loader
//!
//! Lowers the tree-sitter concrete syntax tree into a `YamlValue`, attaching
//! source positions to every string scalar.
//!
//! YAML tree structure for a pre-commit hook entry:
//! ```text
//! block_sequence_item             <- "- id: flake8"
//!   block_node
//!     block_mapping
//!       block_mapping_pair        <- "additional_dependencies: ..."
//!         flow_node               <- key
//!         block_node
//!           block_sequence
//!             block_sequence_item
//!               flow_node
//!                 single_quote_scalar   <- TARGET: 'flake8-bugbear==23.0.0'
//! ```

use super::scalar::{
    decode_block, decode_double_quoted, decode_single_quoted, fold_plain, resolve_plain,
    PlainKind,
};
use super::{LocatedString, ScalarStyle, YamlValue};
use crate::error::DocumentError;
use std::collections::HashMap;
use tracing::{debug, warn};
use tree_sitter::Node;

/// Parses YAML text into a located value tree
///
/// Line terminators are normalised to `\n` before parsing so that rows match
/// the lines produced by `split_lines_keep_ends`, whatever convention the
/// file uses. Any syntax error fails the whole parse.
pub fn load_document(text: &str) -> Result<YamlValue, DocumentError> {
    let source = normalize_newlines(text);

    let mut parser = tree_sitter::Parser::new();
    let language = tree_sitter_yaml::LANGUAGE;
    parser.set_language(&language.into()).map_err(|e| {
        warn!("Failed to set YAML language for tree-sitter: {}", e);
        DocumentError::Parse {
            line: 0,
            column: 0,
            message: format!("failed to load YAML grammar: {}", e),
        }
    })?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| DocumentError::Parse {
            line: 0,
            column: 0,
            message: "parser produced no syntax tree".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        let node = first_error(root).unwrap_or(root);
        let position = node.start_position();
        let message = if node.is_missing() {
            format!("missing '{}'", node.kind())
        } else {
            "invalid syntax".to_string()
        };
        return Err(DocumentError::Parse {
            line: position.row,
            column: position.column,
            message,
        });
    }

    let mut builder = Builder {
        source: &source,
        anchors: HashMap::new(),
    };
    Ok(builder.stream(root))
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

struct Builder<'s> {
    source: &'s str,
    anchors: HashMap<String, YamlValue>,
}

impl Builder<'_> {
    fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }

    /// Attaches a location, noting whether the source reads exactly as `value`
    /// from there on
    fn located(
        &self,
        value: String,
        line: usize,
        column: usize,
        style: ScalarStyle,
    ) -> LocatedString {
        let verbatim = !value.contains('\n')
            && self
                .source
                .split('\n')
                .nth(line)
                .and_then(|text| text.get(column..column + value.len()))
                == Some(value.as_str());
        LocatedString::new(value, line, column, style).with_verbatim(verbatim)
    }

    fn stream(&mut self, node: Node<'_>) -> YamlValue {
        for child in named_children(node) {
            match child.kind() {
                "document" => return self.document(child),
                "block_node" | "flow_node" => return self.value(child),
                _ => {}
            }
        }
        YamlValue::Null
    }

    fn document(&mut self, node: Node<'_>) -> YamlValue {
        named_children(node)
            .into_iter()
            .find(|child| matches!(child.kind(), "block_node" | "flow_node"))
            .map(|child| self.value(child))
            .unwrap_or(YamlValue::Null)
    }

    fn value(&mut self, node: Node<'_>) -> YamlValue {
        match node.kind() {
            "block_node" | "flow_node" => self.wrapped(node),
            "block_mapping" | "flow_mapping" => {
                let mut entries = Vec::new();
                for child in named_children(node) {
                    match child.kind() {
                        "block_mapping_pair" | "flow_pair" => entries.push(self.pair(child)),
                        // `{a, b}` shorthand: keys with null values
                        "flow_node" => {
                            entries.push((self.value(child).key_text(), YamlValue::Null))
                        }
                        _ => {}
                    }
                }
                YamlValue::Mapping(entries)
            }
            "block_sequence" => {
                let mut items = Vec::new();
                for child in named_children(node) {
                    if child.kind() == "block_sequence_item" {
                        let item = named_children(child)
                            .into_iter()
                            .find(|n| matches!(n.kind(), "block_node" | "flow_node"))
                            .map(|n| self.value(n))
                            .unwrap_or(YamlValue::Null);
                        items.push(item);
                    }
                }
                YamlValue::Sequence(items)
            }
            "flow_sequence" => {
                let mut items = Vec::new();
                for child in named_children(node) {
                    match child.kind() {
                        "flow_node" => items.push(self.value(child)),
                        "flow_pair" => items.push(YamlValue::Mapping(vec![self.pair(child)])),
                        _ => {}
                    }
                }
                YamlValue::Sequence(items)
            }
            "block_mapping_pair" | "flow_pair" => YamlValue::Mapping(vec![self.pair(node)]),
            "plain_scalar" | "string_scalar" | "integer_scalar" | "float_scalar"
            | "boolean_scalar" | "null_scalar" => self.plain(node),
            "single_quote_scalar" => self.quoted(node, ScalarStyle::SingleQuoted),
            "double_quote_scalar" => self.quoted(node, ScalarStyle::DoubleQuoted),
            "block_scalar" => self.block(node),
            "alias" => self.alias(node),
            other => {
                debug!("ignoring YAML node of kind {}", other);
                YamlValue::Null
            }
        }
    }

    /// block_node / flow_node: optional anchor and tag, then the content
    fn wrapped(&mut self, node: Node<'_>) -> YamlValue {
        let mut anchor = None;
        let mut value = YamlValue::Null;
        for child in named_children(node) {
            match child.kind() {
                "anchor" => anchor = Some(self.text(child).trim_start_matches('&').to_string()),
                "tag" | "comment" => {}
                _ => value = self.value(child),
            }
        }
        if let Some(name) = anchor {
            self.anchors.insert(name, value.clone());
        }
        value
    }

    fn pair(&mut self, node: Node<'_>) -> (String, YamlValue) {
        let key = node
            .child_by_field_name("key")
            .map(|k| self.value(k).key_text())
            .unwrap_or_default();
        let value = node
            .child_by_field_name("value")
            .map(|v| self.value(v))
            .unwrap_or(YamlValue::Null);
        (key, value)
    }

    fn plain(&self, node: Node<'_>) -> YamlValue {
        let value = fold_plain(self.text(node));
        match resolve_plain(&value) {
            PlainKind::Null => YamlValue::Null,
            PlainKind::Bool(b) => YamlValue::Bool(b),
            PlainKind::Number => YamlValue::Number(value),
            PlainKind::String => {
                let start = node.start_position();
                YamlValue::String(self.located(value, start.row, start.column, ScalarStyle::Plain))
            }
        }
    }

    fn quoted(&self, node: Node<'_>, style: ScalarStyle) -> YamlValue {
        let raw = self.text(node);
        let inner = raw.get(1..raw.len().saturating_sub(1)).unwrap_or("");
        let value = match style {
            ScalarStyle::SingleQuoted => decode_single_quoted(inner),
            _ => decode_double_quoted(inner),
        };
        let start = node.start_position();
        // point past the opening quote
        YamlValue::String(self.located(value, start.row, start.column + 1, style))
    }

    fn block(&self, node: Node<'_>) -> YamlValue {
        let block = decode_block(self.text(node));
        let style = if block.literal {
            ScalarStyle::BlockLiteral
        } else {
            ScalarStyle::BlockFolded
        };
        YamlValue::String(self.located(
            block.value,
            node.start_position().row + block.first_content_line,
            block.indent,
            style,
        ))
    }

    fn alias(&self, node: Node<'_>) -> YamlValue {
        let name = self.text(node).trim_start_matches('*');
        match self.anchors.get(name) {
            Some(value) => value.clone(),
            None => {
                warn!("YAML alias '*{}' refers to an unknown anchor", name);
                YamlValue::Null
            }
        }
    }
}
