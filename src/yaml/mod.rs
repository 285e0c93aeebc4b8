//! YAML document model with source locations
//!
//! This module provides:
//! - LocatedString: a string scalar plus its (line, column) and quoting style
//! - YamlValue: an ordered value tree built from a tree-sitter parse
//! - load_document: text to YamlValue, failing on any syntax error

mod loader;
mod located;
mod scalar;
mod value;

pub use loader::load_document;
pub use located::{LocatedString, ScalarStyle};
pub use value::YamlValue;
