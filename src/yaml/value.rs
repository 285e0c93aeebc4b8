//! YAML value tree

use super::LocatedString;

/// A parsed YAML node
///
/// Mappings keep document order. Only string scalars carry a location since
/// they are the only rewrite targets.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    Null,
    Bool(bool),
    /// Integer or float, kept as written
    Number(String),
    String(LocatedString),
    Sequence(Vec<YamlValue>),
    Mapping(Vec<(String, YamlValue)>),
}

impl YamlValue {
    /// Looks up a key in a mapping; `None` for missing keys and non-mappings
    pub fn get(&self, key: &str) -> Option<&YamlValue> {
        match self {
            YamlValue::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[YamlValue]> {
        match self {
            YamlValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_located(&self) -> Option<&LocatedString> {
        match self {
            YamlValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_located().map(LocatedString::as_str)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, YamlValue::Null)
    }

    /// Human-readable node type for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            YamlValue::Null => "null",
            YamlValue::Bool(_) => "boolean",
            YamlValue::Number(_) => "number",
            YamlValue::String(_) => "string",
            YamlValue::Sequence(_) => "sequence",
            YamlValue::Mapping(_) => "mapping",
        }
    }

    /// Renders a scalar as a mapping key
    pub(crate) fn key_text(&self) -> String {
        match self {
            YamlValue::Null => String::new(),
            YamlValue::Bool(b) => b.to_string(),
            YamlValue::Number(n) => n.clone(),
            YamlValue::String(s) => s.as_str().to_string(),
            YamlValue::Sequence(_) | YamlValue::Mapping(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::ScalarStyle;

    fn located(value: &str) -> YamlValue {
        YamlValue::String(LocatedString::new(value, 0, 0, ScalarStyle::Plain))
    }

    #[test]
    fn test_get_on_mapping() {
        let value = YamlValue::Mapping(vec![
            ("id".to_string(), located("flake8")),
            ("args".to_string(), YamlValue::Sequence(vec![])),
        ]);
        assert_eq!(value.get("id").and_then(YamlValue::as_str), Some("flake8"));
        assert!(value.get("missing").is_none());
    }

    #[test]
    fn test_get_on_non_mapping() {
        assert!(YamlValue::Null.get("id").is_none());
        assert!(located("x").get("id").is_none());
    }

    #[test]
    fn test_type_name() {
        assert_eq!(YamlValue::Null.type_name(), "null");
        assert_eq!(YamlValue::Bool(true).type_name(), "boolean");
        assert_eq!(YamlValue::Number("1".to_string()).type_name(), "number");
        assert_eq!(located("x").type_name(), "string");
        assert_eq!(YamlValue::Sequence(vec![]).type_name(), "sequence");
        assert_eq!(YamlValue::Mapping(vec![]).type_name(), "mapping");
    }

    #[test]
    fn test_key_text() {
        assert_eq!(YamlValue::Bool(false).key_text(), "false");
        assert_eq!(YamlValue::Number("3".to_string()).key_text(), "3");
        assert_eq!(located("repo").key_text(), "repo");
    }
}
