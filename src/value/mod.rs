//! Structured Values: the untyped tree that deep merges operate on.
//!
//! A [`Value`] is a primitive, an ordered sequence, or a mapping from
//! string keys to further values. The node kind is fixed when the value is
//! built, so consumers match on the variant instead of probing types.
//! Mappings are flat: a key either is declared on the mapping or it is
//! not, there is no inherited lookup.

pub mod convert;
pub mod format;

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

pub use format::Format;

/// Insertion-ordered mapping of keys to values.
///
/// Equality ignores key order.
pub type Mapping = IndexMap<String, Value>;

/// Errors raised while reading or parsing structured input.
#[derive(Error, Debug)]
pub enum ValueError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("cannot infer the format of {}: expected .json, .toml, .yaml or .yml", .0.display())]
    UnknownFormat(PathBuf),
}

/// Coarse node kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Primitive,
    Sequence,
    Mapping,
}

/// An untyped tree of primitives, sequences and mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

impl Value {
    /// An empty mapping.
    pub fn mapping() -> Self {
        Value::Mapping(Mapping::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Kind::Primitive,
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Mapping(_))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Look up a key declared directly on this mapping.
    ///
    /// Returns `None` for non-mappings.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Parse `text` in the given format.
    pub fn parse(text: &str, format: Format) -> Result<Self, ValueError> {
        let value = match format {
            Format::Json => serde_json::from_str::<serde_json::Value>(text)?.into(),
            Format::Toml => toml::from_str::<toml::Table>(text)?.into(),
            Format::Yaml => serde_yaml_ng::from_str::<serde_yaml_ng::Value>(text)?.into(),
        };
        Ok(value)
    }

    /// Read and parse a file.
    ///
    /// When `format` is `None` it is inferred from the file extension.
    pub fn from_file(path: &Path, format: Option<Format>) -> Result<Self, ValueError> {
        let format = match format {
            Some(f) => f,
            None => Format::from_path(path)?,
        };
        let content = std::fs::read_to_string(path).map_err(|e| ValueError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, format)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn kind_classifies_variants() {
        assert_eq!(Value::Null.kind(), Kind::Primitive);
        assert_eq!(Value::from("x").kind(), Kind::Primitive);
        assert_eq!(Value::from(json!([1, 2])).kind(), Kind::Sequence);
        assert_eq!(Value::mapping().kind(), Kind::Mapping);
        assert_eq!(Kind::Mapping.to_string(), "mapping");
    }

    #[test]
    fn get_only_looks_at_mappings() {
        let value = Value::from(json!({"a": {"b": 1}}));
        assert_eq!(value.get("a").and_then(|a| a.get("b")), Some(&Value::from(1_i64)));
        assert!(value.get("missing").is_none());
        assert!(Value::from(json!([1])).get("0").is_none());
    }

    #[test]
    fn mapping_equality_ignores_key_order() {
        let left = Value::from(json!({"a": 1, "b": 2}));
        let right = Value::from(json!({"b": 2, "a": 1}));
        assert_eq!(left, right);
    }

    #[test]
    fn parse_json() {
        let value = Value::parse(r#"{"name": "fill", "tags": ["a"]}"#, Format::Json).unwrap();
        assert_eq!(value.get("name").and_then(Value::as_str), Some("fill"));
        assert_eq!(value.get("tags").and_then(Value::as_sequence).map(<[_]>::len), Some(1));
    }

    #[test]
    fn parse_toml_nested_tables() {
        let value = Value::parse("[merge]\nmax_depth = 8\n", Format::Toml).unwrap();
        assert_eq!(value.get("merge").and_then(|m| m.get("max_depth")).and_then(Value::as_i64), Some(8));
    }

    #[test]
    fn parse_keeps_document_key_order() {
        let toml = "title = 1\ntags = 2\n\n[transformation]\na = 1\n\n[output]\nb = 2\n";
        let yaml = "title: 1\ntags: 2\ntransformation: {a: 1}\noutput: {b: 2}\n";
        let json = r#"{"title": 1, "tags": 2, "transformation": {"a": 1}, "output": {"b": 2}}"#;

        for (text, format) in [(toml, Format::Toml), (yaml, Format::Yaml), (json, Format::Json)] {
            let value = Value::parse(text, format).unwrap();
            let keys: Vec<&str> = value.as_mapping().unwrap().keys().map(String::as_str).collect();
            assert_eq!(keys, ["title", "tags", "transformation", "output"], "{format}");
        }
    }

    #[test]
    fn parse_yaml_mapping() {
        let value = Value::parse("recolor:\n  to: red\n  multiple: true\n", Format::Yaml).unwrap();
        let recolor = value.get("recolor").unwrap();
        assert_eq!(recolor.get("to").and_then(Value::as_str), Some("red"));
        assert_eq!(recolor.get("multiple").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn parse_reports_format_errors() {
        assert!(matches!(Value::parse("{", Format::Json), Err(ValueError::Json(_))));
        assert!(matches!(Value::parse("a = ", Format::Toml), Err(ValueError::Toml(_))));
    }

    #[test]
    fn display_is_compact_json() {
        let value = Value::from(json!({"a": [1, true, null]}));
        assert_eq!(value.to_string(), r#"{"a":[1,true,null]}"#);
    }

    #[test]
    fn serde_round_trips_through_json_text() {
        let value: Value = serde_json::from_str(r#"{"a": {"b": [1, 2.5, "x"]}, "c": null}"#).unwrap();
        assert!(value.get("c").unwrap().is_null());
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"a":{"b":[1,2.5,"x"]},"c":null}"#);
    }

    #[test]
    fn from_file_infers_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layer.toml");
        std::fs::write(&path, "title = \"Sunset\"\n").unwrap();

        let value = Value::from_file(&path, None).unwrap();
        assert_eq!(value.get("title").and_then(Value::as_str), Some("Sunset"));
    }

    #[test]
    fn from_file_unknown_extension() {
        let result = Value::from_file(Path::new("/tmp/layer.ini"), None);
        assert!(matches!(result, Err(ValueError::UnknownFormat(_))));
    }

    #[test]
    fn from_file_missing() {
        let result = Value::from_file(Path::new("/tmp/reimage_missing_layer.json"), None);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
