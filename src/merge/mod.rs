//! Deep merge of Structured Values.
//!
//! The merge starts from a copy of the override's entries, then stamps
//! every entry of the base back on top. It only descends when both sides
//! hold a mapping under the same key. Sequences and primitives are
//! leaves: wherever the base declares a key, the base's leaf wins.
//!
//! A top-level sequence or string takes part through its index-keyed
//! entries, so merging into `Null` yields `{"0": .., "1": ..}`.
//!
//! ```
//! use reimage::merge::merge;
//! use reimage::value::Value;
//! use serde_json::json;
//!
//! let base = Value::from(json!({"a": 1, "b": {"c": 2}}));
//! let over = Value::from(json!({"b": {"d": 3}, "e": 4}));
//!
//! let merged = merge(&base, Some(&over));
//! assert_eq!(*merged, Value::from(json!({"a": 1, "b": {"c": 2, "d": 3}, "e": 4})));
//! ```

use std::borrow::Cow;

use thiserror::Error;
use tracing::trace;

use crate::value::{Mapping, Value};

/// Errors from [`merge_bounded`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// Nested mappings went deeper than the configured limit.
    #[error("merge exceeded the maximum depth of {max_depth} at `{path}`")]
    DepthExceeded { path: String, max_depth: usize },
}

impl MergeError {
    /// Prefix the error path with the key of the enclosing mapping.
    fn under(self, key: &str) -> Self {
        match self {
            MergeError::DepthExceeded { path, max_depth } => MergeError::DepthExceeded {
                path: format!("{key}.{path}"),
                max_depth,
            },
        }
    }
}

/// Merge `over` into `base`.
///
/// An absent or `null` override returns `base` itself, borrowed. Any other
/// override produces a new mapping; see the module docs for the key-level
/// rules. Neither input is modified.
pub fn merge<'a>(base: &'a Value, over: Option<&Value>) -> Cow<'a, Value> {
    match over {
        None | Some(Value::Null) => Cow::Borrowed(base),
        Some(over) => {
            let merged = merge_unbounded(&own_entries(base), &own_entries(over));
            Cow::Owned(Value::Mapping(merged))
        }
    }
}

/// Like [`merge`], but refuses to descend more than `max_depth` nested
/// mappings below the top level.
///
/// A `max_depth` of zero still merges the top-level keys; it only rejects
/// inputs that would need to recurse.
pub fn merge_bounded<'a>(
    base: &'a Value,
    over: Option<&Value>,
    max_depth: usize,
) -> Result<Cow<'a, Value>, MergeError> {
    let over = match over {
        None | Some(Value::Null) => return Ok(Cow::Borrowed(base)),
        Some(over) => over,
    };
    let merged = merge_level(&own_entries(base), &own_entries(over), 0, max_depth)?;
    Ok(Cow::Owned(Value::Mapping(merged)))
}

/// Merge two mappings directly.
pub fn merge_mappings(base: &Mapping, over: &Mapping) -> Mapping {
    merge_unbounded(base, over)
}

/// Fold layers ordered from highest to lowest priority.
///
/// Each layer acts as the override for everything above it, so values in
/// earlier layers win and later layers only fill in missing keys. No
/// layers yields `Null`.
pub fn merge_all<'a, I>(layers: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut layers = layers.into_iter();
    let Some(first) = layers.next() else {
        return Value::Null;
    };
    layers.fold(first.clone(), |acc, next| merge(&acc, Some(next)).into_owned())
}

/// Entries a top-level input contributes to the merge.
///
/// Sequences and strings contribute one entry per element, keyed by its
/// index. Other primitives contribute nothing.
fn own_entries(value: &Value) -> Cow<'_, Mapping> {
    match value {
        Value::Mapping(map) => Cow::Borrowed(map),
        Value::Sequence(items) => Cow::Owned(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.clone()))
                .collect(),
        ),
        Value::String(s) => Cow::Owned(
            s.chars()
                .enumerate()
                .map(|(i, c)| (i.to_string(), Value::String(c.to_string())))
                .collect(),
        ),
        _ => Cow::Owned(Mapping::new()),
    }
}

fn merge_unbounded(base: &Mapping, over: &Mapping) -> Mapping {
    let mut output = over.clone();
    for (key, base_value) in base {
        let merged = match (base_value, over.get(key)) {
            (Value::Mapping(b), Some(Value::Mapping(o))) => {
                trace!(key = %key, "merging nested mapping");
                Value::Mapping(merge_unbounded(b, o))
            }
            _ => base_value.clone(),
        };
        output.insert(key.clone(), merged);
    }
    output
}

fn merge_level(
    base: &Mapping,
    over: &Mapping,
    depth: usize,
    max_depth: usize,
) -> Result<Mapping, MergeError> {
    let mut output = over.clone();
    for (key, base_value) in base {
        let merged = match (base_value, over.get(key)) {
            (Value::Mapping(b), Some(Value::Mapping(o))) => {
                if depth >= max_depth {
                    return Err(MergeError::DepthExceeded {
                        path: key.clone(),
                        max_depth,
                    });
                }
                trace!(key = %key, depth = depth + 1, "merging nested mapping");
                let nested = merge_level(b, o, depth + 1, max_depth).map_err(|e| e.under(key))?;
                Value::Mapping(nested)
            }
            _ => base_value.clone(),
        };
        output.insert(key.clone(), merged);
    }

    Ok(output)
}
