//! CLI command definitions and output helpers.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use reimage::value::{Format, Value};

/// Path argument that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Whether `path` names standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Serialize `value` as pretty or compact JSON.
pub fn render_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("failed to serialize output")
}

/// Read a structured input file, or stdin for `-`.
///
/// Stdin defaults to JSON when no format is given.
pub fn read_input(path: &Path, format: Option<Format>) -> Result<Value> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Value::parse(&text, format.unwrap_or(Format::Json))
            .context("failed to parse stdin");
    }
    Value::from_file(path, format).with_context(|| format!("failed to load {}", path.display()))
}
