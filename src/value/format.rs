//! Input formats understood by [`Value::parse`](super::Value::parse).

use std::path::Path;

use strum::{Display, EnumIter, EnumString};

use super::ValueError;

/// Serialized input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Format {
    Json,
    Toml,
    #[strum(to_string = "yaml", serialize = "yml")]
    Yaml,
}

impl Format {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ValueError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            _ => Err(ValueError::UnknownFormat(path.to_path_buf())),
        }
    }
}
