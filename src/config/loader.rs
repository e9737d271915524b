//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.reimage.toml` in the working directory
//! 4. `~/.config/reimage/config.toml` (global defaults)
//! 5. Built-in defaults
//!
//! Layers 3–5 are parsed into [`Value`]s and folded with
//! [`merge_all`], highest priority first, so a local file only needs to
//! name the keys it changes. Environment variables are applied to the
//! typed result; CLI flags are applied by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::database::DatabaseConfig;
use crate::constants;
use crate::env::Env;
use crate::merge::merge_all;
use crate::models::{AspectRatio, TransformationKind};
use crate::value::Value;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {source}")]
    Invalid { source: serde_json::Error },

    #[error(
        "database connection string is not set; configure [database] url or {}",
        constants::ENV_DATABASE_URL
    )]
    MissingDatabaseUrl,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transform: TransformConfig,
    pub merge: MergeConfig,
    pub output: OutputConfig,
    pub database: DatabaseConfig,
}

/// Defaults for the `transform` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub default_kind: Option<TransformationKind>,
    pub default_aspect_ratio: Option<AspectRatio>,
}

/// Merge limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub max_depth: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            max_depth: constants::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Output formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then the config in `work_dir`, then applies
    /// environment variable overrides.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let global = Self::global_config_path();
        Self::load_from(global.as_deref(), work_dir, env)
    }

    /// Like [`Config::load`] with an explicit global config path.
    pub fn load_from(
        global_path: Option<&Path>,
        work_dir: Option<&Path>,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        // Highest priority first.
        let mut layers = Vec::new();

        if let Some(root) = work_dir {
            let local_path = root.join(constants::CONFIG_FILENAME);
            if local_path.exists() {
                debug!(path = %local_path.display(), "loading local config");
                layers.push(Self::load_layer(&local_path)?);
            }
        }

        if let Some(path) = global_path {
            if path.exists() {
                debug!(path = %path.display(), "loading global config");
                layers.push(Self::load_layer(path)?);
            }
        }

        layers.push(Self::default_layer()?);

        let mut config = Self::from_value(merge_all(&layers))?;
        config.apply_env_vars(env);
        Ok(config)
    }

    /// Parse one config file into an untyped layer.
    fn load_layer(path: &Path) -> Result<Value, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Value::from(table))
    }

    /// The built-in defaults as an untyped layer.
    fn default_layer() -> Result<Value, ConfigError> {
        serde_json::to_value(Config::default())
            .map(Value::from)
            .map_err(|source| ConfigError::Invalid { source })
    }

    /// Deserialize a merged layer into the typed config.
    fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(serde_json::Value::from(value))
            .map_err(|source| ConfigError::Invalid { source })
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(depth) = env.parsed::<usize>(constants::ENV_MAX_DEPTH) {
            self.merge.max_depth = depth;
        }
        if let Some(url) = env.first_var(&[constants::ENV_DATABASE_URL, constants::ENV_MONGODB_URL]) {
            self.database.url = Some(url);
        }
        if let Some(name) = env.first_var(&[constants::ENV_DATABASE_NAME]) {
            self.database.name = name;
        }
    }

    /// Copy safe to print: secrets are masked.
    pub fn redacted(&self) -> Self {
        Self {
            database: self.database.redacted(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_env() -> Env {
        Env::mock(Vec::<(&str, &str)>::new())
    }

    fn write_local(dir: &Path, content: &str) {
        std::fs::write(dir.join(constants::CONFIG_FILENAME), content).unwrap();
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.merge.max_depth, 64);
        assert!(config.output.pretty);
        assert_eq!(config.database.name, "re-image.ai");
        assert!(config.transform.default_kind.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[transform]
default_kind = "recolor"
default_aspect_ratio = "9:16"

[merge]
max_depth = 8

[database]
name = "staging"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.transform.default_kind, Some(TransformationKind::Recolor));
        assert_eq!(config.transform.default_aspect_ratio, Some(AspectRatio::PhonePortrait));
        assert_eq!(config.merge.max_depth, 8);
        assert_eq!(config.database.name, "staging");
        assert!(!config.database.buffer_commands);
    }

    #[test]
    fn load_without_any_config_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(None, Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_local(dir.path(), "[output]\npretty = false\n");

        let config = Config::load_from(None, Some(dir.path()), &no_env()).unwrap();
        assert!(!config.output.pretty);
        // Untouched sections keep their defaults.
        assert_eq!(config.merge.max_depth, 64);
    }

    #[test]
    fn local_layer_wins_over_global_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        std::fs::write(
            &global,
            "[database]\nname = \"global-db\"\nbuffer_commands = true\n\n[merge]\nmax_depth = 10\n",
        )
        .unwrap();
        write_local(dir.path(), "[database]\nname = \"local-db\"\n");

        let config = Config::load_from(Some(global.as_path()), Some(dir.path()), &no_env()).unwrap();
        assert_eq!(config.database.name, "local-db");
        assert!(config.database.buffer_commands);
        assert_eq!(config.merge.max_depth, 10);
    }

    #[test]
    fn missing_global_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("absent.toml");
        let config = Config::load_from(Some(global.as_path()), None, &no_env()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        write_local(dir.path(), "not valid {{ toml");

        let result = Config::load_from(None, Some(dir.path()), &no_env());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn load_wrong_type_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write_local(dir.path(), "merge = 5\n");

        let result = Config::load_from(None, Some(dir.path()), &no_env());
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn load_layer_not_found() {
        let result = Config::load_layer(Path::new("/tmp/reimage_not_exist_config.toml"));
        assert!(result.unwrap_err().to_string().contains("read"));
    }

    #[test]
    fn global_config_path_returns_some() {
        // May be None in CI with no home dir, but shouldn't panic
        if let Some(p) = Config::global_config_path() {
            assert!(p.to_str().unwrap().contains("reimage"));
        }
    }

    #[test]
    fn env_vars_override_files() {
        let dir = tempfile::tempdir().unwrap();
        write_local(dir.path(), "[merge]\nmax_depth = 8\n");
        let env = Env::mock([
            ("REIMAGE_MAX_DEPTH", "3"),
            ("REIMAGE_DATABASE_URL", "mongodb://db:27017"),
            ("REIMAGE_DATABASE_NAME", "tests"),
        ]);

        let config = Config::load_from(None, Some(dir.path()), &env).unwrap();
        assert_eq!(config.merge.max_depth, 3);
        assert_eq!(config.database.connection_url().unwrap(), "mongodb://db:27017");
        assert_eq!(config.database.name, "tests");
    }

    #[test]
    fn legacy_database_variable_is_a_fallback() {
        let env = Env::mock([("MONGODB_URL", "mongodb://legacy")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.database.url.as_deref(), Some("mongodb://legacy"));

        let env = Env::mock([
            ("MONGODB_URL", "mongodb://legacy"),
            ("REIMAGE_DATABASE_URL", "mongodb://preferred"),
        ]);
        config.apply_env_vars(&env);
        assert_eq!(config.database.url.as_deref(), Some("mongodb://preferred"));
    }

    #[test]
    fn invalid_env_depth_is_ignored() {
        let env = Env::mock([("REIMAGE_MAX_DEPTH", "very")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.merge.max_depth, 64);
    }

    #[test]
    fn redacted_masks_database_url() {
        let mut config = Config::default();
        config.database.url = Some("mongodb://user:pw@host".to_string());
        let shown = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!shown.contains("pw@host"));
        assert!(shown.contains("[REDACTED]"));
    }
}
