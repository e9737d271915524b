//! Configuration loading and layering.
//!
//! Handles `.reimage.toml` loading, environment variable resolution and
//! database connection settings. File layers are combined with the deep
//! merge from [`crate::merge`].

pub mod database;
pub mod loader;

pub use database::DatabaseConfig;
pub use loader::{Config, ConfigError, MergeConfig, OutputConfig, TransformConfig};
