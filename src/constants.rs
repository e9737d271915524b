//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and fixed defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "reimage";

/// Crate version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target triple the binary was compiled for (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.reimage.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".reimage.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "reimage";

/// Database name used when none is configured.
pub const DEFAULT_DATABASE_NAME: &str = "re-image.ai";

/// Maximum nesting depth accepted by bounded merges unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Fallback image dimension in pixels when nothing better is known.
pub const DEFAULT_IMAGE_DIMENSION: u32 = 1000;

/// Credits charged for a single transformation.
pub const CREDIT_FEE: u32 = 1;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_LOG: &str = "REIMAGE_LOG";
pub const ENV_MAX_DEPTH: &str = "REIMAGE_MAX_DEPTH";
pub const ENV_DATABASE_URL: &str = "REIMAGE_DATABASE_URL";
pub const ENV_DATABASE_NAME: &str = "REIMAGE_DATABASE_NAME";

/// Legacy connection string variable, consulted when `REIMAGE_DATABASE_URL` is unset.
pub const ENV_MONGODB_URL: &str = "MONGODB_URL";
