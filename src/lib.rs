//! reimage — transformation config builder and deep merge toolkit (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod merge;
pub mod models;
pub mod placeholder;
pub mod value;
