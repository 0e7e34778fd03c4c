//! Configuration management for gb
//!
//! Settings are layered with figment: built-in defaults, then an optional TOML
//! file, then the `REPO_DIR`, `OUTPUT_DIR` and `MAX_JOBS` environment variables.

mod core;

pub use self::core::{Config, ENV_KEYS};
