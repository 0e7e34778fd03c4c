//! Command implementations for the gb CLI
//!
//! Each command is organized into its own module.

pub mod backup;
pub mod restore;
pub mod version;
