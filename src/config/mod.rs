//! Configuration for particle-upgrade
//!
//! Provides types, discovery, and loading for `particle-upgrade.toml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
