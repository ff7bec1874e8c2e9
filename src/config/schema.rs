//! Configuration schema types for `particle-upgrade.toml`
//!
//! Defines the structure and validation rules for upgrade settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::Art;

/// File name searched for during config discovery.
pub const CONFIG_FILE_NAME: &str = "particle-upgrade.toml";

/// Largest accepted output indent.
pub const MAX_INDENT: usize = 8;

/// Art used for documents that don't say which textures to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ArtConfig {
    /// Art descriptor: a texture name, a list of names, or animation objects
    #[serde(default)]
    pub default: Art,
    /// Cycle texture lists in order instead of picking randomly
    #[serde(default)]
    pub ordered: bool,
}

/// Output formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Spaces per indent level; 0 writes compact JSON
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    2
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: default_indent() }
    }
}

/// Error telemetry settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Append failed conversions to `error_log`
    #[serde(default)]
    pub collect_errors: bool,
    /// JSONL file failed conversions are appended to
    #[serde(default = "default_error_log")]
    pub error_log: PathBuf,
}

fn default_error_log() -> PathBuf {
    PathBuf::from(".particle-upgrade-errors.jsonl")
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { collect_errors: false, error_log: default_error_log() }
    }
}

/// Complete particle-upgrade.toml configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpgradeConfig {
    #[serde(default)]
    pub art: ArtConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "output.indent")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: '{}' {}", CONFIG_FILE_NAME, self.field, self.message)
    }
}

impl UpgradeConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.output.indent > MAX_INDENT {
            errors.push(ConfigValidationError {
                field: "output.indent".to_string(),
                message: format!("must be between 0 and {}", MAX_INDENT),
            });
        }

        match &self.art.default {
            Art::Texture(name) if name.is_empty() => errors.push(ConfigValidationError {
                field: "art.default".to_string(),
                message: "must not be an empty texture name".to_string(),
            }),
            Art::Textures(names) if names.is_empty() => errors.push(ConfigValidationError {
                field: "art.default".to_string(),
                message: "must list at least one texture".to_string(),
            }),
            Art::Animations(anims) if anims.is_empty() => errors.push(ConfigValidationError {
                field: "art.default".to_string(),
                message: "must list at least one animation".to_string(),
            }),
            _ => {}
        }

        if self.telemetry.collect_errors && self.telemetry.error_log.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "telemetry.error_log".to_string(),
                message: "must be set when collect_errors is enabled".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
