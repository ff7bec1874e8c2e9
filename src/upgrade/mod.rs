//! Legacy (v2) to current (v3) emitter configuration upgrade.
//!
//! The upgrade is a single pass over a [`LegacyConfig`]. Each concern has its
//! own resolver returning at most one behavior:
//!
//! | Concern | Behaviors |
//! |---------|-----------|
//! | alpha | `alpha`, `alphaStatic` |
//! | movement | `moveAcceleration`, `movePath`, `moveSpeed`, `moveSpeedStatic` |
//! | scale | `scale`, `scaleStatic` |
//! | color | `color`, `colorStatic` |
//! | rotation | `rotation`, `rotationStatic`, plus the `noRotation` marker |
//! | blend mode | `blendMode` |
//! | art | `textureSingle`, `textureRandom`, `textureOrdered`, `animatedSingle`, `animatedRandom` |
//! | spawn | `spawnPoint`, `spawnBurst`, `spawnShape` |
//!
//! Art always resolves to a behavior; every other concern may be absent.
//!
//! # Example
//!
//! ```
//! use particle_upgrade::models::Art;
//! use particle_upgrade::upgrade::{upgrade, Upgraded};
//!
//! let doc = serde_json::json!({
//!     "pos": {"x": 0, "y": 0},
//!     "lifetime": {"min": 1, "max": 1},
//!     "frequency": 0.1,
//!     "spawnType": "point",
//!     "speed": {"start": 5, "end": 5}
//! });
//!
//! let upgraded = upgrade(doc, &Art::from("bubble.png")).unwrap();
//! match upgraded {
//!     Upgraded::Converted(config) => {
//!         assert_eq!(config.tags(), vec!["moveSpeedStatic", "textureSingle", "spawnPoint"]);
//!     }
//!     Upgraded::Unchanged(_) => unreachable!(),
//! }
//! ```

mod art;
mod movement;
pub mod property;
mod rotation;
mod spawn;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Art, EmitterConfig, LegacyConfig};
use crate::output::to_wire_value;

/// Field whose presence marks a document as already upgraded.
pub const CURRENT_MARKER: &str = "behaviors";

/// Upgrade failure.
///
/// Absent optional fields never fail an upgrade; these errors mean the
/// document is structurally unusable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UpgradeError {
    /// The document does not have the shape of a legacy config
    #[error("invalid legacy config: {0}")]
    InvalidDocument(#[from] serde_json::Error),
    /// A field the chosen feature depends on is missing
    #[error("'{field}' is required for {feature}")]
    MissingField { field: &'static str, feature: &'static str },
    /// A keyframe list that needs a first sample has none
    #[error("'{0}' has an empty keyframe list")]
    EmptyKeyframes(&'static str),
}

impl UpgradeError {
    /// Short machine-readable category, used for error telemetry.
    pub fn error_type(&self) -> &'static str {
        match self {
            UpgradeError::InvalidDocument(_) => "invalid_document",
            UpgradeError::MissingField { .. } => "missing_field",
            UpgradeError::EmptyKeyframes(_) => "empty_keyframes",
        }
    }

    /// A hint for fixing the input, if there is an obvious one.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            UpgradeError::InvalidDocument(_) => {
                Some("legacy configs need 'pos', 'lifetime' and 'frequency'".to_string())
            }
            UpgradeError::MissingField { field, .. } => Some(format!("add '{}' to the config", field)),
            UpgradeError::EmptyKeyframes(field) => {
                Some(format!("give '{}' at least one keyframe", field))
            }
        }
    }
}

/// Result of upgrading a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Upgraded {
    /// The document was already current and is returned as given
    Unchanged(Value),
    /// The document was converted from the legacy format
    Converted(EmitterConfig),
}

impl Upgraded {
    pub fn is_converted(&self) -> bool {
        matches!(self, Upgraded::Converted(_))
    }

    /// The converted config, if a conversion happened.
    pub fn as_converted(&self) -> Option<&EmitterConfig> {
        match self {
            Upgraded::Converted(config) => Some(config),
            Upgraded::Unchanged(_) => None,
        }
    }

    /// The document as JSON, with integral numbers written as integers.
    pub fn into_value(self) -> Result<Value, serde_json::Error> {
        match self {
            Upgraded::Unchanged(value) => Ok(value),
            Upgraded::Converted(config) => to_wire_value(&config),
        }
    }
}

/// Returns true if `document` is already in the current format.
pub fn is_current(document: &Value) -> bool {
    document.get(CURRENT_MARKER).is_some()
}

/// Upgrade a raw JSON document.
///
/// Documents that already carry a `behaviors` field are returned unchanged,
/// so it is safe to call this on configs of unknown vintage.
pub fn upgrade(document: Value, art: &Art) -> Result<Upgraded, UpgradeError> {
    if is_current(&document) {
        return Ok(Upgraded::Unchanged(document));
    }

    let config: LegacyConfig = serde_json::from_value(document)?;
    upgrade_config(&config, art).map(Upgraded::Converted)
}

/// Convert a parsed legacy config.
///
/// Behaviors are emitted in a fixed order: alpha, movement, scale, color,
/// rotation, blend mode, art, spawn.
pub fn upgrade_config(config: &LegacyConfig, art: &Art) -> Result<EmitterConfig, UpgradeError> {
    let mut behaviors = Vec::new();

    behaviors.extend(config.alpha.as_ref().and_then(property::alpha));
    behaviors.extend(movement::resolve(config)?);
    behaviors.extend(
        config.scale.as_ref().map(|scale| property::scale(scale, config.minimum_scale_multiplier)),
    );
    behaviors.extend(config.color.as_ref().and_then(property::color));
    behaviors.extend(rotation::resolve(config));
    behaviors.extend(rotation::no_rotation(config));
    behaviors.extend(property::blend_mode(config.blend_mode.as_deref()));
    behaviors.push(art::resolve(art, config.ordered_art()));
    behaviors.extend(spawn::resolve(config)?);

    Ok(EmitterConfig {
        lifetime: config.lifetime,
        particles_per_wave: config.particles_per_wave,
        frequency: config.frequency,
        emitter_lifetime: config.emitter_lifetime,
        max_particles: config.max_particles,
        pos: config.pos,
        emit: config.emit,
        behaviors,
    })
}
