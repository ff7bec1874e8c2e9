//! Spawn resolution: where new particles appear.

use super::UpgradeError;
use crate::models::{Behavior, LegacyConfig, SpawnCircle, SpawnShape, SpawnType, Torus};

pub(crate) fn resolve(config: &LegacyConfig) -> Result<Option<Behavior>, UpgradeError> {
    let Some(spawn_type) = config.spawn_type else {
        return Ok(None);
    };

    let behavior = match spawn_type {
        SpawnType::Burst => Behavior::SpawnBurst {
            start: config.angle_start.unwrap_or(0.0),
            spacing: config.particle_spacing,
        },
        SpawnType::Point => Behavior::SpawnPoint {},
        SpawnType::Ring => {
            let circle = spawn_circle(config, "ring spawning")?;
            Behavior::SpawnShape(SpawnShape::Torus(Torus {
                x: circle.x,
                y: circle.y,
                radius: circle.r,
                inner_radius: circle.min_r.unwrap_or(0.0),
                affect_rotation: true,
            }))
        }
        SpawnType::Circle => {
            let circle = spawn_circle(config, "circle spawning")?;
            Behavior::SpawnShape(SpawnShape::Torus(Torus {
                x: circle.x,
                y: circle.y,
                radius: circle.r,
                inner_radius: 0.0,
                affect_rotation: false,
            }))
        }
        SpawnType::Rect => {
            let rect = config
                .spawn_rect
                .ok_or(UpgradeError::MissingField { field: "spawnRect", feature: "rect spawning" })?;
            Behavior::SpawnShape(SpawnShape::Rect(rect))
        }
        SpawnType::PolygonalChain => {
            let chain = config.spawn_polygon.clone().ok_or(UpgradeError::MissingField {
                field: "spawnPolygon",
                feature: "polygonal chain spawning",
            })?;
            Behavior::SpawnShape(SpawnShape::PolygonalChain(chain))
        }
        SpawnType::Unknown => return Ok(None),
    };

    Ok(Some(behavior))
}

fn spawn_circle(config: &LegacyConfig, feature: &'static str) -> Result<SpawnCircle, UpgradeError> {
    config.spawn_circle.ok_or(UpgradeError::MissingField { field: "spawnCircle", feature })
}
