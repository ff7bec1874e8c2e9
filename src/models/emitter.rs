//! Current (v3) emitter configuration types.
//!
//! A v3 configuration keeps a handful of emitter-wide fields and describes
//! everything else as a list of [`Behavior`] entries, each serialized as
//! `{"type": ..., "config": {...}}`.

use serde::{Deserialize, Serialize};

use super::core::{KeyframeList, Point, PolygonalChain, RandNumber, Rect};

/// Default frame duration for animated art, in milliseconds.
pub const DEFAULT_FRAME_DURATION: u32 = 100;

/// A complete v3 emitter configuration.
///
/// Field order follows the order the fields are written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Random number configuration for picking each particle's lifetime
    pub lifetime: RandNumber,
    /// How many particles to spawn per wave; one if omitted
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub particles_per_wave: Option<f64>,
    /// Seconds between waves
    pub frequency: f64,
    /// How long the emitter runs; forever if omitted
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub emitter_lifetime: Option<f64>,
    /// Maximum number of live particles
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_particles: Option<f64>,
    /// Spawn position inside the parent container
    pub pos: Point,
    /// Whether the emitter starts out emitting
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub emit: Option<bool>,
    pub behaviors: Vec<Behavior>,
}

impl EmitterConfig {
    /// Find the first behavior with the given type tag.
    pub fn behavior(&self, tag: &str) -> Option<&Behavior> {
        self.behaviors.iter().find(|b| b.tag() == tag)
    }

    /// Type tags of all behaviors, in order.
    pub fn tags(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(Behavior::tag).collect()
    }
}

/// One frame sequence of an animated art behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimFrame {
    pub textures: Vec<String>,
    /// Milliseconds per frame
    #[serde(default = "default_frame_duration")]
    pub frame_duration: u32,
    #[serde(rename = "loop", default = "default_loop")]
    pub looping: bool,
}

fn default_frame_duration() -> u32 {
    DEFAULT_FRAME_DURATION
}

fn default_loop() -> bool {
    true
}

impl AnimFrame {
    /// A looping sequence at the default frame duration.
    pub fn looping(textures: Vec<String>) -> Self {
        Self { textures, frame_duration: DEFAULT_FRAME_DURATION, looping: true }
    }
}

/// Torus (or disc) spawn area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub inner_radius: f64,
    /// Point particles away from the center
    pub affect_rotation: bool,
}

/// Geometry particles spawn inside of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum SpawnShape {
    Rect(Rect),
    Torus(Torus),
    PolygonalChain(PolygonalChain),
}

/// A named, independently configured aspect of particle behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "camelCase")]
pub enum Behavior {
    // textures
    TextureSingle {
        texture: String,
    },
    TextureRandom {
        textures: Vec<String>,
    },
    TextureOrdered {
        textures: Vec<String>,
    },
    AnimatedSingle {
        anim: AnimFrame,
    },
    AnimatedRandom {
        anims: Vec<AnimFrame>,
    },

    // properties
    Color {
        color: KeyframeList<String>,
    },
    ColorStatic {
        color: String,
    },
    Scale {
        scale: KeyframeList<f64>,
        min_mult: f64,
    },
    ScaleStatic(RandNumber),
    Alpha {
        alpha: KeyframeList<f64>,
    },
    AlphaStatic {
        alpha: f64,
    },
    BlendMode {
        #[serde(rename = "blendMode")]
        blend_mode: String,
    },

    // movement
    MoveSpeed {
        speed: KeyframeList<f64>,
        min_mult: f64,
    },
    MoveSpeedStatic(RandNumber),
    MoveAcceleration {
        accel: Point,
        min_start: f64,
        max_start: f64,
        rotate: bool,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        max_speed: Option<f64>,
    },
    MovePath {
        path: String,
        speed: KeyframeList<f64>,
        #[serde(rename = "minMult")]
        min_mult: f64,
    },

    // rotation
    NoRotation {},
    Rotation {
        accel: f64,
        min_speed: f64,
        max_speed: f64,
        min_start: f64,
        max_start: f64,
    },
    RotationStatic(RandNumber),

    // spawning
    SpawnPoint {},
    SpawnBurst {
        start: f64,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        spacing: Option<f64>,
    },
    SpawnShape(SpawnShape),
}

impl Behavior {
    /// The serialized `type` tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Behavior::TextureSingle { .. } => "textureSingle",
            Behavior::TextureRandom { .. } => "textureRandom",
            Behavior::TextureOrdered { .. } => "textureOrdered",
            Behavior::AnimatedSingle { .. } => "animatedSingle",
            Behavior::AnimatedRandom { .. } => "animatedRandom",
            Behavior::Color { .. } => "color",
            Behavior::ColorStatic { .. } => "colorStatic",
            Behavior::Scale { .. } => "scale",
            Behavior::ScaleStatic(_) => "scaleStatic",
            Behavior::Alpha { .. } => "alpha",
            Behavior::AlphaStatic { .. } => "alphaStatic",
            Behavior::BlendMode { .. } => "blendMode",
            Behavior::MoveSpeed { .. } => "moveSpeed",
            Behavior::MoveSpeedStatic(_) => "moveSpeedStatic",
            Behavior::MoveAcceleration { .. } => "moveAcceleration",
            Behavior::MovePath { .. } => "movePath",
            Behavior::NoRotation {} => "noRotation",
            Behavior::Rotation { .. } => "rotation",
            Behavior::RotationStatic(_) => "rotationStatic",
            Behavior::SpawnPoint {} => "spawnPoint",
            Behavior::SpawnBurst { .. } => "spawnBurst",
            Behavior::SpawnShape(_) => "spawnShape",
        }
    }

    /// Returns true for behaviors that choose the particle's art.
    pub fn is_art(&self) -> bool {
        matches!(
            self,
            Behavior::TextureSingle { .. }
                | Behavior::TextureRandom { .. }
                | Behavior::TextureOrdered { .. }
                | Behavior::AnimatedSingle { .. }
                | Behavior::AnimatedRandom { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_behavior_wire_shape() {
        let behavior = Behavior::AlphaStatic { alpha: 0.5 };
        let value = serde_json::to_value(&behavior).unwrap();
        assert_eq!(value, json!({"type": "alphaStatic", "config": {"alpha": 0.5}}));
    }

    #[test]
    fn test_empty_config_behaviors() {
        let value = serde_json::to_value(Behavior::SpawnPoint {}).unwrap();
        assert_eq!(value, json!({"type": "spawnPoint", "config": {}}));

        let value = serde_json::to_value(Behavior::NoRotation {}).unwrap();
        assert_eq!(value, json!({"type": "noRotation", "config": {}}));
    }

    #[test]
    fn test_newtype_config_behaviors() {
        let value = serde_json::to_value(Behavior::MoveSpeedStatic(RandNumber::new(2.5, 5.0)))
            .unwrap();
        assert_eq!(value, json!({"type": "moveSpeedStatic", "config": {"max": 5.0, "min": 2.5}}));
    }

    #[test]
    fn test_spawn_shape_torus() {
        let shape = Behavior::SpawnShape(SpawnShape::Torus(Torus {
            x: 0.0,
            y: 0.0,
            radius: 10.0,
            inner_radius: 4.0,
            affect_rotation: true,
        }));
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(value["type"], json!("spawnShape"));
        assert_eq!(value["config"]["type"], json!("torus"));
        assert_eq!(value["config"]["data"]["inner_radius"], json!(4.0));
        assert_eq!(value["config"]["data"]["affect_rotation"], json!(true));
    }

    #[test]
    fn test_spawn_shape_polygonal_chain() {
        let shape = SpawnShape::PolygonalChain(PolygonalChain::Single(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
        ]));
        let value = serde_json::to_value(&shape).unwrap();
        assert_eq!(value["type"], json!("polygonalChain"));
        assert_eq!(value["data"][1], json!({"x": 5.0, "y": 5.0}));
    }

    #[test]
    fn test_anim_frame_loop_key() {
        let value = serde_json::to_value(AnimFrame::looping(vec!["a".to_string()])).unwrap();
        assert_eq!(value, json!({"textures": ["a"], "frame_duration": 100, "loop": true}));
    }

    #[test]
    fn test_move_acceleration_omits_absent_max_speed() {
        let behavior = Behavior::MoveAcceleration {
            accel: Point::new(0.0, 100.0),
            min_start: 50.0,
            max_start: 100.0,
            rotate: true,
            max_speed: None,
        };
        let value = serde_json::to_value(&behavior).unwrap();
        assert!(value["config"].get("max_speed").is_none());
    }

    #[test]
    fn test_tag_matches_serialized_type() {
        let behaviors = vec![
            Behavior::TextureOrdered { textures: vec![] },
            Behavior::MovePath {
                path: "x".to_string(),
                speed: KeyframeList::constant(1.0),
                min_mult: 1.0,
            },
            Behavior::RotationStatic(RandNumber::default()),
            Behavior::SpawnBurst { start: 0.0, spacing: Some(30.0) },
            Behavior::BlendMode { blend_mode: "add".to_string() },
        ];
        for behavior in behaviors {
            let value = serde_json::to_value(&behavior).unwrap();
            assert_eq!(value["type"], json!(behavior.tag()));
        }
    }

    #[test]
    fn test_camel_case_config_keys() {
        let value = serde_json::to_value(Behavior::BlendMode { blend_mode: "add".to_string() })
            .unwrap();
        assert_eq!(value, json!({"type": "blendMode", "config": {"blendMode": "add"}}));

        let value = serde_json::to_value(Behavior::MovePath {
            path: "sin(x)".to_string(),
            speed: KeyframeList::constant(1.0),
            min_mult: 0.5,
        })
        .unwrap();
        assert_eq!(value["config"]["minMult"], json!(0.5));
        assert!(value["config"].get("min_mult").is_none());
    }

    #[test]
    fn test_emitter_config_roundtrip() {
        let config = EmitterConfig {
            lifetime: RandNumber::new(1.0, 2.0),
            particles_per_wave: Some(3.0),
            frequency: 0.1,
            emitter_lifetime: None,
            max_particles: Some(100.0),
            pos: Point::default(),
            emit: None,
            behaviors: vec![
                Behavior::TextureSingle { texture: "particle".to_string() },
                Behavior::SpawnPoint {},
            ],
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EmitterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
        assert_eq!(parsed.tags(), vec!["textureSingle", "spawnPoint"]);
        assert!(parsed.behavior("textureSingle").is_some_and(Behavior::is_art));
    }
}
