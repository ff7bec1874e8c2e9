//! Legacy (v2) emitter configuration types.
//!
//! The legacy format stores every property in whatever shape its editor
//! produced. Fields are kept optional where the format allows them to be
//! absent; [`crate::upgrade`] decides what each combination means.

use serde::Deserialize;

use super::core::{Keyframe, KeyframeList, Point, PolygonalChain, RandNumber, Rect};

/// A property that interpolates linearly from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValueRange<T> {
    pub start: T,
    pub end: T,
    /// Scales `start` down to produce the floor of a random range
    #[serde(default, alias = "minimumSpeedMultiplier", alias = "minimumScaleMultiplier")]
    pub multiplier: Option<f64>,
}

/// A property described by explicit keyframes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValueList<T> {
    #[serde(flatten)]
    pub frames: KeyframeList<T>,
    #[serde(default, alias = "minimumSpeedMultiplier", alias = "minimumScaleMultiplier")]
    pub multiplier: Option<f64>,
}

/// A time-varying property in either of its legacy shapes.
///
/// The shapes are told apart by the presence of `start`: anything with a
/// `start`/`end` pair is a range, anything with a `list` is a keyframe list.
///
/// # Examples
///
/// ```
/// use particle_upgrade::models::PropertySource;
///
/// let range: PropertySource<f64> = serde_json::from_str(r#"{"start": 1, "end": 0}"#).unwrap();
/// assert!(matches!(range, PropertySource::Range(_)));
///
/// let list: PropertySource<f64> =
///     serde_json::from_str(r#"{"list": [{"time": 0, "value": 1}]}"#).unwrap();
/// assert!(matches!(list, PropertySource::List(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropertySource<T> {
    Range(ValueRange<T>),
    List(ValueList<T>),
}

impl<T> PropertySource<T> {
    /// The value at the start of the particle's life.
    ///
    /// Returns `None` for an empty keyframe list.
    pub fn initial(&self) -> Option<&T> {
        match self {
            PropertySource::Range(range) => Some(&range.start),
            PropertySource::List(list) => list.frames.first_value(),
        }
    }

    /// The multiplier, falling back to `document_level` for keyframe lists.
    ///
    /// Older editors wrote the multiplier next to the property for ranges but at
    /// the top level of the document for keyframe lists.
    pub fn multiplier(&self, document_level: Option<f64>) -> f64 {
        match self {
            PropertySource::Range(range) => range.multiplier,
            PropertySource::List(list) => list.multiplier.or(document_level),
        }
        .unwrap_or(1.0)
    }
}

impl<T: Clone> PropertySource<T> {
    /// The property as a keyframe list, expanding a range to its two endpoints.
    pub fn to_keyframes(&self) -> KeyframeList<T> {
        match self {
            PropertySource::Range(range) => {
                KeyframeList::linear(range.start.clone(), range.end.clone())
            }
            PropertySource::List(list) => list.frames.clone(),
        }
    }
}

impl<T: PartialEq> PropertySource<T> {
    /// The single value of a property that never changes.
    ///
    /// A range is constant when `start == end`; a keyframe list when it holds
    /// exactly one sample.
    pub fn constant(&self) -> Option<&T> {
        match self {
            PropertySource::Range(range) if range.start == range.end => Some(&range.start),
            PropertySource::List(list) if list.frames.len() == 1 => list.frames.first_value(),
            _ => None,
        }
    }
}

impl<T> From<Vec<Keyframe<T>>> for PropertySource<T> {
    fn from(list: Vec<Keyframe<T>>) -> Self {
        PropertySource::List(ValueList { frames: KeyframeList::new(list), multiplier: None })
    }
}

/// Optional lower and upper bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Bounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl Bounds {
    /// Returns true if either bound is set to a non-zero value.
    pub fn is_set(&self) -> bool {
        self.min.is_some_and(|v| v != 0.0) || self.max.is_some_and(|v| v != 0.0)
    }

    pub fn min_or_zero(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }

    pub fn max_or_zero(&self) -> f64 {
        self.max.unwrap_or(0.0)
    }
}

/// Circle used by the `ring` and `circle` spawn types.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnCircle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    /// Inner radius, only meaningful for rings
    #[serde(default)]
    pub min_r: Option<f64>,
}

/// Extra data attached by editors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExtraData {
    /// Path expression for path-following particles
    #[serde(default)]
    pub path: Option<String>,
}

/// How particles are placed when spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpawnType {
    Point,
    Burst,
    Ring,
    Circle,
    Rect,
    PolygonalChain,
    /// Any spawn type without a current-format equivalent
    #[serde(other)]
    Unknown,
}

/// A complete legacy (v2) emitter configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyConfig {
    pub pos: Point,
    pub lifetime: RandNumber,
    pub frequency: f64,
    #[serde(default)]
    pub particles_per_wave: Option<f64>,
    #[serde(default)]
    pub emitter_lifetime: Option<f64>,
    #[serde(default)]
    pub max_particles: Option<f64>,
    #[serde(default)]
    pub emit: Option<bool>,

    #[serde(default)]
    pub alpha: Option<PropertySource<f64>>,
    #[serde(default)]
    pub speed: Option<PropertySource<f64>>,
    #[serde(default)]
    pub scale: Option<PropertySource<f64>>,
    #[serde(default)]
    pub color: Option<PropertySource<String>>,
    #[serde(default)]
    pub minimum_speed_multiplier: Option<f64>,
    #[serde(default)]
    pub minimum_scale_multiplier: Option<f64>,

    #[serde(default)]
    pub acceleration: Option<Point>,
    #[serde(default)]
    pub max_speed: Option<f64>,
    #[serde(default)]
    pub no_rotation: Option<bool>,
    #[serde(default)]
    pub extra_data: Option<ExtraData>,

    #[serde(default)]
    pub rotation_acceleration: Option<f64>,
    #[serde(default)]
    pub rotation_speed: Option<Bounds>,
    #[serde(default)]
    pub start_rotation: Option<Bounds>,

    #[serde(default)]
    pub blend_mode: Option<String>,

    #[serde(default)]
    pub spawn_type: Option<SpawnType>,
    #[serde(default)]
    pub spawn_circle: Option<SpawnCircle>,
    #[serde(default)]
    pub spawn_rect: Option<Rect>,
    #[serde(default)]
    pub spawn_polygon: Option<PolygonalChain>,
    #[serde(default)]
    pub angle_start: Option<f64>,
    #[serde(default)]
    pub particle_spacing: Option<f64>,

    #[serde(default)]
    pub ordered_art: Option<bool>,
}

impl LegacyConfig {
    /// A minimal configuration with every optional field absent.
    pub fn new(pos: Point, lifetime: RandNumber, frequency: f64) -> Self {
        Self {
            pos,
            lifetime,
            frequency,
            particles_per_wave: None,
            emitter_lifetime: None,
            max_particles: None,
            emit: None,
            alpha: None,
            speed: None,
            scale: None,
            color: None,
            minimum_speed_multiplier: None,
            minimum_scale_multiplier: None,
            acceleration: None,
            max_speed: None,
            no_rotation: None,
            extra_data: None,
            rotation_acceleration: None,
            rotation_speed: None,
            start_rotation: None,
            blend_mode: None,
            spawn_type: None,
            spawn_circle: None,
            spawn_rect: None,
            spawn_polygon: None,
            angle_start: None,
            particle_spacing: None,
            ordered_art: None,
        }
    }

    pub fn no_rotation(&self) -> bool {
        self.no_rotation.unwrap_or(false)
    }

    pub fn ordered_art(&self) -> bool {
        self.ordered_art.unwrap_or(false)
    }

    /// The movement path expression, if this emitter follows a path.
    pub fn path(&self) -> Option<&str> {
        self.extra_data.as_ref().and_then(|d| d.path.as_deref()).filter(|p| !p.is_empty())
    }
}
