//! Core types shared by the legacy and current emitter schemas.

use serde::{Deserialize, Serialize};

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if either component is non-zero.
    pub fn is_nonzero(&self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }
}

/// Configuration for how to pick a random number (inclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RandNumber {
    /// Maximum pickable value
    pub max: f64,
    /// Minimum pickable value
    pub min: f64,
}

impl RandNumber {
    pub fn new(min: f64, max: f64) -> Self {
        Self { max, min }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A polygonal chain: one open path of points, or several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolygonalChain {
    Single(Vec<Point>),
    Multiple(Vec<Vec<Point>>),
}

/// A single sample of a time-varying property.
///
/// `time` is normalized to the particle's lifetime, 0.0 at birth and 1.0 at death.
///
/// # Examples
///
/// ```
/// use particle_upgrade::models::Keyframe;
///
/// let frame: Keyframe<f64> = serde_json::from_str(r#"{"time": 0.5, "value": 2}"#).unwrap();
/// assert_eq!(frame, Keyframe::new(0.5, 2.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    pub time: f64,
    pub value: T,
}

impl<T> Keyframe<T> {
    pub fn new(time: f64, value: T) -> Self {
        Self { time, value }
    }
}

/// An ordered list of keyframes.
///
/// Shared by both schemas: the legacy format stores lists in this shape
/// directly, and the current format wraps every interpolated property in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeList<T> {
    pub list: Vec<Keyframe<T>>,
    /// Step between samples instead of interpolating
    #[serde(rename = "isStepped", skip_serializing_if = "Option::is_none", default)]
    pub is_stepped: Option<bool>,
}

impl<T> KeyframeList<T> {
    pub fn new(list: Vec<Keyframe<T>>) -> Self {
        Self { list, is_stepped: None }
    }

    /// Two samples, `start` at time 0 and `end` at time 1.
    pub fn linear(start: T, end: T) -> Self {
        Self::new(vec![Keyframe::new(0.0, start), Keyframe::new(1.0, end)])
    }

    /// A single sample at time 0.
    pub fn constant(value: T) -> Self {
        Self::new(vec![Keyframe::new(0.0, value)])
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The value of the first sample, if any.
    pub fn first_value(&self) -> Option<&T> {
        self.list.first().map(|k| &k.value)
    }
}
