//! Data models for legacy (v2) and current (v3) emitter configurations.

mod art;
mod core;
mod emitter;
mod legacy;

pub use art::{AnimatedArt, Art, Framerate, MATCH_LIFE};
pub use self::core::{Keyframe, KeyframeList, Point, PolygonalChain, RandNumber, Rect};
pub use emitter::{AnimFrame, Behavior, EmitterConfig, SpawnShape, Torus, DEFAULT_FRAME_DURATION};
pub use legacy::{
    Bounds, ExtraData, LegacyConfig, PropertySource, SpawnCircle, SpawnType, ValueList, ValueRange,
};
