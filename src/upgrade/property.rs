//! Interpolated property resolution (alpha, scale, color, speed, blend mode).
//!
//! Every interpolated property goes through [`normalize`], which decides
//! between a constant and a keyframe list. The per-property functions then
//! pick the behavior and drop constants equal to the renderer's default.

use crate::models::{Behavior, KeyframeList, PropertySource, RandNumber};

/// Alpha a particle has when no alpha behavior is present.
pub const DEFAULT_ALPHA: f64 = 1.0;
/// Tint a particle has when no color behavior is present.
pub const DEFAULT_COLOR: &str = "ffffff";
/// Blend mode used when no blend mode behavior is present.
pub const DEFAULT_BLEND_MODE: &str = "normal";

/// A property reduced to a constant or a list of samples.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<'a, T> {
    Constant(&'a T),
    Varying(KeyframeList<T>),
}

/// Reduce a legacy property to a constant or a keyframe list.
///
/// Ranges become two samples at times 0 and 1; keyframe lists with more (or
/// fewer) than one sample are copied as they are.
pub fn normalize<T: Clone + PartialEq>(source: &PropertySource<T>) -> Normalized<'_, T> {
    match source.constant() {
        Some(value) => Normalized::Constant(value),
        None => Normalized::Varying(source.to_keyframes()),
    }
}

pub(crate) fn alpha(source: &PropertySource<f64>) -> Option<Behavior> {
    match normalize(source) {
        Normalized::Constant(&alpha) if alpha == DEFAULT_ALPHA => None,
        Normalized::Constant(&alpha) => Some(Behavior::AlphaStatic { alpha }),
        Normalized::Varying(alpha) => Some(Behavior::Alpha { alpha }),
    }
}

pub(crate) fn color(source: &PropertySource<String>) -> Option<Behavior> {
    match normalize(source) {
        Normalized::Constant(color) if color == DEFAULT_COLOR => None,
        Normalized::Constant(color) => Some(Behavior::ColorStatic { color: color.clone() }),
        Normalized::Varying(color) => Some(Behavior::Color { color }),
    }
}

pub(crate) fn scale(source: &PropertySource<f64>, document_multiplier: Option<f64>) -> Behavior {
    let min_mult = source.multiplier(document_multiplier);
    match normalize(source) {
        Normalized::Constant(&scale) => Behavior::ScaleStatic(RandNumber::new(scale * min_mult, scale)),
        Normalized::Varying(scale) => Behavior::Scale { scale, min_mult },
    }
}

pub(crate) fn move_speed(source: &PropertySource<f64>, document_multiplier: Option<f64>) -> Behavior {
    let min_mult = source.multiplier(document_multiplier);
    match normalize(source) {
        Normalized::Constant(&speed) => {
            Behavior::MoveSpeedStatic(RandNumber::new(speed * min_mult, speed))
        }
        Normalized::Varying(speed) => Behavior::MoveSpeed { speed, min_mult },
    }
}

pub(crate) fn blend_mode(blend_mode: Option<&str>) -> Option<Behavior> {
    blend_mode
        .filter(|mode| !mode.is_empty() && *mode != DEFAULT_BLEND_MODE)
        .map(|mode| Behavior::BlendMode { blend_mode: mode.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Keyframe, ValueRange};

    fn range<T>(start: T, end: T) -> PropertySource<T> {
        PropertySource::Range(ValueRange { start, end, multiplier: None })
    }

    fn range_with_mult(start: f64, end: f64, mult: f64) -> PropertySource<f64> {
        PropertySource::Range(ValueRange { start, end, multiplier: Some(mult) })
    }

    #[test]
    fn test_normalize_constant_range() {
        assert_eq!(normalize(&range(3.0, 3.0)), Normalized::Constant(&3.0));
    }

    #[test]
    fn test_normalize_varying_range() {
        assert_eq!(normalize(&range(0.0, 1.0)), Normalized::Varying(KeyframeList::linear(0.0, 1.0)));
    }

    #[test]
    fn test_normalize_list_copied() {
        let frames = vec![Keyframe::new(0.0, 1.0), Keyframe::new(0.5, 0.2), Keyframe::new(1.0, 0.0)];
        let source = PropertySource::from(frames.clone());
        assert_eq!(normalize(&source), Normalized::Varying(KeyframeList::new(frames)));
    }

    #[test]
    fn test_alpha_default_suppressed() {
        assert_eq!(alpha(&range(1.0, 1.0)), None);
        assert_eq!(alpha(&PropertySource::from(vec![Keyframe::new(0.0, 1.0)])), None);
    }

    #[test]
    fn test_alpha_static() {
        assert_eq!(alpha(&range(0.2, 0.2)), Some(Behavior::AlphaStatic { alpha: 0.2 }));
    }

    #[test]
    fn test_alpha_varying() {
        assert_eq!(
            alpha(&range(0.0, 1.0)),
            Some(Behavior::Alpha { alpha: KeyframeList::linear(0.0, 1.0) })
        );
    }

    #[test]
    fn test_alpha_varying_ending_at_default_not_suppressed() {
        assert!(matches!(alpha(&range(1.0, 0.0)), Some(Behavior::Alpha { .. })));
    }

    #[test]
    fn test_color_default_suppressed() {
        assert_eq!(color(&range("ffffff".to_string(), "ffffff".to_string())), None);
    }

    #[test]
    fn test_color_default_is_case_sensitive() {
        assert_eq!(
            color(&range("FFFFFF".to_string(), "FFFFFF".to_string())),
            Some(Behavior::ColorStatic { color: "FFFFFF".to_string() })
        );
    }

    #[test]
    fn test_color_varying() {
        let behavior = color(&range("ff0000".to_string(), "0000ff".to_string()));
        assert_eq!(
            behavior,
            Some(Behavior::Color {
                color: KeyframeList::linear("ff0000".to_string(), "0000ff".to_string())
            })
        );
    }

    #[test]
    fn test_scale_static_applies_multiplier_to_min() {
        assert_eq!(
            scale(&range_with_mult(2.0, 2.0, 0.5), None),
            Behavior::ScaleStatic(RandNumber::new(1.0, 2.0))
        );
    }

    #[test]
    fn test_scale_static_one_not_suppressed() {
        assert_eq!(scale(&range(1.0, 1.0), None), Behavior::ScaleStatic(RandNumber::new(1.0, 1.0)));
    }

    #[test]
    fn test_scale_varying_carries_multiplier() {
        assert_eq!(
            scale(&range_with_mult(1.0, 0.3, 0.8), None),
            Behavior::Scale { scale: KeyframeList::linear(1.0, 0.3), min_mult: 0.8 }
        );
    }

    #[test]
    fn test_scale_list_uses_document_multiplier() {
        let source = PropertySource::from(vec![Keyframe::new(0.0, 4.0)]);
        assert_eq!(scale(&source, Some(0.25)), Behavior::ScaleStatic(RandNumber::new(1.0, 4.0)));
    }

    #[test]
    fn test_move_speed_static() {
        assert_eq!(
            move_speed(&range(5.0, 5.0), None),
            Behavior::MoveSpeedStatic(RandNumber::new(5.0, 5.0))
        );
    }

    #[test]
    fn test_move_speed_varying_defaults_multiplier() {
        assert_eq!(
            move_speed(&range(200.0, 50.0), None),
            Behavior::MoveSpeed { speed: KeyframeList::linear(200.0, 50.0), min_mult: 1.0 }
        );
    }

    #[test]
    fn test_blend_mode() {
        assert_eq!(blend_mode(None), None);
        assert_eq!(blend_mode(Some("normal")), None);
        assert_eq!(
            blend_mode(Some("add")),
            Some(Behavior::BlendMode { blend_mode: "add".to_string() })
        );
    }
}
