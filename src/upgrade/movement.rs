//! Movement resolution.
//!
//! Exactly one movement behavior is chosen, in order of precedence:
//! acceleration, then path following, then plain speed.

use super::{property, UpgradeError};
use crate::models::{Behavior, KeyframeList, LegacyConfig, PropertySource};

pub(crate) fn resolve(config: &LegacyConfig) -> Result<Option<Behavior>, UpgradeError> {
    if let Some(accel) = config.acceleration.filter(|a| a.is_nonzero()) {
        let speed = required_speed(config, "acceleration movement")?;
        let initial = *speed.initial().ok_or(UpgradeError::EmptyKeyframes("speed"))?;
        let min_mult = speed.multiplier(config.minimum_speed_multiplier);

        return Ok(Some(Behavior::MoveAcceleration {
            accel,
            min_start: initial * min_mult,
            max_start: initial,
            rotate: !config.no_rotation(),
            max_speed: config.max_speed,
        }));
    }

    if let Some(path) = config.path() {
        let speed = required_speed(config, "path movement")?;
        return Ok(Some(Behavior::MovePath {
            path: path.to_string(),
            speed: path_speed(speed),
            min_mult: speed.multiplier(config.minimum_speed_multiplier),
        }));
    }

    Ok(config.speed.as_ref().map(|speed| property::move_speed(speed, config.minimum_speed_multiplier)))
}

fn required_speed<'a>(
    config: &'a LegacyConfig,
    feature: &'static str,
) -> Result<&'a PropertySource<f64>, UpgradeError> {
    config.speed.as_ref().ok_or(UpgradeError::MissingField { field: "speed", feature })
}

/// Path speed keeps a single sample for a constant range instead of
/// collapsing it to a static behavior.
fn path_speed(speed: &PropertySource<f64>) -> KeyframeList<f64> {
    match speed {
        PropertySource::Range(range) if range.start == range.end => {
            KeyframeList::constant(range.start)
        }
        _ => speed.to_keyframes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtraData, Keyframe, Point, RandNumber, ValueRange};

    fn base() -> LegacyConfig {
        LegacyConfig::new(Point::default(), RandNumber::new(1.0, 1.0), 0.1)
    }

    fn speed(start: f64, end: f64, multiplier: Option<f64>) -> Option<PropertySource<f64>> {
        Some(PropertySource::Range(ValueRange { start, end, multiplier }))
    }

    fn with_path(mut config: LegacyConfig, path: &str) -> LegacyConfig {
        config.extra_data = Some(ExtraData { path: Some(path.to_string()) });
        config
    }

    #[test]
    fn test_no_speed_no_movement() {
        assert_eq!(resolve(&base()).unwrap(), None);
    }

    #[test]
    fn test_zero_acceleration_falls_through_to_speed() {
        let mut config = base();
        config.acceleration = Some(Point::new(0.0, 0.0));
        config.speed = speed(5.0, 5.0, None);
        assert!(matches!(resolve(&config).unwrap(), Some(Behavior::MoveSpeedStatic(_))));
    }

    #[test]
    fn test_acceleration() {
        let mut config = base();
        config.acceleration = Some(Point::new(0.0, 200.0));
        config.speed = speed(100.0, 0.0, Some(0.5));
        config.max_speed = Some(300.0);

        assert_eq!(
            resolve(&config).unwrap(),
            Some(Behavior::MoveAcceleration {
                accel: Point::new(0.0, 200.0),
                min_start: 50.0,
                max_start: 100.0,
                rotate: true,
                max_speed: Some(300.0),
            })
        );
    }

    #[test]
    fn test_acceleration_rotate_follows_no_rotation() {
        let mut config = base();
        config.acceleration = Some(Point::new(10.0, 0.0));
        config.speed = speed(1.0, 1.0, None);
        config.no_rotation = Some(true);

        match resolve(&config).unwrap() {
            Some(Behavior::MoveAcceleration { rotate, .. }) => assert!(!rotate),
            other => panic!("expected acceleration movement, got {:?}", other),
        }
    }

    #[test]
    fn test_acceleration_from_keyframe_list_uses_document_multiplier() {
        let mut config = base();
        config.acceleration = Some(Point::new(0.0, 1.0));
        config.speed =
            Some(PropertySource::from(vec![Keyframe::new(0.0, 40.0), Keyframe::new(1.0, 0.0)]));
        config.minimum_speed_multiplier = Some(0.25);

        match resolve(&config).unwrap() {
            Some(Behavior::MoveAcceleration { min_start, max_start, .. }) => {
                assert_eq!(min_start, 10.0);
                assert_eq!(max_start, 40.0);
            }
            other => panic!("expected acceleration movement, got {:?}", other),
        }
    }

    #[test]
    fn test_acceleration_without_speed_is_error() {
        let mut config = base();
        config.acceleration = Some(Point::new(0.0, 1.0));
        assert!(matches!(
            resolve(&config),
            Err(UpgradeError::MissingField { field: "speed", .. })
        ));
    }

    #[test]
    fn test_acceleration_with_empty_list_is_error() {
        let mut config = base();
        config.acceleration = Some(Point::new(0.0, 1.0));
        config.speed = Some(PropertySource::from(Vec::new()));
        assert!(matches!(resolve(&config), Err(UpgradeError::EmptyKeyframes("speed"))));
    }

    #[test]
    fn test_acceleration_beats_path() {
        let mut config = with_path(base(), "sin(x) * 20");
        config.acceleration = Some(Point::new(0.0, 1.0));
        config.speed = speed(1.0, 2.0, None);
        assert!(matches!(resolve(&config).unwrap(), Some(Behavior::MoveAcceleration { .. })));
    }

    #[test]
    fn test_path_constant_speed_keeps_single_sample() {
        let mut config = with_path(base(), "sin(x) * 20");
        config.speed = speed(1.0, 1.0, None);

        assert_eq!(
            resolve(&config).unwrap(),
            Some(Behavior::MovePath {
                path: "sin(x) * 20".to_string(),
                speed: KeyframeList::constant(1.0),
                min_mult: 1.0,
            })
        );
    }

    #[test]
    fn test_path_varying_speed() {
        let mut config = with_path(base(), "x");
        config.speed = speed(10.0, 20.0, Some(0.5));

        assert_eq!(
            resolve(&config).unwrap(),
            Some(Behavior::MovePath {
                path: "x".to_string(),
                speed: KeyframeList::linear(10.0, 20.0),
                min_mult: 0.5,
            })
        );
    }

    #[test]
    fn test_path_without_speed_is_error() {
        let config = with_path(base(), "x");
        assert!(matches!(resolve(&config), Err(UpgradeError::MissingField { .. })));
    }
}
