//! Rotation resolution.

use crate::models::{Behavior, LegacyConfig, RandNumber};

/// Spinning rotation, or a fixed random start angle, or nothing.
pub(crate) fn resolve(config: &LegacyConfig) -> Option<Behavior> {
    let accel = config.rotation_acceleration.unwrap_or(0.0);
    let speed = config.rotation_speed.unwrap_or_default();
    let start = config.start_rotation.unwrap_or_default();

    if accel != 0.0 || speed.is_set() {
        Some(Behavior::Rotation {
            accel,
            min_speed: speed.min_or_zero(),
            max_speed: speed.max_or_zero(),
            min_start: start.min_or_zero(),
            max_start: start.max_or_zero(),
        })
    } else if start.is_set() {
        Some(Behavior::RotationStatic(RandNumber::new(start.min_or_zero(), start.max_or_zero())))
    } else {
        None
    }
}

/// The `noRotation` marker.
///
/// Emitted independently of [`resolve`]: a legacy config may ask for both a
/// start angle and no rotation, and both behaviors are kept.
pub(crate) fn no_rotation(config: &LegacyConfig) -> Option<Behavior> {
    config.no_rotation().then_some(Behavior::NoRotation {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bounds, Point};

    fn base() -> LegacyConfig {
        LegacyConfig::new(Point::default(), RandNumber::new(1.0, 1.0), 0.1)
    }

    fn bounds(min: f64, max: f64) -> Bounds {
        Bounds { min: Some(min), max: Some(max) }
    }

    #[test]
    fn test_nothing_set() {
        let mut config = base();
        config.rotation_speed = Some(bounds(0.0, 0.0));
        config.start_rotation = Some(bounds(0.0, 0.0));
        assert_eq!(resolve(&config), None);
        assert_eq!(no_rotation(&config), None);
    }

    #[test]
    fn test_rotation_from_speed() {
        let mut config = base();
        config.rotation_speed = Some(bounds(10.0, 50.0));
        config.start_rotation = Some(Bounds { min: None, max: Some(360.0) });

        assert_eq!(
            resolve(&config),
            Some(Behavior::Rotation {
                accel: 0.0,
                min_speed: 10.0,
                max_speed: 50.0,
                min_start: 0.0,
                max_start: 360.0,
            })
        );
    }

    #[test]
    fn test_rotation_from_acceleration_only() {
        let mut config = base();
        config.rotation_acceleration = Some(-20.0);

        assert_eq!(
            resolve(&config),
            Some(Behavior::Rotation {
                accel: -20.0,
                min_speed: 0.0,
                max_speed: 0.0,
                min_start: 0.0,
                max_start: 0.0,
            })
        );
    }

    #[test]
    fn test_rotation_static() {
        let mut config = base();
        config.start_rotation = Some(bounds(0.0, 360.0));
        assert_eq!(resolve(&config), Some(Behavior::RotationStatic(RandNumber::new(0.0, 360.0))));
    }

    #[test]
    fn test_no_rotation_coexists_with_rotation() {
        let mut config = base();
        config.start_rotation = Some(bounds(90.0, 90.0));
        config.no_rotation = Some(true);

        assert!(matches!(resolve(&config), Some(Behavior::RotationStatic(_))));
        assert_eq!(no_rotation(&config), Some(Behavior::NoRotation {}));
    }
}
