//! Launch aiming: drag vector to launch velocity, plus the aim preview

use glam::Vec2;

use crate::consts::*;
use crate::polar_to_cartesian;

/// Launch power for a drag from `origin` to `target` (capped)
#[inline]
pub fn launch_power(origin: Vec2, target: Vec2) -> f32 {
    (origin.distance(target) / LAUNCH_POWER_DIVISOR).min(MAX_LAUNCH_POWER)
}

/// Launch direction (radians, screen space)
#[inline]
pub fn launch_angle(origin: Vec2, target: Vec2) -> f32 {
    let d = target - origin;
    d.y.atan2(d.x)
}

/// Launch velocity before the random variance is applied
pub fn launch_velocity(origin: Vec2, target: Vec2) -> Vec2 {
    polar_to_cartesian(launch_power(origin, target), launch_angle(origin, target))
}

/// Map a uniform sample in [0, 1) to the launch multiplier in [0.95, 1.05]
///
/// Samples just under 1 round up to exactly 1.05 in f32.
#[inline]
pub fn variance_factor(sample: f32) -> f32 {
    1.0 + (sample - 0.5) * LAUNCH_VARIANCE
}

/// Predict the coin's path for the aim preview
///
/// Gravity only: no friction, pegs are ignored, and side walls reflect
/// without energy loss. Stops once the path leaves the bottom of the board.
/// Returns the origin followed by every `TRAJECTORY_SAMPLE_EVERY`-th step.
pub fn predict_trajectory(origin: Vec2, velocity: Vec2) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(TRAJECTORY_STEPS / TRAJECTORY_SAMPLE_EVERY + 2);
    points.push(origin);

    let mut pos = origin;
    let mut vel = velocity;
    for i in 0..TRAJECTORY_STEPS {
        vel.y += GRAVITY;
        pos += vel;

        if pos.x > CANVAS_WIDTH || pos.x < 0.0 {
            vel.x = -vel.x;
        }

        if i % TRAJECTORY_SAMPLE_EVERY == 0 {
            points.push(pos);
        }
        if pos.y > CANVAS_HEIGHT {
            break;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_power_capped() {
        let origin = Vec2::new(100.0, 100.0);
        assert!((launch_power(origin, Vec2::new(100.0, 150.0)) - 5.0).abs() < 1e-5);
        assert!((launch_power(origin, Vec2::new(100.0, 250.0)) - 15.0).abs() < 1e-5);
        assert!((launch_power(origin, Vec2::new(100.0, 900.0)) - MAX_LAUNCH_POWER).abs() < 1e-5);
        assert_eq!(launch_power(origin, origin), 0.0);
    }

    #[test]
    fn test_launch_velocity_points_at_target() {
        let origin = Vec2::new(300.0, 100.0);
        let v = launch_velocity(origin, Vec2::new(300.0, 200.0));
        assert!(v.x.abs() < 1e-5);
        assert!((v.y - 10.0).abs() < 1e-5);

        let v = launch_velocity(origin, Vec2::new(240.0, 100.0));
        assert!((v.x + 6.0).abs() < 1e-5);
        assert!(v.y.abs() < 1e-5);
    }

    #[test]
    fn test_variance_factor_range() {
        assert!((variance_factor(0.0) - 0.95).abs() < 1e-6);
        assert!((variance_factor(0.5) - 1.0).abs() < 1e-6);
        assert!(variance_factor(0.999_999) <= 1.05);
        assert!(variance_factor(0.75) > 1.0);
    }

    #[test]
    fn test_trajectory_starts_at_origin_and_falls() {
        let origin = LAUNCH_POS;
        let points = predict_trajectory(origin, Vec2::new(-5.0, 0.0));
        assert_eq!(points[0], origin);
        assert!(points.len() > 2);
        assert!(points.len() <= TRAJECTORY_STEPS / TRAJECTORY_SAMPLE_EVERY + 2);
        // Gravity only ever pulls down, so sampled y is increasing after the apex
        let last = points[points.len() - 1];
        assert!(last.y > origin.y);
    }

    #[test]
    fn test_trajectory_stops_below_board() {
        let points = predict_trajectory(Vec2::new(300.0, 700.0), Vec2::new(0.0, 15.0));
        // Falls out almost immediately: origin plus a handful of samples
        assert!(points.len() < 5);
    }

    #[test]
    fn test_trajectory_reflects_off_walls() {
        let points = predict_trajectory(Vec2::new(580.0, 60.0), Vec2::new(15.0, 0.0));
        // Heads right, so x only shrinks if the right wall sent it back
        assert!(points[1].x > 580.0);
        assert!(points.iter().any(|p| p.x < 500.0));
    }
}
