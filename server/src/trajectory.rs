//! Launch velocity solver.
//!
//! Picks an arc angle from the planar range to the rim, solves the ideal
//! projectile speed for that angle, then scales it by a super-linear power
//! response so that weak shots fall well short.

use crate::ball::planar;
use hoops_shared::config::{PhysicsConfig, ShotConfig};
use nalgebra::Vector3;

/// Power and physics in effect for one shot.
#[derive(Debug, Clone, Copy)]
pub struct ShotParameters {
    /// Power fraction in [0, 1]
    pub power: f64,
    pub physics: PhysicsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchSolution {
    pub velocity: Vector3<f64>,
    /// Arc angle above horizontal (radians)
    pub launch_angle: f64,
    /// Speed that would land exactly on the target at full power
    pub ideal_speed: f64,
    /// The target was unreachable at `launch_angle`
    pub fallback: bool,
    /// Vertical speed was raised to clear the rim
    pub apex_boosted: bool,
}

/// Arc angle: steep up close, flatter from long range.
pub fn launch_angle(distance: f64, shot: &ShotConfig) -> f64 {
    let distance_factor = (distance / shot.range_normalizer).min(1.0);
    let max = shot.max_launch_angle_deg.to_radians();
    let min = shot.min_launch_angle_deg.to_radians();
    max - (max - min) * distance_factor
}

/// Speed that carries a projectile `distance` across and `dy` up at `angle`.
/// None when the target is out of reach at that angle.
pub fn ideal_speed(distance: f64, dy: f64, angle: f64, gravity: f64) -> Option<f64> {
    let cos = angle.cos();
    let denominator = 2.0 * cos * cos * (distance * angle.tan() - dy);
    if denominator <= 0.0 {
        return None;
    }
    Some((gravity * distance * distance / denominator).sqrt())
}

/// Strictly increasing, zero at zero, super-linear.
pub fn power_response(power: f64, shot: &ShotConfig) -> f64 {
    shot.power_gain * power.clamp(0.0, 1.0).powf(shot.power_exponent)
}

/// Solve the launch velocity from `origin` toward `target`.
pub fn solve_launch(
    origin: &Vector3<f64>,
    target: &Vector3<f64>,
    rim_height: f64,
    params: &ShotParameters,
    shot: &ShotConfig,
) -> LaunchSolution {
    let gravity = params.physics.gravity;
    let to_target = planar(&(target - origin));
    let distance = to_target.norm();
    let dy = target.y - origin.y;
    let angle = launch_angle(distance, shot);

    let (ideal, fallback) = match ideal_speed(distance, dy, angle, gravity) {
        Some(speed) => (speed, false),
        None => (shot.fallback_speed, true),
    };

    if params.power <= 0.0 {
        return LaunchSolution {
            velocity: Vector3::zeros(),
            launch_angle: angle,
            ideal_speed: ideal,
            fallback,
            apex_boosted: false,
        };
    }

    let speed = ideal * power_response(params.power, shot);
    let direction = if distance > 1e-9 {
        to_target / distance
    } else {
        Vector3::zeros()
    };
    let horizontal = direction * (speed * angle.cos());
    let mut vertical = speed * angle.sin();

    let mut apex_boosted = false;
    if params.power > shot.apex_power_threshold {
        let required = rim_height + shot.apex_clearance;
        let apex = origin.y + vertical.max(0.0).powi(2) / (2.0 * gravity);
        if apex < required {
            vertical = (2.0 * gravity * (required - origin.y)).sqrt();
            apex_boosted = true;
        }
    }

    LaunchSolution {
        velocity: Vector3::new(horizontal.x, vertical, horizontal.z),
        launch_angle: angle,
        ideal_speed: ideal,
        fallback,
        apex_boosted,
    }
}
