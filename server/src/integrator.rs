use crate::ball::BallState;
use hoops_shared::config::PhysicsConfig;

/// Advance a ball in flight by `dt` seconds.
///
/// Semi-implicit Euler: gravity updates the velocity first, and the new
/// velocity moves the ball. The ball also picks up a kinematic rolling spin
/// from its planar travel. No-op for a ball at rest.
pub fn step_flight(ball: &mut BallState, dt: f64, physics: &PhysicsConfig) {
    if !ball.in_flight {
        return;
    }
    ball.velocity.y -= physics.gravity * dt;
    let displacement = ball.velocity * dt;
    ball.position += displacement;
    ball.roll(&displacement, physics.rotation_gain);
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};

    const DT: f64 = 1.0 / 60.0;

    fn flying(velocity: Vector3<f64>) -> BallState {
        let mut ball = BallState::at_rest(Vector3::new(0.0, 5.0, 0.0), 0.12);
        ball.velocity = velocity;
        ball.in_flight = true;
        ball
    }

    #[test]
    fn gravity_applies_before_the_move() {
        let physics = PhysicsConfig::default();
        let mut ball = flying(Vector3::zeros());
        step_flight(&mut ball, DT, &physics);
        assert!((ball.velocity.y + physics.gravity * DT).abs() < 1e-12);
        assert!((ball.position.y - (5.0 - physics.gravity * DT * DT)).abs() < 1e-12);
    }

    #[test]
    fn horizontal_motion_is_uniform() {
        let physics = PhysicsConfig::default();
        let mut ball = flying(Vector3::new(3.0, 0.0, -1.5));
        for _ in 0..60 {
            step_flight(&mut ball, DT, &physics);
        }
        assert!((ball.position.x - 3.0).abs() < 1e-9);
        assert!((ball.position.z + 1.5).abs() < 1e-9);
    }

    #[test]
    fn ball_at_rest_is_untouched() {
        let physics = PhysicsConfig::default();
        let mut ball = BallState::at_rest(Vector3::new(1.0, 0.22, 1.0), 0.12);
        let before = ball.clone();
        step_flight(&mut ball, DT, &physics);
        assert_eq!(ball, before);
    }

    #[test]
    fn spin_follows_planar_travel() {
        let physics = PhysicsConfig::default();
        let mut lob = flying(Vector3::new(0.0, 4.0, 0.0));
        step_flight(&mut lob, DT, &physics);
        assert_eq!(lob.orientation, UnitQuaternion::identity());

        let mut pass = flying(Vector3::new(6.0, 0.0, 0.0));
        step_flight(&mut pass, DT, &physics);
        let expected = 6.0 * DT / 0.12;
        assert!((pass.orientation.angle() - expected).abs() < 1e-9);
    }
}
