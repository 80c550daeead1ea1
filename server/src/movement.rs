use crate::ball::BallState;
use hoops_shared::config::CourtConfig;
use hoops_shared::protocol::InputIntents;
use nalgebra::Vector3;

/// Move the resting ball one fixed step per held direction.
///
/// Left/right move along x, forward/back along z (forward is -z). The step is
/// per tick, not time-scaled, and never carries the ball further off the
/// court. Returns the displacement actually applied.
pub fn step_movement(
    ball: &mut BallState,
    intents: &InputIntents,
    court: &CourtConfig,
    rotation_gain: f64,
) -> Vector3<f64> {
    if ball.in_flight {
        return Vector3::zeros();
    }

    let mut dx = 0.0;
    let mut dz = 0.0;
    if intents.move_left {
        dx -= court.move_step;
    }
    if intents.move_right {
        dx += court.move_step;
    }
    if intents.move_forward {
        dz -= court.move_step;
    }
    if intents.move_back {
        dz += court.move_step;
    }

    let before = ball.position;
    ball.position.x = step_axis(ball.position.x, dx, court.bounds_x);
    ball.position.z = step_axis(ball.position.z, dz, court.bounds_z);

    let displacement = ball.position - before;
    ball.roll(&displacement, rotation_gain);
    displacement
}

/// One step along an axis bounded by `[-bound, bound]`.
///
/// Inside the court the result stops at the edge. A shot can leave the ball
/// resting outside the court; from there only steps back toward it are taken.
fn step_axis(position: f64, delta: f64, bound: f64) -> f64 {
    let next = position + delta;
    if position.abs() <= bound {
        next.clamp(-bound, bound)
    } else if next.abs() < position.abs() {
        next
    } else {
        position
    }
}
