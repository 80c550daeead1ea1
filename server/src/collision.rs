//! Contact resolution against the court floor, rims and backboards.
//!
//! Runs once per tick after integration, always in the order
//! ground -> rim -> backboard, so that scoring sees the resolved position.

use crate::ball::{planar, BallState};
use crate::hoop::{HoopSide, HoopTarget};
use hoops_shared::config::PhysicsConfig;
use nalgebra::Vector3;

/// Extra push past the rim surface so the same contact is not seen next tick.
pub const RIM_PUSH_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Hit the floor hard enough to bounce
    GroundBounce { impact_speed: f64 },
    /// Rolling on the floor
    Rolling,
    /// Rolled below the rest speed and stopped
    CameToRest,
    /// Struck a rim tube; `normal` points from the tube toward the ball
    Rim {
        side: HoopSide,
        normal: Vector3<f64>,
    },
    Backboard { side: HoopSide },
}

fn horizontal_speed_sq(v: &Vector3<f64>) -> f64 {
    v.x * v.x + v.z * v.z
}

/// Keep the ball above the floor, bouncing or rolling as appropriate.
pub fn resolve_ground(
    ball: &mut BallState,
    physics: &PhysicsConfig,
    ground_offset: f64,
) -> Option<Contact> {
    let floor = ball.floor_height(ground_offset);
    if ball.position.y > floor {
        return None;
    }
    ball.position.y = floor;

    let impact_speed = ball.velocity.y.abs();
    if impact_speed > physics.min_bounce_velocity {
        ball.velocity.y = -ball.velocity.y * physics.restitution;
        ball.velocity.x *= physics.bounce_friction;
        ball.velocity.z *= physics.bounce_friction;
        return Some(Contact::GroundBounce { impact_speed });
    }

    ball.velocity.y = 0.0;
    ball.velocity.x *= physics.rolling_friction;
    ball.velocity.z *= physics.rolling_friction;
    if horizontal_speed_sq(&ball.velocity) < physics.rest_speed * physics.rest_speed {
        ball.velocity = Vector3::zeros();
        ball.in_flight = false;
        return Some(Contact::CameToRest);
    }
    Some(Contact::Rolling)
}

/// Bounce the ball off a rim tube it overlaps.
///
/// The overlap test is a window around the tube centerline: vertically within
/// `radius + tube`, and planar distance in `[inner - radius, outer + radius]`.
/// Horizontal velocity is reflected about the radial normal and scaled by
/// restitution only while the ball moves into the tube; the ball is always
/// pushed clear.
pub fn resolve_rim(
    ball: &mut BallState,
    hoop: &HoopTarget,
    physics: &PhysicsConfig,
) -> Option<Contact> {
    let reach = ball.radius + hoop.tube_radius;
    if hoop.height_offset(&ball.position).abs() > reach {
        return None;
    }
    let offset = planar(&(ball.position - hoop.rim_center));
    let distance = offset.norm();
    if distance < hoop.rim_inner() - ball.radius
        || distance > hoop.rim_outer() + ball.radius
        || distance < 1e-9
    {
        return None;
    }

    let radial = offset / distance;
    let gap = distance - hoop.rim_radius;
    let normal = if gap >= 0.0 { radial } else { -radial };

    let horizontal = planar(&ball.velocity);
    let approaching = horizontal.dot(&normal) < 0.0;
    if approaching {
        let reflected =
            (horizontal - radial * (2.0 * horizontal.dot(&radial))) * physics.restitution;
        ball.velocity.x = reflected.x;
        ball.velocity.z = reflected.z;
        ball.velocity.y *= physics.restitution;
    }

    let depth = reach - gap.abs();
    ball.position += normal * (depth.max(0.0) + RIM_PUSH_EPSILON);

    approaching.then_some(Contact::Rim {
        side: hoop.side,
        normal,
    })
}

/// Keep the ball out of a backboard, reflecting the board-normal (x) velocity.
pub fn resolve_backboard(
    ball: &mut BallState,
    hoop: &HoopTarget,
    physics: &PhysicsConfig,
) -> Option<Contact> {
    let board = &hoop.backboard;
    if !board.contains_expanded(&ball.position, ball.radius) {
        return None;
    }
    let face = if ball.position.x >= board.center.x {
        1.0
    } else {
        -1.0
    };
    ball.position.x = board.center.x + face * (board.half_extents.x + ball.radius);
    if ball.velocity.x * face < 0.0 {
        ball.velocity.x = -ball.velocity.x * physics.restitution;
    }
    Some(Contact::Backboard { side: hoop.side })
}

/// Resolve every contact for this tick, ground first.
pub fn resolve_contacts(
    ball: &mut BallState,
    hoops: &[HoopTarget],
    physics: &PhysicsConfig,
    ground_offset: f64,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    contacts.extend(resolve_ground(ball, physics, ground_offset));
    for hoop in hoops {
        contacts.extend(resolve_rim(ball, hoop, physics));
    }
    for hoop in hoops {
        contacts.extend(resolve_backboard(ball, hoop, physics));
    }
    for contact in &contacts {
        match contact {
            Contact::Rolling => {}
            other => tracing::debug!(?other, "ball contact"),
        }
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hoop::court_hoops;
    use hoops_shared::config::CourtConfig;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const GROUND: f64 = 0.1;
    const R: f64 = 0.12;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected {} to be close to {}",
            actual,
            expected
        );
    }

    fn flying(position: Vector3<f64>, velocity: Vector3<f64>) -> BallState {
        let mut ball = BallState::at_rest(position, R);
        ball.velocity = velocity;
        ball.in_flight = true;
        ball
    }

    fn left_hoop() -> HoopTarget {
        court_hoops(&CourtConfig::default())[0]
    }

    mod ground {
        use super::*;

        #[test]
        fn hard_landing_bounces_with_restitution() {
            let physics = PhysicsConfig::default();
            let mut ball = flying(Vector3::new(0.0, 0.2, 0.0), Vector3::new(0.0, -5.0, 0.0));
            let contact = resolve_ground(&mut ball, &physics, GROUND);
            assert_eq!(contact, Some(Contact::GroundBounce { impact_speed: 5.0 }));
            assert_close(ball.velocity.y, 3.75);
            assert_close(ball.position.y, R + GROUND);
            assert!(ball.in_flight);
        }

        #[test]
        fn bounce_damps_horizontal_velocity() {
            let physics = PhysicsConfig::default();
            let mut ball = flying(Vector3::new(0.0, 0.2, 0.0), Vector3::new(2.0, -3.0, -1.0));
            resolve_ground(&mut ball, &physics, GROUND);
            assert_close(ball.velocity.x, 2.0 * physics.bounce_friction);
            assert_close(ball.velocity.z, -physics.bounce_friction);
        }

        #[test]
        fn soft_landing_rolls() {
            let physics = PhysicsConfig::default();
            let mut ball = flying(Vector3::new(0.0, 0.21, 0.0), Vector3::new(2.0, -0.3, 0.0));
            let contact = resolve_ground(&mut ball, &physics, GROUND);
            assert_eq!(contact, Some(Contact::Rolling));
            assert_eq!(ball.velocity.y, 0.0);
            assert_close(ball.velocity.x, 2.0 * physics.rolling_friction);
        }

        #[test]
        fn ball_above_floor_is_untouched() {
            let physics = PhysicsConfig::default();
            let mut ball = flying(Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, -2.0, 0.0));
            let before = ball.clone();
            assert!(resolve_ground(&mut ball, &physics, GROUND).is_none());
            assert_eq!(ball, before);
        }

        #[test]
        fn speed_at_rest_threshold_keeps_rolling() {
            let physics = PhysicsConfig {
                rolling_friction: 1.0,
                ..Default::default()
            };
            let mut ball = flying(Vector3::new(0.0, R + GROUND, 0.0), Vector3::new(0.1, 0.0, 0.0));
            assert_eq!(resolve_ground(&mut ball, &physics, GROUND), Some(Contact::Rolling));
            assert!(ball.in_flight);
            assert_eq!(ball.velocity.x, 0.1);
        }

        #[test]
        fn speed_below_rest_threshold_stops() {
            let physics = PhysicsConfig {
                rolling_friction: 1.0,
                ..Default::default()
            };
            let mut ball = flying(
                Vector3::new(0.0, R + GROUND, 0.0),
                Vector3::new(0.1 - 1e-12, 0.0, 0.0),
            );
            assert_eq!(resolve_ground(&mut ball, &physics, GROUND), Some(Contact::CameToRest));
            assert!(!ball.in_flight);
            assert_eq!(ball.velocity, Vector3::zeros());
        }

        #[test]
        fn never_left_below_the_floor() {
            let physics = PhysicsConfig::default();
            let hoops = court_hoops(&CourtConfig::default());
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            for _ in 0..500 {
                let position = Vector3::new(
                    rng.gen_range(-15.0..15.0),
                    rng.gen_range(-1.0..5.0),
                    rng.gen_range(-7.5..7.5),
                );
                let velocity = Vector3::new(
                    rng.gen_range(-10.0..10.0),
                    rng.gen_range(-15.0..15.0),
                    rng.gen_range(-10.0..10.0),
                );
                let mut ball = flying(position, velocity);
                resolve_contacts(&mut ball, &hoops, &physics, GROUND);
                assert!(ball.position.y >= R + GROUND - 1e-12, "below floor: {:?}", ball);
            }
        }
    }

    mod rim {
        use super::*;

        #[test]
        fn strike_from_outside_flips_normal_velocity() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let position = hoop.rim_center + Vector3::new(0.55, 0.0, 0.0);
            let mut ball = flying(position, Vector3::new(-4.0, -1.0, 0.5));
            let before = ball.velocity.dot(&Vector3::x());

            let contact = resolve_rim(&mut ball, &hoop, &physics).unwrap();
            let normal = match contact {
                Contact::Rim { normal, .. } => normal,
                other => panic!("Expected rim contact, got {:?}", other),
            };
            assert!((normal - Vector3::x()).norm() < 1e-9);
            let after = ball.velocity.dot(&normal);
            assert!(before < 0.0 && after > 0.0);
            assert_close(after, 4.0 * physics.restitution);
            assert_close(ball.velocity.z, 0.5 * physics.restitution);
            assert_close(ball.velocity.y, -physics.restitution);
        }

        #[test]
        fn strike_from_inside_pushes_toward_center() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let position = hoop.rim_center + Vector3::new(0.0, 0.05, -0.35);
            let mut ball = flying(position, Vector3::new(0.0, -2.0, -3.0));

            let contact = resolve_rim(&mut ball, &hoop, &physics);
            assert!(matches!(contact, Some(Contact::Rim { .. })));
            assert!(ball.velocity.z > 0.0);
            let distance = hoop.planar_distance_to(&ball.position);
            assert!(distance < hoop.rim_inner() - R);
        }

        #[test]
        fn push_clears_the_contact_window() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let position = hoop.rim_center + Vector3::new(0.0, 0.0, 0.5);
            let mut ball = flying(position, Vector3::new(0.0, 0.0, -2.0));
            assert!(resolve_rim(&mut ball, &hoop, &physics).is_some());
            let mut again = ball.clone();
            assert!(resolve_rim(&mut again, &hoop, &physics).is_none());
            assert_eq!(again, ball);
        }

        #[test]
        fn separating_ball_is_pushed_without_bounce() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let position = hoop.rim_center + Vector3::new(0.5, 0.0, 0.0);
            let mut ball = flying(position, Vector3::new(3.0, 1.0, 0.0));
            assert!(resolve_rim(&mut ball, &hoop, &physics).is_none());
            assert_eq!(ball.velocity, Vector3::new(3.0, 1.0, 0.0));
            assert!(hoop.planar_distance_to(&ball.position) > hoop.rim_outer() + R);
        }

        #[test]
        fn ball_through_the_middle_misses_the_rim() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let mut ball = flying(hoop.rim_center, Vector3::new(0.0, -3.0, 0.0));
            assert!(resolve_rim(&mut ball, &hoop, &physics).is_none());
        }

        #[test]
        fn ball_above_rim_window_misses() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let position = hoop.rim_center + Vector3::new(0.45, 0.2, 0.0);
            let mut ball = flying(position, Vector3::new(-1.0, -1.0, 0.0));
            assert!(resolve_rim(&mut ball, &hoop, &physics).is_none());
        }
    }

    mod backboard {
        use super::*;

        #[test]
        fn reflects_normal_velocity_only() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let board = hoop.backboard;
            let position = Vector3::new(board.center.x + 0.1, 4.6, 0.3);
            let mut ball = flying(position, Vector3::new(-6.0, 1.5, -0.7));

            let contact = resolve_backboard(&mut ball, &hoop, &physics);
            assert_eq!(contact, Some(Contact::Backboard { side: HoopSide::Left }));
            assert_close(ball.position.x, board.center.x + board.half_extents.x + R);
            assert_close(ball.velocity.x, 6.0 * physics.restitution);
            assert_close(ball.velocity.y, 1.5);
            assert_close(ball.velocity.z, -0.7);
        }

        #[test]
        fn right_board_reflects_toward_center_court() {
            let physics = PhysicsConfig::default();
            let hoop = court_hoops(&CourtConfig::default())[1];
            let board = hoop.backboard;
            let position = Vector3::new(board.center.x - 0.1, 4.6, -0.4);
            let mut ball = flying(position, Vector3::new(6.0, -0.5, 0.9));

            let contact = resolve_backboard(&mut ball, &hoop, &physics);
            assert_eq!(contact, Some(Contact::Backboard { side: HoopSide::Right }));
            assert_close(ball.position.x, board.center.x - board.half_extents.x - R);
            assert_close(ball.velocity.x, -6.0 * physics.restitution);
            assert_close(ball.velocity.y, -0.5);
            assert_close(ball.velocity.z, 0.9);
        }

        #[test]
        fn ball_on_top_goes_to_the_face_on_its_side() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let board = hoop.backboard;
            let top = board.center.y + board.half_extents.y;
            let position = Vector3::new(board.center.x + 0.02, top + 0.05, 0.0);
            let mut ball = flying(position, Vector3::new(0.0, -3.0, 0.2));

            let contact = resolve_backboard(&mut ball, &hoop, &physics);
            assert_eq!(contact, Some(Contact::Backboard { side: HoopSide::Left }));
            assert_close(ball.position.x, board.center.x + board.half_extents.x + R);
            assert_close(ball.position.y, top + 0.05);
            assert_close(ball.velocity.x, 0.0);
            assert_close(ball.velocity.y, -3.0);
            assert_close(ball.velocity.z, 0.2);
        }

        #[test]
        fn ball_clearing_the_top_is_untouched() {
            let physics = PhysicsConfig::default();
            let hoop = court_hoops(&CourtConfig::default())[1];
            let board = hoop.backboard;
            let top = board.center.y + board.half_extents.y;
            let position = Vector3::new(board.center.x, top + R + 0.01, 0.0);
            let mut ball = flying(position, Vector3::new(2.0, -1.0, 0.0));
            assert!(resolve_backboard(&mut ball, &hoop, &physics).is_none());
            assert_eq!(ball.position, position);
        }

        #[test]
        fn misses_below_the_board() {
            let physics = PhysicsConfig::default();
            let hoop = left_hoop();
            let position = Vector3::new(hoop.backboard.center.x, 3.0, 0.0);
            let mut ball = flying(position, Vector3::new(-6.0, 0.0, 0.0));
            assert!(resolve_backboard(&mut ball, &hoop, &physics).is_none());
        }
    }

    #[test]
    fn contacts_resolve_ground_before_rim() {
        // A rim low enough to overlap a grounded ball still sees the clamped height.
        let physics = PhysicsConfig::default();
        let court = CourtConfig {
            rim_height: 0.25,
            ..Default::default()
        };
        let hoops = court_hoops(&court);
        let position = hoops[0].rim_center + Vector3::new(0.5, -0.2, 0.0);
        let mut ball = flying(position, Vector3::new(-2.0, -3.0, 0.0));
        let contacts = resolve_contacts(&mut ball, &hoops, &physics, GROUND);
        assert!(matches!(contacts[0], Contact::GroundBounce { .. }));
        assert!(matches!(contacts[1], Contact::Rim { .. }));
    }
}
