//! Auto-shooter that plays when nobody is connected.
//!
//! The bot only sees what a client sees (a `SimSnapshot`) and answers with the
//! same `InputIntents` a client would send:
//! - waits a random pause
//! - walks to a random spot on one half of the court
//! - dials the power up or down to a random target
//! - shoots, then watches until the ball is at rest

use hoops_shared::config::CourtConfig;
use hoops_shared::protocol::{InputIntents, SimSnapshot};
use rand::Rng;

/// Pause between shots (seconds)
const PAUSE_RANGE: (f64, f64) = (0.5, 2.0);
/// Shots are taken from this far out along x
const SPOT_X_RANGE: (f64, f64) = (2.0, 11.0);
const POWER_RANGE: (u32, u32) = (55, 100);

#[derive(Debug, Clone, Copy, PartialEq)]
enum BotPhase {
    Waiting { remaining: f64 },
    Walking { x: f64, z: f64 },
    Aiming { power: u32 },
    Watching { attempts_at_shot: u32 },
}

#[derive(Debug)]
pub struct ShooterBot {
    phase: BotPhase,
    court: CourtConfig,
}

impl ShooterBot {
    pub fn new(court: CourtConfig, rng: &mut impl Rng) -> Self {
        Self {
            phase: BotPhase::Waiting {
                remaining: random_pause(rng),
            },
            court,
        }
    }

    /// Decide this tick's intents from the latest snapshot.
    pub fn tick(&mut self, dt: f64, view: &SimSnapshot, rng: &mut impl Rng) -> InputIntents {
        let mut intents = InputIntents::default();
        match self.phase {
            BotPhase::Waiting { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining > 0.0 {
                    BotPhase::Waiting { remaining }
                } else {
                    self.random_spot(rng)
                };
            }
            BotPhase::Walking { x, z } => {
                if view.in_flight {
                    return intents;
                }
                let half_step = self.court.move_step / 2.0;
                let dx = x - view.position[0];
                let dz = z - view.position[2];
                intents.move_right = dx > half_step;
                intents.move_left = dx < -half_step;
                intents.move_back = dz > half_step;
                intents.move_forward = dz < -half_step;
                if dx.abs() <= half_step && dz.abs() <= half_step {
                    self.phase = BotPhase::Aiming {
                        power: rng.gen_range(POWER_RANGE.0..=POWER_RANGE.1),
                    };
                }
            }
            BotPhase::Aiming { power } => {
                if view.power < power {
                    intents.power_up = true;
                } else if view.power > power {
                    intents.power_down = true;
                } else {
                    intents.shoot = true;
                    self.phase = BotPhase::Watching {
                        attempts_at_shot: view.attempts,
                    };
                }
            }
            BotPhase::Watching { attempts_at_shot } => {
                if !view.in_flight && view.attempts > attempts_at_shot {
                    tracing::debug!(score = view.score, attempts = view.attempts, "bot shot done");
                    self.phase = BotPhase::Waiting {
                        remaining: random_pause(rng),
                    };
                }
            }
        }
        intents
    }

    fn random_spot(&self, rng: &mut impl Rng) -> BotPhase {
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let x = side * rng.gen_range(SPOT_X_RANGE.0..SPOT_X_RANGE.1);
        let z_limit = self.court.bounds_z * 0.7;
        let z = rng.gen_range(-z_limit..z_limit);
        BotPhase::Walking {
            x: x.clamp(-self.court.bounds_x, self.court.bounds_x),
            z,
        }
    }
}

fn random_pause(rng: &mut impl Rng) -> f64 {
    rng.gen_range(PAUSE_RANGE.0..PAUSE_RANGE.1)
}
