use crate::ball::BallState;
use crate::collision::{resolve_contacts, Contact};
use crate::hoop::{court_hoops, nearest_hoop, HoopSide, HoopTarget};
use crate::integrator::step_flight;
use crate::movement::step_movement;
use crate::score::{ScoreSession, ShotOutcome, ShotPhase};
use crate::trajectory::{solve_launch, LaunchSolution, ShotParameters};
use hoops_shared::config::SimConfig;
use hoops_shared::protocol::{round4, FeedbackWire, InputIntents, PhaseWire, SimSnapshot};
use nalgebra::Vector3;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Launched {
        target: HoopSide,
        power: u32,
        solution: LaunchSolution,
    },
    Contact(Contact),
    Outcome(ShotOutcome),
    Reset,
}

/// The simulation context. Owns the ball, the hoops and the score; every
/// mutation goes through `tick`, `shoot` or `reset`.
pub struct GameState {
    pub config: SimConfig,
    pub ball: BallState,
    pub hoops: [HoopTarget; 2],
    pub session: ScoreSession,
    power: u32,
    tick_count: u64,
    rest_position: Vector3<f64>,
}

impl GameState {
    pub fn new(config: SimConfig) -> Self {
        let court = &config.court;
        let [x, y, z] = court.rest_position;
        let rest_position = Vector3::new(x, y, z);
        Self {
            ball: BallState::at_rest(rest_position, court.ball_radius),
            hoops: court_hoops(court),
            session: ScoreSession::new(),
            power: config.shot.default_power.min(100),
            tick_count: 0,
            rest_position,
            config,
        }
    }

    /// Current power, 0-100
    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn set_power(&mut self, power: u32) {
        self.power = power.min(100);
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The hoop the next shot will aim at.
    pub fn nearest_hoop(&self) -> &HoopTarget {
        nearest_hoop(&self.hoops, &self.ball.position).unwrap_or(&self.hoops[0])
    }

    /// Advance the simulation by one tick.
    ///
    /// Triggers are handled first (reset, power, shoot). Then exactly one
    /// controller owns the ball: movement while at rest, or integration and
    /// contact resolution followed by scoring while in flight.
    pub fn tick(&mut self, dt: f64, intents: &InputIntents) -> Vec<SimEvent> {
        self.tick_count += 1;
        self.session.tick_feedback();

        let mut events = Vec::new();
        if intents.reset {
            self.reset();
            events.push(SimEvent::Reset);
        }
        self.adjust_power(intents);
        if intents.shoot {
            events.extend(self.shoot());
        }

        let Some(dt) = self.sanitize_dt(dt) else {
            return events;
        };

        if self.ball.in_flight {
            let physics = self.config.physics;
            step_flight(&mut self.ball, dt, &physics);
            let contacts = resolve_contacts(
                &mut self.ball,
                &self.hoops,
                &physics,
                self.config.court.ground_offset,
            );
            events.extend(contacts.into_iter().map(SimEvent::Contact));
            if let Some(outcome) = self.session.judge(
                &self.ball,
                &self.hoops,
                &self.config.scoring,
                physics.rest_speed,
            ) {
                tracing::info!(
                    ?outcome,
                    score = self.session.score,
                    attempts = self.session.attempts,
                    "shot resolved"
                );
                events.push(SimEvent::Outcome(outcome));
            }
        } else {
            step_movement(
                &mut self.ball,
                intents,
                &self.config.court,
                self.config.physics.rotation_gain,
            );
        }

        events
    }

    /// Launch at the nearest hoop with the current power.
    ///
    /// Ignored while the ball is in flight. A zero-power shot still counts as
    /// an attempt but leaves the ball where it is and resolves as a miss.
    pub fn shoot(&mut self) -> Vec<SimEvent> {
        if self.ball.in_flight {
            return Vec::new();
        }

        let hoop = *self.nearest_hoop();
        let params = ShotParameters {
            power: self.power as f64 / 100.0,
            physics: self.config.physics,
        };
        let solution = solve_launch(
            &self.ball.position,
            &hoop.rim_center,
            hoop.rim_center.y,
            &params,
            &self.config.shot,
        );

        self.session.begin_attempt();
        let mut events = vec![SimEvent::Launched {
            target: hoop.side,
            power: self.power,
            solution,
        }];

        if self.power == 0 {
            tracing::info!(attempts = self.session.attempts, "zero-power shot");
            let outcome = self.session.record_miss(&self.config.scoring);
            events.push(SimEvent::Outcome(outcome));
            return events;
        }

        tracing::info!(
            side = ?hoop.side,
            power = self.power,
            speed = solution.velocity.norm(),
            fallback = solution.fallback,
            apex_boosted = solution.apex_boosted,
            "shot launched"
        );
        self.ball.velocity = solution.velocity;
        self.ball.in_flight = true;
        events
    }

    /// Reinitialize the simulation: rest pose, default power and a fresh
    /// scoring session. The tick counter keeps running.
    pub fn reset(&mut self) {
        self.ball = BallState::at_rest(self.rest_position, self.config.court.ball_radius);
        self.session = ScoreSession::new();
        self.power = self.config.shot.default_power.min(100);
    }

    pub fn snapshot(&self) -> SimSnapshot {
        let p = self.ball.position;
        let q = self.ball.orientation.coords;
        SimSnapshot {
            tick: self.tick_count,
            position: [round4(p.x), round4(p.y), round4(p.z)],
            orientation: [q.x, q.y, q.z, q.w],
            in_flight: self.ball.in_flight,
            phase: match self.session.phase() {
                ShotPhase::NotAttempted => PhaseWire::NotAttempted,
                ShotPhase::InFlight => PhaseWire::InFlight,
                ShotPhase::Scored => PhaseWire::Scored,
                ShotPhase::Missed => PhaseWire::Missed,
            },
            score: self.session.score,
            attempts: self.session.attempts,
            makes: self.session.makes,
            shooting_percentage: self.session.shooting_percentage(),
            power: self.power,
            feedback: self.session.feedback().map(|f| FeedbackWire {
                message: f.message.to_string(),
                ticks_remaining: f.ticks_remaining,
            }),
        }
    }

    fn adjust_power(&mut self, intents: &InputIntents) {
        let step = self.config.shot.power_step;
        if intents.power_up {
            self.power = self.power.saturating_add(step).min(100);
        }
        if intents.power_down {
            self.power = self.power.saturating_sub(step);
        }
    }

    /// Non-finite or non-positive dt skips the tick; oversized dt is clamped
    /// so the ball cannot tunnel through the rim or the floor.
    fn sanitize_dt(&self, dt: f64) -> Option<f64> {
        if !dt.is_finite() || dt <= 0.0 {
            tracing::warn!(dt, "skipping tick with invalid dt");
            return None;
        }
        let max_dt = self.config.physics.max_dt;
        if dt > max_dt {
            tracing::warn!(dt, max_dt, "clamping oversized dt");
            return Some(max_dt);
        }
        Some(dt)
    }
}
