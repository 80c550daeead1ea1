//! Shot outcome state machine.
//!
//! ```text
//! NotAttempted --launch--> InFlight --through rim--> Scored
//!                              \------settled------> Missed
//! ```
//!
//! `Scored` and `Missed` hold until the next launch. A made shot fires at most
//! once per attempt no matter how many times the ball comes back through the
//! rim plane afterwards.

use crate::ball::{horizontal_speed, BallState};
use crate::hoop::HoopTarget;
use hoops_shared::config::ScoringConfig;

pub const MADE_MESSAGE: &str = "SHOT MADE!";
pub const MISSED_MESSAGE: &str = "MISSED SHOT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShotPhase {
    #[default]
    NotAttempted,
    InFlight,
    Scored,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Made,
    Missed,
}

/// Transient message for the UI, counted down once per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: &'static str,
    pub ticks_remaining: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ScoreSession {
    pub score: u32,
    pub attempts: u32,
    pub makes: u32,
    scored_this_attempt: bool,
    phase: ShotPhase,
    feedback: Option<Feedback>,
}

impl ScoreSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    pub fn scored_this_attempt(&self) -> bool {
        self.scored_this_attempt
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Makes over attempts, in percent. Zero before the first attempt.
    pub fn shooting_percentage(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.makes as f64 / self.attempts as f64 * 100.0
    }

    /// A new shot was launched.
    pub fn begin_attempt(&mut self) {
        self.attempts += 1;
        self.scored_this_attempt = false;
        self.phase = ShotPhase::InFlight;
    }

    /// Inspect the resolved ball state for this tick.
    pub fn judge(
        &mut self,
        ball: &BallState,
        hoops: &[HoopTarget],
        scoring: &ScoringConfig,
        rest_speed: f64,
    ) -> Option<ShotOutcome> {
        if self.phase != ShotPhase::InFlight {
            return None;
        }

        if !self.scored_this_attempt && ball.velocity.y < 0.0 {
            let through = hoops.iter().any(|hoop| {
                let offset = hoop.height_offset(&ball.position);
                hoop.planar_distance_to(&ball.position) < hoop.rim_radius - ball.radius
                    && offset > scoring.window_below
                    && offset < scoring.window_above
            });
            if through {
                self.scored_this_attempt = true;
                self.makes += 1;
                self.score += scoring.points_per_make;
                self.phase = ShotPhase::Scored;
                self.show(MADE_MESSAGE, scoring);
                return Some(ShotOutcome::Made);
            }
        }

        let settled = ball.position.y <= ball.radius + scoring.settle_height
            && horizontal_speed(&ball.velocity) < rest_speed;
        if settled {
            return Some(self.record_miss(scoring));
        }
        None
    }

    /// Close the current attempt as a miss.
    pub fn record_miss(&mut self, scoring: &ScoringConfig) -> ShotOutcome {
        self.phase = ShotPhase::Missed;
        self.show(MISSED_MESSAGE, scoring);
        ShotOutcome::Missed
    }

    pub fn tick_feedback(&mut self) {
        if let Some(feedback) = &mut self.feedback {
            feedback.ticks_remaining = feedback.ticks_remaining.saturating_sub(1);
            if feedback.ticks_remaining == 0 {
                self.feedback = None;
            }
        }
    }

    fn show(&mut self, message: &'static str, scoring: &ScoringConfig) {
        self.feedback = (scoring.feedback_ticks > 0).then_some(Feedback {
            message,
            ticks_remaining: scoring.feedback_ticks,
        });
    }
}
