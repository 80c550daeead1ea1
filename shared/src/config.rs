/// Physics tuning shared by the integrator and the collision resolver.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct PhysicsConfig {
    /// Gravity magnitude (m/s^2), applied along -y
    pub gravity: f64,
    pub restitution: f64,
    /// Impact speeds at or below this stop bouncing and start rolling
    pub min_bounce_velocity: f64,
    /// Horizontal damping applied on each ground bounce
    pub bounce_friction: f64,
    /// Horizontal damping applied per tick while rolling
    pub rolling_friction: f64,
    /// Horizontal speed below which a rolling ball comes to rest
    pub rest_speed: f64,
    /// Visual spin multiplier for the kinematic rolling rotation
    pub rotation_gain: f64,
    /// Largest dt integrated in one tick (seconds). Small enough that a ball
    /// dropping through the rim at up to 15 m/s is sampled inside the scoring
    /// window at least once.
    pub max_dt: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            restitution: 0.75,
            min_bounce_velocity: 0.5,
            bounce_friction: 0.8,
            rolling_friction: 0.95,
            rest_speed: 0.1,
            rotation_gain: 1.0,
            max_dt: 0.02,
        }
    }
}

/// Launch solver and power tuning.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ShotConfig {
    /// Launch angle used at point-blank range (degrees)
    pub max_launch_angle_deg: f64,
    /// Launch angle used at `range_normalizer` and beyond (degrees)
    pub min_launch_angle_deg: f64,
    pub range_normalizer: f64,
    pub power_exponent: f64,
    pub power_gain: f64,
    /// Speed used when the target is unreachable at the chosen angle
    pub fallback_speed: f64,
    /// Apex must clear the rim by this much on adequately powered shots
    pub apex_clearance: f64,
    pub apex_power_threshold: f64,
    /// Power change per tick while a power intent is held (percent)
    pub power_step: u32,
    pub default_power: u32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            max_launch_angle_deg: 55.0,
            min_launch_angle_deg: 45.0,
            range_normalizer: 20.0,
            power_exponent: 1.5,
            power_gain: 1.0,
            fallback_speed: 6.0,
            apex_clearance: 1.0,
            apex_power_threshold: 0.1,
            power_step: 1,
            default_power: 50,
        }
    }
}

/// Shot outcome detection.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub points_per_make: u32,
    /// Lower bound of the height window around the rim (exclusive)
    pub window_below: f64,
    /// Upper bound of the height window around the rim (exclusive)
    pub window_above: f64,
    /// A ball this close above its radius with no horizontal speed has settled
    pub settle_height: f64,
    /// How long a feedback message stays up (ticks)
    pub feedback_ticks: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            points_per_make: 2,
            window_below: -0.3,
            window_above: 0.1,
            settle_height: 0.15,
            feedback_ticks: 120,
        }
    }
}

/// Court, ball and hoop geometry. Fixed for a session.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct CourtConfig {
    pub ball_radius: f64,
    /// Height of the court surface above y = 0
    pub ground_offset: f64,
    pub rest_position: [f64; 3],
    /// Pre-shot movement per tick (not time-scaled)
    pub move_step: f64,
    pub bounds_x: f64,
    pub bounds_z: f64,
    /// Backboards stand at x = +/- backboard_x
    pub backboard_x: f64,
    pub backboard_center_y: f64,
    pub backboard_half_extents: [f64; 3],
    /// Rim center distance in front of the board
    pub rim_offset: f64,
    pub rim_height: f64,
    pub rim_radius: f64,
    pub rim_tube_radius: f64,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            ball_radius: 0.12,
            ground_offset: 0.1,
            rest_position: [0.0, 0.22, 0.0],
            move_step: 0.1,
            bounds_x: 14.5,
            bounds_z: 7.0,
            backboard_x: 14.0,
            backboard_center_y: 4.5,
            backboard_half_extents: [0.05, 0.6, 0.9],
            rim_offset: 0.55,
            rim_height: 4.05,
            rim_radius: 0.45,
            rim_tube_radius: 0.02,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize, ts_rs::TS)]
#[ts(export, export_to = "../../web/src/generated/")]
#[serde(rename_all = "camelCase")]
pub struct SimConfig {
    pub physics: PhysicsConfig,
    pub shot: ShotConfig,
    pub scoring: ScoringConfig,
    pub court: CourtConfig,
}

/// Fastest descent through the rim plane `max_dt` has to keep sampled (m/s)
pub const MAX_RIM_DROP_SPEED: f64 = 15.0;

fn positive(value: f64, name: &str) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be finite and > 0", name));
    }
    Ok(())
}

fn fraction(value: f64, name: &str) -> Result<(), String> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("{} must be within [0, 1]", name));
    }
    Ok(())
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), String> {
        let p = &self.physics;
        positive(p.gravity, "gravity")?;
        fraction(p.restitution, "restitution")?;
        fraction(p.bounce_friction, "bounce_friction")?;
        fraction(p.rolling_friction, "rolling_friction")?;
        if !p.min_bounce_velocity.is_finite() || p.min_bounce_velocity < 0.0 {
            return Err("min_bounce_velocity must be finite and >= 0".to_string());
        }
        positive(p.rest_speed, "rest_speed")?;
        positive(p.max_dt, "max_dt")?;

        let s = &self.shot;
        if !(0.0..90.0).contains(&s.min_launch_angle_deg)
            || !(0.0..90.0).contains(&s.max_launch_angle_deg)
        {
            return Err("launch angles must be within [0, 90) degrees".to_string());
        }
        if s.max_launch_angle_deg < s.min_launch_angle_deg {
            return Err("max_launch_angle_deg must be >= min_launch_angle_deg".to_string());
        }
        positive(s.range_normalizer, "range_normalizer")?;
        positive(s.power_exponent, "power_exponent")?;
        positive(s.power_gain, "power_gain")?;
        positive(s.fallback_speed, "fallback_speed")?;
        if s.default_power > 100 {
            return Err("default_power must be <= 100".to_string());
        }

        let sc = &self.scoring;
        if sc.window_below >= sc.window_above {
            return Err("window_below must be < window_above".to_string());
        }
        if p.max_dt * MAX_RIM_DROP_SPEED >= sc.window_above - sc.window_below {
            return Err("max_dt lets a dropping ball skip the scoring window".to_string());
        }

        let c = &self.court;
        positive(c.ball_radius, "ball_radius")?;
        positive(c.rim_radius, "rim_radius")?;
        positive(c.rim_tube_radius, "rim_tube_radius")?;
        if c.rim_radius <= c.ball_radius {
            return Err("rim_radius must be larger than ball_radius".to_string());
        }
        positive(c.bounds_x, "bounds_x")?;
        positive(c.bounds_z, "bounds_z")?;
        if c.rest_position[0].abs() > c.bounds_x || c.rest_position[2].abs() > c.bounds_z {
            return Err("rest_position must lie inside the court bounds".to_string());
        }
        if c.rest_position[1] < c.ball_radius + c.ground_offset {
            return Err("rest_position must not be below the court surface".to_string());
        }
        Ok(())
    }
}
