use nalgebra::{Unit, UnitQuaternion, Vector3};

/// Horizontal part of a vector (y dropped).
pub fn planar(v: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(v.x, 0.0, v.z)
}

/// Distance between two points ignoring height.
pub fn planar_distance(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    planar(&(a - b)).norm()
}

pub fn horizontal_speed(v: &Vector3<f64>) -> f64 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// The basketball. Owned by the simulation; renderers only see snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct BallState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub radius: f64,
    pub in_flight: bool,
}

impl BallState {
    pub fn at_rest(position: Vector3<f64>, radius: f64) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            radius,
            in_flight: false,
        }
    }

    /// Lowest allowed center height.
    pub fn floor_height(&self, ground_offset: f64) -> f64 {
        self.radius + ground_offset
    }

    /// Spin the ball as if it rolled along `displacement` without slipping.
    ///
    /// Purely visual: the step angle is the planar distance over the radius,
    /// scaled by `gain`, about the horizontal axis perpendicular to the motion.
    /// The step is pre-multiplied so rotations accumulate in world space.
    pub fn roll(&mut self, displacement: &Vector3<f64>, gain: f64) {
        let step = planar(displacement);
        let distance = step.norm();
        if distance < 1e-9 {
            return;
        }
        let axis = Vector3::y().cross(&(step / distance));
        let angle = distance / self.radius * gain;
        let delta = UnitQuaternion::from_axis_angle(&Unit::new_normalize(axis), angle);
        self.orientation = delta * self.orientation;
    }
}
