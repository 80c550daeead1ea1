use crate::ball::planar_distance;
use hoops_shared::config::CourtConfig;
use nalgebra::Vector3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoopSide {
    Left,
    Right,
}

impl HoopSide {
    /// Sign of the hoop's x coordinate
    fn sign(self) -> f64 {
        match self {
            HoopSide::Left => -1.0,
            HoopSide::Right => 1.0,
        }
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vector3<f64>,
    pub half_extents: Vector3<f64>,
}

impl Aabb {
    /// True if `point` lies inside the box grown by `margin` on every side.
    pub fn contains_expanded(&self, point: &Vector3<f64>, margin: f64) -> bool {
        let d = point - self.center;
        d.x.abs() <= self.half_extents.x + margin
            && d.y.abs() <= self.half_extents.y + margin
            && d.z.abs() <= self.half_extents.z + margin
    }
}

/// One hoop: a torus rim in front of a box backboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoopTarget {
    pub side: HoopSide,
    pub rim_center: Vector3<f64>,
    pub rim_radius: f64,
    pub tube_radius: f64,
    pub backboard: Aabb,
}

impl HoopTarget {
    /// Build a hoop from court geometry. Rims sit in front of the board,
    /// toward center court.
    pub fn from_court(court: &CourtConfig, side: HoopSide) -> Self {
        let board_x = side.sign() * court.backboard_x;
        let rim_x = board_x - side.sign() * court.rim_offset;
        let [hx, hy, hz] = court.backboard_half_extents;
        Self {
            side,
            rim_center: Vector3::new(rim_x, court.rim_height, 0.0),
            rim_radius: court.rim_radius,
            tube_radius: court.rim_tube_radius,
            backboard: Aabb {
                center: Vector3::new(board_x, court.backboard_center_y, 0.0),
                half_extents: Vector3::new(hx, hy, hz),
            },
        }
    }

    pub fn rim_inner(&self) -> f64 {
        self.rim_radius - self.tube_radius
    }

    pub fn rim_outer(&self) -> f64 {
        self.rim_radius + self.tube_radius
    }

    pub fn planar_distance_to(&self, point: &Vector3<f64>) -> f64 {
        planar_distance(point, &self.rim_center)
    }

    /// Height of `point` relative to the rim plane.
    pub fn height_offset(&self, point: &Vector3<f64>) -> f64 {
        point.y - self.rim_center.y
    }
}

/// Both hoops of the court, left first.
pub fn court_hoops(court: &CourtConfig) -> [HoopTarget; 2] {
    [
        HoopTarget::from_court(court, HoopSide::Left),
        HoopTarget::from_court(court, HoopSide::Right),
    ]
}

/// The hoop whose rim center is closest to `position`.
pub fn nearest_hoop<'a>(hoops: &'a [HoopTarget], position: &Vector3<f64>) -> Option<&'a HoopTarget> {
    hoops.iter().min_by(|a, b| {
        let da = (a.rim_center - position).norm();
        let db = (b.rim_center - position).norm();
        da.total_cmp(&db)
    })
}
