//! Geometry derivation routines
//!
//! Pure functions turning pairs of recorded probe positions into rotary axis
//! corrections. All angles are radians. A measurement that is inconsistent
//! with the fixture geometry yields NaN, which callers treat as "no correction
//! applicable".

use fiveaxis_core::{CalibrationParameters, Point3};
use std::fmt;

/// B-axis rotation centre in the machine XZ plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationCenter {
    /// X coordinate of the rotation axis
    pub x: f64,
    /// Z coordinate of the rotation axis
    pub z: f64,
}

impl RotationCenter {
    /// Create a centre from X and Z
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Check whether both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    /// Distance to a point, measured in the XZ plane
    pub fn distance_to(&self, point: &Point3) -> f64 {
        (point.x - self.x).hypot(point.z - self.z)
    }
}

impl fmt::Display for RotationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{:.3} z{:.3}", self.x, self.z)
    }
}

/// `asin` restricted to its real domain, NaN elsewhere
fn checked_asin(ratio: f64) -> f64 {
    if (-1.0..=1.0).contains(&ratio) {
        ratio.asin()
    } else {
        f64::NAN
    }
}

/// A-axis tilt offset from the first two probe positions.
///
/// `asin((z2 - z1) / (2 * L))` with `L` the total fixture length.
pub fn a_axis_offset(first: &Point3, second: &Point3, params: &CalibrationParameters) -> f64 {
    checked_asin((second.z - first.z) / (2.0 * params.fixture_length()))
}

/// C-axis yaw offset from the first two probe positions.
///
/// Full-range `atan2(dy, dx)`; NaN when the points coincide in XY.
pub fn c_axis_offset(first: &Point3, second: &Point3) -> f64 {
    let dx = second.x - first.x;
    let dy = second.y - first.y;
    if dx == 0.0 && dy == 0.0 {
        return f64::NAN;
    }
    dy.atan2(dx)
}

/// B-axis pitch correction from the third and fourth probe positions.
///
/// `asin((z4 - z3) / L)` with `L` the total fixture length.
pub fn b_axis_correction(third: &Point3, fourth: &Point3, params: &CalibrationParameters) -> f64 {
    checked_asin((fourth.z - third.z) / params.fixture_length())
}

/// First estimate of the B-axis rotation centre from the third probe position
/// and the B correction angle.
pub fn rotation_center_estimate(
    third: &Point3,
    angle: f64,
    params: &CalibrationParameters,
) -> RotationCenter {
    let reach = params.fixture_length() * angle.sin();
    RotationCenter::new(third.x + reach, third.z - reach)
}

/// Refine the rotation centre so it lies at distance `radius` from both probe
/// positions (XZ plane).
///
/// Of the two circle centres through both points, the one nearer `estimate`
/// is returned. When the points are more than `2 * radius` apart no such
/// circle exists and the estimate is projected onto the perpendicular
/// bisector, the locus of points equidistant from both. Coincident points
/// give the estimate back unchanged; a non-finite estimate gives NaN.
pub fn refine_rotation_center(
    third: &Point3,
    fourth: &Point3,
    estimate: RotationCenter,
    radius: f64,
) -> RotationCenter {
    let nan = RotationCenter::new(f64::NAN, f64::NAN);
    if !estimate.is_finite() {
        return nan;
    }
    if ![third.x, third.z, fourth.x, fourth.z, radius]
        .iter()
        .all(|v| v.is_finite())
    {
        return estimate;
    }

    let (dx, dz) = (fourth.x - third.x, fourth.z - third.z);
    let chord = dx.hypot(dz);
    if chord == 0.0 {
        return estimate;
    }

    let mid_x = (third.x + fourth.x) / 2.0;
    let mid_z = (third.z + fourth.z) / 2.0;
    // Unit normal to the chord
    let (nx, nz) = (-dz / chord, dx / chord);

    let half = chord / 2.0;
    let radius = radius.abs();
    if half > radius {
        let along = (estimate.x - mid_x) * nx + (estimate.z - mid_z) * nz;
        return RotationCenter::new(mid_x + along * nx, mid_z + along * nz);
    }

    let offset = (radius * radius - half * half).sqrt();
    let first = RotationCenter::new(mid_x + offset * nx, mid_z + offset * nz);
    let second = RotationCenter::new(mid_x - offset * nx, mid_z - offset * nz);

    let dist_sq = |c: &RotationCenter| (c.x - estimate.x).powi(2) + (c.z - estimate.z).powi(2);
    if dist_sq(&first) <= dist_sq(&second) {
        first
    } else {
        second
    }
}
