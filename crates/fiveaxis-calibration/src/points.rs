//! Probe point storage
//!
//! [`ProbePointStore`] holds the ten operator-defined targets (P0-P9).
//! [`ActualProbePoints`] holds the positions the machine really reached.

use crate::parser::parse_xyz;
use fiveaxis_core::{CalibrationError, Point3, PROBE_POINT_COUNT};
use std::ops::Index;

/// Operator-defined probe targets
///
/// Every slot starts unset (NaN in all components). Unset components mean
/// "keep the current axis position" when the point is used as a move target.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbePointStore {
    points: [Point3; PROBE_POINT_COUNT],
}

impl ProbePointStore {
    /// Create a store with every point unset
    pub fn new() -> Self {
        Self {
            points: [Point3::UNSET; PROBE_POINT_COUNT],
        }
    }

    /// Overwrite one point. Omitted components become NaN.
    pub fn set_point(
        &mut self,
        index: usize,
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
    ) -> Result<(), CalibrationError> {
        let slot = self
            .points
            .get_mut(index)
            .ok_or(CalibrationError::PointIndexOutOfRange {
                index: index as i64,
            })?;
        *slot = Point3::from_options(x, y, z);
        Ok(())
    }

    /// Parse configured point strings into consecutive slots.
    ///
    /// Empty strings leave their slot untouched; anything past the tenth
    /// string is ignored.
    pub fn load_from_config<'a, I>(&mut self, strings: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for (index, text) in strings.into_iter().take(PROBE_POINT_COUNT).enumerate() {
            if text.is_empty() {
                continue;
            }
            self.points[index] = parse_xyz(text);
            tracing::debug!("probe point {} configured as {}", index + 1, self.points[index]);
        }
    }

    /// Point at `index`, `None` outside 0..=9
    pub fn point(&self, index: usize) -> Option<Point3> {
        self.points.get(index).copied()
    }

    /// Iterate all ten points in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Point3> {
        self.points.iter()
    }
}

impl Default for ProbePointStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Positions recorded after arriving at each probe point
///
/// Starts at the origin. Within one run each slot is written once, by the
/// step that arrives at the matching probe point.
#[derive(Debug, Clone, PartialEq)]
pub struct ActualProbePoints {
    points: [Point3; PROBE_POINT_COUNT],
}

impl ActualProbePoints {
    /// Create a table with every entry at the origin
    pub fn new() -> Self {
        Self {
            points: [Point3::ZERO; PROBE_POINT_COUNT],
        }
    }

    /// Store the achieved position for probe point `index`
    pub(crate) fn record(&mut self, index: usize, position: Point3) {
        self.points[index] = position;
    }

    /// Reset every entry to the origin
    pub(crate) fn reset(&mut self) {
        self.points = [Point3::ZERO; PROBE_POINT_COUNT];
    }

    /// Entry at `index`, `None` outside 0..=9
    pub fn get(&self, index: usize) -> Option<Point3> {
        self.points.get(index).copied()
    }
}

impl Default for ActualProbePoints {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for ActualProbePoints {
    type Output = Point3;

    fn index(&self, index: usize) -> &Point3 {
        &self.points[index]
    }
}
