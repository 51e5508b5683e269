//! Detected quadrilateral markers.
//!
//! Corner order is fixed: front-left, front-right, back-right, back-left.
//! The center is the midpoint of the front-left/back-right diagonal.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::geometry::{midpoint, Polygon};
use crate::FrameMapping;

/// Number of corners of every marker.
pub const CORNER_COUNT: usize = 4;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("marker needs exactly 4 corners, got {got}")]
    InvalidMarkerShape { got: usize },
}

/// Id, ordered corners and derived center of one detection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    id: u32,
    corners: [Point2<f64>; CORNER_COUNT],
    center: Point2<f64>,
}

impl Marker {
    pub fn new(id: u32, corners: &[Point2<f64>]) -> Result<Self, MarkerError> {
        let corners: [Point2<f64>; CORNER_COUNT] = corners
            .try_into()
            .map_err(|_| MarkerError::InvalidMarkerShape { got: corners.len() })?;
        Ok(Self {
            id,
            center: midpoint(corners[0], corners[2]),
            corners,
        })
    }

    /// Same marker id observed with new corners.
    pub fn with_corners(&self, corners: &[Point2<f64>]) -> Result<Self, MarkerError> {
        Self::new(self.id, corners)
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn corners(&self) -> &[Point2<f64>; CORNER_COUNT] {
        &self.corners
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    #[inline]
    pub fn front_left(&self) -> Point2<f64> {
        self.corners[0]
    }

    #[inline]
    pub fn front_right(&self) -> Point2<f64> {
        self.corners[1]
    }

    pub fn corners_in_planner_frame(&self, frame: &FrameMapping) -> [Point2<f64>; CORNER_COUNT] {
        self.corners.map(|p| frame.to_planner(p))
    }

    /// The marker outline in planner coordinates.
    pub fn planner_footprint(&self, frame: &FrameMapping) -> Polygon {
        Polygon::new(self.corners_in_planner_frame(frame).to_vec())
    }
}

/// A fixed target region marked on the field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    marker: Marker,
}

impl Goal {
    pub fn new(id: u32, corners: &[Point2<f64>]) -> Result<Self, MarkerError> {
        Ok(Self {
            marker: Marker::new(id, corners)?,
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.marker.id()
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.marker.center()
    }

    #[inline]
    pub fn corners(&self) -> &[Point2<f64>; CORNER_COUNT] {
        self.marker.corners()
    }

    #[inline]
    pub fn marker(&self) -> &Marker {
        &self.marker
    }
}

impl From<Marker> for Goal {
    fn from(marker: Marker) -> Self {
        Self { marker }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + side, y0),
            Point2::new(x0 + side, y0 + side),
            Point2::new(x0, y0 + side),
        ]
    }

    #[test]
    fn center_is_diagonal_midpoint() {
        let m = Marker::new(7, &square(10.0, 20.0, 8.0)).expect("marker");
        assert_eq!(m.id(), 7);
        assert_eq!(m.center(), Point2::new(14.0, 24.0));
    }

    #[test]
    fn wrong_corner_count_is_rejected() {
        let mut corners = square(0.0, 0.0, 1.0);
        corners.pop();
        assert_eq!(
            Marker::new(1, &corners),
            Err(MarkerError::InvalidMarkerShape { got: 3 })
        );
        assert_eq!(
            Marker::new(1, &[]),
            Err(MarkerError::InvalidMarkerShape { got: 0 })
        );
    }

    #[test]
    fn with_corners_keeps_id() {
        let m = Marker::new(3, &square(0.0, 0.0, 2.0)).expect("marker");
        let moved = m.with_corners(&square(5.0, 5.0, 2.0)).expect("moved");
        assert_eq!(moved.id(), 3);
        assert_eq!(moved.front_left(), Point2::new(5.0, 5.0));
        assert_eq!(moved.center(), Point2::new(6.0, 6.0));
    }

    #[test]
    fn planner_footprint_contains_planner_center() {
        let frame = FrameMapping::default();
        let goal = Goal::new(2, &square(500.0, 500.0, 24.0)).expect("goal");
        let footprint = goal.marker().planner_footprint(&frame);
        let c = frame.to_planner(goal.center());
        assert!(footprint.contains(c));
        assert_abs_diff_eq!(footprint.points[0].x, 500.0 * 10.0 / 1024.0 - 5.0, epsilon = 1e-12);
    }
}
