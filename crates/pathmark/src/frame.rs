//! Inbound detections from the vision pipeline.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::message::Point2d;

/// What a detected marker is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRole {
    Robot,
    Goal,
    /// One of possibly several markers on the obstacle identified by `group`.
    Obstacle { group: u32 },
}

/// One marker seen in one detection cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerObservation {
    pub id: u32,
    pub role: MarkerRole,
    /// Corners in pixel coordinates: front-left, front-right, back-right, back-left.
    pub corners: Vec<Point2d>,
}

impl MarkerObservation {
    pub fn new(id: u32, role: MarkerRole, corners: &[Point2<f64>]) -> Self {
        Self {
            id,
            role,
            corners: corners.iter().map(|&p| p.into()).collect(),
        }
    }

    pub(crate) fn corner_points(&self) -> Vec<Point2<f64>> {
        self.corners.iter().map(|&p| p.into()).collect()
    }
}

/// All markers of one detection cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionFrame {
    pub markers: Vec<MarkerObservation>,
}

impl DetectionFrame {
    pub fn new(markers: Vec<MarkerObservation>) -> Self {
        Self { markers }
    }

    pub fn push(&mut self, observation: MarkerObservation) {
        self.markers.push(observation);
    }
}
