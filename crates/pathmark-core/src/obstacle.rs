//! Obstacle outline reconstruction from marker quads.
//!
//! A physical obstacle may carry several markers. Their corners are reduced to
//! an outer boundary:
//! 1. The geometric center is the midpoint of the bounding box over all corners.
//! 2. With several markers, each contributes its two corners farthest from
//!    that center; inner corners face the obstacle interior.
//! 3. A single marker contributes all four corners as-is.
//! 4. Multi-marker boundaries are ordered with a greedy nearest-neighbour tour.
//!
//! The ordering is a heuristic: it yields a plausible simple polygon for the
//! usual convex layouts but is not a convex hull.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::geometry::{distance, Bounds, Polygon};
use crate::{FrameMapping, Marker};

/// Corners taken from each marker of a multi-marker obstacle.
const BORDER_POINTS_PER_MARKER: usize = 2;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ObstacleError {
    #[error("obstacle needs at least one marker")]
    EmptyObstacleInput,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    id: u32,
    geometric_center: Point2<f64>,
    obstacle_points: Vec<Point2<f64>>,
}

impl Obstacle {
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(markers), fields(markers = markers.len()))
    )]
    pub fn build(id: u32, markers: &[Marker]) -> Result<Self, ObstacleError> {
        let corners = markers.iter().flat_map(|m| m.corners().iter().copied());
        let bounds = Bounds::from_points(corners).ok_or(ObstacleError::EmptyObstacleInput)?;
        let geometric_center = bounds.center();

        let obstacle_points = match markers {
            [single] => single.corners().to_vec(),
            _ => {
                let border = markers
                    .iter()
                    .flat_map(|m| farthest_corners(m, geometric_center, BORDER_POINTS_PER_MARKER))
                    .collect();
                order_boundary(border)
            }
        };

        log::debug!(
            "obstacle {id}: {} marker(s) -> {} boundary points around ({:.1}, {:.1})",
            markers.len(),
            obstacle_points.len(),
            geometric_center.x,
            geometric_center.y
        );

        Ok(Self {
            id,
            geometric_center,
            obstacle_points,
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn geometric_center(&self) -> Point2<f64> {
        self.geometric_center
    }

    /// Ordered boundary polygon in pixel coordinates.
    #[inline]
    pub fn obstacle_points(&self) -> &[Point2<f64>] {
        &self.obstacle_points
    }

    pub fn points_in_planner_frame(&self, frame: &FrameMapping) -> Vec<Point2<f64>> {
        self.obstacle_points
            .iter()
            .map(|&p| frame.to_planner(p))
            .collect()
    }

    pub fn planner_footprint(&self, frame: &FrameMapping) -> Polygon {
        Polygon::new(self.points_in_planner_frame(frame))
    }
}

/// `count` corners of `marker` farthest from `center`, farthest first.
///
/// Equal distances rank the later corner first.
fn farthest_corners(marker: &Marker, center: Point2<f64>, count: usize) -> Vec<Point2<f64>> {
    let mut ranked: Vec<(usize, f64, Point2<f64>)> = marker
        .corners()
        .iter()
        .enumerate()
        .map(|(i, &corner)| (i, distance(center, corner), corner))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(b.0.cmp(&a.0)));
    ranked.into_iter().take(count).map(|(_, _, p)| p).collect()
}

/// Greedy nearest-neighbour ordering of boundary points.
///
/// Starts from the first point and repeatedly takes the closest remaining one
/// (earliest on ties); the final remaining point closes the tour.
pub fn order_boundary(mut points: Vec<Point2<f64>>) -> Vec<Point2<f64>> {
    if points.len() < 3 {
        return points;
    }
    let mut ordered = Vec::with_capacity(points.len());
    let mut last = points.remove(0);
    ordered.push(last);
    while points.len() > 1 {
        let nearest = points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| distance(last, **a).total_cmp(&distance(last, **b)))
            .map(|(i, _)| i)
            .unwrap_or(0);
        last = points.remove(nearest);
        ordered.push(last);
    }
    ordered.append(&mut points);
    ordered
}
