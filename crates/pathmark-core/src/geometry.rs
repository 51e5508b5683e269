//! Plain 2D helpers shared by markers, obstacles and the robot controller.
//!
//! All points are `nalgebra::Point2<f64>`. Whether a point is in pixel or
//! planner coordinates is implied by where it came from; use
//! [`FrameMapping`](crate::FrameMapping) to switch frames explicitly.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Euclidean distance between two points.
#[inline]
pub fn distance(p: Point2<f64>, q: Point2<f64>) -> f64 {
    ((q.x - p.x).powi(2) + (q.y - p.y).powi(2)).sqrt()
}

/// Midpoint of the segment `p`–`q`.
#[inline]
pub fn midpoint(p: Point2<f64>, q: Point2<f64>) -> Point2<f64> {
    Point2::new((p.x + q.x) / 2.0, (p.y + q.y) / 2.0)
}

/// Axis-aligned bounding box, grown point by point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds {
    /// Bounds containing no point. `min > max` until something is added.
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2<f64>>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand_to_include(p);
        }
        (!bounds.is_empty()).then_some(bounds)
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_to_include(&mut self, p: Point2<f64>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        midpoint(self.min, self.max)
    }
}

/// Closed polygon given by its ordered vertices.
///
/// Used as the planner-frame footprint of markers and obstacles. The last
/// vertex connects back to the first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point2<f64>>,
}

impl Polygon {
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// A polygon needs at least three vertices to enclose anything.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// Even-odd point containment test.
    ///
    /// Points exactly on an edge may land on either side.
    pub fn contains(&self, p: Point2<f64>) -> bool {
        if !self.is_valid() {
            return false;
        }
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}
