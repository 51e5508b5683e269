use std::collections::VecDeque;

use nalgebra::Point2;

/// Outcome of taking the next waypoint off a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    /// New current waypoint and, if any remain, the one after it.
    Next {
        actual: Point2<f64>,
        next: Option<Point2<f64>>,
    },
    /// Nothing left to visit.
    PathExhausted,
}

/// Waypoints handed over once by a planner and consumed front to back.
///
/// `None` until a path is set; a set path stays set even when all of its
/// waypoints have been consumed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaypointPath {
    waypoints: Option<VecDeque<Point2<f64>>>,
}

impl WaypointPath {
    /// Store `points` if no path was set before. Returns `false` otherwise.
    pub fn set_once(&mut self, points: &[Point2<f64>]) -> bool {
        if self.waypoints.is_some() {
            return false;
        }
        self.waypoints = Some(points.iter().copied().collect());
        true
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.waypoints.is_some()
    }

    /// Waypoints not yet taken.
    pub fn remaining(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.waypoints.iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.as_ref().map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pop the head as the new current waypoint and peek the following one.
    pub fn advance(&mut self) -> Advance {
        let Some(waypoints) = self.waypoints.as_mut() else {
            return Advance::PathExhausted;
        };
        match waypoints.pop_front() {
            Some(actual) => Advance::Next {
                actual,
                next: waypoints.front().copied(),
            },
            None => Advance::PathExhausted,
        }
    }
}
