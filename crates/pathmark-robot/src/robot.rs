use nalgebra::Point2;
use pathmark_core::{distance, midpoint, Marker, Sector, SectorGrid, CORNER_COUNT};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::heading::angle_to_point;
use crate::path::{Advance, WaypointPath};
use crate::{MotionState, RobotError, RobotParams};

/// A marker-tracked robot following a waypoint path.
///
/// The robot owns its sector grid and path; nothing is shared between robots,
/// so separate robots can be updated from separate threads. Updates of one
/// robot go through `&mut self` and are therefore serialized.
#[derive(Clone, Debug)]
pub struct Robot {
    marker: Marker,
    /// Midpoint of the front edge; the heading reference.
    direction: Point2<f64>,
    sector: Option<Sector>,
    grid: SectorGrid,
    params: RobotParams,
    path: WaypointPath,
    actual_point: Option<Point2<f64>>,
    next_point: Option<Point2<f64>>,
    angle_to_actual_point: Option<i32>,
    angle_to_next_point: Option<i32>,
    actual_angle: Option<i32>,
    state: MotionState,
}

impl Robot {
    pub fn new(id: u32, corners: &[Point2<f64>], params: RobotParams) -> Result<Self, RobotError> {
        let marker = Marker::new(id, corners)?;
        let grid = SectorGrid::from_params(&params.grid)?;
        let direction = front_midpoint(&marker);
        let sector = grid.locate(marker.center());
        Ok(Self {
            marker,
            direction,
            sector,
            grid,
            params,
            path: WaypointPath::default(),
            actual_point: None,
            next_point: None,
            angle_to_actual_point: None,
            angle_to_next_point: None,
            actual_angle: None,
            state: MotionState::Idle,
        })
    }

    /// Load the waypoint path. Only the first call has an effect; later calls
    /// return [`RobotError::PathAlreadySet`] and change nothing.
    pub fn set_path(&mut self, points: &[Point2<f64>]) -> Result<(), RobotError> {
        if !self.path.set_once(points) {
            return Err(RobotError::PathAlreadySet);
        }
        log::debug!("robot {}: path of {} waypoints", self.id(), points.len());
        if self.state == MotionState::Idle {
            self.transition(MotionState::Stopped);
        }
        Ok(())
    }

    /// Consume one detection cycle and return the resulting steering decision.
    ///
    /// Invalid corners are rejected before any state changes. Once the robot
    /// is [`MotionState::Finished`] the call returns immediately.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, corners), fields(robot = self.marker.id()))
    )]
    pub fn update(&mut self, corners: &[Point2<f64>]) -> Result<MotionState, RobotError> {
        if self.state.is_finished() {
            return Ok(self.state);
        }

        self.marker = self.marker.with_corners(corners)?;
        self.direction = front_midpoint(&self.marker);
        self.sector = self.grid.locate(self.marker.center());

        if !self.path.is_set() {
            return Ok(self.state);
        }

        if self.actual_point.is_none() && self.advance_waypoint() == Advance::PathExhausted {
            return Ok(self.state);
        }

        self.update_angles();

        if self.on_point() {
            match self.angle_to_next_point {
                Some(angle) => {
                    self.actual_angle = Some(angle);
                    if self.is_aligned(angle) {
                        if self.advance_waypoint() == Advance::PathExhausted {
                            return Ok(self.state);
                        }
                        self.transition(MotionState::MovingForward);
                    } else {
                        self.transition(MotionState::Rotating);
                    }
                }
                None => self.finish(),
            }
        } else if let Some(angle) = self.angle_to_actual_point {
            self.actual_angle = Some(angle);
            if self.is_aligned(angle) {
                self.transition(MotionState::MovingForward);
            } else {
                self.transition(MotionState::Rotating);
            }
        }

        Ok(self.state)
    }

    /// Halt any requested motion without touching the path.
    pub fn stop(&mut self) {
        if matches!(
            self.state,
            MotionState::Rotating | MotionState::MovingForward
        ) {
            self.transition(MotionState::Stopped);
        }
    }

    /// Whether the robot center is within `eps` of the current waypoint.
    pub fn on_point(&self) -> bool {
        self.actual_point
            .is_some_and(|p| distance(self.marker.center(), p) <= self.params.eps)
    }

    /// Signed turn angle in degrees from the current heading to `target`.
    pub fn angle_to(&self, target: Point2<f64>) -> i32 {
        angle_to_point(self.marker.center(), self.direction, target)
    }

    fn update_angles(&mut self) {
        if let Some(actual) = self.actual_point {
            self.angle_to_actual_point = Some(self.angle_to(actual));
        }
        self.angle_to_next_point = self.next_point.map(|next| self.angle_to(next));
    }

    fn advance_waypoint(&mut self) -> Advance {
        let advance = self.path.advance();
        match advance {
            Advance::Next { actual, next } => {
                log::debug!(
                    "robot {}: heading to ({:.1}, {:.1}), {} waypoints left",
                    self.id(),
                    actual.x,
                    actual.y,
                    self.path.len()
                );
                self.actual_point = Some(actual);
                self.next_point = next;
            }
            Advance::PathExhausted => self.finish(),
        }
        advance
    }

    #[inline]
    fn is_aligned(&self, angle: i32) -> bool {
        angle.abs() < self.params.angle_eps
    }

    fn finish(&mut self) {
        self.transition(MotionState::Finished);
    }

    fn transition(&mut self, to: MotionState) {
        if self.state != to {
            log::debug!("robot {}: {:?} -> {:?}", self.id(), self.state, to);
            self.state = to;
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.marker.id()
    }

    #[inline]
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    #[inline]
    pub fn corners(&self) -> &[Point2<f64>; CORNER_COUNT] {
        self.marker.corners()
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.marker.center()
    }

    #[inline]
    pub fn direction(&self) -> Point2<f64> {
        self.direction
    }

    #[inline]
    pub fn sector(&self) -> Option<Sector> {
        self.sector
    }

    #[inline]
    pub fn grid(&self) -> &SectorGrid {
        &self.grid
    }

    #[inline]
    pub fn params(&self) -> &RobotParams {
        &self.params
    }

    #[inline]
    pub fn state(&self) -> MotionState {
        self.state
    }

    #[inline]
    pub fn actual_point(&self) -> Option<Point2<f64>> {
        self.actual_point
    }

    #[inline]
    pub fn next_point(&self) -> Option<Point2<f64>> {
        self.next_point
    }

    #[inline]
    pub fn angle_to_actual_point(&self) -> Option<i32> {
        self.angle_to_actual_point
    }

    #[inline]
    pub fn angle_to_next_point(&self) -> Option<i32> {
        self.angle_to_next_point
    }

    /// Angle the last steering decision was based on.
    #[inline]
    pub fn actual_angle(&self) -> Option<i32> {
        self.actual_angle
    }

    /// Waypoints not yet taken as the current one.
    pub fn remaining_path(&self) -> impl Iterator<Item = Point2<f64>> + '_ {
        self.path.remaining()
    }

    #[inline]
    pub fn path_created(&self) -> bool {
        self.path.is_set()
    }

    #[inline]
    pub fn on_finish(&self) -> bool {
        self.state.is_finished()
    }

    #[inline]
    pub fn move_forward(&self) -> bool {
        self.state.move_forward()
    }

    #[inline]
    pub fn self_rotation(&self) -> bool {
        self.state.self_rotation()
    }
}

fn front_midpoint(marker: &Marker) -> Point2<f64> {
    midpoint(marker.front_left(), marker.front_right())
}
