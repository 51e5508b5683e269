//! Per-cycle bookkeeping of every tracked entity.
//!
//! Robots persist across cycles and are updated in place. Goals and obstacles
//! are rebuilt from scratch from each frame.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Point2;
use pathmark_core::{
    FrameMapping, FrameMappingError, Goal, Marker, MarkerError, Obstacle, ObstacleError, Polygon,
    SectorGrid, SectorGridError,
};
use pathmark_robot::{Robot, RobotError, RobotParams};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::frame::{DetectionFrame, MarkerRole};
use crate::message::{GoalData, ObstacleData, Point2d, RobotData};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("marker {id}: {source}")]
    Marker {
        id: u32,
        #[source]
        source: MarkerError,
    },
    #[error(transparent)]
    Obstacle(#[from] ObstacleError),
    #[error(transparent)]
    Robot(#[from] RobotError),
    #[error(transparent)]
    SectorGrid(#[from] SectorGridError),
    #[error(transparent)]
    FrameMapping(#[from] FrameMappingError),
    #[error("no robot with id {id} has been observed")]
    UnknownRobot { id: u32 },
}

/// Messages describing the scene after one cycle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub robots: Vec<RobotData>,
    pub goals: Vec<GoalData>,
    pub obstacles: Vec<ObstacleData>,
}

/// Robots, goals and obstacles seen by one overhead camera.
#[derive(Clone, Debug)]
pub struct Scene {
    frame: FrameMapping,
    robot_params: RobotParams,
    robots: BTreeMap<u32, Robot>,
    goals: Vec<Goal>,
    obstacles: Vec<Obstacle>,
}

impl Scene {
    pub fn new(frame: FrameMapping, robot_params: RobotParams) -> Result<Self, SceneError> {
        // Every robot builds its own grid; reject bad dimensions up front.
        frame.validate()?;
        SectorGrid::from_params(&robot_params.grid)?;
        Ok(Self {
            frame,
            robot_params,
            robots: BTreeMap::new(),
            goals: Vec::new(),
            obstacles: Vec::new(),
        })
    }

    /// Apply one detection cycle.
    ///
    /// Every observation is validated before anything changes, so a rejected
    /// frame leaves the scene as it was.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, detections),
            fields(markers = detections.markers.len())
        )
    )]
    pub fn ingest(&mut self, detections: &DetectionFrame) -> Result<SceneSnapshot, SceneError> {
        let mut robot_markers = Vec::new();
        let mut goals = Vec::new();
        let mut obstacle_groups: BTreeMap<u32, Vec<Marker>> = BTreeMap::new();

        for obs in &detections.markers {
            let marker = Marker::new(obs.id, &obs.corner_points())
                .map_err(|source| SceneError::Marker { id: obs.id, source })?;
            match obs.role {
                MarkerRole::Robot => robot_markers.push(marker),
                MarkerRole::Goal => goals.push(Goal::from(marker)),
                MarkerRole::Obstacle { group } => {
                    obstacle_groups.entry(group).or_default().push(marker)
                }
            }
        }

        let obstacles = obstacle_groups
            .iter()
            .map(|(&group, markers)| Obstacle::build(group, markers))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = BTreeSet::new();
        for marker in robot_markers {
            if !seen.insert(marker.id()) {
                log::warn!("robot {} observed twice in one frame; keeping the first", marker.id());
                continue;
            }
            match self.robots.get_mut(&marker.id()) {
                Some(robot) => {
                    robot.update(marker.corners())?;
                }
                None => {
                    log::debug!("tracking new robot {}", marker.id());
                    let robot = Robot::new(marker.id(), marker.corners(), self.robot_params)?;
                    self.robots.insert(marker.id(), robot);
                }
            }
        }

        self.goals = goals;
        self.obstacles = obstacles;
        Ok(self.snapshot())
    }

    /// Hand a planner path to a robot. Only the first path per robot is kept.
    pub fn set_path(&mut self, robot_id: u32, path: &[Point2d]) -> Result<(), SceneError> {
        let robot = self
            .robots
            .get_mut(&robot_id)
            .ok_or(SceneError::UnknownRobot { id: robot_id })?;
        let points: Vec<Point2<f64>> = path.iter().map(|&p| p.into()).collect();
        robot.set_path(&points)?;
        Ok(())
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            robots: self.robots.values().map(RobotData::from).collect(),
            goals: self.goals.iter().map(GoalData::from).collect(),
            obstacles: self.obstacles.iter().map(ObstacleData::from).collect(),
        }
    }

    pub fn robot(&self, id: u32) -> Option<&Robot> {
        self.robots.get(&id)
    }

    pub fn robots(&self) -> impl Iterator<Item = &Robot> {
        self.robots.values()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    #[inline]
    pub fn frame_mapping(&self) -> &FrameMapping {
        &self.frame
    }

    /// Obstacle outlines in planner coordinates.
    pub fn obstacle_footprints(&self) -> Vec<Polygon> {
        self.obstacles
            .iter()
            .map(|o| o.planner_footprint(&self.frame))
            .collect()
    }

    /// Goal outlines in planner coordinates.
    pub fn goal_footprints(&self) -> Vec<Polygon> {
        self.goals
            .iter()
            .map(|g| g.marker().planner_footprint(&self.frame))
            .collect()
    }

    /// Whether a planner-frame point lies inside any obstacle outline.
    pub fn is_blocked(&self, planner_point: Point2<f64>) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.planner_footprint(&self.frame).contains(planner_point))
    }
}
