//! Outbound messages for the planner and the robot driver.
//!
//! Optional fields are skipped when unset so transports see only what the
//! tracker actually knows.

use nalgebra::Point2;
use pathmark_core::{Goal, Obstacle, Sector};
use pathmark_robot::{MotionState, Robot};
use serde::{Deserialize, Serialize};

/// Transport-level point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point2<f64>> for Point2d {
    fn from(p: Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<Point2d> for Point2<f64> {
    fn from(p: Point2d) -> Self {
        Point2::new(p.x, p.y)
    }
}

fn points<'a>(src: impl IntoIterator<Item = &'a Point2<f64>>) -> Vec<Point2d> {
    src.into_iter().map(|&p| p.into()).collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalData {
    pub id: u32,
    pub center: Point2d,
    pub corners: Vec<Point2d>,
}

impl From<&Goal> for GoalData {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id(),
            center: goal.center().into(),
            corners: points(goal.corners()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleData {
    pub id: u32,
    /// Geometric center of the obstacle.
    pub center: Point2d,
    /// Ordered boundary polygon.
    pub corners: Vec<Point2d>,
}

impl From<&Obstacle> for ObstacleData {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            id: obstacle.id(),
            center: obstacle.geometric_center().into(),
            corners: points(obstacle.obstacle_points()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RobotData {
    pub id: u32,
    pub center: Point2d,
    pub direction: Point2d,
    pub corners: Vec<Point2d>,
    pub path_created: bool,
    /// Waypoints not yet consumed; present once a path was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Point2d>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_point: Option<Point2d>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_to_actual_point: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<Sector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_point: Option<Point2d>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_to_next_point: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_angle: Option<i32>,
    pub state: MotionState,
    pub rotation: bool,
    #[serde(rename = "move")]
    pub move_forward: bool,
    pub on_finish: bool,
}

impl From<&Robot> for RobotData {
    fn from(robot: &Robot) -> Self {
        Self {
            id: robot.id(),
            center: robot.center().into(),
            direction: robot.direction().into(),
            corners: points(robot.corners()),
            path_created: robot.path_created(),
            path: robot
                .path_created()
                .then(|| robot.remaining_path().map(Point2d::from).collect()),
            actual_point: robot.actual_point().map(Point2d::from),
            angle_to_actual_point: robot.angle_to_actual_point(),
            sector: robot.sector(),
            next_point: robot.next_point().map(Point2d::from),
            angle_to_next_point: robot.angle_to_next_point(),
            actual_angle: robot.actual_angle(),
            state: robot.state(),
            rotation: robot.self_rotation(),
            move_forward: robot.move_forward(),
            on_finish: robot.on_finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathmark_robot::RobotParams;
    use serde_json::Value;

    fn corners(cx: f64, cy: f64) -> [Point2<f64>; 4] {
        [
            Point2::new(cx + 5.0, cy - 5.0),
            Point2::new(cx + 5.0, cy + 5.0),
            Point2::new(cx - 5.0, cy + 5.0),
            Point2::new(cx - 5.0, cy - 5.0),
        ]
    }

    #[test]
    fn idle_robot_omits_unset_fields() {
        let robot = Robot::new(4, &corners(1030.0, 10.0), RobotParams::default()).expect("robot");
        let json = serde_json::to_value(RobotData::from(&robot)).expect("json");
        let obj = json.as_object().expect("object");
        for key in [
            "path",
            "actual_point",
            "angle_to_actual_point",
            "sector",
            "next_point",
            "angle_to_next_point",
            "actual_angle",
        ] {
            assert!(!obj.contains_key(key), "unexpected {key}");
        }
        assert_eq!(obj["id"], Value::from(4));
        assert_eq!(obj["move"], Value::Bool(false));
        assert_eq!(obj["state"], Value::from("idle"));
    }

    #[test]
    fn fresh_robot_reports_sector_before_first_update() {
        let robot = Robot::new(3, &corners(600.0, 300.0), RobotParams::default()).expect("robot");
        let msg = RobotData::from(&robot);
        assert_eq!(msg.sector, Some(Sector::new(1, 2)));
        assert_eq!(msg.state, MotionState::Idle);
        assert!(!msg.path_created);
        assert_eq!(msg.path, None);
        assert_eq!(msg.actual_point, None);

        let json = serde_json::to_value(&msg).expect("json");
        assert_eq!(json["sector"]["row"], Value::from(1));
        assert_eq!(json["sector"]["col"], Value::from(2));
        assert!(json.get("path").is_none());
    }

    #[test]
    fn moving_robot_exposes_decision() {
        let mut robot =
            Robot::new(2, &corners(100.0, 100.0), RobotParams::default()).expect("robot");
        robot
            .set_path(&[Point2::new(300.0, 100.0), Point2::new(300.0, 300.0)])
            .expect("path");
        robot.update(&corners(100.0, 100.0)).expect("update");

        let msg = RobotData::from(&robot);
        assert_eq!(msg.actual_point, Some(Point2d::new(300.0, 100.0)));
        assert_eq!(msg.next_point, Some(Point2d::new(300.0, 300.0)));
        assert_eq!(msg.path, Some(vec![Point2d::new(300.0, 300.0)]));
        assert_eq!(msg.actual_angle, Some(0));
        assert_eq!(msg.sector, Some(Sector::new(0, 0)));
        assert!(msg.move_forward && !msg.rotation && !msg.on_finish);

        let json = serde_json::to_value(&msg).expect("json");
        assert_eq!(json["actual_angle"], Value::from(0));
        assert_eq!(json["sector"]["col"], Value::from(0));
    }

    #[test]
    fn obstacle_message_uses_geometric_center() {
        let marker = pathmark_core::Marker::new(1, &corners(50.0, 60.0)).expect("marker");
        let obstacle = Obstacle::build(8, &[marker]).expect("obstacle");
        let msg = ObstacleData::from(&obstacle);
        assert_eq!(msg.id, 8);
        assert_eq!(msg.center, Point2d::new(50.0, 60.0));
        assert_eq!(msg.corners.len(), 4);
    }
}
