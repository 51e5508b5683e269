use std::sync::Once;

use log::LevelFilter;
use nalgebra::Point2;
use pathmark::robot::RobotError;
use pathmark::{
    DetectionFrame, MarkerObservation, MarkerRole, MotionState, Point2d, Scene, SceneConfig,
    SceneError,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| pathmark::init_with_level(LevelFilter::Info).expect("logger"));
}

/// Robot marker of half-size 8 centered on `(cx, cy)`.
///
/// `heading` is the unit direction of the front edge in image coordinates.
fn robot_corners(cx: f64, cy: f64, heading: (f64, f64)) -> [Point2<f64>; 4] {
    let (hx, hy) = heading;
    // Right-hand side of the heading in a y-down image.
    let (rx, ry) = (-hy, hx);
    let h = 8.0;
    [
        Point2::new(cx + h * hx - h * rx, cy + h * hy - h * ry),
        Point2::new(cx + h * hx + h * rx, cy + h * hy + h * ry),
        Point2::new(cx - h * hx + h * rx, cy - h * hy + h * ry),
        Point2::new(cx - h * hx - h * rx, cy - h * hy - h * ry),
    ]
}

fn frame_with_robot(cx: f64, cy: f64, heading: (f64, f64)) -> DetectionFrame {
    DetectionFrame::new(vec![
        MarkerObservation::new(1, MarkerRole::Robot, &robot_corners(cx, cy, heading)),
        MarkerObservation::new(
            40,
            MarkerRole::Goal,
            &robot_corners(700.0, 300.0, (1.0, 0.0)),
        ),
    ])
}

fn new_scene() -> Scene {
    SceneConfig::default().build_scene().expect("scene")
}

const EAST: (f64, f64) = (1.0, 0.0);
const SOUTH: (f64, f64) = (0.0, 1.0);

#[test]
fn robot_drives_an_l_shaped_path_to_the_end() {
    init_logging();
    let mut scene = new_scene();
    scene
        .ingest(&frame_with_robot(100.0, 100.0, EAST))
        .expect("first frame");
    scene
        .set_path(
            1,
            &[
                Point2d::new(400.0, 100.0),
                Point2d::new(400.0, 300.0),
                Point2d::new(700.0, 300.0),
            ],
        )
        .expect("path");

    // (position, heading, expected decision)
    let cycles = [
        ((100.0, 100.0), EAST, MotionState::MovingForward),
        ((250.0, 100.0), EAST, MotionState::MovingForward),
        // On the corner, next waypoint is below: turn first.
        ((400.0, 100.0), EAST, MotionState::Rotating),
        ((400.0, 100.0), SOUTH, MotionState::MovingForward),
        ((400.0, 200.0), SOUTH, MotionState::MovingForward),
        ((400.0, 300.0), SOUTH, MotionState::Rotating),
        ((400.0, 300.0), EAST, MotionState::MovingForward),
        ((690.0, 300.0), EAST, MotionState::Finished),
    ];

    for ((x, y), heading, expected) in cycles {
        let snapshot = scene.ingest(&frame_with_robot(x, y, heading)).expect("ingest");
        let robot = &snapshot.robots[0];
        assert_eq!(robot.state, expected, "at ({x}, {y})");
        assert!(!(robot.move_forward && robot.rotation));
        assert_eq!(snapshot.goals.len(), 1);
    }

    let robot = scene.robot(1).expect("robot");
    assert!(robot.on_finish());
    assert_eq!(robot.remaining_path().count(), 0);

    // Terminal: further frames do not move the tracked pose.
    let before = scene.snapshot().robots[0].clone();
    scene
        .ingest(&frame_with_robot(50.0, 900.0, SOUTH))
        .expect("late frame");
    assert_eq!(scene.snapshot().robots[0], before);
}

#[test]
fn rotation_sign_is_reported_with_the_decision() {
    init_logging();
    let mut scene = new_scene();
    scene
        .ingest(&frame_with_robot(300.0, 300.0, EAST))
        .expect("first frame");
    scene
        .set_path(1, &[Point2d::new(300.0, 100.0)])
        .expect("path");

    let snapshot = scene
        .ingest(&frame_with_robot(300.0, 300.0, EAST))
        .expect("ingest");
    let robot = &snapshot.robots[0];
    assert_eq!(robot.state, MotionState::Rotating);
    assert_eq!(robot.actual_angle, Some(90));
    assert_eq!(robot.angle_to_actual_point, Some(90));
    assert!(robot.rotation);
}

#[test]
fn later_planner_paths_are_rejected() {
    init_logging();
    let mut scene = new_scene();
    scene
        .ingest(&frame_with_robot(100.0, 100.0, EAST))
        .expect("first frame");
    scene
        .set_path(1, &[Point2d::new(500.0, 100.0)])
        .expect("path");
    assert_eq!(
        scene.set_path(1, &[Point2d::new(0.0, 0.0)]),
        Err(SceneError::Robot(RobotError::PathAlreadySet))
    );

    let snapshot = scene
        .ingest(&frame_with_robot(100.0, 100.0, EAST))
        .expect("ingest");
    assert_eq!(
        snapshot.robots[0].actual_point,
        Some(Point2d::new(500.0, 100.0))
    );
}

#[test]
fn snapshot_serializes_for_transport() {
    init_logging();
    let mut scene = new_scene();
    let mut frame = frame_with_robot(100.0, 100.0, EAST);
    frame.push(MarkerObservation::new(
        7,
        MarkerRole::Obstacle { group: 3 },
        &robot_corners(500.0, 500.0, EAST),
    ));
    let snapshot = scene.ingest(&frame).expect("ingest");

    let json = serde_json::to_value(&snapshot).expect("json");
    assert_eq!(json["robots"][0]["id"], 1);
    assert_eq!(json["robots"][0]["path_created"], false);
    assert!(json["robots"][0].get("actual_point").is_none());
    assert_eq!(json["robots"][0]["sector"]["row"], 0);
    assert_eq!(json["obstacles"][0]["id"], 3);
    assert_eq!(json["goals"][0]["id"], 40);
}
