//! High-level facade for the `pathmark-*` workspace.
//!
//! This crate provides:
//! - re-exports of the geometry core and the robot controller,
//! - inbound [`DetectionFrame`]s tagged by marker role,
//! - a [`Scene`] that turns each frame into robot steering decisions,
//! - serde messages ([`RobotData`], [`GoalData`], [`ObstacleData`]) for the
//!   planner and robot driver,
//! - JSON configuration via [`SceneConfig`].
//!
//! ## Quickstart
//!
//! ```
//! use nalgebra::Point2;
//! use pathmark::{DetectionFrame, MarkerObservation, MarkerRole, Point2d, SceneConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut scene = SceneConfig::default().build_scene()?;
//! let robot_corners = [
//!     Point2::new(105.0, 95.0),
//!     Point2::new(105.0, 105.0),
//!     Point2::new(95.0, 105.0),
//!     Point2::new(95.0, 95.0),
//! ];
//! let frame = DetectionFrame::new(vec![MarkerObservation::new(
//!     1,
//!     MarkerRole::Robot,
//!     &robot_corners,
//! )]);
//!
//! scene.ingest(&frame)?;
//! scene.set_path(1, &[Point2d::new(400.0, 100.0)])?;
//! let snapshot = scene.ingest(&frame)?;
//! assert!(snapshot.robots[0].move_forward);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `pathmark::core`: points, frame mapping, sector grid, markers, obstacles.
//! - `pathmark::robot`: path following and steering state machine.
//! - `pathmark::scene`: multi-entity bookkeeping per detection cycle.
//! - `pathmark::message`: outbound message types.

pub use pathmark_core as core;
pub use pathmark_robot as robot;

pub mod frame;
pub mod io;
pub mod message;
pub mod scene;

pub use frame::{DetectionFrame, MarkerObservation, MarkerRole};
pub use io::{ConfigIoError, SceneConfig};
pub use message::{GoalData, ObstacleData, Point2d, RobotData};
pub use scene::{Scene, SceneError, SceneSnapshot};

pub use pathmark_core::{init_with_level, FrameMapping, Goal, Marker, Obstacle, Sector};
pub use pathmark_robot::{MotionState, Robot, RobotParams};

#[cfg(feature = "tracing")]
pub use pathmark_core::init_tracing;
