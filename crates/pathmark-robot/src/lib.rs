//! Path-following controller for a robot tracked by an overhead marker.
//!
//! Each detection cycle the driver loop hands the robot's four marker corners
//! to [`Robot::update`]. The robot refreshes its pose, consumes waypoints from
//! the path it was given once via [`Robot::set_path`], and reports a
//! [`MotionState`]: keep rotating by [`Robot::actual_angle`] degrees, drive
//! forward, or stop because the path is done.
//!
//! ```
//! use nalgebra::Point2;
//! use pathmark_robot::{MotionState, Robot, RobotParams};
//!
//! // Marker facing +x, centered on the origin.
//! let corners = [
//!     Point2::new(5.0, -5.0),
//!     Point2::new(5.0, 5.0),
//!     Point2::new(-5.0, 5.0),
//!     Point2::new(-5.0, -5.0),
//! ];
//! let mut robot = Robot::new(1, &corners, RobotParams::default()).unwrap();
//! robot.set_path(&[Point2::new(200.0, 0.0)]).unwrap();
//! assert_eq!(robot.update(&corners).unwrap(), MotionState::MovingForward);
//! ```

mod error;
mod heading;
mod params;
mod path;
mod robot;
mod state;

pub use error::RobotError;
pub use heading::angle_to_point;
pub use params::RobotParams;
pub use path::{Advance, WaypointPath};
pub use robot::Robot;
pub use state::MotionState;
