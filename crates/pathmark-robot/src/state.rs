use serde::{Deserialize, Serialize};

/// Steering decision of a robot.
///
/// | from | event | to |
/// |---|---|---|
/// | `Idle` | path set | `Stopped` |
/// | any but `Finished` | heading within `angle_eps` of the target | `MovingForward` |
/// | any but `Finished` | heading off by `angle_eps` or more | `Rotating` |
/// | any but `Finished` | on the last waypoint, or path exhausted | `Finished` |
/// | `Rotating`, `MovingForward` | [`Robot::stop`](crate::Robot::stop) | `Stopped` |
///
/// `Finished` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    /// No path loaded yet.
    #[default]
    Idle,
    /// Path loaded, no motion requested.
    Stopped,
    /// Turn in place by the current angle.
    Rotating,
    /// Drive straight towards the current waypoint.
    MovingForward,
    /// Path complete; updates are ignored from now on.
    Finished,
}

impl MotionState {
    #[inline]
    pub fn is_finished(self) -> bool {
        self == MotionState::Finished
    }

    #[inline]
    pub fn move_forward(self) -> bool {
        self == MotionState::MovingForward
    }

    #[inline]
    pub fn self_rotation(self) -> bool {
        self == MotionState::Rotating
    }
}
