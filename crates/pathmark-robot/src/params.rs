use pathmark_core::SectorGridParams;
use serde::{Deserialize, Serialize};

/// Tolerances and sector grid used by every [`Robot`](crate::Robot).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotParams {
    /// Distance in pixels within which the robot counts as on its waypoint.
    pub eps: f64,
    /// Angles with magnitude below this many degrees count as aligned.
    pub angle_eps: i32,
    /// Sector grid built for each robot.
    pub grid: SectorGridParams,
}

impl Default for RobotParams {
    fn default() -> Self {
        Self {
            eps: 15.0,
            angle_eps: 10,
            grid: SectorGridParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let params: RobotParams =
            serde_json::from_str(r#"{"angle_eps": 5, "grid": {"rows": 2}}"#).expect("parse");
        assert_eq!(params.angle_eps, 5);
        assert_eq!(params.eps, 15.0);
        assert_eq!(params.grid.rows, 2);
        assert_eq!(params.grid.columns, 4);
    }
}
