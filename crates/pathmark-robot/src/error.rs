use pathmark_core::{MarkerError, SectorGridError};

/// Errors returned by the robot controller.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RobotError {
    #[error(transparent)]
    Marker(#[from] MarkerError),
    #[error(transparent)]
    SectorGrid(#[from] SectorGridError),
    #[error("robot already has a path; later paths are ignored")]
    PathAlreadySet,
}
