//! Core geometry for overhead-marker robot tracking.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! detect markers or plan paths; it works on corner lists supplied by an
//! external vision pipeline and hands geometry to an external planner.
//!
//! - [`geometry`]: distances, midpoints, bounding boxes and footprint polygons.
//! - [`FrameMapping`]: remap between image pixels and the planner's metric frame.
//! - [`SectorGrid`]: coarse rows×columns partition of the image plane.
//! - [`Marker`] / [`Goal`]: a detected quadrilateral with ordered corners.
//! - [`Obstacle`]: boundary polygon reconstructed from one or more markers.

mod frame;
pub mod geometry;
mod logger;
mod marker;
mod obstacle;
mod sector;

pub use frame::{FrameMapping, FrameMappingError};
pub use geometry::{distance, midpoint, Bounds, Polygon};
pub use marker::{Goal, Marker, MarkerError, CORNER_COUNT};
pub use obstacle::{order_boundary, Obstacle, ObstacleError};
pub use sector::{Sector, SectorGrid, SectorGridError, SectorGridParams};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
