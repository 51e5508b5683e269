//! Remapping between image pixels and the planner's metric frame.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FrameMappingError {
    #[error("image size must be positive and finite, got {image_size}")]
    InvalidImageSize { image_size: f64 },
    #[error("planner bounds [{low_bound}, {high_bound}] must be finite with low < high")]
    InvalidBounds { low_bound: f64, high_bound: f64 },
}

/// Linear mapping between the square image pixel frame and the planner's
/// metric frame.
///
/// The image is `image_size × image_size` pixels; the planner frame spans
/// `[low_bound, high_bound]` on both axes. The mapping is only an exact
/// inverse pair when the bounds are symmetric (`low_bound == -high_bound`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameMapping {
    /// Side length of the square image in pixels.
    pub image_size: f64,
    pub low_bound: f64,
    pub high_bound: f64,
}

impl Default for FrameMapping {
    fn default() -> Self {
        Self {
            image_size: 1024.0,
            low_bound: -5.0,
            high_bound: 5.0,
        }
    }
}

impl FrameMapping {
    /// Check that both directions of the mapping are finite.
    pub fn validate(&self) -> Result<(), FrameMappingError> {
        if !(self.image_size.is_finite() && self.image_size > 0.0) {
            return Err(FrameMappingError::InvalidImageSize {
                image_size: self.image_size,
            });
        }
        let span = self.span();
        if !(self.low_bound.is_finite() && self.high_bound.is_finite() && span.is_finite())
            || span <= 0.0
        {
            return Err(FrameMappingError::InvalidBounds {
                low_bound: self.low_bound,
                high_bound: self.high_bound,
            });
        }
        Ok(())
    }

    #[inline]
    fn span(&self) -> f64 {
        self.high_bound - self.low_bound
    }

    /// Pixel coordinates to planner coordinates.
    pub fn to_planner(&self, p: Point2<f64>) -> Point2<f64> {
        let scale = self.span() / self.image_size;
        Point2::new(
            p.x * scale + self.low_bound,
            p.y * scale + self.low_bound,
        )
    }

    /// Planner coordinates to whole pixel coordinates (floored).
    pub fn to_image(&self, p: Point2<f64>) -> Point2<f64> {
        let scale = self.image_size / self.span();
        Point2::new(
            ((p.x + self.high_bound) * scale).floor(),
            ((p.y + self.high_bound) * scale).floor(),
        )
    }
}
