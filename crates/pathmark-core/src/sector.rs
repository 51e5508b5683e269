//! Coarse sector grid over the image plane.
//!
//! The image rectangle is split into `rows × columns` equal cells using
//! integer floor division. When the image size is not a multiple of the grid
//! size, the leftover pixels along the right and bottom edges belong to no
//! sector; the same holds for points exactly on the far image boundary.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Integer coordinates of one grid cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Sector {
    pub row: usize,
    pub col: usize,
}

impl Sector {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Grid dimensions as they appear in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorGridParams {
    pub image_width: u32,
    pub image_height: u32,
    pub rows: u32,
    pub columns: u32,
}

impl Default for SectorGridParams {
    fn default() -> Self {
        Self {
            image_width: 1024,
            image_height: 1024,
            rows: 4,
            columns: 4,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SectorGridError {
    #[error("sector grid needs at least one row and one column (rows={rows}, columns={columns})")]
    EmptyGrid { rows: u32, columns: u32 },
    #[error("image {width}x{height} is smaller than the {columns}x{rows} sector grid")]
    GridLargerThanImage {
        width: u32,
        height: u32,
        rows: u32,
        columns: u32,
    },
}

/// Rows × columns partition of an image. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct SectorGrid {
    rows: u32,
    columns: u32,
    cell_width: u32,
    cell_height: u32,
    /// `[y0, y1)` per row.
    row_bounds: Vec<[u32; 2]>,
    /// `[x0, x1)` per column.
    column_bounds: Vec<[u32; 2]>,
}

impl SectorGrid {
    pub fn new(
        image_width: u32,
        image_height: u32,
        rows: u32,
        columns: u32,
    ) -> Result<Self, SectorGridError> {
        if rows == 0 || columns == 0 {
            return Err(SectorGridError::EmptyGrid { rows, columns });
        }
        if image_width < columns || image_height < rows {
            return Err(SectorGridError::GridLargerThanImage {
                width: image_width,
                height: image_height,
                rows,
                columns,
            });
        }

        let cell_width = image_width / columns;
        let cell_height = image_height / rows;
        let column_bounds = (0..columns)
            .map(|c| [c * cell_width, (c + 1) * cell_width])
            .collect();
        let row_bounds = (0..rows)
            .map(|r| [r * cell_height, (r + 1) * cell_height])
            .collect();

        Ok(Self {
            rows,
            columns,
            cell_width,
            cell_height,
            row_bounds,
            column_bounds,
        })
    }

    pub fn from_params(params: &SectorGridParams) -> Result<Self, SectorGridError> {
        Self::new(
            params.image_width,
            params.image_height,
            params.rows,
            params.columns,
        )
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Cell size in pixels as `(width, height)`.
    #[inline]
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    pub fn row_bounds(&self, row: usize) -> Option<[u32; 2]> {
        self.row_bounds.get(row).copied()
    }

    pub fn column_bounds(&self, col: usize) -> Option<[u32; 2]> {
        self.column_bounds.get(col).copied()
    }

    /// Sector whose half-open bounds contain `point`, if any.
    pub fn locate(&self, point: Point2<f64>) -> Option<Sector> {
        let row = bin_index(&self.row_bounds, point.y)?;
        let col = bin_index(&self.column_bounds, point.x)?;
        Some(Sector { row, col })
    }

    /// Pixel center of a sector, floored to whole pixels.
    pub fn cell_center(&self, sector: Sector) -> Option<Point2<f64>> {
        let [y0, y1] = self.row_bounds(sector.row)?;
        let [x0, x1] = self.column_bounds(sector.col)?;
        Some(Point2::new(
            (x0 + (x1 - x0) / 2) as f64,
            (y0 + (y1 - y0) / 2) as f64,
        ))
    }
}

fn bin_index(bins: &[[u32; 2]], v: f64) -> Option<usize> {
    bins.iter()
        .position(|&[lo, hi]| v >= lo as f64 && v < hi as f64)
}
