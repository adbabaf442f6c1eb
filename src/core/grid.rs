use thiserror::Error;

use crate::models::GridOffset;

/// Default spacing between grid cells, in degrees (a few metres on the ground)
pub const DEFAULT_GRID_SPACING: f64 = 0.00004;

/// Errors raised by the marker layout arithmetic
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shape of the declustering grid for a given member count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    pub cols: usize,
    pub rows: usize,
}

impl GridDimensions {
    /// Roughly square grid: `ceil(sqrt(total))` columns, as many rows as needed
    pub fn for_total(total: usize) -> Result<Self, LayoutError> {
        if total == 0 {
            return Err(LayoutError::InvalidArgument(
                "grid total must be at least 1".to_string(),
            ));
        }

        // Integer ceil(sqrt); squares are taken in u128 so no total can overflow
        let target = total as u128;
        let square = |n: usize| (n as u128) * (n as u128);
        let mut cols = ((total as f64).sqrt() as usize).max(1);
        while square(cols) < target {
            cols += 1;
        }
        while cols > 1 && square(cols - 1) >= target {
            cols -= 1;
        }

        let rows = total.div_ceil(cols);

        Ok(Self { cols, rows })
    }

    /// Zero-based (row, column) of `index` in row-major order
    #[inline]
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}

/// Latitude/longitude displacement of the `index`-th member of a `total`-sized cluster
///
/// Rows move along latitude and columns along longitude. Each axis is
/// centred, so a full grid has its centroid exactly on the epicenter.
pub fn grid_displacement(
    index: usize,
    total: usize,
    spacing: f64,
) -> Result<(f64, f64), LayoutError> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(LayoutError::InvalidArgument(format!(
            "grid spacing must be a positive number, got {}",
            spacing
        )));
    }

    let dims = GridDimensions::for_total(total)?;
    if index >= total {
        return Err(LayoutError::InvalidArgument(format!(
            "index {} is outside a cluster of {}",
            index, total
        )));
    }

    let (row, col) = dims.cell(index);
    let lat_delta = (row as f64 - (dims.rows as f64 - 1.0) / 2.0) * spacing;
    let lng_delta = (col as f64 - (dims.cols as f64 - 1.0) / 2.0) * spacing;

    Ok((lat_delta, lng_delta))
}

/// Calculate where the `index`-th member of a cluster should be drawn
///
/// # Arguments
/// * `index` - Zero-based position of the member within its cluster
/// * `total` - Number of members sharing the epicenter
/// * `epicenter_lat` - Shared latitude of the cluster in degrees
/// * `epicenter_lng` - Shared longitude of the cluster in degrees
/// * `spacing` - Distance between neighbouring grid cells in degrees
///
/// # Returns
/// The displaced position. A cluster of one stays on the epicenter.
pub fn compute_grid_offset(
    index: usize,
    total: usize,
    epicenter_lat: f64,
    epicenter_lng: f64,
    spacing: f64,
) -> Result<GridOffset, LayoutError> {
    if !epicenter_lat.is_finite() || !epicenter_lng.is_finite() {
        return Err(LayoutError::InvalidArgument(format!(
            "epicenter ({}, {}) is not a valid coordinate",
            epicenter_lat, epicenter_lng
        )));
    }

    let (lat_delta, lng_delta) = grid_displacement(index, total, spacing)?;

    Ok(GridOffset {
        offset_lat: epicenter_lat + lat_delta,
        offset_lng: epicenter_lng + lng_delta,
    })
}
