//! Resolution of polygons to the set of grid cells they cover.

use crate::check::{check_level, validate_coords};
use crate::coord::reproject_geometry;
use crate::core::constants::{EASE_CRS, GEO_CRS, LEVEL_SPECS, MAX_LEVEL, level_spec};
use crate::core::transform::ease_point_to_grid;
use crate::error::GridError;
use crate::geom::{geometry_type_name, linspace, rect_corners};
use crate::index::cell_id::CellId;
use crate::index::codec::{cell_id_to_ease, grid_xy_to_cell_id};
use geo::{BoundingRect, Contains};
use geo_types::{Geometry, Point, Rect};
use rayon::prelude::*;
use tracing::debug;

fn polygon_bounds(geometry: &Geometry<f64>) -> Result<Rect<f64>, GridError> {
    match geometry {
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {}
        other => {
            return Err(GridError::InvalidGeometryType(format!(
                "expected Polygon or MultiPolygon, got {}",
                geometry_type_name(other)
            )));
        }
    }
    geometry
        .bounding_rect()
        .ok_or_else(|| GridError::InvalidGeometryType("geometry has no extent".to_string()))
}

/// Snaps a plane point to its containing cell at `level` and returns that
/// cell's centroid in plane coordinates.
fn snap_to_cell_centroid(point: Point<f64>, level: u8) -> Result<Point<f64>, GridError> {
    let (gx, gy) = ease_point_to_grid(point.x(), point.y());
    let id = grid_xy_to_cell_id(gx, gy, level)?;
    Ok(cell_id_to_ease(&id))
}

/// Resolves a plane-CRS polygon to the cell ids it covers at `level`.
///
/// A lattice of candidate cell centers spans the polygon's envelope, snapped
/// to the grid; candidates are kept when they fall inside the polygon and are
/// returned in lattice order, top-to-bottom then left-to-right.
pub fn ease_polygon_to_cell_ids(
    geometry: &Geometry<f64>,
    level: u8,
) -> Result<Vec<CellId>, GridError> {
    if !check_level(level) {
        return Err(GridError::InvalidLevel(level));
    }
    let rect = polygon_bounds(geometry)?;

    // Half the finest cell edge. Cell corners coinciding with the polygon's
    // envelope would otherwise drop boundary cells to float noise. Only the
    // expanded corners are consumed, so the expansion goes on the envelope
    // rather than the polygon itself.
    let buffer = LEVEL_SPECS[MAX_LEVEL as usize].x_length * 0.5;
    let corners = rect_corners(
        rect.min().x - buffer,
        rect.min().y - buffer,
        rect.max().x + buffer,
        rect.max().y + buffer,
    );

    // Corners snapped to cell centroids at the target level carry no
    // residual float noise; the lattice steps off them in whole cells.
    let mut snapped = Vec::with_capacity(4);
    for corner in corners {
        snapped.push(snap_to_cell_centroid(corner, level)?);
    }
    let min_x = snapped.iter().map(|p| p.x()).fold(f64::INFINITY, f64::min);
    let max_x = snapped
        .iter()
        .map(|p| p.x())
        .fold(f64::NEG_INFINITY, f64::max);
    let min_y = snapped.iter().map(|p| p.y()).fold(f64::INFINITY, f64::min);
    let max_y = snapped
        .iter()
        .map(|p| p.y())
        .fold(f64::NEG_INFINITY, f64::max);

    let spec = level_spec(level)?;
    let x_steps = ((max_x - min_x) / spec.x_length).round() as usize + 1;
    let y_steps = ((max_y - min_y) / spec.y_length).round() as usize + 1;
    debug!(rows = y_steps, cols = x_steps, level, "resolving polygon lattice");

    let xs = linspace(min_x, max_x, x_steps);
    let ys = linspace(max_y, min_y, y_steps);

    let lattice: Vec<(f64, f64)> = ys
        .iter()
        .flat_map(|&y| xs.iter().map(move |&x| (x, y)))
        .collect();

    // Containment is tested against the original, unbuffered polygon.
    // Independent per point; order is preserved by the indexed filter.
    let inside: Vec<(f64, f64)> = lattice
        .par_iter()
        .filter(|&&(x, y)| geometry.contains(&Point::new(x, y)))
        .copied()
        .collect();

    inside
        .into_iter()
        .map(|(x, y)| {
            let (gx, gy) = ease_point_to_grid(x, y);
            grid_xy_to_cell_id(gx, gy, level)
        })
        .collect()
}

/// Resolves a geographic (lon, lat) polygon to the cell ids it covers at
/// `level`.
///
/// The polygon's bounding corners must lie inside the geographic extent; the
/// polygon is reprojected onto the plane and resolved there.
pub fn geo_polygon_to_cell_ids(
    geometry: &Geometry<f64>,
    level: u8,
) -> Result<Vec<CellId>, GridError> {
    if !check_level(level) {
        return Err(GridError::InvalidLevel(level));
    }
    let rect = polygon_bounds(geometry)?;
    let corners: Vec<(f64, f64)> = rect_corners(
        rect.min().x,
        rect.min().y,
        rect.max().x,
        rect.max().y,
    )
    .iter()
    .map(|p| (p.x(), p.y()))
    .collect();
    validate_coords(&corners).map_err(|msgs| GridError::InvalidCoordinateRange(msgs.join("; ")))?;

    let ease_geometry = reproject_geometry(geometry, GEO_CRS, EASE_CRS)?;
    ease_polygon_to_cell_ids(&ease_geometry, level)
}
