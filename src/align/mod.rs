//! Alignment of bounding boxes and raster geotransforms to the grid.

pub mod geotransform;

pub use geotransform::{AlignmentReport, GeoTransform, check_alignment};

use crate::check::check_level;
use crate::coord::reproject_points;
use crate::core::constants::{EASE_CRS, MAX_LEVEL};
use crate::core::transform::ease_point_to_grid;
use crate::error::GridError;
use crate::geom::{DENSIFY_NODES, densify_segment, rect_corners};
use crate::index::codec::{cell_id_corner_offsets, corner_offsets_to_ease, grid_xy_to_cell_id};
use geo_types::Coord;
use tracing::debug;

/// Expands a bounding box outward to the nearest cell boundaries at `level`.
///
/// `bounds` is `(min_x, min_y, max_x, max_y)` in the CRS given by
/// `source_epsg`. When the source is not the plane CRS, each edge is
/// densified before reprojection so the envelope tracks the warped edges
/// rather than just the corners. The returned box is in plane coordinates
/// and every edge lies on a cell boundary at `level`.
pub fn align_bounds(
    bounds: (f64, f64, f64, f64),
    source_epsg: u32,
    level: u8,
) -> Result<[f64; 4], GridError> {
    if !check_level(level) {
        return Err(GridError::InvalidLevel(level));
    }
    let (min_x, min_y, max_x, max_y) = bounds;
    let corners = rect_corners(min_x, min_y, max_x, max_y);

    let plane: Vec<(f64, f64)> = if source_epsg != EASE_CRS {
        // A straight edge in the source CRS is generally curved on the
        // plane; the interior nodes keep the envelope honest.
        let mut nodes = Vec::with_capacity(4 * DENSIFY_NODES);
        for i in 0..4 {
            let start = Coord {
                x: corners[i].x(),
                y: corners[i].y(),
            };
            let next = corners[(i + 1) % 4];
            let end = Coord {
                x: next.x(),
                y: next.y(),
            };
            let edge = densify_segment(start, end, DENSIFY_NODES);
            // each edge's last node is the next edge's first
            nodes.extend(edge[..edge.len() - 1].iter().map(|c| (c.x, c.y)));
        }
        reproject_points(&nodes, source_epsg, EASE_CRS)?
            .iter()
            .map(|p| (p.x(), p.y()))
            .collect()
    } else {
        corners.iter().map(|p| (p.x(), p.y())).collect()
    };

    let env_min_x = plane.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
    let env_max_x = plane.iter().map(|c| c.0).fold(f64::NEG_INFINITY, f64::max);
    let env_min_y = plane.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
    let env_max_y = plane.iter().map(|c| c.1).fold(f64::NEG_INFINITY, f64::max);
    debug!(
        env_min_x,
        env_min_y, env_max_x, env_max_y, level, "aligning plane envelope"
    );

    // The upper-left and lower-right corners pin the whole box. Encoding at
    // the finest level keeps every coarser boundary recoverable from the
    // digit expansion.
    let (ul_gx, ul_gy) = ease_point_to_grid(env_min_x, env_max_y);
    let (lr_gx, lr_gy) = ease_point_to_grid(env_max_x, env_min_y);
    let ul = grid_xy_to_cell_id(ul_gx, ul_gy, MAX_LEVEL)?;
    let lr = grid_xy_to_cell_id(lr_gx, lr_gy, MAX_LEVEL)?;

    // The upper-left corner truncates down-and-left; the lower-right one
    // shifts outward past any partially covered cell.
    let (ul_x_off, ul_y_off) = cell_id_corner_offsets(&ul, level, false)?;
    let (lr_x_off, lr_y_off) = cell_id_corner_offsets(&lr, level, true)?;

    let (aligned_min_x, aligned_max_y) = corner_offsets_to_ease(ul_x_off, ul_y_off);
    let (aligned_max_x, aligned_min_y) = corner_offsets_to_ease(lr_x_off, lr_y_off);

    Ok([aligned_min_x, aligned_min_y, aligned_max_x, aligned_max_y])
}
