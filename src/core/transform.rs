use crate::core::constants::{EASE_EXTENT, LEVEL_SPECS};

/// Axis selector for the 1-d affine remaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Maps `val` from the range `[o_start, o_end]` into `[n_start, n_end]`.
fn shift_range(val: f64, o_start: f64, o_end: f64, n_start: f64, n_end: f64) -> f64 {
    (n_end - n_start) / (o_end - o_start) * (val - o_start) + n_start
}

/// Converts a 1-d plane coordinate to a continuous grid-index coordinate.
///
/// x maps `[min_x, max_x]` onto `[0, n_col0]`; y maps `[max_y, min_y]` onto
/// `[0, n_row0]`, so the plane's top edge is grid row 0.
pub fn ease_to_grid(val: f64, axis: Axis) -> f64 {
    match axis {
        Axis::X => shift_range(
            val,
            EASE_EXTENT.min_x,
            EASE_EXTENT.max_x,
            0.0,
            LEVEL_SPECS[0].n_col as f64,
        ),
        Axis::Y => shift_range(
            val,
            EASE_EXTENT.max_y,
            EASE_EXTENT.min_y,
            0.0,
            LEVEL_SPECS[0].n_row as f64,
        ),
    }
}

/// Converts a 1-d continuous grid-index coordinate back to the plane.
pub fn grid_to_ease(val: f64, axis: Axis) -> f64 {
    match axis {
        Axis::X => shift_range(
            val,
            0.0,
            LEVEL_SPECS[0].n_col as f64,
            EASE_EXTENT.min_x,
            EASE_EXTENT.max_x,
        ),
        Axis::Y => shift_range(
            val,
            0.0,
            LEVEL_SPECS[0].n_row as f64,
            EASE_EXTENT.max_y,
            EASE_EXTENT.min_y,
        ),
    }
}

/// Converts an absolute level-weighted digit sum (grid index × level-0 edge
/// length) back to the plane. Used when cell-id digits have already been
/// multiplied out into meters from the grid origin.
pub fn grid_multiple_to_ease(val: f64, axis: Axis) -> f64 {
    match axis {
        Axis::X => shift_range(
            val,
            0.0,
            LEVEL_SPECS[0].n_col as f64 * LEVEL_SPECS[0].x_length,
            EASE_EXTENT.min_x,
            EASE_EXTENT.max_x,
        ),
        Axis::Y => shift_range(
            val,
            0.0,
            LEVEL_SPECS[0].n_row as f64 * LEVEL_SPECS[0].y_length,
            EASE_EXTENT.max_y,
            EASE_EXTENT.min_y,
        ),
    }
}

/// Converts a plane coordinate pair to grid-index coordinates.
pub fn ease_point_to_grid(x: f64, y: f64) -> (f64, f64) {
    (ease_to_grid(x, Axis::X), ease_to_grid(y, Axis::Y))
}

/// Converts a grid-index coordinate pair back to the plane.
pub fn grid_point_to_ease(x: f64, y: f64) -> (f64, f64) {
    (grid_to_ease(x, Axis::X), grid_to_ease(y, Axis::Y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::EASE_EXTENT;

    #[test]
    fn test_plane_corners_map_to_grid_corners() {
        assert!((ease_to_grid(EASE_EXTENT.min_x, Axis::X) - 0.0).abs() < 1e-9);
        assert!((ease_to_grid(EASE_EXTENT.max_x, Axis::X) - 964.0).abs() < 1e-9);
        // y is inverted: the plane's top edge is grid 0
        assert!((ease_to_grid(EASE_EXTENT.max_y, Axis::Y) - 0.0).abs() < 1e-9);
        assert!((ease_to_grid(EASE_EXTENT.min_y, Axis::Y) - 406.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip() {
        for &(x, y) in &[
            (0.0, 0.0),
            (-12_345_678.9, 3_456_789.01),
            (17_000_000.0, -7_000_000.0),
        ] {
            let (gx, gy) = ease_point_to_grid(x, y);
            let (bx, by) = grid_point_to_ease(gx, gy);
            assert!((bx - x).abs() < 1e-6);
            assert!((by - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_grid_origin_is_upper_left() {
        let (x, y) = grid_point_to_ease(0.0, 0.0);
        assert!((x - EASE_EXTENT.min_x).abs() < 1e-9);
        assert!((y - EASE_EXTENT.max_y).abs() < 1e-9);
    }

    #[test]
    fn test_grid_multiple_agrees_with_grid_index() {
        // One level-0 cell expressed in meters from the origin lands on the
        // same plane coordinate as grid index 1.0.
        let from_index = grid_to_ease(1.0, Axis::X);
        let from_multiple = grid_multiple_to_ease(LEVEL_SPECS[0].x_length, Axis::X);
        assert!((from_index - from_multiple).abs() < 1e-6);

        let from_index_y = grid_to_ease(2.0, Axis::Y);
        let from_multiple_y = grid_multiple_to_ease(2.0 * LEVEL_SPECS[0].y_length, Axis::Y);
        assert!((from_index_y - from_multiple_y).abs() < 1e-6);
    }
}
