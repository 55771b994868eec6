use crate::core::constants::{CELL_SCALE_FACTORS, LEVEL_SPECS, MAX_LEVEL};
use crate::core::transform::{Axis, grid_multiple_to_ease, grid_point_to_ease};
use crate::error::GridError;
use crate::index::cell_id::CellId;
use geo_types::Point;
use tracing::debug;

/// Rounding applied to grid-index coordinates before digit extraction.
/// Six decimals detects differences on the order of millimeters in plane
/// space; finer rounding reintroduces float noise that flips boundary digits.
const ROUND_DECIMALS: f64 = 1e6;

fn round6(val: f64) -> f64 {
    (val * ROUND_DECIMALS).round() / ROUND_DECIMALS
}

/// Encodes a continuous grid-index coordinate into the cell id containing it
/// at `level`.
///
/// The integer part of the coordinate is the level-0 row/column; each pass
/// scales the fractional remainder by that level's refine ratio and peels off
/// the next digit pair.
pub fn grid_xy_to_cell_id(x: f64, y: f64, level: u8) -> Result<CellId, GridError> {
    if level > MAX_LEVEL {
        return Err(GridError::InvalidLevel(level));
    }

    let mut x = round6(x);
    let mut y = round6(y);

    // The grid is only defined for non-negative grid coordinates; upstream
    // reprojection can leave values a hair below zero along the left and top
    // edges, which would floor to -1.
    if x < 0.0 {
        x = 0.0;
    }
    if y < 0.0 {
        y = 0.0;
    }

    // The far right/bottom domain edge belongs to the last column/row, not a
    // phantom one past it; pull it just inside so the digits stay in range.
    let x_max = LEVEL_SPECS[0].n_col as f64 - 1.0 / ROUND_DECIMALS;
    let y_max = LEVEL_SPECS[0].n_row as f64 - 1.0 / ROUND_DECIMALS;
    if x > x_max {
        x = x_max;
    }
    if y > y_max {
        y = y_max;
    }
    debug!(x, y, level, "encoding grid coordinate");

    let mut row0 = 0u32;
    let mut col0 = 0u32;
    let mut path = Vec::with_capacity(level as usize);

    for lv in 0..=level {
        let x_div = x.floor();
        let y_div = y.floor();
        let x_mod = x - x_div;
        let y_mod = y - y_div;

        if lv == 0 {
            row0 = y_div as u32;
            col0 = x_div as u32;
        } else {
            path.push((y_div as u8, x_div as u8));
        }

        let ratio = LEVEL_SPECS[lv as usize].refine_ratio as f64;
        x = round6(x_mod * ratio);
        y = round6(y_mod * ratio);
    }

    Ok(CellId::new_unchecked(level, row0, col0, path))
}

/// Decodes a cell id to the grid-index coordinate of its centroid.
///
/// Digit vectors are weighted by the cell-scale-factor table truncated to the
/// levels actually used, then offset by half the finest used factor.
pub fn cell_id_to_grid_xy(id: &CellId) -> (f64, f64) {
    let factors = &CELL_SCALE_FACTORS[..=id.level() as usize];
    let centroid_offset = factors[factors.len() - 1] * 0.5;

    let x: f64 = id
        .col_digits()
        .iter()
        .zip(factors)
        .map(|(&d, &sf)| d as f64 * sf)
        .sum::<f64>()
        + centroid_offset;
    let y: f64 = id
        .row_digits()
        .iter()
        .zip(factors)
        .map(|(&d, &sf)| d as f64 * sf)
        .sum::<f64>()
        + centroid_offset;

    (x, y)
}

/// Decodes a cell id to its centroid in plane coordinates.
pub fn cell_id_to_ease(id: &CellId) -> Point<f64> {
    let (x_grid, y_grid) = cell_id_to_grid_xy(id);
    let (x, y) = grid_point_to_ease(x_grid, y_grid);
    Point::new(x, y)
}

/// Reconstructs the absolute plane offsets of a cell corner at `level`,
/// as `digit * edge_length` summed over levels `0..=level`.
///
/// With `shift_outward`, the digit at `level` is incremented by one when any
/// digit at a finer level is nonzero, pushing the offset past a partially
/// covered boundary cell. When `level` is the id's own level there is
/// nothing finer and the digit at `level` itself acts as the remainder; a
/// nonzero finest digit still shifts, so the returned edge never truncates
/// inside the cell it came from. The upper-left corner of an aligned box is
/// never shifted; the lower-right one is.
pub fn cell_id_corner_offsets(
    id: &CellId,
    level: u8,
    shift_outward: bool,
) -> Result<(f64, f64), GridError> {
    if level > id.level() {
        return Err(GridError::InvalidOperation(format!(
            "corner at level {} requires a cell id of at least that level, got level {}",
            level,
            id.level()
        )));
    }

    let rows = id.row_digits();
    let cols = id.col_digits();
    let head = level as usize + 1;

    let mut head_rows: Vec<u32> = rows[..head].to_vec();
    let mut head_cols: Vec<u32> = cols[..head].to_vec();

    if shift_outward {
        // Nonzero digits past `level` mean the cell sits inside, not on, a
        // level boundary. At the id's own level the digit itself is the
        // remainder.
        let rem = if level < id.level() { head } else { head - 1 };
        if cols[rem..].iter().any(|&d| d != 0) {
            head_cols[head - 1] += 1;
        }
        if rows[rem..].iter().any(|&d| d != 0) {
            head_rows[head - 1] += 1;
        }
    }

    let x: f64 = head_cols
        .iter()
        .enumerate()
        .map(|(i, &d)| d as f64 * LEVEL_SPECS[i].x_length)
        .sum();
    let y: f64 = head_rows
        .iter()
        .enumerate()
        .map(|(i, &d)| d as f64 * LEVEL_SPECS[i].y_length)
        .sum();

    Ok((x, y))
}

/// Converts a corner offset pair from `cell_id_corner_offsets` back to plane
/// coordinates.
pub fn corner_offsets_to_ease(x_offset: f64, y_offset: f64) -> (f64, f64) {
    (
        grid_multiple_to_ease(x_offset, Axis::X),
        grid_multiple_to_ease(y_offset, Axis::Y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::ease_point_to_grid;

    #[test]
    fn test_encode_level_0() -> Result<(), GridError> {
        let id = grid_xy_to_cell_id(482.3, 202.7, 0)?;
        assert_eq!(id.to_string(), "L0.202482");
        Ok(())
    }

    #[test]
    fn test_encode_deeper_levels() -> Result<(), GridError> {
        // x frac 0.25 is digit 1 of 4 at level 1; y frac 0.5 is digit 2
        let id = grid_xy_to_cell_id(482.25, 202.5, 1)?;
        assert_eq!(id.to_string(), "L1.202482.21");

        let id = grid_xy_to_cell_id(482.0, 202.0, 6)?;
        assert_eq!(id.to_string(), "L6.202482.00.00.00.00.00.00");
        Ok(())
    }

    #[test]
    fn test_negative_noise_clamped() -> Result<(), GridError> {
        let id = grid_xy_to_cell_id(-0.0000004, -0.0000004, 0)?;
        assert_eq!(id.to_string(), "L0.000000");
        Ok(())
    }

    #[test]
    fn test_invalid_level() {
        assert!(matches!(
            grid_xy_to_cell_id(1.0, 1.0, 7),
            Err(GridError::InvalidLevel(7))
        ));
    }

    #[test]
    fn test_decode_centroid_level_0() -> Result<(), GridError> {
        let id: CellId = "L0.202482".parse()?;
        let (x, y) = cell_id_to_grid_xy(&id);
        assert!((x - 482.5).abs() < 1e-9);
        assert!((y - 202.5).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_decode_centroid_level_1() -> Result<(), GridError> {
        // digit 2 of 4 on each axis: cell spans [0.5, 0.75), centroid 0.625
        let id: CellId = "L1.202482.22".parse()?;
        let (x, y) = cell_id_to_grid_xy(&id);
        assert!((x - 482.625).abs() < 1e-9);
        assert!((y - 202.625).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_round_trip_returns_containing_cell_centroid() -> Result<(), GridError> {
        for &(x, y, level) in &[
            (482.3, 202.7, 0u8),
            (480.9999861, 201.9999861, 6),
            (123.456789, 345.987654, 3),
            (0.000001, 405.999999, 6),
        ] {
            let id = grid_xy_to_cell_id(x, y, level)?;
            let (cx, cy) = cell_id_to_grid_xy(&id);

            // the centroid must land back in the same cell
            let re_encoded = grid_xy_to_cell_id(cx, cy, level)?;
            assert_eq!(re_encoded, id, "({}, {}) at level {}", x, y, level);

            // and be within half a cell of the input on both axes
            let half_cell = CELL_SCALE_FACTORS[level as usize] * 0.5;
            assert!((cx - x).abs() <= half_cell + 1e-6);
            assert!((cy - y).abs() <= half_cell + 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_round_trip_through_plane_coordinates() -> Result<(), GridError> {
        let (gx, gy) = ease_point_to_grid(1_234_567.0, -2_345_678.0);
        let id = grid_xy_to_cell_id(gx, gy, 4)?;
        let centroid = cell_id_to_ease(&id);

        // within half a level-4 cell (~50 m) of the input point
        let half_edge = LEVEL_SPECS[4].x_length * 0.5;
        assert!((centroid.x() - 1_234_567.0).abs() <= half_edge + 1e-5);
        assert!((centroid.y() - (-2_345_678.0)).abs() <= half_edge + 1e-5);
        Ok(())
    }

    #[test]
    fn test_corner_offsets_truncate_at_level() -> Result<(), GridError> {
        let id: CellId = "L6.202482.13.21.00.00.00.00".parse()?;

        // level-2 corner: 482*L0 + 3*L1 + 1*L2 on x; 202*L0 + 1*L1 + 2*L2 on y
        let (x, y) = cell_id_corner_offsets(&id, 2, false)?;
        let expected_x = 482.0 * LEVEL_SPECS[0].x_length
            + 3.0 * LEVEL_SPECS[1].x_length
            + 1.0 * LEVEL_SPECS[2].x_length;
        let expected_y = 202.0 * LEVEL_SPECS[0].y_length
            + 1.0 * LEVEL_SPECS[1].y_length
            + 2.0 * LEVEL_SPECS[2].y_length;
        assert!((x - expected_x).abs() < 1e-6);
        assert!((y - expected_y).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_corner_offsets_shift_only_when_finer_digits_nonzero() -> Result<(), GridError> {
        let id: CellId = "L6.202482.13.21.00.00.00.00".parse()?;

        // level-1: the level-2 digits are nonzero, so the shift fires
        let (x_shifted, _) = cell_id_corner_offsets(&id, 1, true)?;
        let expected =
            482.0 * LEVEL_SPECS[0].x_length + (3.0 + 1.0) * LEVEL_SPECS[1].x_length;
        assert!((x_shifted - expected).abs() < 1e-6);

        // level-2: all finer digits are zero, already on a boundary
        let (x_edge, _) = cell_id_corner_offsets(&id, 2, true)?;
        let (x_plain, _) = cell_id_corner_offsets(&id, 2, false)?;
        assert_eq!(x_edge, x_plain);
        Ok(())
    }

    #[test]
    fn test_bottom_right_edge_encodes_to_last_cell() -> Result<(), GridError> {
        // grid index 964/406 is the closing edge of the domain, still owned
        // by the last column/row
        let id = grid_xy_to_cell_id(964.0, 406.0, 0)?;
        assert_eq!(id.to_string(), "L0.405963");

        let deep = grid_xy_to_cell_id(964.0, 406.0, 6)?;
        assert_eq!(deep.to_string(), "L6.405963.33.22.22.99.99.99");
        assert!(deep.to_string().parse::<CellId>().is_ok());
        Ok(())
    }

    #[test]
    fn test_corner_offsets_shift_at_own_level() -> Result<(), GridError> {
        // at the id's own level the digit itself decides the shift; a
        // nonzero finest digit pushes the corner one cell outward
        let id: CellId = "L6.203482.00.00.00.00.99.99".parse()?;
        let (x_plain, y_plain) = cell_id_corner_offsets(&id, 6, false)?;
        let (x_shifted, y_shifted) = cell_id_corner_offsets(&id, 6, true)?;
        assert!((x_shifted - x_plain - LEVEL_SPECS[6].x_length).abs() < 1e-9);
        assert!((y_shifted - y_plain - LEVEL_SPECS[6].y_length).abs() < 1e-9);

        // a zero finest digit is already on the boundary and stays put
        let edge: CellId = "L6.203482.00.00.00.00.99.00".parse()?;
        let (x_edge, y_edge) = cell_id_corner_offsets(&edge, 6, true)?;
        let (x_flat, y_flat) = cell_id_corner_offsets(&edge, 6, false)?;
        assert_eq!(x_edge, x_flat);
        assert_eq!(y_edge, y_flat);
        Ok(())
    }

    #[test]
    fn test_corner_offsets_require_deep_enough_id() {
        let id: CellId = "L1.202482.13".parse().unwrap();
        assert!(matches!(
            cell_id_corner_offsets(&id, 3, false),
            Err(GridError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_corner_offsets_to_ease_origin() {
        use crate::core::constants::EASE_EXTENT;
        let (x, y) = corner_offsets_to_ease(0.0, 0.0);
        assert!((x - EASE_EXTENT.min_x).abs() < 1e-6);
        assert!((y - EASE_EXTENT.max_y).abs() < 1e-6);
    }
}
