//! Raster geotransform alignment checks.
//!
//! A geotransform describes a raster's pixel grid without the raster itself;
//! passing it in keeps the check free of file I/O.

use crate::core::constants::{EASE_CRS, EASE_EXTENT, level_spec};
use crate::error::GridError;
use crate::geom::epsilon_check;
use serde::Serialize;

/// Tolerance for the alignment comparisons, in meters.
const ALIGN_TOLERANCE: f64 = 1e-5;

/// Row-major 2×3 affine transform from pixel space to world space,
/// `x = a·col + b·row + c`, `y = d·col + e·row + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl GeoTransform {
    /// North-up transform with the given upper-left origin and pixel sizes.
    pub fn from_origin(west: f64, north: f64, x_size: f64, y_size: f64) -> Self {
        GeoTransform {
            a: x_size,
            b: 0.0,
            c: west,
            d: 0.0,
            e: -y_size,
            f: north,
        }
    }

    /// Maps pixel coordinates to world coordinates.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// The inverse transform, mapping world coordinates to pixel coordinates.
    pub fn invert(&self) -> Result<GeoTransform, GridError> {
        let det = self.a * self.e - self.b * self.d;
        if det == 0.0 {
            return Err(GridError::InvalidOperation(
                "geotransform is not invertible".to_string(),
            ));
        }
        let ia = self.e / det;
        let ib = -self.b / det;
        let id = -self.d / det;
        let ie = self.a / det;
        Ok(GeoTransform {
            a: ia,
            b: ib,
            c: -ia * self.c - ib * self.f,
            d: id,
            e: ie,
            f: -id * self.c - ie * self.f,
        })
    }

    /// True when the transform has no rotation or shear terms.
    pub fn is_rectilinear(&self) -> bool {
        self.b == 0.0 && self.d == 0.0
    }
}

/// Outcome of the six alignment checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlignmentReport {
    /// The dataset CRS is the plane CRS (EPSG:6933).
    pub crs_matches: bool,
    /// No rotation or shear.
    pub rectilinear: bool,
    /// Pixel width and height are equal.
    pub square_cells: bool,
    /// Pixel size equals the cell edge length at the requested level.
    pub cell_size_matches: bool,
    /// The grid origin falls on an extrapolated pixel corner in x.
    pub x_corner_matches: bool,
    /// The grid origin falls on an extrapolated pixel corner in y.
    pub y_corner_matches: bool,
}

impl AlignmentReport {
    /// Number of checks that passed, out of six.
    pub fn passed(&self) -> u8 {
        [
            self.crs_matches,
            self.rectilinear,
            self.square_cells,
            self.cell_size_matches,
            self.x_corner_matches,
            self.y_corner_matches,
        ]
        .iter()
        .filter(|&&flag| flag)
        .count() as u8
    }

    /// True when every check passed.
    pub fn is_aligned(&self) -> bool {
        self.passed() == 6
    }
}

/// Rounds a pixel coordinate to the nearest corner when within tolerance,
/// otherwise floors to the corner up-and-left of it.
fn snap_pixel(value: f64) -> f64 {
    let nearest = if value > 0.0 {
        (value + 0.5).floor()
    } else {
        (value - 0.5).ceil()
    };
    if epsilon_check(nearest, value, ALIGN_TOLERANCE) {
        nearest
    } else {
        value.floor()
    }
}

/// Checks whether a raster described by `transform` in `crs_epsg` is aligned
/// to the grid at `level`.
///
/// The first four checks establish the raster uses the same pixel geometry
/// as the grid; the last two extrapolate the raster out to the grid origin
/// and require the origin to land on a pixel corner.
pub fn check_alignment(
    transform: &GeoTransform,
    crs_epsg: u32,
    level: u8,
) -> Result<AlignmentReport, GridError> {
    let spec = level_spec(level)?;
    let reference = GeoTransform::from_origin(
        EASE_EXTENT.min_x,
        EASE_EXTENT.max_y,
        spec.x_length,
        spec.x_length,
    );

    let crs_matches = crs_epsg == EASE_CRS;
    let rectilinear = transform.is_rectilinear();
    let square_cells = epsilon_check(transform.a.abs(), transform.e.abs(), ALIGN_TOLERANCE);
    let cell_size_matches = epsilon_check(reference.a, transform.a, ALIGN_TOLERANCE);

    // Pixel coordinates of the grid origin in the input raster, snapped to
    // the corner of the pixel that would contain it.
    let inverse = transform.invert()?;
    let (col, row) = inverse.apply(reference.c, reference.f);
    let (x_world, y_world) = transform.apply(snap_pixel(col), snap_pixel(row));

    Ok(AlignmentReport {
        crs_matches,
        rectilinear,
        square_cells,
        cell_size_matches,
        x_corner_matches: epsilon_check(x_world, reference.c, ALIGN_TOLERANCE),
        y_corner_matches: epsilon_check(y_world, reference.f, ALIGN_TOLERANCE),
    })
}
