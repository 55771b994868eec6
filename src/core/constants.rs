use crate::error::GridError;
use serde::Serialize;

/// EPSG code of the equal-area plane the grid lives on (EASE-Grid v2 global).
pub const EASE_CRS: u32 = 6933;

/// EPSG code of the geographic coordinate system (WGS 84 lon/lat).
pub const GEO_CRS: u32 = 4326;

/// Finest grid level.
pub const MAX_LEVEL: u8 = 6;

/// Number of nested grid levels.
pub const NUM_LEVELS: usize = 7;

/// Specification of a single grid level.
///
/// `n_row`/`n_col` are the dimensions of the entire global domain at that
/// level; `x_length`/`y_length` are the cell edge lengths in plane meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelSpec {
    pub level: u8,
    /// Children per axis when subdividing one level finer.
    pub refine_ratio: u32,
    pub n_row: u64,
    pub n_col: u64,
    pub x_length: f64,
    pub y_length: f64,
}

/// Rectangular extent, `[min_x, min_y, max_x, max_y]` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// Plane extent of the grid in EASE-Grid v2 meters, symmetric about the origin.
pub const EASE_EXTENT: GridExtent = GridExtent {
    min_x: -17367530.445161372,
    min_y: -7314540.830638504,
    max_x: 17367530.445161372,
    max_y: 7314540.830638504,
};

/// Geographic extent covered by the plane. The latitude bound is where the
/// EASE-Grid v2 projection's northing saturates.
pub const GEO_EXTENT: GridExtent = GridExtent {
    min_x: -180.0,
    min_y: -85.04456640737216,
    max_x: 180.0,
    max_y: 85.04456640737216,
};

/// Level specifications for levels 0 (coarsest) through 6 (finest).
pub const LEVEL_SPECS: [LevelSpec; NUM_LEVELS] = [
    LevelSpec {
        level: 0,
        refine_ratio: 4,
        n_row: 406,
        n_col: 964,
        x_length: 36032.22084058376,
        y_length: 36032.22084058376,
    },
    LevelSpec {
        level: 1,
        refine_ratio: 3,
        n_row: 1624,
        n_col: 3856,
        x_length: 9008.05521014594,
        y_length: 9008.05521014594,
    },
    LevelSpec {
        level: 2,
        refine_ratio: 3,
        n_row: 4872,
        n_col: 11568,
        x_length: 3002.6850700486466,
        y_length: 3002.6850700486466,
    },
    LevelSpec {
        level: 3,
        refine_ratio: 10,
        n_row: 14616,
        n_col: 34704,
        x_length: 1000.8950233495489,
        y_length: 1000.895023349549,
    },
    LevelSpec {
        level: 4,
        refine_ratio: 10,
        n_row: 146160,
        n_col: 347040,
        x_length: 100.08950233495489,
        y_length: 100.0895023349549,
    },
    LevelSpec {
        level: 5,
        refine_ratio: 10,
        n_row: 1461600,
        n_col: 3470400,
        x_length: 10.008950233495488,
        y_length: 10.00895023349549,
    },
    LevelSpec {
        level: 6,
        refine_ratio: 10,
        n_row: 14616000,
        n_col: 34704000,
        x_length: 1.0008950233495488,
        y_length: 1.000895023349549,
    },
];

/// Cumulative reciprocal refine-ratio products, one per level. The factor at
/// level `l` is the fraction of a level-0 cell edge spanned by one level-`l`
/// cell: `1 / [1, 4, 12, 36, 360, 3600, 36000]`.
pub const CELL_SCALE_FACTORS: [f64; NUM_LEVELS] = [
    1.0,
    1.0 / 4.0,
    1.0 / 12.0,
    1.0 / 36.0,
    1.0 / 360.0,
    1.0 / 3600.0,
    1.0 / 36000.0,
];

/// Returns the specification for `level`, or `InvalidLevel`.
pub fn level_spec(level: u8) -> Result<&'static LevelSpec, GridError> {
    LEVEL_SPECS
        .get(level as usize)
        .ok_or(GridError::InvalidLevel(level))
}

/// The full level table, the shared constant contract read by collaborators
/// (disaggregation tooling, raster warping).
pub fn level_table() -> &'static [LevelSpec; NUM_LEVELS] {
    &LEVEL_SPECS
}
