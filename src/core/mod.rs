pub mod constants;
pub mod transform;

pub use constants::{
    CELL_SCALE_FACTORS, EASE_CRS, EASE_EXTENT, GEO_CRS, GEO_EXTENT, GridExtent, LEVEL_SPECS,
    LevelSpec, MAX_LEVEL, NUM_LEVELS, level_spec, level_table,
};
pub use transform::{
    Axis, ease_point_to_grid, ease_to_grid, grid_multiple_to_ease, grid_point_to_ease,
    grid_to_ease,
};
