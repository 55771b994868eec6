pub mod ops;
pub mod response;

pub use ops::{
    Aggregated, aggregate_cells, align_bounds_to_grid, cell_ids_to_ease, cell_ids_to_geos,
    cells_to_children, cells_to_parents, ease_polygon_to_grid_ids, geo_polygon_to_grid_ids,
    geos_to_cell_ids, level_table_json,
};
pub use response::GridResponse;
