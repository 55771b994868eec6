//! # ease-dggs-rs
//!
//! A discrete global grid system built on the EASE-Grid 2.0 equal-area
//! projection (EPSG:6933). The plane is tiled by a 406 × 964 grid of
//! ~36 km cells, and each cell subdivides through six further levels
//! (refine ratios 4, 3, 3, 10, 10, 10) down to ~1 m.
//!
//! There are three main entry points.
//!
//! ### 1. `CellId` - Single Cell Operations
//!
//! ```
//! use ease_dggs_rs::{CellId, hierarchy};
//!
//! # fn main() -> Result<(), ease_dggs_rs::GridError> {
//! let cell: CellId = "L2.048218.20.10".parse()?;
//! assert_eq!(cell.level(), 2);
//!
//! let parent = hierarchy::parent(&cell, 1)?;
//! assert_eq!(parent.to_string(), "L1.048218.20");
//!
//! let children = hierarchy::children(&cell, 3)?;
//! assert_eq!(children.len(), 9);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `api` - Batch Operations
//!
//! Batch functions validate their whole input and return a
//! [`GridResponse`] envelope instead of an error:
//!
//! ```no_run
//! use ease_dggs_rs::api::geos_to_cell_ids;
//!
//! let response = geos_to_cell_ids(&[(-93.26836, 44.97997)], 3);
//! if response.success {
//!     println!("{:?}", response.data);
//! }
//! ```
//!
//! ### 3. Polygons and Bounding Boxes
//!
//! Polygons resolve to the set of cells whose centers they contain, and
//! bounding boxes expand outward onto cell boundaries:
//!
//! ```
//! use ease_dggs_rs::api::{align_bounds_to_grid, ease_polygon_to_grid_ids};
//! use ease_dggs_rs::EASE_CRS;
//!
//! let square = "POLYGON((-36032.22 36032.22, 36032.22 36032.22, \
//!     36032.22 -36032.22, -36032.22 -36032.22, -36032.22 36032.22))";
//! let response = ease_polygon_to_grid_ids(square, 0, EASE_CRS);
//! assert!(response.success);
//!
//! let aligned = align_bounds_to_grid((-50_000.0, -50_000.0, 50_000.0, 50_000.0), EASE_CRS, 0);
//! assert!(aligned.success);
//! ```

pub mod align;
pub mod api;
pub mod check;
pub mod coord;
pub mod core;
pub mod error;
pub mod geom;
pub mod hierarchy;
pub mod index;
pub mod resolve;

pub use api::{
    Aggregated, GridResponse, aggregate_cells, align_bounds_to_grid, cell_ids_to_ease,
    cell_ids_to_geos, cells_to_children, cells_to_parents, ease_polygon_to_grid_ids,
    geo_polygon_to_grid_ids, geos_to_cell_ids, level_table_json,
};
pub use crate::core::{
    EASE_CRS, EASE_EXTENT, GEO_CRS, GEO_EXTENT, GridExtent, LEVEL_SPECS, LevelSpec, MAX_LEVEL,
    NUM_LEVELS, level_spec, level_table,
};
pub use error::GridError;
pub use index::CellId;

pub use geo_types;
