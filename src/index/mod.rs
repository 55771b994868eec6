pub mod cell_id;
pub mod codec;

pub use cell_id::CellId;
pub use codec::{
    cell_id_corner_offsets, cell_id_to_ease, cell_id_to_grid_xy, corner_offsets_to_ease,
    grid_xy_to_cell_id,
};
