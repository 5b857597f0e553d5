//! Board topology: the shared ring, home lanes, entry cells and safe cells.
//!
//! Everything here is constant data plus pure queries.

pub mod topology;

pub use topology::{
    board_geometry, is_safe_cell, BoardGeometry, HOME_LANE_LEN, LAST_HOME_SLOT, RING_SIZE,
    STARTING_SAFE_CELLS, STAR_SAFE_CELLS, TOKENS_PER_PLAYER,
};
