//! Static board geometry.
//!
//! The ring is 52 cells indexed 0..52. Each canonical color owns an entry cell
//! and a home-entry threshold; a token that reaches or passes its threshold
//! leaves the ring for its 4-cell home lane.
//!
//! Safe cells are the same for every color: the entry cell and threshold cell
//! of each canonical color (8 starting cells) plus 4 star cells.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// Number of cells on the shared ring.
pub const RING_SIZE: u8 = 52;

/// Number of cells in each home lane.
pub const HOME_LANE_LEN: u8 = 4;

/// Last home slot index.
pub const LAST_HOME_SLOT: u8 = HOME_LANE_LEN - 1;

/// Tokens owned by each player.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Starting safe cells, two per canonical color (entry and threshold).
pub const STARTING_SAFE_CELLS: [u8; 8] = [1, 12, 14, 25, 27, 38, 40, 51];

/// Star safe cells, shared by all colors.
pub const STAR_SAFE_CELLS: [u8; 4] = [9, 22, 35, 48];

/// Per-color board constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGeometry {
    /// Ring cell where a token enters play.
    pub entry_cell: u8,
    /// Ring cell at or past which a token peels into its home lane.
    /// `None` for colors without a home lane on this board.
    pub home_threshold: Option<u8>,
}

/// Whether `position` is a capture-proof cell. Color independent.
#[must_use]
pub fn is_safe_cell(position: u8) -> bool {
    STARTING_SAFE_CELLS.contains(&position) || STAR_SAFE_CELLS.contains(&position)
}

/// Static constants for `color`.
///
/// Orange and purple have entry cells but no home lane.
#[must_use]
pub const fn board_geometry(color: Color) -> BoardGeometry {
    let (entry_cell, home_threshold) = match color {
        Color::Red => (1, Some(51)),
        Color::Blue => (14, Some(12)),
        Color::Green => (27, Some(25)),
        Color::Yellow => (40, Some(38)),
        Color::Orange => (6, None),
        Color::Purple => (19, None),
    };
    BoardGeometry { entry_cell, home_threshold }
}
