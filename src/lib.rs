//! Light Weaver - a grid-based light-routing puzzle
//!
//! Core modules:
//! - `grid`: Two-layer board (level-fixed cells + player-placed elements)
//! - `engine`: Pure beam-propagation engine (BFS over beam states)
//! - `level`: JSON level definition format and validation
//! - `inventory`: Remaining-count bookkeeping for placeable elements
//! - `session`: Game-session controller tying board, inventory and trace together

pub mod engine;
pub mod grid;
pub mod inventory;
pub mod level;
pub mod session;

pub use engine::{Segment, Trace, TraceError, trace};
pub use grid::{Board, Color, Coord, Direction, Element, FixedCell, PlaceError, RemoveError};
pub use inventory::Inventory;
pub use level::{Level, LevelError};
pub use session::Session;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference level dimensions
    pub const GRID_WIDTH: usize = 10;
    pub const GRID_HEIGHT: usize = 10;
}

/// Center of a grid cell in fractional grid units (x = col, y = row)
#[inline]
pub fn cell_center(coord: grid::Coord) -> Vec2 {
    Vec2::new(coord.col as f32 + 0.5, coord.row as f32 + 0.5)
}
