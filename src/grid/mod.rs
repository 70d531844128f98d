//! Grid model
//!
//! Two parallel layers over the same coordinate space: the fixed layer
//! (walls, source, targets - immutable once a level is loaded) and the
//! player layer (placed optical elements). The beam engine only ever reads
//! through this module; placement and removal are the sole mutations.

pub mod board;
pub mod cell;

pub use board::{Board, PlaceError, RemoveError};
pub use cell::{Color, Coord, Direction, Element, FixedCell};
