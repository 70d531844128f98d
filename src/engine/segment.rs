//! Beam states and rendered beam segments.

use glam::Vec2;

use crate::cell_center;
use crate::grid::{Color, Coord, Direction};

/// One point in the engine's search space. The visited set keys on the
/// whole tuple, so the same cell may be crossed again in another direction
/// or color but never re-processed identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BeamState {
    pub coord: Coord,
    pub dir: Direction,
    pub color: Color,
}

impl BeamState {
    pub const fn new(coord: Coord, dir: Direction, color: Color) -> Self {
        Self { coord, dir, color }
    }
}

/// A directed beam line between two adjacent cell centers, in fractional
/// grid units (x = col + 0.5, y = row + 0.5)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
    pub color: Color,
}

impl Segment {
    /// Segment from the center of `from` to the center of the adjacent `to`
    pub fn between(from: Coord, to: Coord, color: Color) -> Self {
        Self {
            start: cell_center(from),
            end: cell_center(to),
            color,
        }
    }
}
