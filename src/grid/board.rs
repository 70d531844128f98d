//! The two-layer board: fixed level geometry plus player-placed elements.

use thiserror::Error;

use super::cell::{Coord, Direction, Element, FixedCell};

/// Reasons a placement request is rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    #[error("coordinate is outside the grid")]
    OutOfBounds,
    #[error("fixed cell is not empty")]
    Blocked,
    #[error("an element is already placed here")]
    Occupied,
    #[error("no stock left for this element")]
    OutOfStock,
}

/// Reasons a removal request is rejected
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RemoveError {
    #[error("coordinate is outside the grid")]
    OutOfBounds,
    #[error("no element placed here")]
    Vacant,
}

/// Grid board holding the fixed layer and the player layer.
///
/// The fixed layer is set at construction and never mutated afterwards;
/// `place`/`remove` are the only mutations and touch the player layer only.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    fixed: Vec<FixedCell>,
    player: Vec<Option<Element>>,
}

impl Board {
    /// Create a board from row-major fixed cells. `fixed.len()` must equal
    /// `width * height`.
    pub fn new(width: usize, height: usize, fixed: Vec<FixedCell>) -> Self {
        debug_assert_eq!(fixed.len(), width * height);
        let player = vec![None; fixed.len()];
        Self {
            width,
            height,
            fixed,
            player,
        }
    }

    /// Empty board of the given dimensions (all fixed cells empty)
    pub fn empty(width: usize, height: usize) -> Self {
        Self::new(width, height, vec![FixedCell::Empty; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    fn idx(&self, coord: Coord) -> usize {
        coord.row * self.width + coord.col
    }

    /// Fixed content at `coord`. Must be in bounds.
    pub fn fixed(&self, coord: Coord) -> FixedCell {
        self.fixed[self.idx(coord)]
    }

    /// Player element at `coord`, if any. Must be in bounds.
    pub fn element(&self, coord: Coord) -> Option<Element> {
        self.player[self.idx(coord)]
    }

    /// One cell over from `coord` in `dir`, or None at the grid edge
    pub fn step(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.delta();
        let row = coord.row.checked_add_signed(dr as isize)?;
        let col = coord.col.checked_add_signed(dc as isize)?;
        let next = Coord::new(row, col);
        self.in_bounds(next).then_some(next)
    }

    /// Set a fixed cell during level construction. No-op out of bounds.
    pub(crate) fn set_fixed(&mut self, coord: Coord, cell: FixedCell) {
        if self.in_bounds(coord) {
            let i = self.idx(coord);
            self.fixed[i] = cell;
        }
    }

    /// Place an element on a fixed-empty, player-empty cell.
    ///
    /// Inventory is not consulted here; callers check stock before placing.
    pub fn place(&mut self, coord: Coord, element: Element) -> Result<(), PlaceError> {
        if !self.in_bounds(coord) {
            return Err(PlaceError::OutOfBounds);
        }
        if self.fixed(coord) != FixedCell::Empty {
            return Err(PlaceError::Blocked);
        }
        let i = self.idx(coord);
        if self.player[i].is_some() {
            return Err(PlaceError::Occupied);
        }
        self.player[i] = Some(element);
        Ok(())
    }

    /// Remove the element at `coord`, returning it so the caller can restock.
    pub fn remove(&mut self, coord: Coord) -> Result<Element, RemoveError> {
        if !self.in_bounds(coord) {
            return Err(RemoveError::OutOfBounds);
        }
        let i = self.idx(coord);
        self.player[i].take().ok_or(RemoveError::Vacant)
    }

    /// The unique source cell and its emit direction, if exactly one exists
    pub fn source(&self) -> Option<(Coord, Direction)> {
        let mut found = None;
        for (coord, cell) in self.iter_fixed() {
            if let FixedCell::Source(dir) = cell {
                if found.is_some() {
                    return None;
                }
                found = Some((coord, dir));
            }
        }
        found
    }

    /// Coordinates of every target cell, in row-major order
    pub fn targets(&self) -> Vec<Coord> {
        self.iter_fixed()
            .filter(|(_, cell)| matches!(cell, FixedCell::Target(_)))
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Row-major iterator over the fixed layer
    pub fn iter_fixed(&self) -> impl Iterator<Item = (Coord, FixedCell)> + '_ {
        self.fixed.iter().enumerate().map(|(i, &cell)| {
            (Coord::new(i / self.width, i % self.width), cell)
        })
    }
}
