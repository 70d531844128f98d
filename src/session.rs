//! Game-session controller
//!
//! Owns the board and the tool inventory, and keeps the latest beam trace
//! consistent with the player layer: every successful placement or removal
//! re-runs the engine. The engine itself stays pure; all mutation funnels
//! through here.

use crate::engine::{Trace, trace};
use crate::grid::{Board, Coord, Element, PlaceError, RemoveError};
use crate::inventory::Inventory;
use crate::level::{Level, LevelError};

pub struct Session {
    board: Board,
    inventory: Inventory,
    targets: Vec<Coord>,
    trace: Trace,
}

impl Session {
    /// Validate a level, build the board and inventory, and run the
    /// initial trace.
    pub fn new(level: &Level) -> Result<Self, LevelError> {
        let board = Board::from_level(level)?;
        let inventory = Inventory::from_def(&level.inventory);
        let targets = board.targets();
        let trace = trace(&board)?;
        Ok(Self {
            board,
            inventory,
            targets,
            trace,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Latest beam trace, always consistent with the player layer
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Place an element, consuming stock. Stock is checked first and only
    /// consumed when the board accepts the placement.
    pub fn place(&mut self, coord: Coord, element: Element) -> Result<(), PlaceError> {
        if self.inventory.count(element) == 0 {
            return Err(PlaceError::OutOfStock);
        }
        self.board.place(coord, element)?;
        let took = self.inventory.take(element);
        debug_assert!(took);
        log::info!("placed {} at ({}, {})", element.name(), coord.row, coord.col);
        self.retrace();
        Ok(())
    }

    /// Remove the element at `coord` and return it to stock
    pub fn remove(&mut self, coord: Coord) -> Result<Element, RemoveError> {
        let element = self.board.remove(coord)?;
        self.inventory.restock(element);
        log::info!(
            "removed {} from ({}, {})",
            element.name(),
            coord.row,
            coord.col
        );
        self.retrace();
        Ok(element)
    }

    /// True when every target on the board is lit
    pub fn is_solved(&self) -> bool {
        self.targets
            .iter()
            .all(|coord| self.trace.lit_targets.contains(coord))
            && self.trace.lit_targets.len() == self.targets.len()
    }

    fn retrace(&mut self) {
        match trace(&self.board) {
            Ok(t) => self.trace = t,
            // Session construction guarantees exactly one source
            Err(err) => log::error!("retrace failed: {err}"),
        }
    }

    /// Plain-text board rendering for the demo binary and debugging
    pub fn render_ascii(&self) -> String {
        use crate::grid::{Color, FixedCell};

        let mut out = String::with_capacity((self.board.width() + 1) * self.board.height());
        for row in 0..self.board.height() {
            for col in 0..self.board.width() {
                let coord = Coord::new(row, col);
                let ch = match self.board.fixed(coord) {
                    FixedCell::Wall => '#',
                    FixedCell::Source(dir) => match dir {
                        crate::grid::Direction::Up => '^',
                        crate::grid::Direction::Down => 'v',
                        crate::grid::Direction::Left => '<',
                        crate::grid::Direction::Right => '>',
                    },
                    FixedCell::Target(color) => {
                        let lit = self.trace.lit_targets.contains(&coord);
                        match (color, lit) {
                            (Color::White, _) => 'W',
                            (Color::Red, false) => 'R',
                            (Color::Green, false) => 'G',
                            (Color::Blue, false) => 'B',
                            (_, true) => '*',
                        }
                    }
                    FixedCell::Empty => match self.board.element(coord) {
                        Some(Element::MirrorSlash) => '/',
                        Some(Element::MirrorBackslash) => '\\',
                        Some(Element::Prism) => 'P',
                        Some(Element::Filter(Color::Red)) => 'r',
                        Some(Element::Filter(Color::Green)) => 'g',
                        Some(Element::Filter(Color::Blue)) => 'b',
                        Some(Element::Filter(Color::White)) => 'w',
                        None => '.',
                    },
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
