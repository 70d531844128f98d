//! Level definition format
//!
//! Levels are plain JSON consumed once at startup: grid dimensions, a list
//! of fixed-cell overrides, and the starting tool inventory. Cell kinds are
//! tagged enums, so an unrecognized kind or color fails at deserialization
//! and never reaches the beam engine.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::TraceError;
use crate::grid::{Board, Color, Coord, Direction, FixedCell};

/// Level validation failures
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    #[error("grid dimensions must be non-zero")]
    EmptyGrid,
    #[error("cell override at ({row}, {col}) is outside the grid")]
    CellOutOfBounds { row: usize, col: usize },
    #[error("duplicate cell override at ({row}, {col})")]
    DuplicateCell { row: usize, col: usize },
    #[error("level defines no source cell")]
    NoSource,
    #[error("level defines {count} source cells, expected exactly one")]
    MultipleSources { count: usize },
}

impl From<TraceError> for LevelError {
    fn from(err: TraceError) -> Self {
        match err {
            TraceError::NoSource => LevelError::NoSource,
            TraceError::MultipleSources { count } => LevelError::MultipleSources { count },
        }
    }
}

/// One fixed-cell override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDef {
    pub row: usize,
    pub col: usize,
    pub cell: CellKind,
}

/// Fixed-cell kind with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellKind {
    Wall,
    Source { direction: Direction },
    Target { color: Color },
}

impl From<CellKind> for FixedCell {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Wall => FixedCell::Wall,
            CellKind::Source { direction } => FixedCell::Source(direction),
            CellKind::Target { color } => FixedCell::Target(color),
        }
    }
}

/// Starting stock per tool, one line per palette slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventoryDef {
    #[serde(default)]
    pub mirror_slash: u32,
    #[serde(default)]
    pub mirror_backslash: u32,
    #[serde(default)]
    pub prism: u32,
    #[serde(default)]
    pub filter_red: u32,
    #[serde(default)]
    pub filter_green: u32,
    #[serde(default)]
    pub filter_blue: u32,
}

/// A complete level definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<CellDef>,
    #[serde(default)]
    pub inventory: InventoryDef,
}

impl Level {
    /// The builtin reference level: 10x10, source at (0,5) emitting down,
    /// red target at (3,4), standard tool stock.
    pub fn reference() -> Self {
        Self {
            width: crate::consts::GRID_WIDTH,
            height: crate::consts::GRID_HEIGHT,
            cells: vec![
                CellDef {
                    row: 0,
                    col: 5,
                    cell: CellKind::Source {
                        direction: Direction::Down,
                    },
                },
                CellDef {
                    row: 3,
                    col: 4,
                    cell: CellKind::Target { color: Color::Red },
                },
            ],
            inventory: InventoryDef {
                mirror_slash: 2,
                mirror_backslash: 2,
                prism: 1,
                filter_red: 1,
                filter_green: 1,
                filter_blue: 1,
            },
        }
    }

    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Reject levels the engine cannot meaningfully simulate.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::EmptyGrid);
        }

        let mut seen = HashSet::new();
        let mut sources = 0usize;
        for def in &self.cells {
            if def.row >= self.height || def.col >= self.width {
                return Err(LevelError::CellOutOfBounds {
                    row: def.row,
                    col: def.col,
                });
            }
            if !seen.insert((def.row, def.col)) {
                return Err(LevelError::DuplicateCell {
                    row: def.row,
                    col: def.col,
                });
            }
            if matches!(def.cell, CellKind::Source { .. }) {
                sources += 1;
            }
        }

        match sources {
            0 => Err(LevelError::NoSource),
            1 => Ok(()),
            count => Err(LevelError::MultipleSources { count }),
        }
    }
}

impl Board {
    /// Build a board from a validated level
    pub fn from_level(level: &Level) -> Result<Self, LevelError> {
        level.validate()?;
        let mut board = Board::empty(level.width, level.height);
        for def in &level.cells {
            board.set_fixed(Coord::new(def.row, def.col), def.cell.into());
        }
        log::info!(
            "loaded {}x{} level with {} fixed cells",
            level.width,
            level.height,
            level.cells.len()
        );
        Ok(board)
    }
}
