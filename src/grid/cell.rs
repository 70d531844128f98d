//! Cell-level types: coordinates, directions, colors and cell contents.

use serde::{Deserialize, Serialize};

/// A (row, col) grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Beam travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step as (delta row, delta col)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Rotate 90 degrees counter-clockwise in screen coordinates
    /// (up -> left -> down -> right -> up)
    pub const fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Rotate 90 degrees clockwise (the inverse cycle of [`turn_left`](Self::turn_left))
    pub const fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// Beam color. Sources emit white; red/green/blue only arise from a prism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Red,
    Green,
    Blue,
}

/// Level-defined cell content (immutable during play)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixedCell {
    #[default]
    Empty,
    /// Absorbs any beam
    Wall,
    /// Emits a white beam in the given direction
    Source(Direction),
    /// Satisfied when a beam of exactly this color enters the cell
    Target(Color),
}

/// Player-placed optical element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    MirrorSlash,
    MirrorBackslash,
    Prism,
    Filter(Color),
}

impl Element {
    /// All placeable element kinds, in tool-palette order
    pub const ALL: [Element; 6] = [
        Element::MirrorSlash,
        Element::MirrorBackslash,
        Element::Prism,
        Element::Filter(Color::Red),
        Element::Filter(Color::Green),
        Element::Filter(Color::Blue),
    ];

    /// Outgoing direction for a beam hitting a mirror. Non-mirror elements
    /// leave the direction unchanged.
    pub const fn reflect(self, dir: Direction) -> Direction {
        match self {
            Element::MirrorSlash => match dir {
                Direction::Right => Direction::Up,
                Direction::Down => Direction::Left,
                Direction::Left => Direction::Down,
                Direction::Up => Direction::Right,
            },
            Element::MirrorBackslash => match dir {
                Direction::Right => Direction::Down,
                Direction::Up => Direction::Left,
                Direction::Left => Direction::Up,
                Direction::Down => Direction::Right,
            },
            _ => dir,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::MirrorSlash => "mirror_slash",
            Element::MirrorBackslash => "mirror_backslash",
            Element::Prism => "prism",
            Element::Filter(Color::White) => "filter_white",
            Element::Filter(Color::Red) => "filter_red",
            Element::Filter(Color::Green) => "filter_green",
            Element::Filter(Color::Blue) => "filter_blue",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "mirror_slash" => Some(Element::MirrorSlash),
            "mirror_backslash" => Some(Element::MirrorBackslash),
            "prism" => Some(Element::Prism),
            "filter_white" => Some(Element::Filter(Color::White)),
            "filter_red" => Some(Element::Filter(Color::Red)),
            "filter_green" => Some(Element::Filter(Color::Green)),
            "filter_blue" => Some(Element::Filter(Color::Blue)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_left_cycle() {
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Left.turn_left(), Direction::Down);
        assert_eq!(Direction::Down.turn_left(), Direction::Right);
        assert_eq!(Direction::Right.turn_left(), Direction::Up);
    }

    #[test]
    fn test_turn_right_inverts_turn_left() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(dir.turn_left().turn_right(), dir);
            assert_eq!(dir.turn_right().turn_left(), dir);
        }
    }

    #[test]
    fn test_deltas() {
        assert_eq!(Direction::Up.delta(), (-1, 0));
        assert_eq!(Direction::Down.delta(), (1, 0));
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
    }

    #[test]
    fn test_mirror_slash_table() {
        let m = Element::MirrorSlash;
        assert_eq!(m.reflect(Direction::Right), Direction::Up);
        assert_eq!(m.reflect(Direction::Down), Direction::Left);
        assert_eq!(m.reflect(Direction::Left), Direction::Down);
        assert_eq!(m.reflect(Direction::Up), Direction::Right);
    }

    #[test]
    fn test_mirror_backslash_table() {
        let m = Element::MirrorBackslash;
        assert_eq!(m.reflect(Direction::Right), Direction::Down);
        assert_eq!(m.reflect(Direction::Up), Direction::Left);
        assert_eq!(m.reflect(Direction::Left), Direction::Up);
        assert_eq!(m.reflect(Direction::Down), Direction::Right);
    }

    #[test]
    fn test_non_mirror_reflect_is_identity() {
        assert_eq!(Element::Prism.reflect(Direction::Left), Direction::Left);
        assert_eq!(
            Element::Filter(Color::Red).reflect(Direction::Up),
            Direction::Up
        );
    }

    #[test]
    fn test_element_name_round_trip() {
        for element in Element::ALL {
            assert_eq!(Element::from_name(element.name()), Some(element));
        }
        assert_eq!(Element::from_name("laser"), None);
    }
}
