//! The beam trace: FIFO BFS from the source over beam states.

use std::collections::{HashSet, VecDeque};

use thiserror::Error;

use super::segment::{BeamState, Segment};
use crate::grid::{Board, Color, Coord, Direction, Element, FixedCell};

/// Configuration errors that make a trace meaningless
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TraceError {
    #[error("level defines no source cell")]
    NoSource,
    #[error("level defines {count} source cells, expected exactly one")]
    MultipleSources { count: usize },
}

/// Result of one full propagation pass
#[derive(Debug, Clone, Default)]
pub struct Trace {
    /// Beam segments in discovery (FIFO) order
    pub segments: Vec<Segment>,
    /// Targets reached by a beam of their required color
    pub lit_targets: HashSet<Coord>,
}

/// Propagate the beam from the source across the board.
///
/// Pops states FIFO, steps one cell, emits the segment before inspecting the
/// destination (a beam about to be absorbed still draws the segment leading
/// into the absorber), then branches on the destination's fixed and player
/// content. Targets are transparent checkpoints: a wrong-color beam passes
/// through unchanged and the target stays unlit.
pub fn trace(board: &Board) -> Result<Trace, TraceError> {
    let (origin, dir) = find_source(board)?;

    let mut queue = VecDeque::new();
    queue.push_back(BeamState::new(origin, dir, Color::White));

    let mut visited: HashSet<BeamState> = HashSet::new();
    let mut result = Trace::default();

    while let Some(state) = queue.pop_front() {
        if !visited.insert(state) {
            continue;
        }

        // Beam exits the playing field: no segment for an out-of-bounds step
        let Some(next) = board.step(state.coord, state.dir) else {
            continue;
        };

        result
            .segments
            .push(Segment::between(state.coord, next, state.color));

        match board.fixed(next) {
            FixedCell::Wall => {}
            // A beam re-entering the source cell is absorbed like a wall
            FixedCell::Source(_) => {}
            FixedCell::Target(required) => {
                if state.color == required {
                    result.lit_targets.insert(next);
                }
                queue.push_back(BeamState::new(next, state.dir, state.color));
            }
            FixedCell::Empty => match board.element(next) {
                None => {
                    queue.push_back(BeamState::new(next, state.dir, state.color));
                }
                Some(mirror @ (Element::MirrorSlash | Element::MirrorBackslash)) => {
                    queue.push_back(BeamState::new(
                        next,
                        mirror.reflect(state.dir),
                        state.color,
                    ));
                }
                Some(Element::Prism) => {
                    if state.color == Color::White {
                        queue.push_back(BeamState::new(next, state.dir, Color::Green));
                        queue.push_back(BeamState::new(
                            next,
                            state.dir.turn_left(),
                            Color::Red,
                        ));
                        queue.push_back(BeamState::new(
                            next,
                            state.dir.turn_right(),
                            Color::Blue,
                        ));
                    } else {
                        // Colored beams pass straight through
                        queue.push_back(BeamState::new(next, state.dir, state.color));
                    }
                }
                Some(Element::Filter(filter_color)) => {
                    if state.color == filter_color {
                        queue.push_back(BeamState::new(next, state.dir, state.color));
                    }
                    // mismatched color: absorbed
                }
            },
        }
    }

    log::debug!(
        "trace: {} segments, {} states visited, {} targets lit",
        result.segments.len(),
        visited.len(),
        result.lit_targets.len()
    );

    Ok(result)
}

fn find_source(board: &Board) -> Result<(Coord, Direction), TraceError> {
    let mut sources = board
        .iter_fixed()
        .filter_map(|(coord, cell)| match cell {
            FixedCell::Source(dir) => Some((coord, dir)),
            _ => None,
        });

    let first = sources.next().ok_or(TraceError::NoSource)?;
    let extra = sources.count();
    if extra > 0 {
        return Err(TraceError::MultipleSources { count: extra + 1 });
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_10() -> Board {
        let mut board = Board::empty(10, 10);
        board.set_fixed(Coord::new(0, 5), FixedCell::Source(Direction::Down));
        board
    }

    /// Segments leaving the given cell (by start point)
    fn segments_from(trace: &Trace, coord: Coord) -> Vec<Segment> {
        let center = crate::cell_center(coord);
        trace
            .segments
            .iter()
            .copied()
            .filter(|s| s.start == center)
            .collect()
    }

    #[test]
    fn test_no_source_is_an_error() {
        let board = Board::empty(10, 10);
        assert_eq!(trace(&board).unwrap_err(), TraceError::NoSource);
    }

    #[test]
    fn test_multiple_sources_is_an_error() {
        let mut board = board_10();
        board.set_fixed(Coord::new(9, 0), FixedCell::Source(Direction::Up));
        assert_eq!(
            trace(&board).unwrap_err(),
            TraceError::MultipleSources { count: 2 }
        );
    }

    #[test]
    fn test_straight_beam_exits_grid() {
        let result = trace(&board_10()).unwrap();
        // Source at row 0 facing down: segments (0,5)->(1,5) ... (8,5)->(9,5),
        // then the step from (9,5) leaves the grid with no segment.
        assert_eq!(result.segments.len(), 9);
        assert!(result.lit_targets.is_empty());
        assert!(result.segments.iter().all(|s| s.color == Color::White));
    }

    #[test]
    fn test_wall_absorbs_but_incoming_segment_is_drawn() {
        let mut board = board_10();
        board.set_fixed(Coord::new(4, 5), FixedCell::Wall);
        let result = trace(&board).unwrap();
        // Segments into rows 1..=4, nothing beyond the wall
        assert_eq!(result.segments.len(), 4);
        let last = result.segments.last().unwrap();
        assert_eq!(last.end, crate::cell_center(Coord::new(4, 5)));
        assert!(segments_from(&result, Coord::new(4, 5)).is_empty());
    }

    #[test]
    fn test_target_matching_color_is_lit_and_transparent() {
        let mut board = board_10();
        board.set_fixed(Coord::new(3, 5), FixedCell::Target(Color::White));
        let result = trace(&board).unwrap();
        assert!(result.lit_targets.contains(&Coord::new(3, 5)));
        // Beam continues through the target to the bottom edge
        assert_eq!(result.segments.len(), 9);
    }

    #[test]
    fn test_target_wrong_color_passes_through_unlit() {
        let mut board = board_10();
        board.set_fixed(Coord::new(3, 5), FixedCell::Target(Color::Red));
        let result = trace(&board).unwrap();
        assert!(result.lit_targets.is_empty());
        // Transparency: the white beam still runs the full column
        assert_eq!(result.segments.len(), 9);
        assert_eq!(segments_from(&result, Coord::new(3, 5)).len(), 1);
    }

    #[test]
    fn test_mirror_redirects_beam() {
        let mut board = board_10();
        board
            .place(Coord::new(4, 5), Element::MirrorBackslash)
            .unwrap();
        let result = trace(&board).unwrap();
        // Down into `\` reflects right: continues along row 4 to the east edge
        let outgoing = segments_from(&result, Coord::new(4, 5));
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].end, crate::cell_center(Coord::new(4, 6)));
        // 4 segments down + 4 segments right
        assert_eq!(result.segments.len(), 8);
    }

    #[test]
    fn test_prism_fans_white_into_three() {
        let mut board = board_10();
        board.place(Coord::new(1, 5), Element::Prism).unwrap();
        let result = trace(&board).unwrap();

        let outgoing = segments_from(&result, Coord::new(1, 5));
        assert_eq!(outgoing.len(), 3);
        // Straight continues green, turn-left of down is right (red),
        // turn-right of down is left (blue)
        let find = |color| outgoing.iter().find(|s| s.color == color).copied();
        assert_eq!(
            find(Color::Green).unwrap().end,
            crate::cell_center(Coord::new(2, 5))
        );
        assert_eq!(
            find(Color::Red).unwrap().end,
            crate::cell_center(Coord::new(1, 6))
        );
        assert_eq!(
            find(Color::Blue).unwrap().end,
            crate::cell_center(Coord::new(1, 4))
        );
    }

    #[test]
    fn test_prism_passes_colored_beam_straight_through() {
        let mut board = board_10();
        board.place(Coord::new(1, 5), Element::Prism).unwrap();
        // Second prism in the green branch
        board.place(Coord::new(3, 5), Element::Prism).unwrap();
        let result = trace(&board).unwrap();

        let outgoing = segments_from(&result, Coord::new(3, 5));
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].color, Color::Green);
        assert_eq!(outgoing[0].end, crate::cell_center(Coord::new(4, 5)));
    }

    #[test]
    fn test_filter_passes_matching_color_only() {
        for (filter, expect_downstream) in [
            (Element::Filter(Color::White), 0),
            (Element::Filter(Color::Red), 0),
            (Element::Filter(Color::Blue), 0),
            (Element::Filter(Color::Green), 1),
        ] {
            let mut board = board_10();
            board.place(Coord::new(1, 5), Element::Prism).unwrap();
            board.place(Coord::new(3, 5), filter).unwrap();
            let result = trace(&board).unwrap();
            // The green branch from the prism runs straight down into the filter
            assert_eq!(
                segments_from(&result, Coord::new(3, 5)).len(),
                expect_downstream,
                "filter {filter:?}"
            );
        }
    }

    #[test]
    fn test_white_filter_passes_white_beam() {
        let mut board = board_10();
        board
            .place(Coord::new(4, 5), Element::Filter(Color::White))
            .unwrap();
        let result = trace(&board).unwrap();
        assert_eq!(result.segments.len(), 9);
    }

    #[test]
    fn test_beam_reentering_source_is_absorbed() {
        let mut board = board_10();
        // Mirror loop back into the source: down into `/` -> left, left into
        // `\` -> up, up into `/` -> right, then along row 0 into (0,5)
        board.place(Coord::new(2, 5), Element::MirrorSlash).unwrap();
        board
            .place(Coord::new(2, 3), Element::MirrorBackslash)
            .unwrap();
        board.place(Coord::new(0, 3), Element::MirrorSlash).unwrap();
        let result = trace(&board).unwrap();

        // Two segments per leg, and nothing beyond the source cell
        assert_eq!(result.segments.len(), 8);
        let source_center = crate::cell_center(Coord::new(0, 5));
        assert_eq!(result.segments.last().unwrap().end, source_center);
        // Only the original emission leaves the source
        assert_eq!(segments_from(&result, Coord::new(0, 5)).len(), 1);
    }

    #[test]
    fn test_mirror_cycle_terminates() {
        // Prism at (2,5) injects a red beam (turn-left of down = right) into
        // a closed mirror rectangle that re-enters the prism cell heading
        // right forever. Without the visited set this never drains.
        let mut board = board_10();
        board.place(Coord::new(2, 5), Element::Prism).unwrap();
        board
            .place(Coord::new(2, 8), Element::MirrorBackslash)
            .unwrap();
        board.place(Coord::new(5, 8), Element::MirrorSlash).unwrap();
        board
            .place(Coord::new(5, 2), Element::MirrorBackslash)
            .unwrap();
        board.place(Coord::new(2, 2), Element::MirrorSlash).unwrap();

        let result = trace(&board).unwrap();
        // Bounded by the state space, well under H*W*4*4
        assert!(result.segments.len() <= 10 * 10 * 16);
        // The red loop closes exactly once: one segment per orbit edge.
        // Rectangle perimeter rows 2..=5 x cols 2..=8 = 18 edges.
        let red_count = result
            .segments
            .iter()
            .filter(|s| s.color == Color::Red)
            .count();
        assert_eq!(red_count, 18);
    }

    #[test]
    fn test_scenario_straight_beam_misses_red_target() {
        // Reference level, no player elements: the white beam goes straight
        // down column 5 and never reaches the red target at (3,4)
        let mut board = board_10();
        board.set_fixed(Coord::new(3, 4), FixedCell::Target(Color::Red));
        let result = trace(&board).unwrap();
        assert!(result.lit_targets.is_empty());
    }

    #[test]
    fn test_scenario_prism_and_mirrors_light_red_target() {
        // Split at (1,5); the red branch leaves the prism heading right,
        // `\` at (1,6) sends it down, `/` at (3,6) sends it left into the
        // red target at (3,4).
        let mut board = board_10();
        board.set_fixed(Coord::new(3, 4), FixedCell::Target(Color::Red));
        board.place(Coord::new(1, 5), Element::Prism).unwrap();
        board
            .place(Coord::new(1, 6), Element::MirrorBackslash)
            .unwrap();
        board
            .place(Coord::new(3, 6), Element::MirrorSlash)
            .unwrap();
        let result = trace(&board).unwrap();
        assert!(result.lit_targets.contains(&Coord::new(3, 4)));

        // The segment into the target carries red
        let target_center = crate::cell_center(Coord::new(3, 4));
        let incoming: Vec<_> = result
            .segments
            .iter()
            .filter(|s| s.end == target_center)
            .collect();
        assert!(incoming.iter().any(|s| s.color == Color::Red));
    }
}
