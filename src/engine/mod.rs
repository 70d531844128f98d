//! Beam-propagation engine
//!
//! A pure function of the board snapshot: no internal state, no mutation of
//! the grid, recomputed from scratch on every call. The traversal is a FIFO
//! breadth-first search over beam states `(coord, direction, color)` with a
//! visited set as the cycle guard, so any mirror arrangement terminates in
//! at most `width * height * 4 * 4` state evaluations.

pub mod segment;
pub mod trace;

pub use segment::{BeamState, Segment};
pub use trace::{Trace, TraceError, trace};
