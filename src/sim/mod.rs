//! Deterministic puzzle simulation
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed progress per step, no wall-clock time
//! - Stable iteration order (declaration order of puzzle data)
//! - No rendering or platform dependencies

pub mod clone;
pub mod game;
pub mod grid;
pub mod line;
pub mod puzzle;
pub mod region;
pub mod script;
pub mod validate;

pub use clone::{CloneRegistry, normalize};
pub use game::{Finished, Game};
pub use grid::{Coord, Direction, HalfPos, direction_to_delta};
pub use line::{Line, LineEvent, Transition};
pub use puzzle::{
    AreaSymbol, CornerKind, CornerMarker, EdgeKind, EdgeMarker, ExitClass, Puzzle, PuzzleSet,
    Symbol,
};
pub use region::{CellLabels, Regions, find_symbols_by_area};
pub use validate::{Failed, derive_output, find_failed, validate_edge, validate_symbol};
