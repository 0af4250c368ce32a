//! Pathgrid - a grid path-drawing puzzle engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (line growth, regions, validation)
//! - `session`: Puzzle sets, unlocks and the shared clone registry
//! - `puzzles`: Built-in puzzle set
//! - `settings`: Data-driven tuning

pub mod error;
pub mod puzzles;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::PuzzleError;
pub use session::{Session, TickObserver};
pub use settings::Settings;
