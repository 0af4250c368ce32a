//! Built-in puzzle set
//!
//! The tutorial chain followed by a clone relay: winning `relay` publishes
//! the symbol its line touched, and `mirror` shows it in place of its clone.
//!
//! `tutorial3` gives its top-right blob the color black. The original level
//! left that blob without a color, which made the level unsolvable.

use crate::error::PuzzleError;
use crate::sim::PuzzleSet;

/// Name of the puzzle a fresh session starts on
pub const FIRST_PUZZLE: &str = "tutorial1";

const BUILTIN_JSON: &str = r#"{
    "tutorial1": {
        "rows": 3, "cols": 2,
        "area": [
            { "r": 0.5, "c": 0.5, "type": "blob", "color": "white" },
            { "r": 1.5, "c": 0.5, "type": "blob", "color": "black" }
        ],
        "edge": [
            { "r": 0, "c": 0.5, "type": "blocked" },
            { "r": 2, "c": 0.5, "type": "blocked" }
        ],
        "corner": [
            { "r": 0, "c": 1, "type": "exit", "direction": "up" },
            { "r": 2, "c": 0, "type": "entrance" }
        ],
        "unlock": "tutorial2",
        "active": true
    },
    "tutorial2": {
        "rows": 3, "cols": 4,
        "area": [
            { "r": 0.5, "c": 0.5, "type": "blob", "color": "white" },
            { "r": 1.5, "c": 0.5, "type": "blob", "color": "white" },
            { "r": 1.5, "c": 2.5, "type": "blob", "color": "black" }
        ],
        "corner": [
            { "r": 0, "c": 1, "type": "exit", "direction": "up" },
            { "r": 2, "c": 1, "type": "entrance" }
        ],
        "unlock": "tutorial3"
    },
    "tutorial3": {
        "rows": 3, "cols": 3,
        "area": [
            { "r": 0.5, "c": 0.5, "type": "blob", "color": "white" },
            { "r": 0.5, "c": 1.5, "type": "blob", "color": "black" },
            { "r": 1.5, "c": 0.5, "type": "blob", "color": "white" },
            { "r": 1.5, "c": 1.5, "type": "blob", "color": "black" }
        ],
        "corner": [
            { "r": 0, "c": 1, "type": "exit", "direction": "up" },
            { "r": 2, "c": 1, "type": "entrance" }
        ],
        "unlock": "relay"
    },
    "relay": {
        "rows": 3, "cols": 2,
        "area": [
            { "r": 1.5, "c": 0.5, "type": "blob", "color": "black" }
        ],
        "corner": [
            { "r": 2, "c": 0, "type": "entrance" },
            { "r": 0, "c": 1, "type": "exit", "direction": "up",
              "exitClass": "clone", "cloneId": "relay" }
        ],
        "unlock": "mirror"
    },
    "mirror": {
        "rows": 3, "cols": 3,
        "area": [
            { "r": 0.5, "c": 0.5, "type": "clone", "cloneId": "relay" },
            { "r": 0.5, "c": 1.5, "type": "blob", "color": "white" },
            { "r": 1.5, "c": 0.5, "type": "blob", "color": "black" },
            { "r": 1.5, "c": 1.5, "type": "star", "color": "white" }
        ],
        "corner": [
            { "r": 0, "c": 1, "type": "exit", "direction": "up" },
            { "r": 2, "c": 1, "type": "entrance" }
        ]
    }
}"#;

/// The puzzles that ship with the engine
pub fn builtin() -> Result<PuzzleSet, PuzzleError> {
    PuzzleSet::from_json(BUILTIN_JSON)
}
