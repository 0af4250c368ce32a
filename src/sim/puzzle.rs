//! Puzzle definitions
//!
//! Levels are authored outside the engine (JSON) and treated as read-only,
//! except for the `active` flag the session flips on unlock.

use glam::IVec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::grid::{Direction, HalfPos, direction_to_delta};
use crate::error::PuzzleError;

/// A symbol drawn inside a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Symbol {
    /// All blobs sharing a region must share a color
    Blob {
        #[serde(default)]
        color: String,
    },
    /// Every star's region holds exactly two symbols of its color
    Star {
        #[serde(default)]
        color: String,
    },
    /// Takes the value another puzzle produced when it was won
    Clone {
        #[serde(rename = "cloneId")]
        clone_id: String,
    },
    /// An empty slot (a clone with nothing to copy)
    None,
    /// Anything the engine does not understand; never valid
    #[serde(other)]
    Unknown,
}

impl Symbol {
    pub fn color(&self) -> Option<&str> {
        match self {
            Symbol::Blob { color } | Symbol::Star { color } => Some(color),
            _ => None,
        }
    }
}

/// A symbol placed at an area coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSymbol {
    #[serde(flatten)]
    pub at: HalfPos,
    #[serde(flatten)]
    pub symbol: Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EdgeKind {
    /// The line may poke into this crossing but never pass it
    Blocked,
    /// The finished line must pass this crossing
    Required,
    #[serde(other)]
    Unknown,
}

/// A marker on an edge coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeMarker {
    #[serde(flatten)]
    pub at: HalfPos,
    #[serde(flatten)]
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitClass {
    /// Winning through this exit publishes a clone value
    Clone,
    #[serde(other)]
    Plain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CornerKind {
    Entrance,
    Exit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<Direction>,
        #[serde(default, rename = "exitClass", skip_serializing_if = "Option::is_none")]
        exit_class: Option<ExitClass>,
        #[serde(default, rename = "cloneId", skip_serializing_if = "Option::is_none")]
        clone_id: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// An entrance or exit on a grid vertex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerMarker {
    #[serde(flatten)]
    pub at: HalfPos,
    #[serde(flatten)]
    pub kind: CornerKind,
}

impl CornerMarker {
    /// Clone id published by this exit, if it is a clone-class exit
    pub fn clone_exit_id(&self) -> Option<&str> {
        match &self.kind {
            CornerKind::Exit {
                exit_class: Some(ExitClass::Clone),
                clone_id: Some(id),
                ..
            } => Some(id),
            _ => None,
        }
    }
}

/// A single level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Key in the owning puzzle set
    #[serde(skip)]
    pub name: String,
    /// Vertex rows
    pub rows: i32,
    /// Vertex columns
    pub cols: i32,
    #[serde(default)]
    pub area: Vec<AreaSymbol>,
    #[serde(default)]
    pub edge: Vec<EdgeMarker>,
    #[serde(default)]
    pub corner: Vec<CornerMarker>,
    /// Puzzle to activate when this one is won
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Puzzle {
    /// Check the grid can be simulated at all
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.rows < 1 || self.cols < 1 {
            return Err(PuzzleError::InvalidPuzzle {
                name: self.name.clone(),
                reason: format!("grid must be at least 1x1, got {}x{}", self.cols, self.rows),
            });
        }
        if self.entrance().is_none() {
            log::warn!("Puzzle {} has no entrance; its line can never move", self.name);
        }
        Ok(())
    }

    /// Whether a vertex lies on the grid
    #[inline]
    pub fn contains_vertex(&self, v: IVec2) -> bool {
        v.x >= 0 && v.x < self.cols && v.y >= 0 && v.y < self.rows
    }

    /// Unit cells per axis (one fewer than vertices)
    pub fn cell_dims(&self) -> (i32, i32) {
        ((self.cols - 1).max(0), (self.rows - 1).max(0))
    }

    /// Starting vertex (first entrance declared)
    pub fn entrance(&self) -> Option<IVec2> {
        self.corner
            .iter()
            .filter(|c| matches!(c.kind, CornerKind::Entrance))
            .find_map(|c| c.at.as_vertex())
    }

    /// Exit at `loc` facing `direction`: its index and the vertex beyond it
    pub fn find_exit(&self, loc: IVec2, direction: Direction) -> Option<(usize, IVec2)> {
        let at = HalfPos::vertex(loc);
        self.corner
            .iter()
            .enumerate()
            .filter(|(_, c)| c.at == at)
            .filter_map(|(i, c)| match c.kind {
                CornerKind::Exit { direction: d, .. } if d == Some(direction) => {
                    Some((i, loc + direction_to_delta(d)))
                }
                _ => None,
            })
            .last()
    }

    /// Whether a blocked marker sits on this edge
    pub fn is_blocked(&self, edge: HalfPos) -> bool {
        self.edge
            .iter()
            .any(|e| e.kind == EdgeKind::Blocked && e.at == edge)
    }

    /// Ids of every clone-class exit in this puzzle
    pub fn clone_exit_ids(&self) -> impl Iterator<Item = &str> {
        self.corner.iter().filter_map(CornerMarker::clone_exit_id)
    }
}

/// Named puzzles in selector order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleSet {
    puzzles: IndexMap<String, Puzzle>,
}

impl PuzzleSet {
    /// Parse a set from JSON, filling in names and checking each level
    pub fn from_json(json: &str) -> Result<Self, PuzzleError> {
        let mut set: PuzzleSet = serde_json::from_str(json)?;
        for (name, puzzle) in set.puzzles.iter_mut() {
            puzzle.name = name.clone();
            puzzle.validate()?;
        }
        for puzzle in set.puzzles.values() {
            if let Some(target) = &puzzle.unlock {
                if !set.puzzles.contains_key(target) {
                    log::warn!("Puzzle {} unlocks missing puzzle {}", puzzle.name, target);
                }
            }
        }
        log::info!("Loaded puzzle set with {} puzzles", set.puzzles.len());
        Ok(set)
    }

    /// Read and parse a puzzle-set file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, PuzzleError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, name: &str, mut puzzle: Puzzle) {
        puzzle.name = name.to_string();
        self.puzzles.insert(name.to_string(), puzzle);
    }

    pub fn get(&self, name: &str) -> Option<&Puzzle> {
        self.puzzles.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Puzzle> {
        self.puzzles.get_mut(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.puzzles.keys().map(String::as_str)
    }

    pub fn first_name(&self) -> Option<&str> {
        self.names().next()
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}
