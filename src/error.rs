//! Errors for loading puzzle data and driving sessions
//!
//! The simulation itself never fails; malformed symbols and edges fail
//! validation instead. Only I/O, parsing and lookups return errors.

use std::error::Error;
use std::fmt;

/// Errors arising from puzzle-set loading, settings and session lookups.
#[derive(Debug)]
pub enum PuzzleError {
    /// Reading a puzzle or settings file failed.
    Io(std::io::Error),
    /// The JSON did not match the puzzle or settings schema.
    Parse(serde_json::Error),
    /// A puzzle definition cannot be simulated.
    InvalidPuzzle {
        /// Name of the offending puzzle.
        name: String,
        /// What is wrong with it.
        reason: String,
    },
    /// No puzzle with this name exists in the loaded set.
    UnknownPuzzle {
        /// The requested name.
        name: String,
    },
    /// No puzzle has been switched to yet.
    NoCurrentPuzzle,
    /// A scripted move could not be read as a direction.
    BadMove {
        /// The unreadable token.
        token: String,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::InvalidPuzzle { name, reason } => {
                write!(f, "puzzle {name:?} is invalid: {reason}")
            }
            Self::UnknownPuzzle { name } => write!(f, "no puzzle named {name:?}"),
            Self::NoCurrentPuzzle => write!(f, "no puzzle selected"),
            Self::BadMove { token } => write!(f, "unrecognized move {token:?}"),
        }
    }
}

impl Error for PuzzleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PuzzleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
