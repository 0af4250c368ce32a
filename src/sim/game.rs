//! Per-puzzle game
//!
//! Owns one puzzle's line, its timer flag and its score. The host ticks it
//! at a fixed rate; each tick runs `speed` physics steps.

use serde::Serialize;

use super::clone::CloneRegistry;
use super::grid::Direction;
use super::line::{Line, LineEvent};
use super::puzzle::{Puzzle, Symbol};
use super::validate::{Failed, derive_output, find_failed};
use crate::settings::Settings;

/// Reported by [`Game::step`] when the line passes an exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finished {
    /// Index of the exit corner in `Puzzle::corner`
    pub exit: usize,
    pub won: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Game {
    #[serde(skip)]
    puzzle: Puzzle,
    #[serde(skip)]
    settings: Settings,
    line: Line,
    /// Physics steps per host tick
    speed: u32,
    failed: Failed,
    over: bool,
    /// Exit the line finished through
    finished_exit: Option<usize>,
    /// Ticks since reset or finish, for flash animations
    animate_state: u64,
    /// Host timer is armed
    running: bool,
}

impl Game {
    pub fn new(puzzle: Puzzle, settings: Settings) -> Self {
        let line = Line::new(puzzle.entrance());
        Self {
            puzzle,
            settings,
            line,
            speed: 1,
            failed: Failed::default(),
            over: false,
            finished_exit: None,
            animate_state: 0,
            running: false,
        }
    }

    /// Bind a different puzzle and start over
    pub fn initialize(&mut self, puzzle: Puzzle) {
        self.puzzle = puzzle;
        self.reset();
    }

    /// Put the line back on the entrance and clear the score
    pub fn reset(&mut self) {
        self.speed = 1;
        self.failed = Failed::default();
        self.over = false;
        self.finished_exit = None;
        self.animate_state = 0;
        self.line = Line::new(self.puzzle.entrance());
    }

    /// Mirror an unlock onto this game's copy of the puzzle
    pub fn set_active(&mut self, active: bool) {
        self.puzzle.active = active;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.line.set_direction(direction);
    }

    /// Hold or release the speed modifier
    pub fn set_boost(&mut self, held: bool) {
        self.speed = if held { self.settings.boost_speed.max(1) } else { 1 };
    }

    /// One physics step
    pub fn step(&mut self, registry: &CloneRegistry) -> Option<Finished> {
        self.animate_state += 1;
        if self.over {
            return None;
        }

        match self.line.advance(&self.puzzle, &self.settings) {
            LineEvent::ReachedExit(exit) => {
                self.finish_level(exit, registry);
                Some(Finished {
                    exit,
                    won: self.won(),
                })
            }
            _ => None,
        }
    }

    fn finish_level(&mut self, exit: usize, registry: &CloneRegistry) {
        self.failed = find_failed(&self.puzzle, &self.line.crossed_edges(), registry);
        self.over = true;
        self.finished_exit = Some(exit);
        self.animate_state = 0;
        log::info!(
            "Puzzle {} finished: {} ({} symbols, {} edges failed)",
            self.puzzle.name,
            if self.won() { "won" } else { "lost" },
            self.failed.symbols.len(),
            self.failed.edges.len()
        );
    }

    /// Re-score a finished line, e.g. after a clone input changed
    pub fn rescore(&mut self, registry: &CloneRegistry) {
        if self.over {
            self.failed = find_failed(&self.puzzle, &self.line.crossed_edges(), registry);
            log::debug!("Rescored {}: won = {}", self.puzzle.name, self.won());
        }
    }

    /// Symbol this line publishes through a clone exit
    pub fn output_symbol(&self, registry: &CloneRegistry) -> Symbol {
        derive_output(&self.puzzle, &self.line.crossed_edges(), registry)
    }

    pub fn won(&self) -> bool {
        self.over && self.failed.is_empty()
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn finished_exit(&self) -> Option<usize> {
        self.finished_exit
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn failed(&self) -> &Failed {
        &self.failed
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn animate_state(&self) -> u64 {
        self.animate_state
    }

    /// Failure markers lit this tick
    pub fn flash_on(&self) -> bool {
        self.settings.flash_on(self.animate_state)
    }
}
