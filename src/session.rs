//! Puzzle session
//!
//! Owns the loaded puzzle set, one lazily created game per puzzle and the
//! clone registry they share. The host drives it with a fixed-rate timer
//! calling [`Session::host_tick`] and forwards player input to the current
//! game. Finishing a puzzle can publish a clone value and unlock another
//! puzzle; both happen here, never inside a game.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::PuzzleError;
use crate::settings::Settings;
use crate::sim::{
    CloneRegistry, CornerMarker, Direction, Finished, Game, PuzzleSet, script,
};

/// Host callbacks. Every method defaults to doing nothing.
pub trait TickObserver {
    /// A running game advanced; redraw it
    fn on_tick(&mut self, _name: &str, _game: &Game) {}

    /// A game's line passed an exit
    fn on_finish(&mut self, _name: &str, _game: &Game, _finished: Finished) {}

    /// A game that is not ticking changed (paused, unlocked or rescored);
    /// refresh its thumbnail
    fn on_refresh(&mut self, _name: &str, _game: &Game) {}
}

/// Headless hosts that do not draw anything
impl TickObserver for () {}

pub struct Session {
    puzzles: PuzzleSet,
    games: IndexMap<String, Game>,
    registry: CloneRegistry,
    current: Option<String>,
    settings: Settings,
}

impl Session {
    pub fn new(puzzles: PuzzleSet, settings: Settings) -> Self {
        Self {
            puzzles,
            games: IndexMap::new(),
            registry: CloneRegistry::new(),
            current: None,
            settings,
        }
    }

    /// Swap in a new puzzle set. Games and clone values from the old set are
    /// dropped.
    pub fn load_set(&mut self, puzzles: PuzzleSet) {
        log::info!("Switching to a puzzle set of {} puzzles", puzzles.len());
        self.puzzles = puzzles;
        self.games.clear();
        self.registry.reset();
        self.current = None;
    }

    /// The game for `name`, created on first use
    pub fn ensure_game(&mut self, name: &str) -> Result<&mut Game, PuzzleError> {
        match self.games.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let puzzle = self
                    .puzzles
                    .get(name)
                    .ok_or_else(|| PuzzleError::UnknownPuzzle {
                        name: name.to_string(),
                    })?
                    .clone();
                log::debug!("Creating game for {}", name);
                Ok(entry.insert(Game::new(puzzle, self.settings)))
            }
        }
    }

    /// Make `name` the current puzzle. The previous one is paused with its
    /// line intact.
    pub fn switch_to(
        &mut self,
        name: &str,
        observer: &mut impl TickObserver,
    ) -> Result<(), PuzzleError> {
        self.ensure_game(name)?;
        if let Some(previous) = self.current.take() {
            if previous != name {
                if let Some(game) = self.games.get_mut(&previous) {
                    game.pause();
                    observer.on_refresh(&previous, game);
                }
            }
        }

        if let Some(game) = self.games.get_mut(name) {
            game.start();
        }
        self.current = Some(name.to_string());
        log::info!("Current puzzle: {}", name);
        Ok(())
    }

    /// One host timer tick: every running game takes `speed` physics steps
    pub fn host_tick(&mut self, observer: &mut impl TickObserver) {
        for index in 0..self.games.len() {
            let Some((name, game)) = self.games.get_index_mut(index) else {
                continue;
            };
            if !game.is_running() {
                continue;
            }

            let mut finished = None;
            for _ in 0..game.speed() {
                finished = game.step(&self.registry);
                if finished.is_some() {
                    break;
                }
            }

            let name = name.clone();
            if let Some(finished) = finished {
                self.finish(&name, finished, observer);
            }
            if let Some(game) = self.games.get(&name) {
                observer.on_tick(&name, game);
            }
        }
    }

    fn finish(&mut self, name: &str, finished: Finished, observer: &mut impl TickObserver) {
        let Some(game) = self.games.get(name) else {
            return;
        };

        let won = game.won();
        if won {
            for id in game.puzzle().clone_exit_ids() {
                self.registry.clear(id);
            }
            let exit_id = game
                .puzzle()
                .corner
                .get(finished.exit)
                .and_then(CornerMarker::clone_exit_id);
            if let Some(id) = exit_id {
                let output = game.output_symbol(&self.registry);
                self.registry.set(id, output);
            }
        }
        observer.on_finish(name, game, finished);

        let unlock = game.puzzle().unlock.clone();
        if let (true, Some(target)) = (won, unlock) {
            self.unlock(&target, observer);
        }
    }

    fn unlock(&mut self, target: &str, observer: &mut impl TickObserver) {
        match self.puzzles.get_mut(target) {
            Some(puzzle) => puzzle.active = true,
            None => {
                log::warn!("Cannot unlock missing puzzle {}", target);
                return;
            }
        }
        if let Err(e) = self.ensure_game(target) {
            log::warn!("Cannot unlock {}: {}", target, e);
            return;
        }

        if let Some(game) = self.games.get_mut(target) {
            game.set_active(true);
            game.rescore(&self.registry);
            observer.on_refresh(target, game);
        }
        log::info!("Unlocked puzzle {}", target);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if let Some(game) = self.current_mut() {
            game.set_direction(direction);
        }
    }

    pub fn set_boost(&mut self, held: bool) {
        if let Some(game) = self.current_mut() {
            game.set_boost(held);
        }
    }

    /// Put the current puzzle's line back on its entrance
    pub fn reset_current(&mut self) {
        if let Some(game) = self.current_mut() {
            game.reset();
        }
    }

    /// Play scripted moves on the current puzzle and run the usual finish
    /// handling if the line passes an exit
    pub fn play(
        &mut self,
        moves: &[Direction],
        observer: &mut impl TickObserver,
    ) -> Result<Option<Finished>, PuzzleError> {
        let name = self.current.clone().ok_or(PuzzleError::NoCurrentPuzzle)?;
        self.ensure_game(&name)?;
        let game = self
            .games
            .get_mut(&name)
            .ok_or(PuzzleError::NoCurrentPuzzle)?;
        let finished = script::play(game, &self.registry, moves);

        if let Some(finished) = finished {
            self.finish(&name, finished, observer);
        }
        if let Some(game) = self.games.get(&name) {
            observer.on_tick(&name, game);
        }
        Ok(finished)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&Game> {
        self.current.as_ref().and_then(|name| self.games.get(name))
    }

    fn current_mut(&mut self) -> Option<&mut Game> {
        self.current.as_ref().and_then(|name| self.games.get_mut(name))
    }

    pub fn game(&self, name: &str) -> Option<&Game> {
        self.games.get(name)
    }

    pub fn puzzles(&self) -> &PuzzleSet {
        &self.puzzles
    }

    pub fn registry(&self) -> &CloneRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
