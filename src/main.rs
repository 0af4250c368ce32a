//! Pathgrid headless runner
//!
//! Usage: `pathgrid [PUZZLES.json|-] [PUZZLE] [MOVES]`
//!
//! Loads a puzzle set (`-` or nothing for the built-in set), plays the moves
//! on the named puzzle and prints the outcome. `RUST_LOG` controls logging.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use pathgrid::sim::script::parse_moves;
    use pathgrid::sim::{Finished, Game, PuzzleSet};
    use pathgrid::{PuzzleError, Session, Settings, TickObserver, puzzles};

    /// Prints finish and unlock events as they happen
    struct Report;

    impl TickObserver for Report {
        fn on_finish(&mut self, name: &str, game: &Game, finished: Finished) {
            let outcome = if finished.won { "solved" } else { "failed" };
            println!("{name}: {outcome} through exit {}", finished.exit);
            let failed = game.failed();
            if !failed.is_empty() {
                println!(
                    "  failing symbols {:?}, failing edges {:?}",
                    failed.symbols, failed.edges
                );
            }
        }

        fn on_refresh(&mut self, name: &str, game: &Game) {
            if game.puzzle().active {
                println!("{name}: unlocked");
            }
        }
    }

    pub fn run(args: &[String]) -> Result<(), PuzzleError> {
        let set = match args.first().map(String::as_str) {
            None | Some("-") => puzzles::builtin()?,
            Some(path) => PuzzleSet::load(path)?,
        };
        let name = match args.get(1) {
            Some(name) => name.clone(),
            None => set
                .first_name()
                .unwrap_or(puzzles::FIRST_PUZZLE)
                .to_string(),
        };
        let moves = parse_moves(args.get(2).map(String::as_str).unwrap_or(""))?;

        let mut session = Session::new(set, Settings::default());
        let mut report = Report;
        session.switch_to(&name, &mut report)?;
        log::info!("Playing {} moves on {}", moves.len(), name);

        if session.play(&moves, &mut report)?.is_none() {
            if let Some(game) = session.current() {
                println!(
                    "{name}: unfinished, line at {:?}",
                    game.line().segments().last()
                );
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pathgrid (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = native::run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive `pathgrid::Session` directly
}
