//! Scripted input playback
//!
//! Drives a game headlessly from a list of moves, one committed vertex per
//! move. Each move after the first is queued while the previous segment is
//! still in flight, so the line turns exactly at the committed vertex the way
//! a player tapping keys in rhythm would. A move that points back along the
//! line retracts it.

use super::clone::CloneRegistry;
use super::game::{Finished, Game};
use super::grid::Direction;
use crate::error::PuzzleError;

/// Physics steps a single move may take before the line counts as stuck
pub const MAX_STEPS_PER_MOVE: usize = 1000;

/// Parse `"uurr"`, `"up up right"`, `"right"` or `"up,right"` into
/// directions. A token that is not a direction word is read one letter at
/// a time.
pub fn parse_moves(script: &str) -> Result<Vec<Direction>, PuzzleError> {
    let mut moves = Vec::new();
    for token in script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        if let Some(direction) = Direction::from_str(token) {
            moves.push(direction);
            continue;
        }
        for letter in token.chars() {
            let direction = Direction::from_str(letter.encode_utf8(&mut [0; 4]))
                .ok_or_else(|| PuzzleError::BadMove {
                    token: letter.to_string(),
                })?;
            moves.push(direction);
        }
    }
    Ok(moves)
}

/// Play `moves` on `game`. Returns the finish report if the line passed an
/// exit, `None` if the moves ran out or the line got stuck.
pub fn play(game: &mut Game, registry: &CloneRegistry, moves: &[Direction]) -> Option<Finished> {
    let mut queued_ahead = false;

    for (i, &direction) in moves.iter().enumerate() {
        if !queued_ahead {
            game.set_direction(direction);
        }
        queued_ahead = false;

        let before = game.line().segments().len();
        let mut moved = false;
        for _ in 0..MAX_STEPS_PER_MOVE {
            if let Some(finished) = game.step(registry) {
                return Some(finished);
            }
            if game.is_over() {
                return None;
            }
            if game.line().segments().len() != before {
                moved = true;
                break;
            }
            if queued_ahead {
                continue;
            }
            // Queue the following move once this one is underway, unless it
            // would reverse the segment before it lands
            if let (Some(&upcoming), Some(next)) = (moves.get(i + 1), game.line().next()) {
                if next.sign > 0.0 && next.direction == direction && upcoming != next.reverse {
                    game.set_direction(upcoming);
                    queued_ahead = true;
                }
            }
        }

        if !moved {
            log::warn!("Move {} ({:?}) never landed; line is stuck", i, direction);
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::puzzle::PuzzleSet;
    use glam::IVec2;

    const OPEN: &str = r#"{
        "open": {
            "rows": 3, "cols": 3,
            "corner": [
                { "r": 2, "c": 0, "type": "entrance" },
                { "r": 0, "c": 2, "type": "exit", "direction": "right" }
            ]
        }
    }"#;

    fn game() -> Game {
        let set = PuzzleSet::from_json(OPEN).unwrap();
        Game::new(set.get("open").unwrap().clone(), Settings::default())
    }

    #[test]
    fn test_parse_moves() {
        use Direction::*;
        assert_eq!(parse_moves("uurr").unwrap(), vec![Up, Up, Right, Right]);
        assert_eq!(parse_moves("up, left down").unwrap(), vec![Up, Left, Down]);
        assert_eq!(parse_moves("").unwrap(), Vec::<Direction>::new());
        assert_eq!(parse_moves("up").unwrap(), vec![Up]);
        assert_eq!(parse_moves("right").unwrap(), vec![Right]);
        assert_eq!(parse_moves("Down uul").unwrap(), vec![Down, Up, Up, Left]);
        assert!(matches!(
            parse_moves("ux"),
            Err(PuzzleError::BadMove { token }) if token == "x"
        ));
    }

    #[test]
    fn test_turns_land_on_vertices() {
        let mut game = game();
        let registry = CloneRegistry::new();
        let moves = parse_moves("urur").unwrap();
        assert_eq!(play(&mut game, &registry, &moves), None);
        assert_eq!(
            &game.line().segments()[..5],
            &[
                IVec2::new(0, 2),
                IVec2::new(0, 1),
                IVec2::new(1, 1),
                IVec2::new(1, 0),
                IVec2::new(2, 0),
            ]
        );
    }

    #[test]
    fn test_reversal_retracts() {
        let mut game = game();
        let registry = CloneRegistry::new();
        let moves = parse_moves("uurdr").unwrap();
        play(&mut game, &registry, &moves);
        // Down from (1, 0) reaches a fresh vertex, so nothing retracts
        assert_eq!(
            &game.line().segments()[..5],
            &[
                IVec2::new(0, 2),
                IVec2::new(0, 1),
                IVec2::new(0, 0),
                IVec2::new(1, 0),
                IVec2::new(1, 1),
            ]
        );

        let mut game = self::game();
        let moves = parse_moves("uud").unwrap();
        play(&mut game, &registry, &moves);
        assert_eq!(game.line().segments(), &[IVec2::new(0, 2), IVec2::new(0, 1)]);
        assert!(game.line().next().is_some_and(|n| n.sign < 0.0));
    }

    #[test]
    fn test_reaches_exit() {
        let mut game = game();
        let registry = CloneRegistry::new();
        let moves = parse_moves("uurrr").unwrap();
        let finished = play(&mut game, &registry, &moves);
        assert_eq!(finished, Some(Finished { exit: 1, won: true }));
    }

    #[test]
    fn test_stuck_line_stops() {
        let mut game = game();
        let registry = CloneRegistry::new();
        // Left of the entrance is off the grid
        assert_eq!(play(&mut game, &registry, &[Direction::Left]), None);
        assert_eq!(game.line().segments(), &[IVec2::new(0, 2)]);
    }
}
