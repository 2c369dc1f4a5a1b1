//! Read-only replay of accepted moves

use shakmaty::{san::SanPlus, Chess, Position};
use tracing::warn;

use super::Game;
use crate::error::{Error, Result};
use crate::{fen_of, STARTING_FEN};

/// Plays one SAN move on a copy of `position`.
pub fn apply_san(position: &Chess, san: &str) -> Result<Chess> {
    let parsed: SanPlus = san
        .parse()
        .map_err(|_| Error::IllegalMove(format!("'{}' is not SAN", san)))?;

    let m = parsed
        .san
        .to_move(position)
        .map_err(|e| Error::IllegalMove(format!("{}: {}", san, e)))?;

    position
        .clone()
        .play(m)
        .map_err(|_| Error::IllegalMove(format!("{} cannot be played", san)))
}

/// Replays the first `plies` SAN moves from the standard start.
pub fn replay(moves: &[String], plies: usize) -> Result<Chess> {
    moves
        .iter()
        .take(plies)
        .try_fold(Chess::default(), |position, san| apply_san(&position, san))
}

/// FEN after the moves `0..=index` of a game.
///
/// `-1` (or any negative index) is the standard start; an index past the
/// end is clamped to the final ply. If replay fails the final position is
/// returned instead.
pub fn position_at_ply(game: &Game, index: i64) -> String {
    if index < 0 {
        return STARTING_FEN.to_string();
    }

    let plies = (index as usize).saturating_add(1);
    match replay(&game.valid_moves, plies) {
        Ok(position) => fen_of(&position),
        Err(e) => {
            warn!(index, error = %e, "replay failed, using final position");
            game.final_fen.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::build;
    use crate::scrape::{MoveToken, Player};

    fn sample_game() -> Game {
        let tokens = vec![
            MoveToken::new("e4", Some(Player::White), 0),
            MoveToken::new("e5", Some(Player::Black), 1),
            MoveToken::new("f3", Some(Player::White), 2).with_glyph("N"),
            MoveToken::new("c6", Some(Player::Black), 3).with_glyph("N"),
        ];
        build(&tokens)
    }

    #[test]
    fn test_start_position() {
        let game = sample_game();
        assert_eq!(position_at_ply(&game, -1), STARTING_FEN);
        assert_eq!(position_at_ply(&game, -7), STARTING_FEN);
    }

    #[test]
    fn test_prefix_replay_matches_direct_play() {
        let game = sample_game();
        let mut position = Chess::default();

        for (i, san) in game.valid_moves.iter().enumerate() {
            position = apply_san(&position, san).unwrap();
            assert_eq!(position_at_ply(&game, i as i64), fen_of(&position));
        }
        assert_eq!(position_at_ply(&game, game.last_ply()), game.final_fen);
    }

    #[test]
    fn test_index_past_end_is_clamped() {
        let game = sample_game();
        assert_eq!(position_at_ply(&game, 100), game.final_fen);
    }

    #[test]
    fn test_known_fen_after_e4() {
        let game = sample_game();
        assert_eq!(
            position_at_ply(&game, 0),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn test_corrupted_moves_fall_back_to_final_fen() {
        let mut game = sample_game();
        game.valid_moves[1] = "Ke2".to_string();
        assert_eq!(position_at_ply(&game, 3), game.final_fen);
    }

    #[test]
    fn test_apply_san_rejects_illegal() {
        let start = Chess::default();
        assert!(apply_san(&start, "e5").is_err());
        assert!(apply_san(&start, "not a move").is_err());
        assert!(apply_san(&start, "Nf3+").is_ok());
    }
}
