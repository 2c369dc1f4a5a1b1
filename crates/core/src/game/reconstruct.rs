//! Sequential resolve-and-apply over a scraped token stream

use shakmaty::Chess;
use tracing::{debug, warn};

use super::pgn::{game_result, movetext};
use super::replay::apply_san;
use super::{Game, RejectReason, RejectedMove};
use crate::resolver::resolve;
use crate::scrape::{MoveToken, Player};
use crate::fen_of;

/// Builds a game from scraped tokens, starting at the standard position.
///
/// Tokens that cannot be interpreted are recorded in
/// [`Game::rejected_moves`] and skipped; the position stays where the last
/// accepted move left it. A game with no accepted moves is still a game.
pub fn build(tokens: &[MoveToken]) -> Game {
    let mut position = Chess::default();
    let mut valid_moves = Vec::new();
    let mut rejected_moves = Vec::new();

    for token in tokens {
        match advance(&position, token) {
            Ok((next, san)) => {
                debug!(ordinal = token.ordinal, san = %san, "accepted move");
                position = next;
                valid_moves.push(san);
            }
            Err(reason) => {
                warn!(
                    ordinal = token.ordinal,
                    raw = %token.raw_text,
                    reason = %reason,
                    "rejected move"
                );
                rejected_moves.push(RejectedMove {
                    ordinal: token.ordinal,
                    raw_text: token.raw_text.clone(),
                    reason,
                });
            }
        }
    }

    let result = game_result(&position).map(str::to_string);
    let pgn = movetext(&valid_moves, result.as_deref());

    Game {
        valid_moves,
        rejected_moves,
        final_fen: fen_of(&position),
        pgn,
        result,
    }
}

/// One step of the reconstruction: the position after the token and the SAN
/// the engine recorded for it.
fn advance(position: &Chess, token: &MoveToken) -> Result<(Chess, String), RejectReason> {
    let player = token.player.ok_or(RejectReason::MissingPlayer)?;

    let expected = Player::for_ordinal(token.ordinal);
    if player != expected {
        return Err(RejectReason::UnexpectedPlayer { expected });
    }

    let resolved = resolve(token, position).ok_or(RejectReason::NoLegalInterpretation)?;

    // The engine has the final word even though the resolver only offers
    // legal moves.
    match apply_san(position, &resolved.san) {
        Ok(next) => Ok((next, resolved.san)),
        Err(_) => Err(RejectReason::IllegalAfterApply { san: resolved.san }),
    }
}
