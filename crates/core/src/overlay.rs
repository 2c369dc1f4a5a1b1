//! Prediction-move overlay
//!
//! Turns a predicted coordinate move into what a board view draws: an arrow
//! between two squares, highlighted origin and destination, and the two
//! positions a preview animation alternates between. Animation timing stays
//! with the presentation layer.

use serde::{Deserialize, Serialize};
use shakmaty::{uci::UciMove, Position};

use crate::error::{Error, Result};
use crate::resolver::LegalMove;
use crate::{fen_of, position_from_fen};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOverlay {
    /// Arrow tail and origin highlight.
    pub from: String,
    /// Arrow head and destination highlight.
    pub to: String,
    pub san: String,
    pub fen_before: String,
    pub fen_after: String,
}

/// Builds the overlay for a coordinate move (`e2e4`, `e7e8q`, `e1g1`)
/// played in the position `fen`.
pub fn overlay_for(fen: &str, uci: &str) -> Result<MoveOverlay> {
    let position = position_from_fen(fen)?;

    let parsed: UciMove = uci
        .trim()
        .parse()
        .map_err(|_| Error::IllegalMove(format!("'{}' is not a coordinate move", uci)))?;
    let m = parsed
        .to_move(&position)
        .map_err(|_| Error::IllegalMove(format!("{} is not legal in {}", uci, fen)))?;

    let legal = LegalMove::from_move(&position, m.clone());
    let from = legal
        .from
        .ok_or_else(|| Error::IllegalMove(format!("{} has no origin square", uci)))?;

    let after = position
        .play(m)
        .map_err(|_| Error::IllegalMove(format!("{} cannot be played", uci)))?;

    Ok(MoveOverlay {
        from: from.to_string(),
        to: legal.to.to_string(),
        san: legal.san,
        fen_before: fen.trim().to_string(),
        fen_after: fen_of(&after),
    })
}
