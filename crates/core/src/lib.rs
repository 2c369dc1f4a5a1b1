//! Chess Replay Core Library
//!
//! Rebuilds a legal game from move text scraped off a web page: each
//! scraped token is resolved to a SAN move against the current position,
//! accepted moves are played, and anything that does not fit is recorded
//! rather than aborting the pass. The resulting [`Game`] can be replayed to
//! any ply and exported as PGN.

use shakmaty::{fen::Fen, CastlingMode, Chess, EnPassantMode};

pub mod error;
pub mod game;
pub mod overlay;
pub mod parser;
pub mod prediction;
pub mod resolver;
pub mod scrape;

pub use error::{Error, Result};
pub use game::{build, position_at_ply, Game, PgnTags, RejectReason, RejectedMove};
pub use overlay::{overlay_for, MoveOverlay};
pub use prediction::{Prediction, PredictionClient, PredictionGate, PredictionMode};
pub use resolver::{resolve, LegalMove};
pub use scrape::{MoveToken, Orientation, Player, ScrapeAdapter, ScrapeResult};

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Creates the standard starting position
pub fn starting_position() -> Chess {
    Chess::default()
}

/// FEN of a position, listing an en passant square only when a capture
/// there is legal.
pub fn fen_of(position: &Chess) -> String {
    Fen::from_position(position, EnPassantMode::Legal).to_string()
}

pub fn position_from_fen(fen: &str) -> Result<Chess> {
    let parsed: Fen = fen.trim().parse()?;
    Ok(parsed.into_position(CastlingMode::Standard)?)
}
