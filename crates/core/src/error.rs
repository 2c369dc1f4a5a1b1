//! Error types for chess-replay-core

use shakmaty::Chess;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prediction service error: {0}")]
    Prediction(String),

    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] shakmaty::PositionError<Chess>),

    #[error("Illegal move: {0}")]
    IllegalMove(String),

    #[error("PGN parsing error: {0}")]
    Pgn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
