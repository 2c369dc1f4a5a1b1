//! Reconstructed games
//!
//! A [`Game`] is built once from a scraped token sequence and never mutated
//! afterwards. Positions at earlier plies are recovered by replaying the
//! accepted moves from the start.

mod pgn;
mod reconstruct;
mod replay;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use pgn::PgnTags;
pub use reconstruct::build;
pub use replay::{apply_san, position_at_ply, replay};

/// Why a scraped token did not become a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RejectReason {
    /// The markup did not say which side played the move.
    MissingPlayer,
    /// The declared side is not the one to move at this ordinal.
    UnexpectedPlayer { expected: crate::scrape::Player },
    /// No legal move matches the scraped text.
    NoLegalInterpretation,
    /// The resolved SAN was refused by the rules engine.
    IllegalAfterApply { san: String },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingPlayer => write!(f, "missing player"),
            RejectReason::UnexpectedPlayer { .. } => write!(f, "unexpected player"),
            RejectReason::NoLegalInterpretation => write!(f, "no legal interpretation"),
            RejectReason::IllegalAfterApply { .. } => write!(f, "illegal after apply"),
        }
    }
}

/// A scraped token that was skipped during reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedMove {
    pub ordinal: usize,
    pub raw_text: String,
    pub reason: RejectReason,
}

/// Result of one reconstruction pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Accepted moves in SAN, in ply order.
    pub valid_moves: Vec<String>,
    pub rejected_moves: Vec<RejectedMove>,
    pub final_fen: String,
    /// Movetext of the accepted moves.
    pub pgn: String,
    /// `1-0`, `0-1` or `1/2-1/2` once the final position is decided.
    pub result: Option<String>,
}

impl Game {
    pub fn move_count(&self) -> usize {
        self.valid_moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_moves.is_empty()
    }

    /// Index of the final ply, `-1` when no move was accepted.
    pub fn last_ply(&self) -> i64 {
        self.valid_moves.len() as i64 - 1
    }

    /// FEN after `index` plies have been replayed; `-1` is the start.
    pub fn position_at_ply(&self, index: i64) -> String {
        position_at_ply(self, index)
    }

    /// Navigation label for a ply: `Start`, or `3/10 - Nf3`.
    pub fn ply_label(&self, index: i64) -> String {
        if index < 0 || self.valid_moves.is_empty() {
            return "Start".to_string();
        }
        let index = (index as usize).min(self.valid_moves.len() - 1);
        format!(
            "{}/{} - {}",
            index + 1,
            self.valid_moves.len(),
            self.valid_moves[index]
        )
    }

    /// One line listing every rejected token, if there were any.
    pub fn diagnostic(&self) -> Option<String> {
        if self.rejected_moves.is_empty() {
            return None;
        }

        let listed: Vec<String> = self
            .rejected_moves
            .iter()
            .map(|r| format!("{} (move {})", r.raw_text, r.ordinal + 1))
            .collect();

        Some(format!("Invalid moves: {}", listed.join(", ")))
    }
}
