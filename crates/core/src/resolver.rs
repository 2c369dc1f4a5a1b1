//! Resolution of scraped move text into legal SAN moves
//!
//! Scraped text often lacks the disambiguating file/rank letters and the
//! check suffixes SAN would carry, and piece identity may come from a
//! separate icon rather than a letter. The destination square is the one
//! field trusted to be present and correct, so every interpretation starts
//! from it.

use shakmaty::{
    san::{San, SanPlus},
    Chess, File, Move, Position, Role, Square,
};

use crate::scrape::MoveToken;

/// A legal move of a position together with its SAN rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LegalMove {
    pub san: String,
    /// SAN without file/rank disambiguation or check suffix.
    pub plain_san: String,
    pub from: Option<Square>,
    /// Square the moving piece lands on (g1/c1 style for castling).
    pub to: Square,
    pub role: Role,
    pub mv: Move,
}

impl LegalMove {
    pub fn from_move(position: &Chess, mv: Move) -> Self {
        let san_plus = SanPlus::from_move(position.clone(), mv.clone());
        let san = san_plus.to_string();
        let plain_san = match san_plus.san {
            San::Normal {
                role,
                capture,
                to,
                promotion,
                ..
            } => San::Normal {
                role,
                file: None,
                rank: None,
                capture,
                to,
                promotion,
            }
            .to_string(),
            other => other.to_string(),
        };
        let to = match &mv {
            Move::Castle { king, rook } => {
                let file = if rook.file() > king.file() { File::G } else { File::C };
                Square::from_coords(file, king.rank())
            }
            _ => mv.to(),
        };

        Self {
            san,
            plain_san,
            from: mv.from(),
            to,
            role: mv.role(),
            mv,
        }
    }

    /// Whether scraped text could denote this move, tolerating a missing
    /// disambiguation letter.
    fn matches_prefix(&self, prefix: &str) -> bool {
        self.san.starts_with(prefix) || self.plain_san.starts_with(prefix)
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.mv, Move::Castle { .. })
    }
}

/// Enumerates the legal moves of a position in engine order.
pub fn legal_moves(position: &Chess) -> Vec<LegalMove> {
    position
        .legal_moves()
        .into_iter()
        .map(|m| LegalMove::from_move(position, m))
        .collect()
}

/// Picks the legal move a scraped token most plausibly denotes.
///
/// Returns `None` when no legal move lands on the token's destination
/// square and matches the scraped text. When several do, a piece kind matching the glyph (pawn when no
/// glyph was scraped) is preferred; failing that the first candidate in
/// enumeration order is returned, which is best effort and not a
/// guaranteed disambiguation.
pub fn resolve(token: &MoveToken, position: &Chess) -> Option<LegalMove> {
    let declared = token.glyph().map(glyph_role);
    let prefix = candidate_prefix(token);
    let moves = legal_moves(position);

    if let Some(castle) = castling_text(&token.raw_text) {
        return moves
            .into_iter()
            .find(|m| m.is_castle() && strip_suffix(&m.san) == castle);
    }

    let target = target_square(&token.raw_text)?;

    let mut candidates: Vec<LegalMove> = moves
        .into_iter()
        .filter(|m| {
            m.to == target && (m.matches_prefix(&prefix) || (declared.is_none() && m.role == Role::Pawn))
        })
        .collect();

    match candidates.len() {
        0 => None,
        1 => candidates.pop(),
        _ => {
            let wanted = match declared {
                Some(role) => role,
                None => Some(Role::Pawn),
            };
            let pick = candidates
                .iter()
                .position(|m| Some(m.role) == wanted && m.san.starts_with(&prefix))
                .or_else(|| candidates.iter().position(|m| Some(m.role) == wanted))
                .unwrap_or(0);
            Some(candidates.swap_remove(pick))
        }
    }
}

/// Destination square of scraped move text: its last two characters once
/// check marks, annotations and a promotion suffix are dropped.
pub fn target_square(raw: &str) -> Option<Square> {
    let text = strip_suffix(raw.trim());
    let text = match text.find('=') {
        Some(idx) => &text[..idx],
        None => text,
    };

    if text.len() < 2 {
        return None;
    }
    text.get(text.len() - 2..)?.parse().ok()
}

/// Text the SAN of the intended move should start with.
fn candidate_prefix(token: &MoveToken) -> String {
    match token.glyph() {
        Some(glyph) => {
            let cleaned: String = token.raw_text.chars().filter(|c| !c.is_whitespace()).collect();
            let letter = match glyph_role(glyph) {
                Some(Role::Pawn) => String::new(),
                Some(role) => role.upper_char().to_string(),
                None => glyph.to_string(),
            };
            // Some pages render the letter in the text as well as the icon.
            if !letter.is_empty() && cleaned.starts_with(&letter) {
                cleaned
            } else {
                format!("{}{}", letter, cleaned)
            }
        }
        None => token.raw_text.trim().to_string(),
    }
}

/// Piece kind named by a scraped glyph: a SAN letter or a figurine.
fn glyph_role(glyph: &str) -> Option<Role> {
    match glyph.chars().next()? {
        'P' | 'p' | '♙' | '♟' => Some(Role::Pawn),
        'N' | 'n' | '♘' | '♞' => Some(Role::Knight),
        'B' | 'b' | '♗' | '♝' => Some(Role::Bishop),
        'R' | 'r' | '♖' | '♜' => Some(Role::Rook),
        'Q' | 'q' | '♕' | '♛' => Some(Role::Queen),
        'K' | 'k' | '♔' | '♚' => Some(Role::King),
        _ => None,
    }
}

/// Normalized castling notation if the text is one.
fn castling_text(text: &str) -> Option<&'static str> {
    let normalized = strip_suffix(text.trim()).replace('0', "O");
    match normalized.as_str() {
        "O-O" => Some("O-O"),
        "O-O-O" => Some("O-O-O"),
        _ => None,
    }
}

fn strip_suffix(text: &str) -> &str {
    text.trim_end_matches(&['+', '#', '!', '?'][..])
}
