//! PGN export of reconstructed games

use serde::{Deserialize, Serialize};
use shakmaty::{Chess, Color, KnownOutcome, Outcome, Position};

use super::Game;

/// Tag pair section written in front of exported movetext.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PgnTags {
    pub event: Option<String>,
    pub site: Option<String>,
    /// `YYYY.MM.DD`
    pub date: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
}

/// Result token for a decided position.
pub(crate) fn game_result(position: &Chess) -> Option<&'static str> {
    match position.outcome() {
        Outcome::Known(KnownOutcome::Decisive { winner: Color::White }) => Some("1-0"),
        Outcome::Known(KnownOutcome::Decisive { winner: Color::Black }) => Some("0-1"),
        Outcome::Known(KnownOutcome::Draw) => Some("1/2-1/2"),
        Outcome::Unknown => None,
    }
}

/// Numbered movetext, e.g. `1. e4 e5 2. Nf3`, followed by the result if any.
pub(crate) fn movetext(moves: &[String], result: Option<&str>) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(moves.len() + moves.len() / 2 + 1);

    for (ply, san) in moves.iter().enumerate() {
        if ply % 2 == 0 {
            parts.push(format!("{}.", ply / 2 + 1));
        }
        parts.push(san.clone());
    }

    if let Some(result) = result {
        parts.push(result.to_string());
    }

    parts.join(" ")
}

fn tag(name: &str, value: Option<&str>) -> String {
    let value = value.unwrap_or("?").replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{} \"{}\"]\n", name, value)
}

impl Game {
    /// Full PGN document with the seven tag roster.
    pub fn to_pgn(&self, tags: &PgnTags) -> String {
        let result = self.result.as_deref().unwrap_or("*");

        let mut pgn = String::new();
        pgn.push_str(&tag("Event", tags.event.as_deref()));
        pgn.push_str(&tag("Site", tags.site.as_deref()));
        pgn.push_str(&tag("Date", Some(tags.date.as_deref().unwrap_or("????.??.??"))));
        pgn.push_str(&tag("Round", None));
        pgn.push_str(&tag("White", tags.white.as_deref()));
        pgn.push_str(&tag("Black", tags.black.as_deref()));
        pgn.push_str(&tag("Result", Some(result)));
        pgn.push('\n');
        pgn.push_str(&movetext(&self.valid_moves, Some(result)));
        pgn.push('\n');
        pgn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_movetext_numbering() {
        assert_eq!(movetext(&[], None), "");
        assert_eq!(movetext(&moves(&["e4"]), None), "1. e4");
        assert_eq!(
            movetext(&moves(&["e4", "e5", "Nf3"]), None),
            "1. e4 e5 2. Nf3"
        );
        assert_eq!(movetext(&[], Some("*")), "*");
    }

    fn position(fen: &str) -> Chess {
        crate::position_from_fen(fen).unwrap()
    }

    #[test]
    fn test_result_of_start_position() {
        assert_eq!(game_result(&Chess::default()), None);
    }

    #[test]
    fn test_result_of_finished_positions() {
        // Scholar's mate, black to move and mated
        let mated = position("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
        assert_eq!(game_result(&mated), Some("1-0"));

        let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(game_result(&stalemate), Some("1/2-1/2"));

        let bare_kings = position("8/8/4k3/8/8/3K4/8/8 w - - 0 1");
        assert_eq!(game_result(&bare_kings), Some("1/2-1/2"));
    }

    #[test]
    fn test_tag_section() {
        let game = Game {
            valid_moves: moves(&["e4", "e5"]),
            rejected_moves: Vec::new(),
            final_fen: String::new(),
            pgn: "1. e4 e5".to_string(),
            result: None,
        };
        let tags = PgnTags {
            site: Some("https://example.com/game/\"1\"".to_string()),
            white: Some("Alice".to_string()),
            ..PgnTags::default()
        };

        let pgn = game.to_pgn(&tags);
        assert!(pgn.starts_with("[Event \"?\"]\n[Site \"https://example.com/game/\\\"1\\\"\"]\n"));
        assert!(pgn.contains("[Date \"????.??.??\"]\n"));
        assert!(pgn.contains("[White \"Alice\"]\n[Black \"?\"]\n[Result \"*\"]\n\n"));
        assert!(pgn.ends_with("1. e4 e5 *\n"));
    }
}
