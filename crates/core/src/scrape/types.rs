//! Scraped move data types

use serde::{Deserialize, Serialize};

/// Side that played a move, as declared by the page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// The player expected to move at a 0-based ply ordinal.
    pub fn for_ordinal(ordinal: usize) -> Self {
        if ordinal % 2 == 0 {
            Player::White
        } else {
            Player::Black
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::White => "white",
            Player::Black => "black",
        }
    }

    /// Lenient parse used for scraped strings; anything else is unknown.
    pub fn from_scraped(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Some(Player::White),
            "black" | "b" => Some(Player::Black),
            _ => None,
        }
    }
}

/// Which side is shown at the bottom of the scraped board. Display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    White,
    Black,
}

/// One scraped move: destination text, an optional piece glyph taken from a
/// separate icon, and the side the markup says played it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveToken {
    pub raw_text: String,
    pub piece_glyph: Option<String>,
    pub player: Option<Player>,
    pub ordinal: usize,
}

impl MoveToken {
    pub fn new(raw_text: impl Into<String>, player: Option<Player>, ordinal: usize) -> Self {
        Self {
            raw_text: raw_text.into(),
            piece_glyph: None,
            player,
            ordinal,
        }
    }

    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        let glyph = glyph.into();
        self.piece_glyph = if glyph.trim().is_empty() {
            None
        } else {
            Some(glyph)
        };
        self
    }

    /// Glyph with surrounding whitespace removed, if any remains.
    pub fn glyph(&self) -> Option<&str> {
        self.piece_glyph
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

/// Everything a scrape pass hands to the reconstructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub url: Option<String>,
    pub tokens: Vec<MoveToken>,
    pub orientation: Orientation,
}

/// Wire format produced by the in-page scraping script.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapePayload {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub moves: Vec<ScrapedMove>,
    #[serde(default)]
    pub orientation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScrapedMove {
    #[serde(rename = "move")]
    pub text: String,
    #[serde(default)]
    pub piece: Option<String>,
    #[serde(default)]
    pub player: Option<String>,
}

impl ScrapePayload {
    /// Converts the payload into tokens, numbering them in page order.
    pub fn into_result(self) -> ScrapeResult {
        let orientation = match self.orientation.as_deref() {
            Some("black") => Orientation::Black,
            _ => Orientation::White,
        };

        let tokens = self
            .moves
            .into_iter()
            .enumerate()
            .map(|(ordinal, m)| {
                let player = m.player.as_deref().and_then(Player::from_scraped);
                MoveToken::new(m.text, player, ordinal).with_glyph(m.piece.unwrap_or_default())
            })
            .collect();

        ScrapeResult {
            url: self.url,
            tokens,
            orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_conversion() {
        let json = r#"{
            "url": "https://example.com/game/1",
            "moves": [
                {"move": "e4", "piece": "", "player": "white"},
                {"move": "f6", "piece": "N", "player": "black"},
                {"move": "d4", "piece": "", "player": null}
            ],
            "orientation": "black"
        }"#;

        let payload: ScrapePayload = serde_json::from_str(json).unwrap();
        let result = payload.into_result();

        assert_eq!(result.url.as_deref(), Some("https://example.com/game/1"));
        assert_eq!(result.orientation, Orientation::Black);
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.tokens[0].piece_glyph, None);
        assert_eq!(result.tokens[1].glyph(), Some("N"));
        assert_eq!(result.tokens[1].player, Some(Player::Black));
        assert_eq!(result.tokens[2].player, None);
        assert_eq!(result.tokens[2].ordinal, 2);
    }

    #[test]
    fn test_orientation_defaults_to_white() {
        let payload: ScrapePayload = serde_json::from_str(r#"{"moves": []}"#).unwrap();
        assert_eq!(payload.into_result().orientation, Orientation::White);
    }

    #[test]
    fn test_player_for_ordinal() {
        assert_eq!(Player::for_ordinal(0), Player::White);
        assert_eq!(Player::for_ordinal(1), Player::Black);
        assert_eq!(Player::for_ordinal(6), Player::White);
        assert_eq!(Player::from_scraped("Purple"), None);
    }
}
