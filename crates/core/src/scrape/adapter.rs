//! Pluggable scrape adapters
//!
//! Site-specific selector logic lives outside this crate. Anything that can
//! produce a [`ScrapeResult`] can feed the reconstructor.

use tracing::warn;

use super::types::{MoveToken, Orientation, Player, ScrapePayload, ScrapeResult};
use crate::error::{Error, Result};
use crate::parser::{parse_pgn_string, PgnGame};

pub trait ScrapeAdapter {
    fn scrape(&self) -> Result<ScrapeResult>;
}

/// Runs an adapter, treating any failure as a page with no moves.
pub fn scrape_or_empty(adapter: &dyn ScrapeAdapter) -> ScrapeResult {
    match adapter.scrape() {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "scrape failed, continuing with no moves");
            ScrapeResult::default()
        }
    }
}

/// Adapter over the JSON the in-page script returns.
pub struct JsonScrape {
    body: String,
}

impl JsonScrape {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl ScrapeAdapter for JsonScrape {
    fn scrape(&self) -> Result<ScrapeResult> {
        let payload: ScrapePayload = serde_json::from_str(&self.body)?;
        Ok(payload.into_result())
    }
}

/// Adapter that reads the first game of a PGN document as if its moves had
/// been scraped, splitting any leading piece letter into the glyph.
pub struct PgnScrape {
    pgn: String,
}

impl PgnScrape {
    pub fn new(pgn: impl Into<String>) -> Self {
        Self { pgn: pgn.into() }
    }
}

impl ScrapeAdapter for PgnScrape {
    fn scrape(&self) -> Result<ScrapeResult> {
        parse_pgn_string(&self.pgn)?
            .into_iter()
            .next()
            .map(ScrapeResult::from)
            .ok_or_else(|| Error::Pgn("no games found".to_string()))
    }
}

impl From<PgnGame> for ScrapeResult {
    fn from(game: PgnGame) -> Self {
        let tokens = game
            .moves
            .iter()
            .enumerate()
            .map(|(ordinal, san)| san_token(san, ordinal))
            .collect();

        ScrapeResult {
            url: game.tags.site,
            tokens,
            orientation: Orientation::White,
        }
    }
}

fn san_token(san: &str, ordinal: usize) -> MoveToken {
    let player = Some(Player::for_ordinal(ordinal));
    match san.chars().next() {
        Some(letter @ ('N' | 'B' | 'R' | 'Q' | 'K')) => {
            MoveToken::new(&san[1..], player, ordinal).with_glyph(letter.to_string())
        }
        _ => MoveToken::new(san, player, ordinal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingScrape;

    impl ScrapeAdapter for FailingScrape {
        fn scrape(&self) -> Result<ScrapeResult> {
            Err(Error::Pgn("tab closed".to_string()))
        }
    }

    #[test]
    fn test_json_scrape() {
        let adapter = JsonScrape::new(
            r#"{"url": "https://example.com", "moves": [{"move": "e4", "piece": "", "player": "white"}]}"#,
        );
        let result = adapter.scrape().unwrap();
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].raw_text, "e4");
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        let result = scrape_or_empty(&JsonScrape::new("{not json"));
        assert!(result.tokens.is_empty());
        assert_eq!(result.url, None);

        assert_eq!(scrape_or_empty(&FailingScrape), ScrapeResult::default());
    }

    #[test]
    fn test_pgn_scrape_splits_piece_letters() {
        let adapter = PgnScrape::new("[Site \"https://example.com/g\"]\n\n1. e4 e5 2. Nf3 Nc6 3. O-O *\n");
        let result = adapter.scrape().unwrap();

        assert_eq!(result.url.as_deref(), Some("https://example.com/g"));
        assert_eq!(result.tokens.len(), 5);
        assert_eq!(result.tokens[2].raw_text, "f3");
        assert_eq!(result.tokens[2].glyph(), Some("N"));
        assert_eq!(result.tokens[3].player, Some(Player::Black));
        assert_eq!(result.tokens[4].raw_text, "O-O");
        assert_eq!(result.tokens[4].glyph(), None);
    }

    #[test]
    fn test_pgn_game_into_scrape_result() {
        let game = PgnGame {
            moves: vec!["d4".to_string(), "Nf6".to_string()],
            ..PgnGame::default()
        };
        let result = ScrapeResult::from(game);

        assert_eq!(result.url, None);
        assert_eq!(result.orientation, Orientation::White);
        assert_eq!(result.tokens[1].raw_text, "f6");
        assert_eq!(result.tokens[1].glyph(), Some("N"));
        assert_eq!(result.tokens[1].ordinal, 1);
    }
}
