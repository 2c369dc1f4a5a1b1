//! Rebuild a game from a scrape payload or PGN file and print it

use chess_replay_core::parser::parse_pgn_file;
use chess_replay_core::scrape::{JsonScrape, ScrapeAdapter};
use chess_replay_core::{build, Error, PgnTags, ScrapeResult};
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let path = args.get(1).unwrap_or_else(|| {
        eprintln!("Usage: replay <payload.json|game.pgn> [ply]");
        process::exit(1);
    });

    let ply: Option<i64> = match args.get(2).map(|p| p.parse()) {
        Some(Ok(ply)) => Some(ply),
        Some(Err(_)) => {
            eprintln!("Ply must be an integer (-1 for the start position)");
            process::exit(1);
        }
        None => None,
    };

    let scraped = if path.ends_with(".pgn") {
        parse_pgn_file(path).map(|games| games.into_iter().next().map(ScrapeResult::from))
    } else {
        fs::read_to_string(path)
            .map_err(Error::from)
            .and_then(|contents| JsonScrape::new(contents).scrape())
            .map(Some)
    };

    let scraped = match scraped {
        Ok(Some(scraped)) => scraped,
        Ok(None) => {
            eprintln!("No games in {}", path);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to read moves from {}: {}", path, e);
            process::exit(1);
        }
    };

    let game = build(&scraped.tokens);

    println!("Moves: {}", game.move_count());
    if let Some(diagnostic) = game.diagnostic() {
        println!("{}", diagnostic);
    }
    println!();

    let tags = PgnTags {
        site: scraped.url,
        ..PgnTags::default()
    };
    print!("{}", game.to_pgn(&tags));
    println!();

    match ply {
        Some(ply) => {
            println!("{}", game.ply_label(ply));
            println!("FEN: {}", game.position_at_ply(ply));
        }
        None => println!("FEN: {}", game.final_fen),
    }
}
