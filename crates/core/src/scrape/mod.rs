//! Scrape input: tokens handed over by page adapters

mod adapter;
mod types;

pub use adapter::{scrape_or_empty, JsonScrape, PgnScrape, ScrapeAdapter};
pub use types::*;
