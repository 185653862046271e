//! Play one automated blackjack round against a deck service.
//!
//! Deals two cards each to the player and dealer piles, hits the player
//! until the hand busts, and prints a JSON round report.
//!
//! Usage:
//!   autoplay
//!   autoplay --url http://localhost:8880 --verbose

use anyhow::Result;
use clap::Parser;
use deckhand_client::{Client, DEFAULT_BASE_URL};
use deckhand_table::{play_until_bust, Table};

#[derive(Parser, Debug)]
#[command(author, version, about = "Deal a blackjack round and hit until bust")]
struct Args {
    /// Base URL of the deck service; falls back to DECKHAND_URL, then the
    /// public instance
    #[arg(short, long)]
    url: Option<String>,

    /// Log every remote call
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let url = args
        .url
        .or_else(|| std::env::var("DECKHAND_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let client = Client::new(&url)?;
    let table = Table::open(client).await?;
    let report = play_until_bust(&table).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
