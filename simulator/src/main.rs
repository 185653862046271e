//! Serve the in-memory deck service over HTTP.
//!
//! Usage:
//!   deckhand-simulator --port 8880
//!   deckhand-simulator --port 8880 --seed 42

use anyhow::Result;
use clap::Parser;
use deckhand_simulator::{Api, Simulator};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Local stand-in for the deck service")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8880)]
    port: u16,

    /// Seed for deterministic shuffles; uses OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let simulator = match args.seed {
        Some(seed) => Simulator::with_seed(seed),
        None => Simulator::new(),
    };
    let api = Api::new(Arc::new(simulator));

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "deck service listening");
    axum::serve(listener, api.router().into_make_service()).await?;
    Ok(())
}
