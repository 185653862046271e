pub mod client;
pub mod service;

pub use client::{Client, DEFAULT_BASE_URL};
pub use service::DeckService;

use deckhand_types::Pile;
use thiserror::Error;

/// Error type for deck service operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("failed: {status}: {body}")]
    FailedWithBody {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("deck service rejected the request: {0}")]
    Rejected(String),
    #[error("pile {pile} missing from response")]
    MissingPile { pile: Pile },
    #[error("malformed card in response: {0}")]
    BadCard(#[from] deckhand_types::ParseCardError),
    #[error("unexpected response")]
    UnexpectedResponse,
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid URL scheme: {0} (expected http or https)")]
    InvalidScheme(String),
}

/// Result type for deck service operations.
pub type Result<T> = std::result::Result<T, Error>;
