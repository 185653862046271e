//! Shared types for deckhand: the card model, named piles, deck session
//! identifiers, and the deck service's JSON wire messages.

pub mod api;
pub mod card;
pub mod pile;

pub use card::{Card, ParseCardError, Rank, Suit};
pub use pile::{Pile, UnknownPile};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a remote deck session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(String);

impl DeckId {
    pub fn new(id: impl Into<String>) -> DeckId {
        DeckId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DeckId {
    fn from(id: String) -> DeckId {
        DeckId(id)
    }
}

/// Session state as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckState {
    pub id: DeckId,
    /// Cards still in the undrawn stock.
    pub remaining: u64,
    pub shuffled: bool,
}
