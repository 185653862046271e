//! The deck service capability.
//!
//! Game logic is generic over [DeckService] so it can run against the real
//! HTTP service or an in-memory stand-in. Implementations are expected to
//! be driven strictly sequentially: callers await every operation before
//! issuing the next one for the same session, and no implementation
//! retries on its own.

use crate::Result;
use async_trait::async_trait;
use deckhand_types::{Card, DeckId, DeckState, Pile};

/// A remote service that owns all card state for deck sessions.
#[async_trait]
pub trait DeckService: Send + Sync {
    /// Create a new session backed by a single shuffled 52-card deck.
    async fn create_deck(&self) -> Result<DeckState>;

    /// Fetch the current state of an existing session.
    async fn deck_state(&self, deck: &DeckId) -> Result<DeckState>;

    /// Draw `count` cards from the undrawn stock, in draw order. Asking
    /// for more cards than the stock holds is a service rejection, never
    /// a short answer.
    async fn draw(&self, deck: &DeckId, count: usize) -> Result<Vec<Card>>;

    /// Add previously drawn cards, by code and in the given order, to a
    /// pile. Returns the pile's new size.
    async fn add_to_pile(&self, deck: &DeckId, pile: Pile, codes: &[String]) -> Result<u64>;

    /// Remove the named cards from a pile and return them.
    async fn draw_from_pile(&self, deck: &DeckId, pile: Pile, codes: &[String])
        -> Result<Vec<Card>>;

    /// List a pile's cards in order. A pile no card has ever reached
    /// lists as empty.
    async fn list_pile(&self, deck: &DeckId, pile: Pile) -> Result<Vec<Card>>;
}
