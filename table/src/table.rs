//! Pile management for one deck session.
//!
//! All card state lives in the remote service; a [Table] only holds the
//! session id and the service handle. Calls are strictly sequential, one
//! outstanding operation per session, and failures propagate without
//! retries.

use deckhand_client::{DeckService, Error, Result};
use deckhand_types::{Card, DeckId, Pile};
use tracing::{debug, info};

/// A seat at one remote deck session, generic over the service.
pub struct Table<D: DeckService> {
    service: D,
    deck: DeckId,
}

impl<D: DeckService> Table<D> {
    /// Create a fresh session (one shuffled deck) and seat it.
    pub async fn open(service: D) -> Result<Table<D>> {
        let state = service.create_deck().await?;
        info!(deck = %state.id, remaining = state.remaining, "opened table");
        Ok(Table {
            service,
            deck: state.id,
        })
    }

    /// Reattach to an existing session.
    pub fn resume(service: D, deck: DeckId) -> Table<D> {
        Table { service, deck }
    }

    /// The session this table is seated at.
    pub fn deck(&self) -> &DeckId {
        &self.deck
    }

    /// Cards left in the session's undrawn stock.
    pub async fn remaining(&self) -> Result<u64> {
        Ok(self.service.deck_state(&self.deck).await?.remaining)
    }

    /// Draw `count` fresh cards from the stock and append them to `pile`.
    /// Cards land in draw order after the pile's existing contents, which
    /// are untouched. Returns the drawn cards.
    pub async fn draw_into(&self, pile: Pile, count: usize) -> Result<Vec<Card>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let cards = self.service.draw(&self.deck, count).await?;
        let codes = codes_of(&cards);
        self.service.add_to_pile(&self.deck, pile, &codes).await?;
        debug!(deck = %self.deck, %pile, count = cards.len(), "drew into pile");
        Ok(cards)
    }

    /// Current contents of `pile`, in order.
    pub async fn list(&self, pile: Pile) -> Result<Vec<Card>> {
        self.service.list_pile(&self.deck, pile).await
    }

    /// Move every card in `pile` to the discard pile, preserving their
    /// order. Returns the moved cards; an empty pile moves nothing.
    pub async fn discard_all(&self, pile: Pile) -> Result<Vec<Card>> {
        let cards = self.list(pile).await?;
        if cards.is_empty() {
            return Ok(cards);
        }
        let codes = codes_of(&cards);
        let moved = self.service.draw_from_pile(&self.deck, pile, &codes).await?;
        self.service
            .add_to_pile(&self.deck, Pile::Discard, &codes)
            .await?;
        debug!(deck = %self.deck, %pile, count = codes.len(), "discarded pile");
        Ok(moved)
    }

    /// Remove one specific card from `pile` and return it. The card goes
    /// nowhere else; it is out of play for the rest of the session.
    pub async fn take_card(&self, pile: Pile, code: &str) -> Result<Card> {
        let mut removed = self
            .service
            .draw_from_pile(&self.deck, pile, &[code.to_string()])
            .await?;
        if removed.len() != 1 {
            return Err(Error::UnexpectedResponse);
        }
        debug!(deck = %self.deck, %pile, card = code, "took card from pile");
        Ok(removed.remove(0))
    }
}

fn codes_of(cards: &[Card]) -> Vec<String> {
    cards.iter().map(|card| card.code()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckhand_simulator::Simulator;

    async fn open_table() -> Table<Simulator> {
        Table::open(Simulator::with_seed(7)).await.unwrap()
    }

    #[tokio::test]
    async fn test_open_seats_a_fresh_deck() {
        let table = open_table().await;
        assert!(!table.deck().as_str().is_empty());
        assert_eq!(table.remaining().await.unwrap(), 52);
    }

    #[tokio::test]
    async fn test_resume_reattaches_to_session() {
        let simulator = Simulator::with_seed(7);
        let state = simulator.create_deck().await.unwrap();

        let table = Table::resume(simulator, state.id.clone());
        assert_eq!(table.deck(), &state.id);
        assert_eq!(table.remaining().await.unwrap(), 52);
    }

    #[tokio::test]
    async fn test_draw_into_appends_in_draw_order() {
        let table = open_table().await;

        let first = table.draw_into(Pile::Player, 2).await.unwrap();
        let second = table.draw_into(Pile::Player, 3).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 3);

        // Existing contents untouched, new cards appended in order.
        let mut expected = first;
        expected.extend(second);
        let listed = table.list(Pile::Player).await.unwrap();
        assert_eq!(listed, expected);
        assert_eq!(table.remaining().await.unwrap(), 47);
    }

    #[tokio::test]
    async fn test_draw_into_zero_is_a_no_op() {
        let table = open_table().await;
        let drawn = table.draw_into(Pile::Dealer, 0).await.unwrap();
        assert!(drawn.is_empty());
        assert_eq!(table.remaining().await.unwrap(), 52);
        assert!(table.list(Pile::Dealer).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_discard_all_moves_every_card() {
        let table = open_table().await;
        let dealt = table.draw_into(Pile::Player, 4).await.unwrap();

        let moved = table.discard_all(Pile::Player).await.unwrap();
        assert_eq!(moved, dealt);
        assert!(table.list(Pile::Player).await.unwrap().is_empty());
        assert_eq!(table.list(Pile::Discard).await.unwrap(), dealt);
    }

    #[tokio::test]
    async fn test_discard_all_appends_to_existing_discard() {
        let table = open_table().await;
        let player = table.draw_into(Pile::Player, 2).await.unwrap();
        let dealer = table.draw_into(Pile::Dealer, 2).await.unwrap();

        table.discard_all(Pile::Player).await.unwrap();
        table.discard_all(Pile::Dealer).await.unwrap();

        let mut expected = player;
        expected.extend(dealer);
        assert_eq!(table.list(Pile::Discard).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_discard_all_of_empty_pile_moves_nothing() {
        let table = open_table().await;
        let moved = table.discard_all(Pile::Player).await.unwrap();
        assert!(moved.is_empty());
        assert!(table.list(Pile::Discard).await.unwrap().is_empty());
        assert_eq!(table.remaining().await.unwrap(), 52);
    }

    #[tokio::test]
    async fn test_take_card_removes_only_that_card() {
        let table = open_table().await;
        let dealt = table.draw_into(Pile::Player, 3).await.unwrap();

        let target = dealt[1].code();
        let taken = table.take_card(Pile::Player, &target).await.unwrap();
        assert_eq!(taken.code(), target);

        let left = table.list(Pile::Player).await.unwrap();
        assert_eq!(left, vec![dealt[0].clone(), dealt[2].clone()]);
        // Taken cards are out of play, not discarded.
        assert!(table.list(Pile::Discard).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_take_card_absent_from_pile_is_an_error() {
        let table = open_table().await;
        table.draw_into(Pile::Player, 1).await.unwrap();

        let err = table.take_card(Pile::Dealer, "AS").await.unwrap_err();
        assert!(matches!(err, Error::Rejected(_)));
    }
}
