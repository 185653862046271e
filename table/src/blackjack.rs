//! Blackjack hand valuation and the automated round driver.
//!
//! Valuation is a fixed two-branch ace rule:
//! - jacks, queens and kings count 10; numeric ranks count face value
//! - aces count as one 11 plus 1 for each further ace, unless that total
//!   busts the hand, in which case every ace counts 1
//!
//! There is no per-ace search beyond that single choice.

use crate::table::Table;
use deckhand_client::{DeckService, Result};
use deckhand_types::{Card, Pile, Rank};
use serde::Serialize;
use tracing::info;

/// Hand values above this are busted.
pub const BUST_LIMIT: u32 = 21;

/// Value of `cards` under the two-branch ace rule. An empty hand is 0.
pub fn hand_value(cards: &[Card]) -> u32 {
    let mut base = 0;
    let mut aces = 0;
    for card in cards {
        match card.rank {
            Rank::Ace => aces += 1,
            Rank::King | Rank::Queen | Rank::Jack | Rank::Ten => base += 10,
            Rank::Nine => base += 9,
            Rank::Eight => base += 8,
            Rank::Seven => base += 7,
            Rank::Six => base += 6,
            Rank::Five => base += 5,
            Rank::Four => base += 4,
            Rank::Three => base += 3,
            Rank::Two => base += 2,
        }
    }
    if aces == 0 {
        return base;
    }
    // One ace as 11, the rest as 1; if that busts, all aces count 1.
    let soft = 11 + (aces - 1);
    if base + soft > BUST_LIMIT {
        base + aces
    } else {
        base + soft
    }
}

/// Whether `cards` value above [BUST_LIMIT].
pub fn is_busted(cards: &[Card]) -> bool {
    hand_value(cards) > BUST_LIMIT
}

/// Value a pile's current hand.
pub async fn pile_value<D: DeckService>(table: &Table<D>, pile: Pile) -> Result<u32> {
    Ok(hand_value(&table.list(pile).await?))
}

/// Whether a pile's current hand is busted.
pub async fn pile_busted<D: DeckService>(table: &Table<D>, pile: Pile) -> Result<bool> {
    Ok(is_busted(&table.list(pile).await?))
}

/// Deal the two-card opening hand into `pile` and return it.
pub async fn deal_opening_hand<D: DeckService>(table: &Table<D>, pile: Pile) -> Result<Vec<Card>> {
    table.draw_into(pile, 2).await
}

/// Summary of one automated round.
#[derive(Clone, Debug, Serialize)]
pub struct RoundReport {
    pub deck: String,
    pub player_opening_value: u32,
    pub dealer_value: u32,
    /// Draws taken after the opening hand.
    pub hits: u32,
    pub final_value: u32,
    pub player_cards: Vec<String>,
    pub dealer_cards: Vec<String>,
    pub stock_remaining: u64,
}

/// Deal opening hands to player and dealer, then draw one card at a time
/// into the player's hand until it busts. Stops exactly one draw after
/// the bust condition first holds.
pub async fn play_until_bust<D: DeckService>(table: &Table<D>) -> Result<RoundReport> {
    let opening = deal_opening_hand(table, Pile::Player).await?;
    let dealer = deal_opening_hand(table, Pile::Dealer).await?;
    let player_opening_value = hand_value(&opening);
    info!(
        value = player_opening_value,
        dealer = hand_value(&dealer),
        "opening hands dealt"
    );

    let mut hits = 0;
    while !pile_busted(table, Pile::Player).await? {
        let drawn = table.draw_into(Pile::Player, 1).await?;
        hits += 1;
        if let Some(card) = drawn.first() {
            info!(card = %card, hits, "player hit");
        }
    }

    let player_cards = table.list(Pile::Player).await?;
    let final_value = hand_value(&player_cards);
    info!(value = final_value, hits, "player busted");

    Ok(RoundReport {
        deck: table.deck().to_string(),
        player_opening_value,
        dealer_value: hand_value(&dealer),
        hits,
        final_value,
        player_cards: player_cards.iter().map(|card| card.code()).collect(),
        dealer_cards: dealer.iter().map(|card| card.code()).collect(),
        stock_remaining: table.remaining().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckhand_simulator::Simulator;
    use deckhand_types::Suit;

    fn hand(ranks: &[Rank]) -> Vec<Card> {
        ranks
            .iter()
            .map(|rank| Card {
                rank: *rank,
                suit: Suit::Spades,
                image: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_hand_value_faces_count_ten() {
        assert_eq!(hand_value(&hand(&[Rank::Ten, Rank::Jack])), 20);
        assert_eq!(hand_value(&hand(&[Rank::Queen, Rank::King, Rank::Jack])), 30);
    }

    #[test]
    fn test_hand_value_numerics_count_face_value() {
        assert_eq!(hand_value(&hand(&[Rank::Two, Rank::Three, Rank::Four])), 9);
        assert_eq!(hand_value(&hand(&[Rank::Seven, Rank::Nine])), 16);
    }

    #[test]
    fn test_hand_value_natural() {
        assert_eq!(hand_value(&hand(&[Rank::Ace, Rank::King])), 21);
    }

    #[test]
    fn test_hand_value_second_ace_counts_one() {
        // 11 + 1 + 9
        assert_eq!(hand_value(&hand(&[Rank::Ace, Rank::Ace, Rank::Nine])), 21);
    }

    #[test]
    fn test_hand_value_aces_collapse_together() {
        // The eleven would bust, so every ace counts 1.
        assert_eq!(
            hand_value(&hand(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Nine])),
            12
        );
        assert_eq!(hand_value(&hand(&[Rank::Ten, Rank::Ace, Rank::Ace])), 12);
    }

    #[test]
    fn test_hand_value_empty_hand_is_zero() {
        assert_eq!(hand_value(&[]), 0);
    }

    #[test]
    fn test_is_busted_boundary() {
        // 21 exactly is not busted.
        assert!(!is_busted(&hand(&[Rank::Ten, Rank::Nine, Rank::Two])));
        assert!(is_busted(&hand(&[Rank::Ten, Rank::Nine, Rank::Five])));
        assert!(!is_busted(&[]));
    }

    #[tokio::test]
    async fn test_deal_opening_hand_is_two_cards() {
        let table = Table::open(Simulator::with_seed(7)).await.unwrap();
        let cards = deal_opening_hand(&table, Pile::Player).await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(
            pile_value(&table, Pile::Player).await.unwrap(),
            hand_value(&cards)
        );
    }

    #[tokio::test]
    async fn test_pile_value_of_untouched_pile_is_zero() {
        let table = Table::open(Simulator::with_seed(7)).await.unwrap();
        assert_eq!(pile_value(&table, Pile::Dealer).await.unwrap(), 0);
        assert!(!pile_busted(&table, Pile::Dealer).await.unwrap());
    }

    #[tokio::test]
    async fn test_play_until_bust_stops_after_first_bust() {
        let table = Table::open(Simulator::with_seed(11)).await.unwrap();
        let report = play_until_bust(&table).await.unwrap();

        assert!(report.final_value > BUST_LIMIT);
        assert!(report.hits >= 1);
        assert_eq!(report.player_cards.len() as u32, 2 + report.hits);
        assert_eq!(report.dealer_cards.len(), 2);

        // Exactly one draw past the bust: without its last card the hand
        // was still standing.
        let cards = table.list(Pile::Player).await.unwrap();
        assert!(!is_busted(&cards[..cards.len() - 1]));
        assert!(is_busted(&cards));

        // Every dealt card left the stock.
        assert_eq!(
            report.stock_remaining,
            52 - 4 - u64::from(report.hits)
        );
    }
}
