//! In-memory deck service.
//!
//! Stands in for the remote service during tests and offline runs while
//! enforcing the same rules: every session owns one shuffled 52-card
//! stock, a card drawn from the stock is held aside until it is added to
//! a named pile, and a card is never in two places at once. Operations
//! the real service refuses are refused here too, with the same message
//! shapes.

mod api;
pub use api::Api;

use async_trait::async_trait;
use deckhand_client::{DeckService, Error, Result};
use deckhand_types::{Card, DeckId, DeckState, Pile, Rank, Suit};
use rand::{distributions::Alphanumeric, rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error as ThisError;
use tracing::debug;

/// Length of generated session identifiers.
const DECK_ID_LEN: usize = 12;

/// Why the simulator refused an operation. Messages mirror the remote
/// service's wording so clients exercise the same failure paths.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum Refusal {
    #[error("Deck ID does not exist.")]
    UnknownDeck,
    #[error("Not enough cards remaining to draw {requested} additional")]
    NotEnoughCards { requested: usize },
    #[error("The card {code} has not been drawn from the deck")]
    CardNotHeld { code: String },
    #[error("The card {code} is not in the {pile} pile")]
    CardNotInPile { code: String, pile: Pile },
}

impl From<Refusal> for Error {
    fn from(refusal: Refusal) -> Error {
        Error::Rejected(refusal.to_string())
    }
}

/// One deck session.
pub(crate) struct Session {
    /// Undrawn stock. The top of the deck is the end of the vector.
    stock: Vec<Card>,
    /// Cards drawn out of the stock or a pile and not yet re-homed.
    held: Vec<Card>,
    /// Named piles, each in insertion order.
    piles: HashMap<Pile, Vec<Card>>,
}

impl Session {
    fn new(stock: Vec<Card>) -> Session {
        Session {
            stock,
            held: Vec::new(),
            piles: HashMap::new(),
        }
    }

    /// Cards left in the undrawn stock.
    pub(crate) fn remaining(&self) -> u64 {
        self.stock.len() as u64
    }

    /// Size of every pile that has ever been touched.
    pub(crate) fn pile_sizes(&self) -> Vec<(Pile, u64)> {
        self.piles
            .iter()
            .map(|(pile, cards)| (*pile, cards.len() as u64))
            .collect()
    }

    /// Draw `count` cards off the top of the stock into the held set.
    pub(crate) fn draw(&mut self, count: usize) -> std::result::Result<Vec<Card>, Refusal> {
        if self.stock.len() < count {
            return Err(Refusal::NotEnoughCards { requested: count });
        }
        let mut cards = self.stock.split_off(self.stock.len() - count);
        cards.reverse();
        self.held.extend(cards.iter().cloned());
        Ok(cards)
    }

    /// Move held cards into a pile, in the order given.
    pub(crate) fn add_to_pile(
        &mut self,
        pile: Pile,
        codes: &[String],
    ) -> std::result::Result<u64, Refusal> {
        let moved = take_by_codes(&mut self.held, codes, |code| Refusal::CardNotHeld {
            code: code.to_string(),
        })?;
        let cards = self.piles.entry(pile).or_default();
        cards.extend(moved);
        Ok(cards.len() as u64)
    }

    /// Remove named cards from a pile into the held set and return them.
    pub(crate) fn draw_from_pile(
        &mut self,
        pile: Pile,
        codes: &[String],
    ) -> std::result::Result<Vec<Card>, Refusal> {
        let cards = self.piles.entry(pile).or_default();
        let removed = take_by_codes(cards, codes, |code| Refusal::CardNotInPile {
            code: code.to_string(),
            pile,
        })?;
        self.held.extend(removed.iter().cloned());
        Ok(removed)
    }

    /// A pile's cards in order. Untouched piles list as empty.
    pub(crate) fn list_pile(&self, pile: Pile) -> Vec<Card> {
        self.piles.get(&pile).cloned().unwrap_or_default()
    }
}

/// Remove the cards named by `codes` from `source`, preserving the order
/// of what stays. Nothing is removed unless every code matches a distinct
/// card.
fn take_by_codes(
    source: &mut Vec<Card>,
    codes: &[String],
    missing: impl Fn(&str) -> Refusal,
) -> std::result::Result<Vec<Card>, Refusal> {
    let mut used = vec![false; source.len()];
    let mut picked = Vec::with_capacity(codes.len());
    for code in codes {
        let mut found = None;
        for (at, card) in source.iter().enumerate() {
            if !used[at] && card.code() == *code {
                found = Some(at);
                break;
            }
        }
        let at = found.ok_or_else(|| missing(code))?;
        used[at] = true;
        picked.push(source[at].clone());
    }
    let mut at = 0;
    source.retain(|_| {
        let keep = !used[at];
        at += 1;
        keep
    });
    Ok(picked)
}

struct SimulatorState {
    rng: StdRng,
    sessions: HashMap<DeckId, Session>,
}

/// In-memory implementation of [DeckService].
pub struct Simulator {
    state: Mutex<SimulatorState>,
}

impl Simulator {
    /// Simulator shuffling with OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic shuffles for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Simulator {
            state: Mutex::new(SimulatorState {
                rng,
                sessions: HashMap::new(),
            }),
        }
    }

    /// Create a session backed by a fresh shuffled deck.
    pub(crate) fn create(&self) -> DeckState {
        let mut state = self.state.lock().unwrap();
        let id: String = (&mut state.rng)
            .sample_iter(Alphanumeric)
            .take(DECK_ID_LEN)
            .map(|c| (c as char).to_ascii_lowercase())
            .collect();
        let id = DeckId::new(id);
        let mut stock = full_deck();
        stock.shuffle(&mut state.rng);
        let remaining = stock.len() as u64;
        state.sessions.insert(id.clone(), Session::new(stock));
        debug!(deck = %id, "created session");
        DeckState {
            id,
            remaining,
            shuffled: true,
        }
    }

    /// Run `op` against an existing session under the state lock.
    pub(crate) fn with_session<T>(
        &self,
        deck: &DeckId,
        op: impl FnOnce(&mut Session) -> std::result::Result<T, Refusal>,
    ) -> std::result::Result<T, Refusal> {
        let mut state = self.state.lock().unwrap();
        let session = state.sessions.get_mut(deck).ok_or(Refusal::UnknownDeck)?;
        op(session)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// All 52 cards in a fixed order, images pointing at the public service's
/// static assets.
fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let mut card = Card {
                rank,
                suit,
                image: String::new(),
            };
            card.image = format!("https://deckofcardsapi.com/static/img/{}.png", card.code());
            deck.push(card);
        }
    }
    deck
}

#[async_trait]
impl DeckService for Simulator {
    async fn create_deck(&self) -> Result<DeckState> {
        Ok(self.create())
    }

    async fn deck_state(&self, deck: &DeckId) -> Result<DeckState> {
        let remaining = self.with_session(deck, |session| Ok(session.remaining()))?;
        Ok(DeckState {
            id: deck.clone(),
            remaining,
            shuffled: true,
        })
    }

    async fn draw(&self, deck: &DeckId, count: usize) -> Result<Vec<Card>> {
        Ok(self.with_session(deck, |session| session.draw(count))?)
    }

    async fn add_to_pile(&self, deck: &DeckId, pile: Pile, codes: &[String]) -> Result<u64> {
        Ok(self.with_session(deck, |session| session.add_to_pile(pile, codes))?)
    }

    async fn draw_from_pile(
        &self,
        deck: &DeckId,
        pile: Pile,
        codes: &[String],
    ) -> Result<Vec<Card>> {
        Ok(self.with_session(deck, |session| session.draw_from_pile(pile, codes))?)
    }

    async fn list_pile(&self, deck: &DeckId, pile: Pile) -> Result<Vec<Card>> {
        Ok(self.with_session(deck, |session| Ok(session.list_pile(pile)))?)
    }
}
