//! HTTP implementation of [DeckService] for services speaking the
//! deckofcardsapi.com wire format.
//!
//! Every endpoint is a GET with query parameters. Transport failures and
//! non-2xx statuses surface as errors with the body captured; 2xx bodies
//! with `success: false` surface as [Error::Rejected] with the service's
//! message preserved. Nothing is retried.

use crate::{service::DeckService, Error, Result};
use async_trait::async_trait;
use deckhand_types::{
    api::{CardDto, DeckDto, DrawDto, PileOpDto},
    Card, DeckId, DeckState, Pile,
};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// The public instance of the deck service.
pub const DEFAULT_BASE_URL: &str = "https://deckofcardsapi.com";

/// HTTP client for a remote deck service.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    pub base_url: Url,
}

impl Client {
    /// Create a client for the service at `base_url`. Only http and https
    /// URLs are accepted.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        match base_url.scheme() {
            "http" | "https" => {}
            other => return Err(Error::InvalidScheme(other.to_string())),
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// GET `path` under the base URL and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        debug!(%url, "deck service request");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::FailedWithBody { status, body });
        }
        Ok(response.json::<T>().await?)
    }

    fn state_from(dto: DeckDto) -> Result<DeckState> {
        if !dto.success {
            return Err(rejected(dto.error));
        }
        Ok(DeckState {
            id: DeckId::new(dto.deck_id),
            remaining: dto.remaining,
            shuffled: dto.shuffled,
        })
    }
}

#[async_trait]
impl DeckService for Client {
    async fn create_deck(&self) -> Result<DeckState> {
        let dto: DeckDto = self
            .get_json(
                "api/deck/new/shuffle/",
                &[("deck_count", "1".to_string())],
            )
            .await?;
        let state = Self::state_from(dto)?;
        debug!(deck = %state.id, remaining = state.remaining, "created deck session");
        Ok(state)
    }

    async fn deck_state(&self, deck: &DeckId) -> Result<DeckState> {
        let dto: DeckDto = self.get_json(&format!("api/deck/{deck}/"), &[]).await?;
        Self::state_from(dto)
    }

    async fn draw(&self, deck: &DeckId, count: usize) -> Result<Vec<Card>> {
        let dto: DrawDto = self
            .get_json(
                &format!("api/deck/{deck}/draw/"),
                &[("count", count.to_string())],
            )
            .await?;
        if !dto.success {
            return Err(rejected(dto.error));
        }
        debug!(%deck, count, remaining = dto.remaining, "drew from stock");
        cards_from(dto.cards)
    }

    async fn add_to_pile(&self, deck: &DeckId, pile: Pile, codes: &[String]) -> Result<u64> {
        let dto: PileOpDto = self
            .get_json(
                &format!("api/deck/{deck}/pile/{pile}/add/"),
                &[("cards", codes.join(","))],
            )
            .await?;
        if !dto.success {
            return Err(rejected(dto.error));
        }
        let size = dto
            .piles
            .get(pile.as_str())
            .map(|entry| entry.remaining)
            .ok_or(Error::MissingPile { pile })?;
        debug!(%deck, %pile, added = codes.len(), size, "added cards to pile");
        Ok(size)
    }

    async fn draw_from_pile(
        &self,
        deck: &DeckId,
        pile: Pile,
        codes: &[String],
    ) -> Result<Vec<Card>> {
        let dto: PileOpDto = self
            .get_json(
                &format!("api/deck/{deck}/pile/{pile}/draw/"),
                &[("cards", codes.join(","))],
            )
            .await?;
        if !dto.success {
            return Err(rejected(dto.error));
        }
        debug!(%deck, %pile, removed = codes.len(), "drew cards from pile");
        cards_from(dto.cards.ok_or(Error::UnexpectedResponse)?)
    }

    async fn list_pile(&self, deck: &DeckId, pile: Pile) -> Result<Vec<Card>> {
        let dto: PileOpDto = self
            .get_json(&format!("api/deck/{deck}/pile/{pile}/list/"), &[])
            .await?;
        if !dto.success {
            return Err(rejected(dto.error));
        }
        // A pile nothing has ever reached is simply absent from the map.
        let mut piles = dto.piles;
        let cards = piles
            .remove(pile.as_str())
            .and_then(|entry| entry.cards)
            .unwrap_or_default();
        cards_from(cards)
    }
}

fn cards_from(dtos: Vec<CardDto>) -> Result<Vec<Card>> {
    dtos.into_iter()
        .map(|dto| Card::try_from(dto).map_err(Error::from))
        .collect()
}

fn rejected(error: Option<String>) -> Error {
    let message =
        error.unwrap_or_else(|| "service reported failure without a message".to_string());
    warn!(%message, "deck service rejected request");
    Error::Rejected(message)
}
