//! JSON messages for the deck service wire format.
//!
//! Every response carries a `success` flag. Semantic rejections keep the
//! HTTP status at 200, set `success` to `false`, and explain themselves in
//! `error`, sometimes alongside partial data. Fields that are absent in
//! those responses default, so a single message type per endpoint decodes
//! both outcomes.

use crate::card::{Card, ParseCardError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A card as the service serializes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDto {
    pub code: String,
    pub value: String,
    pub suit: String,
    pub image: String,
}

impl From<&Card> for CardDto {
    fn from(card: &Card) -> CardDto {
        CardDto {
            code: card.code(),
            value: card.rank.as_str().to_string(),
            suit: card.suit.as_str().to_string(),
            image: card.image.clone(),
        }
    }
}

impl TryFrom<CardDto> for Card {
    type Error = ParseCardError;

    /// The code field is authoritative; `value` and `suit` are redundant
    /// presentation copies of the same information.
    fn try_from(dto: CardDto) -> Result<Card, ParseCardError> {
        let mut card = Card::from_code(&dto.code)?;
        card.image = dto.image;
        Ok(card)
    }
}

/// Response to session creation and session state queries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeckDto {
    pub success: bool,
    #[serde(default)]
    pub deck_id: String,
    #[serde(default)]
    pub remaining: u64,
    #[serde(default)]
    pub shuffled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response to drawing from the undrawn stock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrawDto {
    pub success: bool,
    #[serde(default)]
    pub deck_id: String,
    #[serde(default)]
    pub cards: Vec<CardDto>,
    #[serde(default)]
    pub remaining: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-pile summary inside pile responses. The service includes `cards`
/// only for the pile a list call asked about.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PileDto {
    pub remaining: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<CardDto>>,
}

/// Response to pile add, pile draw, and pile list calls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PileOpDto {
    pub success: bool,
    #[serde(default)]
    pub deck_id: String,
    #[serde(default)]
    pub remaining: u64,
    #[serde(default)]
    pub piles: HashMap<String, PileDto>,
    /// Cards removed by a pile draw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<CardDto>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
