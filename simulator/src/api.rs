use axum::{
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use deckhand_types::{
    api::{CardDto, DeckDto, DrawDto, PileDto, PileOpDto},
    DeckId, Pile,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{Refusal, Simulator};

/// HTTP surface of the simulator, speaking the deck service wire format.
pub struct Api {
    simulator: Arc<Simulator>,
}

impl Api {
    pub fn new(simulator: Arc<Simulator>) -> Self {
        Self { simulator }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/deck/new/shuffle/", get(new_deck))
            .route("/api/deck/:deck_id/", get(deck_state))
            .route("/api/deck/:deck_id/draw/", get(draw))
            .route("/api/deck/:deck_id/pile/:pile/add/", get(pile_add))
            .route("/api/deck/:deck_id/pile/:pile/draw/", get(pile_draw))
            .route("/api/deck/:deck_id/pile/:pile/list/", get(pile_list))
            .with_state(self.simulator.clone())
    }
}

#[derive(Deserialize)]
struct NewDeckParams {
    deck_count: Option<u32>,
}

#[derive(Deserialize)]
struct DrawParams {
    count: Option<usize>,
}

#[derive(Deserialize)]
struct CardsParams {
    cards: Option<String>,
}

async fn new_deck(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Query(params): Query<NewDeckParams>,
) -> Response {
    // Multi-deck sessions are out of scope.
    if params.deck_count.unwrap_or(1) != 1 {
        return rejection(StatusCode::BAD_REQUEST, "deck_count must be 1");
    }
    let state = simulator.create();
    Json(DeckDto {
        success: true,
        deck_id: state.id.to_string(),
        remaining: state.remaining,
        shuffled: true,
        error: None,
    })
    .into_response()
}

async fn deck_state(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Path(deck_id): Path<String>,
) -> Response {
    let deck = DeckId::new(deck_id);
    match simulator.with_session(&deck, |session| Ok(session.remaining())) {
        Ok(remaining) => Json(DeckDto {
            success: true,
            deck_id: deck.to_string(),
            remaining,
            shuffled: true,
            error: None,
        })
        .into_response(),
        Err(refusal) => refusal_response(refusal),
    }
}

async fn draw(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Path(deck_id): Path<String>,
    Query(params): Query<DrawParams>,
) -> Response {
    let deck = DeckId::new(deck_id);
    let count = params.count.unwrap_or(1);
    let result = simulator.with_session(&deck, |session| {
        let cards = session.draw(count)?;
        Ok((cards, session.remaining()))
    });
    match result {
        Ok((cards, remaining)) => Json(DrawDto {
            success: true,
            deck_id: deck.to_string(),
            cards: cards.iter().map(CardDto::from).collect(),
            remaining,
            error: None,
        })
        .into_response(),
        Err(refusal) => refusal_response(refusal),
    }
}

async fn pile_add(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Path((deck_id, pile_name)): Path<(String, String)>,
    Query(params): Query<CardsParams>,
) -> Response {
    let deck = DeckId::new(deck_id);
    let pile = match parse_pile(&pile_name) {
        Ok(pile) => pile,
        Err(response) => return response,
    };
    let codes = split_codes(params.cards.as_deref());
    let result = simulator.with_session(&deck, |session| {
        session.add_to_pile(pile, &codes)?;
        Ok((session.remaining(), session.pile_sizes()))
    });
    match result {
        Ok((remaining, sizes)) => Json(PileOpDto {
            success: true,
            deck_id: deck.to_string(),
            remaining,
            piles: pile_map(sizes, None),
            cards: None,
            error: None,
        })
        .into_response(),
        Err(refusal) => refusal_response(refusal),
    }
}

async fn pile_draw(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Path((deck_id, pile_name)): Path<(String, String)>,
    Query(params): Query<CardsParams>,
) -> Response {
    let deck = DeckId::new(deck_id);
    let pile = match parse_pile(&pile_name) {
        Ok(pile) => pile,
        Err(response) => return response,
    };
    let codes = split_codes(params.cards.as_deref());
    let result = simulator.with_session(&deck, |session| {
        let removed = session.draw_from_pile(pile, &codes)?;
        Ok((removed, session.remaining(), session.pile_sizes()))
    });
    match result {
        Ok((removed, remaining, sizes)) => Json(PileOpDto {
            success: true,
            deck_id: deck.to_string(),
            remaining,
            piles: pile_map(sizes, None),
            cards: Some(removed.iter().map(CardDto::from).collect()),
            error: None,
        })
        .into_response(),
        Err(refusal) => refusal_response(refusal),
    }
}

async fn pile_list(
    AxumState(simulator): AxumState<Arc<Simulator>>,
    Path((deck_id, pile_name)): Path<(String, String)>,
) -> Response {
    let deck = DeckId::new(deck_id);
    let pile = match parse_pile(&pile_name) {
        Ok(pile) => pile,
        Err(response) => return response,
    };
    let result = simulator.with_session(&deck, |session| {
        Ok((
            session.list_pile(pile),
            session.remaining(),
            session.pile_sizes(),
        ))
    });
    match result {
        Ok((cards, remaining, sizes)) => {
            let listed = cards.iter().map(CardDto::from).collect();
            Json(PileOpDto {
                success: true,
                deck_id: deck.to_string(),
                remaining,
                piles: pile_map(sizes, Some((pile, listed))),
                cards: None,
                error: None,
            })
            .into_response()
        }
        Err(refusal) => refusal_response(refusal),
    }
}

fn parse_pile(name: &str) -> Result<Pile, Response> {
    name.parse::<Pile>()
        .map_err(|err| rejection(StatusCode::BAD_REQUEST, &err.to_string()))
}

fn split_codes(cards: Option<&str>) -> Vec<String> {
    cards
        .unwrap_or_default()
        .split(',')
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

fn pile_map(
    sizes: Vec<(Pile, u64)>,
    listed: Option<(Pile, Vec<CardDto>)>,
) -> HashMap<String, PileDto> {
    let mut map: HashMap<String, PileDto> = sizes
        .into_iter()
        .map(|(pile, remaining)| {
            (
                pile.as_str().to_string(),
                PileDto {
                    remaining,
                    cards: None,
                },
            )
        })
        .collect();
    if let Some((pile, cards)) = listed {
        map.insert(
            pile.as_str().to_string(),
            PileDto {
                remaining: cards.len() as u64,
                cards: Some(cards),
            },
        );
    }
    map
}

fn rejection(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "success": false, "error": message });
    (status, Json(body)).into_response()
}

fn refusal_response(refusal: Refusal) -> Response {
    // The real service 404s unknown decks but keeps semantic rejections
    // at 200 with success=false.
    let status = match refusal {
        Refusal::UnknownDeck => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    rejection(status, &refusal.to_string())
}
