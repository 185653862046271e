//! Card model for a single 52-card deck.
//!
//! The deck service identifies every card by a two-character code: a rank
//! character (`2`-`9`, `0` for ten, `J`, `Q`, `K`, `A`) followed by a suit
//! character (`S`, `H`, `D`, `C`). [Card] keeps the parsed rank and suit
//! and can reproduce the code on demand.

use std::fmt;
use thiserror::Error;

/// The four French suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All suits, in the order a fresh deck is built.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Single-character wire code.
    pub fn code(&self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    /// Upper-case name used in the service's JSON (`"SPADES"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Spades => "SPADES",
            Suit::Hearts => "HEARTS",
            Suit::Diamonds => "DIAMONDS",
            Suit::Clubs => "CLUBS",
        }
    }

    /// Parse a wire code character.
    pub fn from_code(code: char) -> Option<Suit> {
        match code {
            'S' => Some(Suit::Spades),
            'H' => Some(Suit::Hearts),
            'D' => Some(Suit::Diamonds),
            'C' => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Card ranks, two through ace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks, low to high.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Wire code character. Ten is `0`, not `1`.
    pub fn code(&self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => '0',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Name used in the service's JSON `value` field (`"2"`..`"10"`,
    /// `"JACK"`, `"QUEEN"`, `"KING"`, `"ACE"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "JACK",
            Rank::Queen => "QUEEN",
            Rank::King => "KING",
            Rank::Ace => "ACE",
        }
    }

    /// Parse a wire code character.
    pub fn from_code(code: char) -> Option<Rank> {
        match code {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            '0' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A single card as reported by the deck service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    /// URL of the card face image served alongside the card data.
    pub image: String,
}

impl Card {
    /// Two-character wire code (`"AS"`, `"0D"`).
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.rank.code());
        code.push(self.suit.code());
        code
    }

    /// Parse a wire code. The image URL is not part of the code and is
    /// left empty.
    pub fn from_code(code: &str) -> Result<Card, ParseCardError> {
        let mut chars = code.chars();
        let (rank, suit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => (rank, suit),
            _ => return Err(ParseCardError::Length(code.to_string())),
        };
        Ok(Card {
            rank: Rank::from_code(rank).ok_or(ParseCardError::Rank(rank))?,
            suit: Suit::from_code(suit).ok_or(ParseCardError::Suit(suit))?,
            image: String::new(),
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.code(), self.suit.code())
    }
}

/// Error parsing a card from its wire representation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("card code must be exactly two characters: {0:?}")]
    Length(String),
    #[error("unknown rank character: {0:?}")]
    Rank(char),
    #[error("unknown suit character: {0:?}")]
    Suit(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_code_round_trip() {
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                let card = Card {
                    rank,
                    suit,
                    image: String::new(),
                };
                let parsed = Card::from_code(&card.code()).unwrap();
                assert_eq!(parsed.rank, rank);
                assert_eq!(parsed.suit, suit);
            }
        }
    }

    #[test]
    fn test_ten_uses_zero_code() {
        let card = Card::from_code("0H").unwrap();
        assert_eq!(card.rank, Rank::Ten);
        assert_eq!(card.suit, Suit::Hearts);
        assert_eq!(card.code(), "0H");
        assert_eq!(card.rank.as_str(), "10");
    }

    #[test]
    fn test_from_code_rejects_bad_input() {
        assert_eq!(
            Card::from_code("A"),
            Err(ParseCardError::Length("A".to_string()))
        );
        assert_eq!(
            Card::from_code("ASX"),
            Err(ParseCardError::Length("ASX".to_string()))
        );
        assert_eq!(Card::from_code("1S"), Err(ParseCardError::Rank('1')));
        assert_eq!(Card::from_code("AZ"), Err(ParseCardError::Suit('Z')));
    }

    #[test]
    fn test_display_matches_code() {
        let card = Card::from_code("QC").unwrap();
        assert_eq!(card.to_string(), "QC");
    }
}
