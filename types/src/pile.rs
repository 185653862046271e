//! Named piles attached to a deck session.

use std::{fmt, str::FromStr};
use thiserror::Error;

/// The closed set of pile names a session uses.
///
/// Keeping this an enum makes a misspelled pile name a compile error in
/// game logic; strings from the outside world go through [FromStr] and
/// fail fast on anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pile {
    /// The player's hand.
    Player,
    /// The dealer's hand.
    Dealer,
    /// The undrawn draw stack. Fresh cards are drawn from the deck's own
    /// stock; none of the shipped operations write here.
    Pool,
    /// Where spent cards end up.
    Discard,
}

impl Pile {
    /// Every pile, in a stable order.
    pub const ALL: [Pile; 4] = [Pile::Player, Pile::Dealer, Pile::Pool, Pile::Discard];

    /// Name used in the service's URLs and pile maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pile::Player => "player",
            Pile::Dealer => "dealer",
            Pile::Pool => "pool",
            Pile::Discard => "discard",
        }
    }
}

impl fmt::Display for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for pile names outside the closed set.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown pile name: {0:?}")]
pub struct UnknownPile(pub String);

impl FromStr for Pile {
    type Err = UnknownPile;

    fn from_str(s: &str) -> Result<Pile, UnknownPile> {
        match s {
            "player" => Ok(Pile::Player),
            "dealer" => Ok(Pile::Dealer),
            "pool" => Ok(Pile::Pool),
            "discard" => Ok(Pile::Discard),
            _ => Err(UnknownPile(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_name_round_trip() {
        for pile in Pile::ALL {
            assert_eq!(pile.as_str().parse::<Pile>().unwrap(), pile);
        }
    }

    #[test]
    fn test_unknown_pile_fails_fast() {
        let err = "splits".parse::<Pile>().unwrap_err();
        assert_eq!(err, UnknownPile("splits".to_string()));
        assert_eq!(err.to_string(), "unknown pile name: \"splits\"");
        // Names are case sensitive, like the service's URLs.
        assert!("Player".parse::<Pile>().is_err());
    }
}
