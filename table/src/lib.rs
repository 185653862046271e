//! Blackjack session logic on top of a remote deck service.
//!
//! [Table] moves cards between a session's undrawn stock and its named
//! piles; [blackjack] values the resulting hands and drives the sample
//! hit-until-bust round.

pub mod blackjack;
pub mod table;

pub use blackjack::{hand_value, is_busted, play_until_bust, RoundReport};
pub use table::Table;
