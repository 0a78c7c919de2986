//! Core engine for a one-player game of blackjack against the house.
//!
//! The crate owns the mechanics with real rules in them: the exhaustible,
//! reshuffle-on-empty [`Deck`], soft/hard [`hand`] scoring, the per-hand
//! decision offers (hit, stand, double down, split), split bookkeeping, the
//! dealer's draw-to-17 policy and per-hand settlement across rounds until one
//! side is bankrupt. Everything that touches a human -- prompting, input
//! validation, rendering -- lives behind the [`TableIo`] trait and is supplied
//! by a presentation crate such as `blackjack_cli`.

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod io;
pub mod participant;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, Draw, DECK_SIZE};
pub use error::GameError;
pub use game::{Action, Game, HandResult, RoundSummary, SessionSummary, Winner, DEALER_STAND};
pub use hand::{score, Hand, HandState, TWENTY_ONE};
pub use io::{CardView, GameEvent, HandView, TableIo, TableView};
pub use participant::{Participant, Role, DEALER_STARTING_CHIPS, PLAYER_STARTING_CHIPS};

pub mod prelude {
    pub use crate::{
        Action, Card, Deck, Game, GameEvent, GameError, Hand, Participant, Rank, Role, Suit,
        TableIo, TableView, Winner,
    };
}
