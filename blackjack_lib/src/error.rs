use crate::game::Action;
use thiserror::Error;

/// Contract violations at the collaborator boundary. Every variant is
/// recoverable: the engine rejects the input without touching any state and
/// re-queries the same collaborator. Deck exhaustion is deliberately not here,
/// it is handled internally by the auto-reshuffle and only surfaced as an
/// informational event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("bet of {bet} is outside the valid range 1..={balance}")]
    InvalidBet { bet: u64, balance: i64 },

    #[error("{action} is not one of the offered actions")]
    UnavailableAction { action: Action },

    #[error("hand {hand} does not exist")]
    NoSuchHand { hand: usize },
}
