use crate::card::{Card, Rank, Suit};
use crate::game::{Action, RoundSummary, Winner};
use crate::hand::{score, Hand, HandState};
use serde::Serialize;

/// What the presentation layer is allowed to see of a card. Face-down cards
/// still carry their rank and suit here, but `face_up` tells the renderer to
/// hide them; nothing in the engine depends on how (or whether) this is drawn.
#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub rank: Rank,
    pub suit: Suit,
    pub face_up: bool,
}

impl CardView {
    pub(crate) fn of(card: &Card) -> CardView {
        CardView {
            rank: card.rank(),
            suit: card.suit(),
            face_up: card.is_face_up(),
        }
    }
}

/// A hand as the table shows it. `visible_value` scores only the face-up
/// cards, so a dealer hand with a hole card reads as the up-card's value.
#[derive(Debug, Clone, Serialize)]
pub struct HandView {
    pub cards: Vec<CardView>,
    pub visible_value: u8,
    pub state: HandState,
}

impl HandView {
    pub(crate) fn of(hand: &Hand) -> HandView {
        let visible: Vec<Card> = hand
            .cards()
            .iter()
            .filter(|card| card.is_face_up())
            .cloned()
            .collect();
        HandView {
            cards: hand.cards().iter().map(CardView::of).collect(),
            visible_value: score(&visible),
            state: hand.state(),
        }
    }
}

/// A read-only snapshot of the whole table, emitted after every hand
/// mutation. `active_hand` indexes into `player_hands` while the player is
/// deciding, and `bets` lines up with `player_hands`.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub dealer_hand: HandView,
    pub player_hands: Vec<HandView>,
    pub active_hand: Option<usize>,
    pub bets: Vec<u64>,
    pub player_balance: i64,
    pub dealer_balance: i64,
}

/// Informational events the engine reports as a round unfolds. None of them
/// require a response; the console turns them into result lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// The drawable pile ran out and the discards were shuffled back in.
    Reshuffled,
    /// The player's initial two cards score 21; the round short-circuits.
    Blackjack,
    PlayerBust { hand: usize },
    DealerBust,
    /// One player hand has been settled against the dealer's.
    HandSettled { hand: usize, winner: Winner, amount: u64 },
}

/// The boundary between the engine and everything it treats as external:
/// prompting, validation of raw input, and rendering. The engine hands each
/// method already-bounded data and trusts the contract documented per method;
/// a broken contract is rejected without mutating any game state and the same
/// collaborator is simply asked again.
pub trait TableIo {
    /// Asks for the bet opening a round. Contract: `0 < bet <= balance`, with
    /// re-prompting on violation left to the implementor.
    fn place_bet(&mut self, balance: i64) -> u64;

    /// Asks which of the offered actions to play on the active hand.
    /// Contract: the returned action is a member of `offered`.
    fn choose_action(&mut self, view: TableView, offered: &[Action]) -> Action;

    /// Asks whether to play another round after settlement.
    fn another_round(&mut self) -> bool;

    /// Receives a fresh snapshot after every hand mutation.
    fn show_table(&mut self, _view: TableView) {}

    /// Receives informational events (reshuffle, busts, outcomes).
    fn notify(&mut self, _event: GameEvent) {}

    /// Receives the settled summary at the end of each round.
    fn round_over(&mut self, _summary: &RoundSummary) {}
}
