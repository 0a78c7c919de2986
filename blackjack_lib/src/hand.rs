use crate::card::Card;
use serde::Serialize;

/// The target total.
pub const TWENTY_ONE: u8 = 21;

/// How far along the hand is in the player's turn. A hand only accepts further
/// decisions while it is `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandState {
    Active,
    Stood,
    Busted,
}

/// Scores a set of cards with the usual soft/hard ace rule: 2-10 count as
/// printed, face cards count 10, and each ace counts 11 until the total would
/// bust, at which point aces demote to 1 one at a time.
pub fn score(cards: &[Card]) -> u8 {
    let mut total: u8 = 0;
    let mut aces = 0;
    for card in cards {
        total = total.saturating_add(card.value());
        if card.value() == 11 {
            aces += 1;
        }
    }
    while total > TWENTY_ONE && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total
}

/// One side's cards for the round, in draw order, with the score cached so it
/// never has to be recomputed by readers. The cache is refreshed on every
/// mutation. A hand also remembers whether it came out of a split, because a
/// split hand is never allowed to split again and never counts as a natural.
#[derive(Debug)]
pub struct Hand {
    cards: Vec<Card>,
    value: u8,
    state: HandState,
    split_off: bool,
}

impl Hand {
    /// Associated function to create a new empty hand.
    pub fn new() -> Hand {
        Hand {
            cards: Vec::new(),
            value: 0,
            state: HandState::Active,
            split_off: false,
        }
    }

    /// Method to receive a card, recomputes the cached value and marks the
    /// hand busted once the score exceeds 21.
    pub fn receive(&mut self, card: Card) {
        self.cards.push(card);
        self.value = score(&self.cards);
        if self.value > TWENTY_ONE {
            self.state = HandState::Busted;
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The cached score of the hand.
    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn state(&self) -> HandState {
        self.state
    }

    /// Whether the hand still accepts decisions.
    pub fn is_active(&self) -> bool {
        self.state == HandState::Active
    }

    pub fn bust(&self) -> bool {
        self.value > TWENTY_ONE
    }

    /// A natural: exactly two cards scoring 21 on a hand that was dealt, not
    /// split off. Only meaningful before any hit, which the game enforces by
    /// checking right after the deal.
    pub fn blackjack(&self) -> bool {
        !self.split_off && self.cards.len() == 2 && self.value == TWENTY_ONE
    }

    /// Exactly two cards of the same rank, suits ignored.
    pub fn is_pair(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank() == self.cards[1].rank()
    }

    /// Whether a split may be offered. Fixed rule: a hand produced by a split
    /// is never eligible for another split, even if it draws into a new pair.
    pub fn can_split(&self) -> bool {
        self.is_pair() && !self.split_off
    }

    /// Method to stand on the hand, ending its turn.
    pub fn stand(&mut self) {
        self.state = HandState::Stood;
    }

    /// Splits the pair: the second card moves into a new single-card hand and
    /// both hands are flagged as split products. The caller deals one fresh
    /// card to each. Panics if the hand is not splittable.
    pub fn split(&mut self) -> Hand {
        assert!(self.can_split(), "split called on a non-pair hand");
        let moved = self.cards.pop().expect("pair has two cards");
        self.split_off = true;
        self.value = score(&self.cards);
        let mut other = Hand::new();
        other.split_off = true;
        other.receive(moved);
        other
    }

    /// Turns every card in the hand face up (the dealer revealing the hole card).
    pub fn reveal_all(&mut self) {
        for card in &mut self.cards {
            card.reveal();
        }
    }

    /// Consumes the hand and hands its cards back, for discarding at round end.
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Default for Hand {
    fn default() -> Self {
        Hand::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.receive(Card::new(rank, Suit::Club));
        }
        hand
    }

    #[test]
    fn two_aces_and_a_nine_score_twenty_one() {
        // One ace stays 11, the other demotes to 1.
        assert_eq!(hand_of(&[Rank::Ace, Rank::Ace, Rank::Nine]).value(), 21);
    }

    #[test]
    fn two_aces_score_twelve() {
        assert_eq!(hand_of(&[Rank::Ace, Rank::Ace]).value(), 12);
    }

    #[test]
    fn face_cards_bust_without_aces_to_demote() {
        let hand = hand_of(&[Rank::King, Rank::Queen, Rank::Two]);
        assert_eq!(hand.value(), 22);
        assert!(hand.bust());
        assert_eq!(hand.state(), HandState::Busted);
    }

    #[test]
    fn ace_demotes_only_as_needed() {
        assert_eq!(hand_of(&[Rank::Ace, Rank::Five]).value(), 16);
        assert_eq!(hand_of(&[Rank::Ace, Rank::Five, Rank::Nine]).value(), 15);
        assert_eq!(hand_of(&[Rank::Ace, Rank::King]).value(), 21);
    }

    #[test]
    fn blackjack_is_a_two_card_twenty_one_only() {
        assert!(hand_of(&[Rank::Ace, Rank::King]).blackjack());
        assert!(!hand_of(&[Rank::Seven, Rank::Seven, Rank::Seven]).blackjack());
        assert!(!hand_of(&[Rank::Ten, Rank::Nine]).blackjack());
    }

    #[test]
    fn pair_ignores_suit() {
        let mut hand = Hand::new();
        hand.receive(Card::new(Rank::Eight, Suit::Spade));
        hand.receive(Card::new(Rank::Eight, Suit::Heart));
        assert!(hand.is_pair());
        assert!(hand.can_split());
        assert!(!hand_of(&[Rank::Seven, Rank::Four]).is_pair());
        assert!(!hand_of(&[Rank::Ten, Rank::Jack]).is_pair());
    }

    #[test]
    fn split_hands_cannot_resplit_and_are_never_naturals() {
        let mut hand = hand_of(&[Rank::Ace, Rank::Ace]);
        let mut other = hand.split();
        hand.receive(Card::new(Rank::Ace, Suit::Diamond));
        other.receive(Card::new(Rank::King, Suit::Diamond));
        assert!(hand.is_pair());
        assert!(!hand.can_split());
        assert_eq!(other.value(), 21);
        assert!(!other.blackjack());
    }

    #[test]
    fn cached_value_tracks_every_mutation() {
        let mut hand = Hand::new();
        hand.receive(Card::new(Rank::Ace, Suit::Club));
        assert_eq!(hand.value(), score(hand.cards()));
        hand.receive(Card::new(Rank::Nine, Suit::Club));
        assert_eq!(hand.value(), score(hand.cards()));
        hand.receive(Card::new(Rank::Seven, Suit::Club));
        assert_eq!(hand.value(), score(hand.cards()));
        assert_eq!(hand.value(), 17);
    }
}
