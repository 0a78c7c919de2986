use serde::Serialize;
use std::fmt::{self, Display};

/// The four french suits. Suit never affects scoring, it only matters for display
/// and for telling two cards of the same rank apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    /// Returns the unicode symbol for the suit.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Club => '♣',
            Suit::Diamond => '♦',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card ranks. An ace is worth 11 until the hand would bust, see [`crate::hand::score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rank {
    Ace,
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
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
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
    ];

    /// The face value used when scoring a hand, counting an ace as 11.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    /// Returns the printed symbol of the rank, e.g. "A" or "10".
    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card. Rank and suit are fixed at creation; the only mutable
/// state is whether the card is lying face up. Cards start face down (as they sit
/// in the deck) and are revealed when dealt, except for the dealer's hole card
/// which stays hidden until the dealer's turn.
#[derive(Debug, Clone)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    face_up: bool,
}

impl Card {
    /// Associated function to create a new face-down card.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card {
            rank,
            suit,
            face_up: false,
        }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// The scoring value of the card, counting an ace as 11.
    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Turns the card face up. The flag only ever moves in this direction while
    /// the card is in play; the deck flips it back when the card is discarded.
    pub fn reveal(&mut self) {
        self.face_up = true;
    }

    /// Turns the card face down again, used when it returns to the discard pile.
    pub(crate) fn conceal(&mut self) {
        self.face_up = false;
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.face_up {
            write!(f, "{}{}", self.rank, self.suit)
        } else {
            write!(f, "##")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_values_follow_printed_values() {
        assert_eq!(Rank::Ace.value(), 11);
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Nine.value(), 9);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 10);
        assert_eq!(Rank::Queen.value(), 10);
        assert_eq!(Rank::King.value(), 10);
    }

    #[test]
    fn cards_start_face_down_and_reveal() {
        let mut card = Card::new(Rank::Ace, Suit::Spade);
        assert!(!card.is_face_up());
        assert_eq!(format!("{}", card), "##");
        card.reveal();
        assert!(card.is_face_up());
        assert_eq!(format!("{}", card), "A♠");
    }
}
