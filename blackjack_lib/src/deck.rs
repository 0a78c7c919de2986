use crate::card::{Card, Rank, Suit};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Number of cards in a full single deck.
pub const DECK_SIZE: usize = 52;

/// The result of drawing from the deck. `reshuffled` is set when the drawable
/// pile ran dry and the discards were shuffled back in before this draw; the
/// game forwards it to the presentation layer as an informational event.
#[derive(Debug)]
pub struct Draw {
    pub card: Card,
    pub reshuffled: bool,
}

/// A single 52-card deck split into a drawable pile (ordered, drawn from the
/// end) and an unordered discard pile. Every card is in exactly one of the two
/// piles or held by a hand; drawing transfers ownership to the caller and
/// discarding transfers it back. The deck can never be exhausted for good:
/// when the drawable pile runs out the discards are reclaimed and reshuffled.
pub struct Deck {
    drawable: Vec<Card>,
    discarded: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// Creates a full shuffled deck with an entropy-seeded rng.
    pub fn new() -> Deck {
        Deck::with_rng(StdRng::from_entropy())
    }

    /// Creates a full deck shuffled with a deterministic rng, for reproducible
    /// sessions and tests.
    pub fn seeded(seed: u64) -> Deck {
        Deck::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates a deck whose draw order is exactly `top_to_bottom`, with no
    /// shuffle applied to the given cards. Intended for tests and scripted
    /// demos; later reshuffles still use the deck's own rng.
    pub fn stacked(top_to_bottom: Vec<Card>) -> Deck {
        let mut drawable: Vec<Card> = top_to_bottom
            .into_iter()
            .map(|mut card| {
                card.conceal();
                card
            })
            .collect();
        drawable.reverse();
        Deck {
            drawable,
            discarded: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    fn with_rng(rng: StdRng) -> Deck {
        let mut deck = Deck {
            drawable: Deck::fresh_cards(),
            discarded: Vec::new(),
            rng,
        };
        deck.drawable.shuffle(&mut deck.rng);
        deck
    }

    fn fresh_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }

    /// Draws the top card, reclaiming and shuffling the discard pile first if
    /// the drawable pile is empty. The returned flag reports that reshuffle.
    pub fn draw(&mut self) -> Draw {
        let mut reshuffled = false;
        if self.drawable.is_empty() {
            self.reshuffle();
            reshuffled = true;
        }
        let card = self
            .drawable
            .pop()
            .expect("reshuffle repopulates the drawable pile");
        Draw { card, reshuffled }
    }

    /// Returns a card to the discard pile, face down.
    pub fn discard(&mut self, mut card: Card) {
        card.conceal();
        self.discarded.push(card);
    }

    /// Returns a batch of cards to the discard pile, used when hands are
    /// cleared at the end of a round.
    pub fn discard_all(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.discard(card);
        }
    }

    fn reshuffle(&mut self) {
        log::debug!(
            "reshuffling {} discarded cards into the drawable pile",
            self.discarded.len()
        );
        self.drawable.append(&mut self.discarded);
        self.drawable.shuffle(&mut self.rng);
    }

    pub fn drawable_len(&self) -> usize {
        self.drawable.len()
    }

    pub fn discarded_len(&self) -> usize {
        self.discarded.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}
