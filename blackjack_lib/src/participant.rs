use crate::card::Card;
use crate::game::Action;
use crate::hand::Hand;
use serde::Serialize;

/// Default chip stacks, matching the classic table: the house is bankrolled
/// ten to one against the player.
pub const PLAYER_STARTING_CHIPS: i64 = 100;
pub const DEALER_STARTING_CHIPS: i64 = 1000;

/// Which policy drives a participant's turn. There is no subclassing: one
/// `Participant` type holds the shared chips-and-hands state, and the game
/// dispatches on the role; a `Player` is asked for decisions through the
/// table's collaborator, the `Dealer` deterministically draws to 17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Player,
    Dealer,
}

/// One side of the table: a chip balance and the hands it currently holds
/// (exactly one, except for a player who split a pair). The balance may dip
/// to zero or below; that is not an error, it is the bankruptcy signal that
/// ends the session.
pub struct Participant {
    role: Role,
    balance: i64,
    hands: Vec<Hand>,
}

impl Participant {
    /// Associated function to create a participant with a starting stack and
    /// one empty hand.
    pub fn new(role: Role, balance: i64) -> Participant {
        Participant {
            role,
            balance,
            hands: vec![Hand::new()],
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// A participant is bankrupt once their balance is no longer positive.
    pub fn is_bankrupt(&self) -> bool {
        self.balance <= 0
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// The playing options for the given hand, evaluated as a strict priority
    /// chain; the first matching arm decides the whole set. "Affordable" means
    /// the balance covers a doubled bet, which is also what a second, equal
    /// bet on a split hand costs.
    ///
    /// 1. splittable pair, affordable: hit, stand, double down, split
    /// 2. affordable and the hand scores 9 through 11: hit, stand, double down
    /// 3. splittable pair: hit, stand, split
    /// 4. otherwise: hit, stand
    ///
    /// A hand index that does not exist has no options.
    pub fn playing_options(&self, hand_idx: usize, bet: u64) -> Vec<Action> {
        let Some(hand) = self.hands.get(hand_idx) else {
            return Vec::new();
        };
        let affordable = i64::try_from(bet)
            .ok()
            .and_then(|b| b.checked_mul(2))
            .map_or(false, |doubled| self.balance >= doubled);
        if hand.can_split() && affordable {
            vec![Action::Hit, Action::Stand, Action::DoubleDown, Action::Split]
        } else if affordable && (9..=11).contains(&hand.value()) {
            vec![Action::Hit, Action::Stand, Action::DoubleDown]
        } else if hand.can_split() {
            vec![Action::Hit, Action::Stand, Action::Split]
        } else {
            vec![Action::Hit, Action::Stand]
        }
    }

    /// Method to collect a won bet.
    pub(crate) fn win(&mut self, amount: u64) {
        self.balance += amount as i64;
    }

    /// Method to pay out a lost bet. The balance is allowed to go negative.
    pub(crate) fn lose(&mut self, amount: u64) {
        self.balance -= amount as i64;
    }

    /// Replaces whatever hands are left with a single fresh one for the next
    /// round.
    pub(crate) fn begin_round(&mut self) {
        self.hands = vec![Hand::new()];
    }

    /// Drains every held card so the game can discard them at round end.
    pub(crate) fn clear_hands(&mut self) -> Vec<Card> {
        self.hands
            .drain(..)
            .flat_map(Hand::into_cards)
            .collect()
    }

    pub(crate) fn hand_mut(&mut self, hand_idx: usize) -> &mut Hand {
        &mut self.hands[hand_idx]
    }

    pub(crate) fn insert_hand(&mut self, at: usize, hand: Hand) {
        self.hands.insert(at, hand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn player_with(ranks: &[Rank], balance: i64) -> Participant {
        let mut participant = Participant::new(Role::Player, balance);
        for (i, &rank) in ranks.iter().enumerate() {
            let suit = if i % 2 == 0 { Suit::Spade } else { Suit::Heart };
            participant.hand_mut(0).receive(Card::new(rank, suit));
        }
        participant
    }

    #[test]
    fn eleven_with_funds_offers_double_down() {
        let player = player_with(&[Rank::Seven, Rank::Four], 100);
        assert_eq!(
            player.playing_options(0, 20),
            vec![Action::Hit, Action::Stand, Action::DoubleDown]
        );
    }

    #[test]
    fn eleven_without_funds_offers_only_hit_and_stand() {
        let player = player_with(&[Rank::Seven, Rank::Four], 30);
        assert_eq!(
            player.playing_options(0, 20),
            vec![Action::Hit, Action::Stand]
        );
    }

    #[test]
    fn pair_without_funds_still_offers_split() {
        let player = player_with(&[Rank::Eight, Rank::Eight], 30);
        assert_eq!(
            player.playing_options(0, 20),
            vec![Action::Hit, Action::Stand, Action::Split]
        );
    }

    #[test]
    fn options_for_a_missing_hand_are_empty() {
        let player = player_with(&[Rank::Eight, Rank::Eight], 100);
        assert!(player.playing_options(5, 20).is_empty());
    }

    #[test]
    fn pair_with_funds_offers_everything() {
        let player = player_with(&[Rank::Eight, Rank::Eight], 100);
        assert_eq!(
            player.playing_options(0, 20),
            vec![Action::Hit, Action::Stand, Action::DoubleDown, Action::Split]
        );
    }

    #[test]
    fn affordability_is_a_strict_double_of_the_bet() {
        // Balance exactly 2x the bet qualifies, one chip short does not.
        let player = player_with(&[Rank::Five, Rank::Six], 40);
        assert_eq!(
            player.playing_options(0, 20),
            vec![Action::Hit, Action::Stand, Action::DoubleDown]
        );
        let player = player_with(&[Rank::Five, Rank::Six], 39);
        assert_eq!(
            player.playing_options(0, 20),
            vec![Action::Hit, Action::Stand]
        );
    }

    #[test]
    fn split_hands_are_not_offered_another_split() {
        let mut player = player_with(&[Rank::Eight, Rank::Eight], 1000);
        let second = player.hand_mut(0).split();
        player.insert_hand(1, second);
        player.hand_mut(0).receive(Card::new(Rank::Eight, Suit::Club));
        // A re-paired split hand scoring 16: no split, no double down.
        assert_eq!(
            player.playing_options(0, 20),
            vec![Action::Hit, Action::Stand]
        );
    }

    #[test]
    fn bankruptcy_is_balance_at_or_below_zero() {
        let mut player = Participant::new(Role::Player, 20);
        assert!(!player.is_bankrupt());
        player.lose(20);
        assert_eq!(player.balance(), 0);
        assert!(player.is_bankrupt());
        player.lose(5);
        assert!(player.is_bankrupt());
    }
}
