use crate::deck::Deck;
use crate::error::GameError;
use crate::io::{GameEvent, HandView, TableIo, TableView};
use crate::participant::{Participant, Role};
use serde::Serialize;
use std::fmt::{self, Display};

/// The dealer stands at this value or above, and has no other decision.
pub const DEALER_STAND: u8 = 17;

/// The decisions a player can be offered on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Hit,
    Stand,
    DoubleDown,
    Split,
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Hit => write!(f, "hit"),
            Action::Stand => write!(f, "stand"),
            Action::DoubleDown => write!(f, "double down"),
            Action::Split => write!(f, "split"),
        }
    }
}

/// Who took a settled hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Player,
    Dealer,
    Push,
}

/// The settled result of one player hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandResult {
    pub winner: Winner,
    pub bet: u64,
}

/// Everything a round produced, for result lines and transcripts.
#[derive(Debug, Clone, Serialize)]
pub struct RoundSummary {
    pub hands: Vec<HandResult>,
    pub blackjack: bool,
    pub player_balance: i64,
    pub dealer_balance: i64,
}

/// Where the session ended up when the table closed.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub rounds_played: u32,
    pub player_balance: i64,
    pub dealer_balance: i64,
    /// Player winnings over the session; negative when chips were lost.
    pub player_net: i64,
    pub bankrupt: Option<Role>,
}

/// The round engine. Owns the deck and both participants, is generic over the
/// collaborator that supplies bets and decisions, and drives each round
/// through betting, dealing, the player's hands, the dealer's draw-to-17 and
/// settlement. Strictly single threaded: one decision point at a time, every
/// card moving by ownership between the deck and exactly one hand.
pub struct Game<C: TableIo> {
    deck: Deck,
    player: Participant,
    dealer: Participant,
    io: C,
    /// Bets for the current round, one per player hand, doubled in place on a
    /// double-down and duplicated on a split. Chips only move at settlement.
    bets: Vec<u64>,
    rounds_played: u32,
}

impl<C: TableIo> Game<C> {
    /// Associated function to set up a table with the given deck and stacks.
    pub fn new(deck: Deck, player_chips: i64, dealer_chips: i64, io: C) -> Game<C> {
        Game {
            deck,
            player: Participant::new(Role::Player, player_chips),
            dealer: Participant::new(Role::Dealer, dealer_chips),
            io,
            bets: Vec::new(),
            rounds_played: 0,
        }
    }

    pub fn player(&self) -> &Participant {
        &self.player
    }

    pub fn dealer(&self) -> &Participant {
        &self.dealer
    }

    pub fn io(&self) -> &C {
        &self.io
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Plays rounds until someone goes bankrupt or the player declines to
    /// continue, then reports how the session ended.
    pub fn run(&mut self) -> SessionSummary {
        let starting_balance = self.player.balance();
        loop {
            let summary = self.play_round();
            self.rounds_played += 1;
            self.io.round_over(&summary);
            // Bankruptcy is terminal before anyone is offered another bet.
            if self.player.is_bankrupt() || self.dealer.is_bankrupt() {
                break;
            }
            if !self.io.another_round() {
                break;
            }
        }
        SessionSummary {
            rounds_played: self.rounds_played,
            player_balance: self.player.balance(),
            dealer_balance: self.dealer.balance(),
            player_net: self.player.balance() - starting_balance,
            bankrupt: if self.player.is_bankrupt() {
                Some(Role::Player)
            } else if self.dealer.is_bankrupt() {
                Some(Role::Dealer)
            } else {
                None
            },
        }
    }

    /// Plays a single round from bet to settlement and returns its summary.
    pub fn play_round(&mut self) -> RoundSummary {
        let bet = self.take_bet();
        self.bets = vec![bet];
        log::debug!("round {} opens with a bet of {}", self.rounds_played + 1, bet);

        self.deal_initial_hands();

        // A natural short-circuits the round: immediate 1:1 win, the dealer's
        // hole card never comes into play.
        if self.player.hands()[0].blackjack() {
            self.io.notify(GameEvent::Blackjack);
            self.player.win(bet);
            self.dealer.lose(bet);
            self.io.notify(GameEvent::HandSettled {
                hand: 0,
                winner: Winner::Player,
                amount: bet,
            });
            let hands = vec![HandResult {
                winner: Winner::Player,
                bet,
            }];
            self.sweep_cards();
            return self.round_summary(hands, true);
        }

        self.player_turns();

        // No reason to play out the dealer against nothing but busts.
        if self.player.hands().iter().any(|hand| !hand.bust()) {
            self.dealer_turn();
        }

        let hands = self.settle();
        self.sweep_cards();
        self.round_summary(hands, false)
    }

    /// Applies one action to the given player hand. An unknown hand index or
    /// an action outside the currently offered set is rejected without
    /// mutating any state.
    pub fn apply_action(&mut self, hand_idx: usize, action: Action) -> Result<(), GameError> {
        if hand_idx >= self.bets.len() || hand_idx >= self.player.hands().len() {
            return Err(GameError::NoSuchHand { hand: hand_idx });
        }
        let offered = self.player.playing_options(hand_idx, self.bets[hand_idx]);
        if !offered.contains(&action) {
            return Err(GameError::UnavailableAction { action });
        }
        match action {
            Action::Hit => {
                self.deal_to_player(hand_idx);
                if self.player.hands()[hand_idx].bust() {
                    self.io.notify(GameEvent::PlayerBust { hand: hand_idx });
                }
            }
            Action::Stand => self.player.hand_mut(hand_idx).stand(),
            Action::DoubleDown => {
                // Double the bet, take exactly one card, forced stand.
                self.bets[hand_idx] *= 2;
                self.deal_to_player(hand_idx);
                if self.player.hands()[hand_idx].bust() {
                    self.io.notify(GameEvent::PlayerBust { hand: hand_idx });
                } else {
                    self.player.hand_mut(hand_idx).stand();
                }
            }
            Action::Split => {
                let second = self.player.hand_mut(hand_idx).split();
                self.player.insert_hand(hand_idx + 1, second);
                self.bets.insert(hand_idx + 1, self.bets[hand_idx]);
                // Each half of the pair is completed by one draw right away.
                self.deal_to_player(hand_idx);
                self.deal_to_player(hand_idx + 1);
            }
        }
        Ok(())
    }

    /// Asks the collaborator for a bet until the contract `0 < bet <= balance`
    /// holds. Violations are logged and re-queried, never applied.
    fn take_bet(&mut self) -> u64 {
        loop {
            let balance = self.player.balance();
            let bet = self.io.place_bet(balance);
            if bet > 0 && i64::try_from(bet).map_or(false, |b| b <= balance) {
                return bet;
            }
            log::warn!(
                "collaborator broke the bet contract: {}",
                GameError::InvalidBet { bet, balance }
            );
        }
    }

    fn deal_initial_hands(&mut self) {
        self.player.begin_round();
        self.dealer.begin_round();

        self.deal_to_player(0);
        // The dealer's first card is the hole card and stays face down.
        let hole = self.draw_card();
        self.dealer.hand_mut(0).receive(hole);
        self.show(None);
        self.deal_to_player(0);
        let mut up_card = self.draw_card();
        up_card.reveal();
        self.dealer.hand_mut(0).receive(up_card);
        self.show(None);
    }

    /// Runs the player's decision loop over every hand in order. Split hands
    /// are appended right after their parent, so index order is play order.
    fn player_turns(&mut self) {
        let mut hand_idx = 0;
        while hand_idx < self.player.hands().len() {
            while self.player.hands()[hand_idx].is_active() {
                let offered = self.player.playing_options(hand_idx, self.bets[hand_idx]);
                let view = self.table_view(Some(hand_idx));
                let action = self.io.choose_action(view, &offered);
                if let Err(e) = self.apply_action(hand_idx, action) {
                    log::warn!("collaborator broke the action contract: {}", e);
                }
            }
            hand_idx += 1;
        }
    }

    /// Reveals the hole card, then draws until the dealer's hand reaches 17
    /// or busts.
    fn dealer_turn(&mut self) {
        self.dealer.hand_mut(0).reveal_all();
        self.show(None);
        while self.dealer.hands()[0].value() < DEALER_STAND {
            let mut card = self.draw_card();
            card.reveal();
            self.dealer.hand_mut(0).receive(card);
            self.show(None);
        }
        if self.dealer.hands()[0].bust() {
            self.io.notify(GameEvent::DealerBust);
        }
    }

    /// Settles every player hand in order against the one dealer hand and
    /// moves the chips. A busted player hand loses even to a busted dealer.
    fn settle(&mut self) -> Vec<HandResult> {
        let dealer_value = self.dealer.hands()[0].value();
        let dealer_bust = self.dealer.hands()[0].bust();
        let mut results = Vec::with_capacity(self.player.hands().len());
        for hand_idx in 0..self.player.hands().len() {
            let hand = &self.player.hands()[hand_idx];
            let bet = self.bets[hand_idx];
            let winner = if hand.bust() {
                Winner::Dealer
            } else if dealer_bust || hand.value() > dealer_value {
                Winner::Player
            } else if hand.value() < dealer_value {
                Winner::Dealer
            } else {
                Winner::Push
            };
            match winner {
                Winner::Player => {
                    self.player.win(bet);
                    self.dealer.lose(bet);
                }
                Winner::Dealer => {
                    self.player.lose(bet);
                    self.dealer.win(bet);
                }
                Winner::Push => {}
            }
            self.io.notify(GameEvent::HandSettled {
                hand: hand_idx,
                winner,
                amount: bet,
            });
            results.push(HandResult { winner, bet });
        }
        results
    }

    /// Draws one card to the given player hand, face up, and snapshots.
    fn deal_to_player(&mut self, hand_idx: usize) {
        let mut card = self.draw_card();
        card.reveal();
        self.player.hand_mut(hand_idx).receive(card);
        self.show(Some(hand_idx));
    }

    /// Draws from the deck, forwarding an auto-reshuffle as an event.
    fn draw_card(&mut self) -> crate::card::Card {
        let draw = self.deck.draw();
        if draw.reshuffled {
            self.io.notify(GameEvent::Reshuffled);
        }
        draw.card
    }

    /// Returns every card in play to the discard pile.
    fn sweep_cards(&mut self) {
        let cards = self.player.clear_hands();
        self.deck.discard_all(cards);
        let cards = self.dealer.clear_hands();
        self.deck.discard_all(cards);
    }

    fn round_summary(&self, hands: Vec<HandResult>, blackjack: bool) -> RoundSummary {
        RoundSummary {
            hands,
            blackjack,
            player_balance: self.player.balance(),
            dealer_balance: self.dealer.balance(),
        }
    }

    fn show(&mut self, active_hand: Option<usize>) {
        let view = self.table_view(active_hand);
        self.io.show_table(view);
    }

    fn table_view(&self, active_hand: Option<usize>) -> TableView {
        TableView {
            dealer_hand: HandView::of(&self.dealer.hands()[0]),
            player_hands: self.player.hands().iter().map(HandView::of).collect(),
            active_hand,
            bets: self.bets.clone(),
            player_balance: self.player.balance(),
            dealer_balance: self.dealer.balance(),
        }
    }
}
