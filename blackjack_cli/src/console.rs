//! Console implementation of the engine's collaborator trait: ASCII card art,
//! ask-until-valid prompts and per-round result lines.

use blackjack_lib::{
    Action, CardView, GameEvent, HandView, RoundSummary, TableIo, TableView, Winner,
};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};

/// Reads one trimmed line after printing a prompt. Returns `None` once the
/// input is exhausted (EOF) or unreadable, so callers can wind the session
/// down instead of re-prompting forever.
fn read_prompt<R: BufRead>(reader: &mut R, message: &str) -> Option<String> {
    print!("{message}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt(message: &str) -> Option<String> {
    read_prompt(&mut io::stdin().lock(), message)
}

/// Leaves the table when stdin runs dry mid-round.
fn quit_table() -> ! {
    println!();
    println!("Reached the end of input -- leaving the table.");
    std::process::exit(0);
}

/// Renders one card as four rows of text art, face-down cards as a blank back.
fn card_art(card: &CardView) -> [String; 4] {
    if !card.face_up {
        return [
            " ___ ".to_string(),
            "|## |".to_string(),
            "|###|".to_string(),
            "|_##|".to_string(),
        ];
    }
    let rank = card.rank.symbol();
    let suit = card.suit.symbol();
    if rank.len() == 2 {
        // The ten is the only two-character rank.
        [
            " ___ ".to_string(),
            format!("|{rank} |"),
            format!("| {suit} |"),
            format!("|_{rank}|"),
        ]
    } else {
        [
            " ___ ".to_string(),
            format!("|{rank}  |"),
            format!("| {suit} |"),
            format!("|__{rank}|"),
        ]
    }
}

/// Formats the total of the face-up cards, showing soft hands as "7/17".
fn totals_label(cards: &[CardView]) -> String {
    let mut hard: u32 = 0;
    let mut aces = 0;
    for card in cards.iter().filter(|c| c.face_up) {
        let value = card.rank.value() as u32;
        if value == 11 {
            aces += 1;
            hard += 1;
        } else {
            hard += value;
        }
    }
    if aces > 0 && hard + 10 <= 21 {
        format!("{}/{}", hard, hard + 10)
    } else {
        hard.to_string()
    }
}

/// Formats one labelled hand, either as rows of card art or, in quiet mode,
/// as a single line of compact card symbols under the same totals header.
fn render_hand(label: &str, hand: &HandView, quiet: bool) -> String {
    let mut out = format!("{} ({}):\n", label, totals_label(&hand.cards));
    if quiet {
        let symbols: Vec<String> = hand
            .cards
            .iter()
            .map(|card| {
                if card.face_up {
                    format!("{}{}", card.rank.symbol(), card.suit.symbol())
                } else {
                    "##".to_string()
                }
            })
            .collect();
        out.push_str(&symbols.join(" "));
        out.push('\n');
    } else {
        let art: Vec<[String; 4]> = hand.cards.iter().map(card_art).collect();
        for row in 0..4 {
            let line: Vec<&str> = art.iter().map(|card| card[row].as_str()).collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
    }
    out
}

/// The live console player. Optionally mirrors each round summary to a
/// JSON-lines transcript file.
pub struct Console {
    transcript: Option<BufWriter<File>>,
    quiet: bool,
    hands_in_play: usize,
}

impl Console {
    pub fn new(transcript: Option<File>, quiet: bool) -> Console {
        Console {
            transcript: transcript.map(BufWriter::new),
            quiet,
            hands_in_play: 1,
        }
    }

    fn print_hand(&self, label: &str, hand: &HandView) {
        print!("{}", render_hand(label, hand, self.quiet));
    }

    fn hand_prefix(&self, hand: usize) -> String {
        if self.hands_in_play > 1 {
            format!("Hand {}: ", hand + 1)
        } else {
            String::new()
        }
    }
}

impl TableIo for Console {
    fn place_bet(&mut self, balance: i64) -> u64 {
        loop {
            let Some(line) = prompt("How much would you like to bet? ") else {
                quit_table();
            };
            match line.parse::<u64>() {
                Ok(bet) if bet > 0 && i64::try_from(bet).map_or(false, |b| b <= balance) => {
                    return bet;
                }
                _ => println!("Please bet between 1 and {balance}."),
            }
        }
    }

    fn choose_action(&mut self, view: TableView, offered: &[Action]) -> Action {
        if let Some(active) = view.active_hand {
            if view.player_hands.len() > 1 {
                println!("Playing hand {}.", active + 1);
            }
        }
        let menu = offered
            .iter()
            .map(|action| match action {
                Action::Hit => "(H)it",
                Action::Stand => "(S)tand",
                Action::DoubleDown => "(D)ouble Down",
                Action::Split => "(Sp)lit",
            })
            .collect::<Vec<&str>>()
            .join(", ");
        loop {
            let Some(line) = prompt(&format!("{menu}? ")) else {
                quit_table();
            };
            let choice = match line.to_lowercase().as_str() {
                "h" => Some(Action::Hit),
                "s" => Some(Action::Stand),
                "d" => Some(Action::DoubleDown),
                "sp" => Some(Action::Split),
                _ => None,
            };
            match choice {
                Some(action) if offered.contains(&action) => return action,
                _ => println!("Please input one of the letters in parentheses."),
            }
        }
    }

    fn another_round(&mut self) -> bool {
        loop {
            // EOF here simply ends the session, letting the goodbye screen run.
            let Some(line) = prompt("Play again? (y/n) ") else {
                return false;
            };
            match line.to_lowercase().as_str() {
                "y" => return true,
                "n" => return false,
                _ => println!("Please type either y or n."),
            }
        }
    }

    fn show_table(&mut self, view: TableView) {
        self.hands_in_play = view.player_hands.len();
        // Skip snapshots from the middle of the opening deal; the table is
        // only worth drawing once every hand has its cards.
        if view.dealer_hand.cards.len() < 2
            || view.player_hands.iter().any(|hand| hand.cards.len() < 2)
        {
            return;
        }
        println!();
        self.print_hand("Dealer's hand", &view.dealer_hand);
        if view.player_hands.len() == 1 {
            self.print_hand("Your hand", &view.player_hands[0]);
        } else {
            for (i, hand) in view.player_hands.iter().enumerate() {
                let marker = if view.active_hand == Some(i) { " <--" } else { "" };
                self.print_hand(&format!("Your hand {}{}", i + 1, marker), hand);
            }
        }
    }

    fn notify(&mut self, event: GameEvent) {
        match event {
            GameEvent::Reshuffled => {
                println!("The deck ran out -- shuffling the discards back in.")
            }
            GameEvent::Blackjack => println!("BLACKJACK!"),
            GameEvent::PlayerBust { hand } => {
                println!("{}You BUSTED!", self.hand_prefix(hand))
            }
            GameEvent::DealerBust => println!("The dealer BUSTED!"),
            GameEvent::HandSettled { hand, winner, .. } => {
                let message = match winner {
                    Winner::Player => "You win!",
                    Winner::Dealer => "Sorry, the dealer wins.",
                    Winner::Push => "You tied!",
                };
                println!("{}{}", self.hand_prefix(hand), message);
            }
        }
    }

    fn round_over(&mut self, summary: &RoundSummary) {
        println!(
            "Dealer money: ${}\nPlayer money: ${}",
            summary.dealer_balance, summary.player_balance
        );
        if let Some(writer) = self.transcript.as_mut() {
            match serde_json::to_string(summary) {
                Ok(line) => {
                    if let Err(e) = writeln!(writer, "{line}").and_then(|_| writer.flush()) {
                        log::warn!("failed to write transcript line: {e}");
                    }
                }
                Err(e) => log::warn!("failed to serialize round summary: {e}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_lib::{HandState, Rank, Suit};

    fn view_card(rank: Rank, face_up: bool) -> CardView {
        CardView {
            rank,
            suit: Suit::Spade,
            face_up,
        }
    }

    #[test]
    fn soft_hands_show_both_totals() {
        let cards = vec![view_card(Rank::Ace, true), view_card(Rank::Six, true)];
        assert_eq!(totals_label(&cards), "7/17");
    }

    #[test]
    fn hard_hands_show_one_total() {
        let cards = vec![
            view_card(Rank::Ace, true),
            view_card(Rank::Six, true),
            view_card(Rank::Nine, true),
        ];
        assert_eq!(totals_label(&cards), "16");
    }

    #[test]
    fn face_down_cards_are_excluded_from_the_total() {
        let cards = vec![view_card(Rank::King, false), view_card(Rank::Nine, true)];
        assert_eq!(totals_label(&cards), "9");
    }

    #[test]
    fn ten_uses_the_narrow_card_face() {
        let art = card_art(&view_card(Rank::Ten, true));
        assert_eq!(art[1], "|10 |");
        assert_eq!(art[3], "|_10|");
        let art = card_art(&view_card(Rank::Ace, true));
        assert_eq!(art[1], "|A  |");
        assert_eq!(art[3], "|__A|");
    }

    #[test]
    fn face_down_cards_render_as_backs() {
        let art = card_art(&view_card(Rank::King, false));
        assert_eq!(art[2], "|###|");
    }

    #[test]
    fn exhausted_input_stops_the_prompt() {
        let mut input = &b""[..];
        assert_eq!(read_prompt(&mut input, "bet? "), None);
    }

    #[test]
    fn prompt_reads_one_trimmed_line_then_reports_the_end() {
        let mut input = &b"20\n"[..];
        assert_eq!(read_prompt(&mut input, "bet? "), Some("20".to_string()));
        assert_eq!(read_prompt(&mut input, "bet? "), None);
    }

    #[test]
    fn quiet_mode_swaps_card_art_for_symbols() {
        let hand = HandView {
            cards: vec![view_card(Rank::Ace, true), view_card(Rank::King, false)],
            visible_value: 11,
            state: HandState::Active,
        };
        let quiet = render_hand("Your hand", &hand, true);
        assert_eq!(quiet, "Your hand (1/11):\nA\u{2660} ##\n");

        let loud = render_hand("Your hand", &hand, false);
        assert!(loud.starts_with("Your hand (1/11):\n"));
        assert!(loud.contains(" ___   ___ "));
        assert!(loud.contains("|A  | |## |"));
    }
}
