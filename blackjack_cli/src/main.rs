mod console;

use blackjack_lib::{Deck, Game, Role, SessionSummary, DEALER_STARTING_CHIPS, PLAYER_STARTING_CHIPS};
use clap::Parser;
use console::Console;
use std::fs::File;
use std::path::PathBuf;

/// Play blackjack against the house from the terminal.
#[derive(Parser)]
#[command(name = "blackjack", version)]
struct Cli {
    /// The player's starting chips.
    #[arg(long, default_value_t = PLAYER_STARTING_CHIPS)]
    chips: i64,

    /// The dealer's starting chips.
    #[arg(long, default_value_t = DEALER_STARTING_CHIPS)]
    dealer_chips: i64,

    /// Seed the deck for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Append a JSON line per round to this file.
    #[arg(long)]
    transcript: Option<PathBuf>,

    /// Print hands as compact card symbols instead of card art.
    #[arg(short = 'q', long)]
    quiet_art: bool,
}

const INSTRUCTIONS: &str = "
             Blackjack!
Your goal is to gain chips by beating
the dealer in hands of blackjack. You
win by hitting 21 or getting closer to
21 than the dealer. Jacks, Queens, and
Kings are worth 10. Aces are worth either
1 or 11. Every other card is worth the
printed value. Good luck!
";

fn goodbye(summary: &SessionSummary, starting_chips: i64) {
    match summary.bankrupt {
        Some(Role::Dealer) => println!("The dealer ran out of money!"),
        Some(Role::Player) => println!("You ran out of chips!"),
        None => {}
    }
    println!("Thanks for playing!");
    if summary.player_balance > starting_chips {
        println!("You made ${}!", summary.player_balance - starting_chips);
    } else if summary.player_balance <= 0 {
        println!("You lost all your money!");
    } else if summary.player_balance < starting_chips {
        println!(
            "Sorry, you lost ${}.",
            starting_chips - summary.player_balance
        );
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let transcript = cli.transcript.as_ref().map(|path| {
        File::create(path).unwrap_or_else(|e| {
            eprintln!("error: cannot open transcript file {}: {e}", path.display());
            std::process::exit(1);
        })
    });

    let deck = match cli.seed {
        Some(seed) => Deck::seeded(seed),
        None => Deck::new(),
    };

    println!("{INSTRUCTIONS}");
    println!(
        "Dealer money: ${}\nPlayer money: ${}",
        cli.dealer_chips, cli.chips
    );

    let console = Console::new(transcript, cli.quiet_art);
    let mut game = Game::new(deck, cli.chips, cli.dealer_chips, console);
    let summary = game.run();

    goodbye(&summary, cli.chips);
}
