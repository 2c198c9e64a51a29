use blackjack::{GameSession, PayoutRatio, TableRules};
use clap::Parser;

mod console;
use console::{ConsoleDisplay, ConsoleInput};

type BoxErr = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "blackjack", about = "Single-player blackjack against the house")]
struct Cli {
    /// Chips the player sits down with
    #[arg(long, env = "STARTING_BALANCE", default_value_t = 500.0)]
    starting_balance: f64,

    /// Smallest wager the table accepts
    #[arg(long, env = "MIN_BET", default_value_t = 5.0)]
    min_bet: f64,

    /// Rebuild the deck when fewer cards than this remain
    #[arg(long, env = "RESHUFFLE_THRESHOLD", default_value_t = 16)]
    reshuffle_threshold: usize,

    /// Blackjack payout ratio (e.g. "3:2")
    #[arg(long, default_value = "3:2")]
    blackjack_payout: String,

    /// Skip the dealing delays
    #[arg(long)]
    fast: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("game aborted: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), BoxErr> {
    let rules = TableRules {
        starting_balance: cli.starting_balance,
        minimum_bet: cli.min_bet,
        reshuffle_threshold: cli.reshuffle_threshold,
        blackjack_payout: parse_payout_ratio(&cli.blackjack_payout)?,
    };

    let mut session = GameSession::new(rules);
    let mut input = ConsoleInput::new();
    let mut display = ConsoleDisplay::new(cli.fast);

    display.shuffling();
    loop {
        if !session.can_continue() {
            println!("I am sorry, you do not have enough chips to continue. Goodbye.");
            break;
        }
        session.play_round(&mut input, &mut display)?;
        if !input.confirm_continue() {
            println!("You walked away with ${}. Goodbye!", session.balance());
            break;
        }
    }
    Ok(())
}

fn parse_payout_ratio(s: &str) -> Result<PayoutRatio, BoxErr> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid payout ratio '{s}', expected format 'N:D'").into());
    }
    Ok(PayoutRatio::new(parts[0].parse()?, parts[1].parse()?)?)
}
