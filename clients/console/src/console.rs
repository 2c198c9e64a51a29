use blackjack::{
    BetError, DisplayNotifier, InputProvider, PlayerChoice, RoundOutcome, RoundResult, TableView,
};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

const RULE: &str = "------------------------------";

/// Reads the player's answers from stdin.
pub struct ConsoleInput;

impl ConsoleInput {
    pub fn new() -> Self {
        Self
    }

    fn prompt(&self, text: &str) -> String {
        print!("{text}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return String::new();
        }
        line.trim().to_string()
    }

    /// Anything but an explicit no keeps the game going.
    pub fn confirm_continue(&mut self) -> bool {
        let answer = self.prompt("Keep playing? [y/n] ");
        !answer.eq_ignore_ascii_case("n")
    }
}

impl InputProvider for ConsoleInput {
    fn request_wager(&mut self, minimum: f64, balance: f64) -> String {
        self.prompt(&format!(
            "Place your bet! (minimum {minimum}, you have {balance}) "
        ))
    }

    fn request_choice(&mut self, offered: &[PlayerChoice]) -> PlayerChoice {
        let menu = offered
            .iter()
            .map(|choice| choice.to_string())
            .collect::<Vec<_>>()
            .join("/");
        loop {
            let answer = self.prompt(&format!("What would you like to do? [{menu}] "));
            match answer.to_lowercase().as_str() {
                "stand" | "stay" | "s" => return PlayerChoice::Stand,
                "hit" | "h" => return PlayerChoice::Hit,
                "double down" | "double" | "d" => return PlayerChoice::DoubleDown,
                _ => println!("'{answer}' is not an option."),
            }
        }
    }
}

/// Renders the table to stdout, python-casino style: cleared screen, the
/// dealer's concealed cards as question marks, a short pause between
/// reveals so the deal reads like a deal.
pub struct ConsoleDisplay {
    fast: bool,
}

impl ConsoleDisplay {
    pub fn new(fast: bool) -> Self {
        Self { fast }
    }

    pub fn shuffling(&self) {
        println!("Dealer is shuffling the deck...");
        self.pause_secs(3);
    }

    fn pause(&self) {
        self.pause_secs(1);
    }

    fn pause_secs(&self, secs: u64) {
        if !self.fast {
            thread::sleep(Duration::from_secs(secs));
        }
    }

    fn draw_board(&self, view: &TableView<'_>) {
        // Reset the terminal before redrawing.
        print!("\x1bc");
        println!("Dealer Hand\n{RULE}");
        for _ in 0..view.hidden_dealer_cards {
            println!("????? of ??????");
        }
        let visible = &view.dealer_hand.cards[view.hidden_dealer_cards..];
        for card in visible {
            println!("{card}");
        }
        if view.hidden_dealer_cards > 0 {
            let partial: u32 = visible.iter().map(|card| card.value() as u32).sum();
            println!("Dealer Total: {partial}?");
        } else {
            println!("Dealer Total: {}", view.dealer_hand.total());
        }
        println!("\n");
        println!("Player Hand\n{RULE}");
        for card in &view.player_hand.cards {
            println!("{card}");
        }
        println!("Player Total: {}", view.player_hand.total());
        println!("\n{RULE}");
        println!("Current bet: ${:>24}", view.wager);
        println!("Chips remaining: ${:>20}", view.balance_after_wager);
        println!("{RULE}\n");
    }
}

impl DisplayNotifier for ConsoleDisplay {
    fn on_state_change(&mut self, view: &TableView<'_>) {
        self.draw_board(view);
        self.pause();
    }

    fn on_wager_rejected(&mut self, error: &BetError) {
        println!("{error}");
    }

    fn on_round_result(&mut self, result: &RoundResult) {
        match result.outcome {
            RoundOutcome::Push if result.wager == 0.0 => {
                println!("Both dealer and player start with blackjack. PUSH!");
            }
            RoundOutcome::Push => {
                println!(
                    "Both dealer and player scored {}. Push!",
                    result.player_total
                );
            }
            RoundOutcome::DealerBlackjack => {
                println!("Dealer got a blackjack. Sorry, you lost ${}.", result.wager);
            }
            RoundOutcome::PlayerBlackjack => {
                println!("You got a blackjack!! You win ${}!", result.delta);
            }
            RoundOutcome::PlayerBust => {
                println!("You bust. You lose ${}.", result.wager);
            }
            RoundOutcome::DealerBust => {
                println!("Dealer busts. You win ${}!", result.wager);
            }
            RoundOutcome::DealerWin => {
                println!(
                    "Dealer's {} beats your {}. You lose ${}.",
                    result.dealer_total, result.player_total, result.wager
                );
            }
            RoundOutcome::PlayerWin => {
                println!(
                    "Your {} beats dealer's {}! You win ${}!",
                    result.player_total, result.dealer_total, result.wager
                );
            }
        }
    }
}
