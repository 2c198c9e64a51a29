use crate::error::BetError;
use crate::hand::Hand;
use crate::outcome::RoundResult;
use crate::round::PlayerChoice;

/// Snapshot of the table handed to the display after every hand mutation.
#[derive(Debug)]
pub struct TableView<'a> {
    pub dealer_hand: &'a Hand,
    pub player_hand: &'a Hand,
    pub wager: f64,
    pub balance_after_wager: f64,
    /// Dealer cards concealed from the player, counted from the first
    /// card dealt.
    pub hidden_dealer_cards: usize,
}

/// Source of the player's decisions. Implementations block until an
/// answer is available; the engine re-asks if the answer is not in the
/// offered set.
pub trait InputProvider {
    /// Raw wager text, validated by the betting rules.
    fn request_wager(&mut self, minimum: f64, balance: f64) -> String;

    /// One of the offered choices.
    fn request_choice(&mut self, offered: &[PlayerChoice]) -> PlayerChoice;
}

/// Sink for everything worth showing. Purely informational; nothing is
/// returned to the engine.
pub trait DisplayNotifier {
    fn on_state_change(&mut self, view: &TableView<'_>);

    fn on_wager_rejected(&mut self, error: &BetError);

    fn on_round_result(&mut self, result: &RoundResult);
}
