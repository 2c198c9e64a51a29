mod card;
mod deck;
mod hand;
mod chips;
mod rules;
mod bets;
mod outcome;
mod round;
mod table;
mod session;
mod error;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use hand::{hand_total, is_bust, is_natural, Hand};
pub use chips::Bankroll;
pub use rules::{PayoutRatio, TableRules};
pub use bets::{can_double_down, validate_wager};
pub use outcome::{resolve_naturals, resolve_showdown, RoundOutcome, RoundResult};
pub use round::{dealer_should_hit, PlayerChoice, Round, RoundPhase, TurnState};
pub use table::{DisplayNotifier, InputProvider, TableView};
pub use session::GameSession;
pub use error::{BetError, EmptyDeckError};
