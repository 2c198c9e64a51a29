use thiserror::Error;

/// Reasons a requested wager is turned away. All of these are recovered
/// by re-prompting; none of them end a round.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BetError {
    #[error("bet must be a positive number")]
    InvalidBet,
    #[error("bet of {offered} is below the table minimum of {minimum}")]
    BelowMinimum { offered: f64, minimum: f64 },
    #[error("bet of {offered} exceeds the available balance of {balance}")]
    InsufficientFunds { offered: f64, balance: f64 },
}

/// A draw was attempted with no cards left. The reshuffle contract makes
/// this unreachable in play, so it is fatal rather than recoverable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("drew from an empty deck")]
pub struct EmptyDeckError;
