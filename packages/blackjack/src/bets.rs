use crate::error::BetError;
use crate::hand::Hand;

/// Validate a raw wager request against the table minimum and the
/// player's balance. Blank input is taken as a bet of exactly the
/// minimum. Accepts a bet equal to the minimum and a bet equal to the
/// full balance.
pub fn validate_wager(raw: &str, balance: f64, minimum: f64) -> Result<f64, BetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(minimum);
    }

    let offered: f64 = trimmed.parse().map_err(|_| BetError::InvalidBet)?;
    if !offered.is_finite() || offered <= 0.0 {
        return Err(BetError::InvalidBet);
    }
    if offered < minimum {
        return Err(BetError::BelowMinimum { offered, minimum });
    }
    if offered > balance {
        return Err(BetError::InsufficientFunds { offered, balance });
    }
    Ok(offered)
}

/// Doubling down is offered on exactly two cards, and only when the
/// balance covers the doubled wager.
pub fn can_double_down(hand: &Hand, balance: f64, wager: f64) -> bool {
    hand.len() == 2 && balance >= 2.0 * wager
}
