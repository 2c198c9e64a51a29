use serde::{Deserialize, Serialize};

/// Payout multiplier as a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRatio {
    pub numerator: u16,
    pub denominator: u16,
}

impl PayoutRatio {
    pub const THREE_TO_TWO: Self = Self {
        numerator: 3,
        denominator: 2,
    };
    pub const ONE_TO_ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub fn new(numerator: u16, denominator: u16) -> Result<Self, &'static str> {
        if denominator == 0 {
            return Err("Denominator cannot be zero");
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn payout(&self, wager: f64) -> f64 {
        wager * self.numerator as f64 / self.denominator as f64
    }
}

/// Table configuration consumed by the round engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRules {
    /// Chips the player sits down with.
    pub starting_balance: f64,

    /// Smallest wager the table accepts.
    pub minimum_bet: f64,

    /// Rebuild and reshuffle the deck when fewer cards than this remain
    /// at the start of a round.
    pub reshuffle_threshold: usize,

    /// Payout for a winning natural (commonly 3:2).
    pub blackjack_payout: PayoutRatio,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            starting_balance: 500.0,
            minimum_bet: 5.0,
            reshuffle_threshold: 16,
            blackjack_payout: PayoutRatio::THREE_TO_TWO,
        }
    }
}
