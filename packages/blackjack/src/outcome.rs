use crate::hand::Hand;
use crate::rules::PayoutRatio;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Push,
    DealerBlackjack,
    PlayerBlackjack,
    PlayerBust,
    DealerBust,
    DealerWin,
    PlayerWin,
}

/// Settlement of one round. `delta` is the signed change applied to the
/// bankroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub outcome: RoundOutcome,
    pub player_total: u8,
    pub dealer_total: u8,
    pub wager: f64,
    pub delta: f64,
}

/// Settle the natural-21 cases right after the initial deal, if any apply.
///
/// Both naturals push (reported with a wager of 0); a lone dealer natural
/// costs the wager; a lone player natural pays at the blackjack ratio.
pub fn resolve_naturals(
    player: &Hand,
    dealer: &Hand,
    wager: f64,
    payout: PayoutRatio,
) -> Option<RoundResult> {
    let player_total = player.total();
    let dealer_total = dealer.total();

    if player.is_natural() && dealer.is_natural() {
        Some(RoundResult {
            outcome: RoundOutcome::Push,
            player_total,
            dealer_total,
            wager: 0.0,
            delta: 0.0,
        })
    } else if dealer.is_natural() {
        Some(RoundResult {
            outcome: RoundOutcome::DealerBlackjack,
            player_total,
            dealer_total,
            wager,
            delta: -wager,
        })
    } else if player.is_natural() {
        Some(RoundResult {
            outcome: RoundOutcome::PlayerBlackjack,
            player_total,
            dealer_total,
            wager,
            delta: payout.payout(wager),
        })
    } else {
        None
    }
}

/// Compare final hands once the player has stood and the dealer has
/// played out. Only called with a non-bust player hand; a player bust is
/// settled before the dealer ever draws.
pub fn resolve_showdown(player: &Hand, dealer: &Hand, wager: f64) -> RoundResult {
    debug_assert!(!player.is_bust());
    let player_total = player.total();
    let dealer_total = dealer.total();

    let (outcome, delta) = if dealer_total > 21 {
        (RoundOutcome::DealerBust, wager)
    } else if dealer_total == player_total {
        (RoundOutcome::Push, 0.0)
    } else if dealer_total > player_total {
        (RoundOutcome::DealerWin, -wager)
    } else {
        (RoundOutcome::PlayerWin, wager)
    };

    RoundResult {
        outcome,
        player_total,
        dealer_total,
        wager,
        delta,
    }
}
