use crate::bets::can_double_down;
use crate::deck::Deck;
use crate::error::EmptyDeckError;
use crate::hand::Hand;
use crate::outcome::{resolve_naturals, resolve_showdown, RoundOutcome, RoundResult};
use crate::rules::PayoutRatio;
use crate::table::{DisplayNotifier, InputProvider, TableView};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Dealing,
    CheckingNaturals,
    PlayerTurn,
    DealerTurn,
    Settling,
    Done,
}

/// A decision the player can make during their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerChoice {
    Stand,
    Hit,
    DoubleDown,
}

impl fmt::Display for PlayerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerChoice::Stand => "stand",
            PlayerChoice::Hit => "hit",
            PlayerChoice::DoubleDown => "double down",
        };
        write!(f, "{name}")
    }
}

/// How the player's turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Stood,
    Busted,
}

/// The dealer draws below 17 and stands on every 17, soft or hard.
pub fn dealer_should_hit(hand: &Hand) -> bool {
    hand.total() < 17
}

/// State of one round: both hands, the live wager, and the phase. The
/// deck and bankroll stay with the session; the round borrows the deck
/// per draw and never touches the balance directly.
#[derive(Debug)]
pub struct Round {
    pub player_hand: Hand,
    pub dealer_hand: Hand,
    pub wager: f64,
    pub phase: RoundPhase,
}

impl Round {
    pub fn new(wager: f64) -> Self {
        Self {
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            wager,
            phase: RoundPhase::Dealing,
        }
    }

    fn notify(&self, display: &mut dyn DisplayNotifier, balance: f64, hidden: usize) {
        display.on_state_change(&TableView {
            dealer_hand: &self.dealer_hand,
            player_hand: &self.player_hand,
            wager: self.wager,
            balance_after_wager: balance - self.wager,
            hidden_dealer_cards: hidden.min(self.dealer_hand.len()),
        });
    }

    /// Classic interleaved deal: player, dealer, player, dealer. The
    /// dealer's cards stay concealed until the deal is complete, then the
    /// up card is shown.
    pub fn deal(
        &mut self,
        deck: &mut Deck,
        balance: f64,
        display: &mut dyn DisplayNotifier,
    ) -> Result<(), EmptyDeckError> {
        for _ in 0..2 {
            self.player_hand.add_card(deck.draw()?);
            self.notify(display, balance, 2);
            self.dealer_hand.add_card(deck.draw()?);
            self.notify(display, balance, 2);
        }
        self.phase = RoundPhase::CheckingNaturals;
        self.notify(display, balance, 1);
        Ok(())
    }

    /// Short-circuit the round if either side was dealt a natural.
    pub fn check_naturals(&mut self, payout: PayoutRatio) -> Option<RoundResult> {
        let result = resolve_naturals(&self.player_hand, &self.dealer_hand, self.wager, payout);
        self.phase = if result.is_some() {
            RoundPhase::Settling
        } else {
            RoundPhase::PlayerTurn
        };
        result
    }

    /// Drive the player's choices until they stand, double down, or bust.
    ///
    /// The offered set is recomputed every iteration; a choice outside it
    /// is discarded and re-requested with no other effect. Doubling down
    /// doubles the wager, draws exactly one card, and stands.
    pub fn player_turn(
        &mut self,
        deck: &mut Deck,
        balance: f64,
        input: &mut dyn InputProvider,
        display: &mut dyn DisplayNotifier,
    ) -> Result<TurnState, EmptyDeckError> {
        loop {
            if self.player_hand.is_bust() {
                self.phase = RoundPhase::Settling;
                return Ok(TurnState::Busted);
            }

            let offered: &[PlayerChoice] =
                if can_double_down(&self.player_hand, balance, self.wager) {
                    &[PlayerChoice::Stand, PlayerChoice::Hit, PlayerChoice::DoubleDown]
                } else {
                    &[PlayerChoice::Stand, PlayerChoice::Hit]
                };

            let choice = loop {
                let candidate = input.request_choice(offered);
                if offered.contains(&candidate) {
                    break candidate;
                }
                log::debug!("choice {candidate} is not on offer, asking again");
            };

            match choice {
                PlayerChoice::Stand => {
                    self.phase = RoundPhase::DealerTurn;
                    return Ok(TurnState::Stood);
                }
                PlayerChoice::Hit => {
                    self.player_hand.add_card(deck.draw()?);
                    self.notify(display, balance, 1);
                }
                PlayerChoice::DoubleDown => {
                    self.wager *= 2.0;
                    self.player_hand.add_card(deck.draw()?);
                    self.notify(display, balance, 1);
                    self.phase = if self.player_hand.is_bust() {
                        RoundPhase::Settling
                    } else {
                        RoundPhase::DealerTurn
                    };
                    return Ok(if self.player_hand.is_bust() {
                        TurnState::Busted
                    } else {
                        TurnState::Stood
                    });
                }
            }
        }
    }

    /// Reveal the hole card and draw to 17 or better.
    pub fn dealer_turn(
        &mut self,
        deck: &mut Deck,
        balance: f64,
        display: &mut dyn DisplayNotifier,
    ) -> Result<(), EmptyDeckError> {
        self.phase = RoundPhase::DealerTurn;
        self.notify(display, balance, 0);
        while dealer_should_hit(&self.dealer_hand) {
            self.dealer_hand.add_card(deck.draw()?);
            self.notify(display, balance, 0);
        }
        self.phase = RoundPhase::Settling;
        Ok(())
    }

    /// Show the whole table with nothing concealed.
    pub fn reveal(&self, display: &mut dyn DisplayNotifier, balance: f64) {
        self.notify(display, balance, 0);
    }

    /// Settlement for a busted player hand. The dealer never plays.
    pub fn settle_bust(&mut self) -> RoundResult {
        self.phase = RoundPhase::Done;
        RoundResult {
            outcome: RoundOutcome::PlayerBust,
            player_total: self.player_hand.total(),
            dealer_total: self.dealer_hand.total(),
            wager: self.wager,
            delta: -self.wager,
        }
    }

    /// Settlement by comparing final totals.
    pub fn settle_showdown(&mut self) -> RoundResult {
        self.phase = RoundPhase::Done;
        resolve_showdown(&self.player_hand, &self.dealer_hand, self.wager)
    }

    pub fn finish(&mut self) {
        self.phase = RoundPhase::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit};
    use crate::error::BetError;

    struct ChoiceScript {
        choices: Vec<PlayerChoice>,
        requests: usize,
    }

    impl ChoiceScript {
        fn new(choices: &[PlayerChoice]) -> Self {
            Self {
                choices: choices.to_vec(),
                requests: 0,
            }
        }
    }

    impl InputProvider for ChoiceScript {
        fn request_wager(&mut self, _minimum: f64, _balance: f64) -> String {
            String::new()
        }

        fn request_choice(&mut self, _offered: &[PlayerChoice]) -> PlayerChoice {
            self.requests += 1;
            self.choices.remove(0)
        }
    }

    struct NullDisplay;

    impl DisplayNotifier for NullDisplay {
        fn on_state_change(&mut self, _view: &TableView<'_>) {}
        fn on_wager_rejected(&mut self, _error: &BetError) {}
        fn on_round_result(&mut self, _result: &RoundResult) {}
    }

    fn stacked(draws: &[Rank]) -> Deck {
        let mut cards: Vec<Card> = draws
            .iter()
            .zip(Suit::ALL.iter().cycle())
            .map(|(&rank, &suit)| Card::new(suit, rank))
            .collect();
        cards.reverse();
        Deck::from_cards(cards)
    }

    fn hand(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        hand.add_cards(
            ranks
                .iter()
                .zip(Suit::ALL.iter().cycle())
                .map(|(&rank, &suit)| Card::new(suit, rank)),
        );
        hand
    }

    #[test]
    fn test_deal_interleaves_player_and_dealer() {
        let mut deck = stacked(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
        let mut round = Round::new(5.0);
        round.deal(&mut deck, 500.0, &mut NullDisplay).unwrap();
        assert_eq!(round.player_hand.total(), 2 + 4);
        assert_eq!(round.dealer_hand.total(), 3 + 5);
        assert_eq!(round.phase, RoundPhase::CheckingNaturals);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    fn test_stand_ends_the_turn_without_drawing() {
        let mut deck = stacked(&[Rank::Two]);
        let mut round = Round::new(5.0);
        round.player_hand = hand(&[Rank::Ten, Rank::Nine]);
        let mut input = ChoiceScript::new(&[PlayerChoice::Stand]);
        let state = round
            .player_turn(&mut deck, 500.0, &mut input, &mut NullDisplay)
            .unwrap();
        assert_eq!(state, TurnState::Stood);
        assert_eq!(round.player_hand.len(), 2);
        assert_eq!(deck.remaining(), 1);
        assert_eq!(round.phase, RoundPhase::DealerTurn);
    }

    #[test]
    fn test_hit_until_bust() {
        let mut deck = stacked(&[Rank::Five, Rank::Nine]);
        let mut round = Round::new(5.0);
        round.player_hand = hand(&[Rank::Ten, Rank::Eight]);
        let mut input = ChoiceScript::new(&[PlayerChoice::Hit]);
        let state = round
            .player_turn(&mut deck, 500.0, &mut input, &mut NullDisplay)
            .unwrap();
        assert_eq!(state, TurnState::Busted);
        assert_eq!(round.player_hand.total(), 23);
        assert_eq!(round.phase, RoundPhase::Settling);
        // The second stacked card was never needed.
        assert_eq!(deck.remaining(), 1);
    }

    #[test]
    fn test_double_down_draws_one_card_and_stands() {
        let mut deck = stacked(&[Rank::Five, Rank::Nine]);
        let mut round = Round::new(10.0);
        round.player_hand = hand(&[Rank::Five, Rank::Six]);
        let mut input = ChoiceScript::new(&[PlayerChoice::DoubleDown]);
        let state = round
            .player_turn(&mut deck, 500.0, &mut input, &mut NullDisplay)
            .unwrap();
        assert_eq!(state, TurnState::Stood);
        assert_eq!(round.wager, 20.0);
        assert_eq!(round.player_hand.len(), 3);
        // Forced stand even though 16 could hit again.
        assert_eq!(round.player_hand.total(), 16);
        assert_eq!(deck.remaining(), 1);
    }

    #[test]
    fn test_double_down_rejected_when_not_offered() {
        // Three cards in hand, so doubling is off the table. The first
        // scripted answer is discarded and the player is asked again.
        let mut deck = stacked(&[Rank::Two]);
        let mut round = Round::new(10.0);
        round.player_hand = hand(&[Rank::Two, Rank::Three, Rank::Four]);
        let mut input = ChoiceScript::new(&[PlayerChoice::DoubleDown, PlayerChoice::Stand]);
        let state = round
            .player_turn(&mut deck, 500.0, &mut input, &mut NullDisplay)
            .unwrap();
        assert_eq!(state, TurnState::Stood);
        assert_eq!(input.requests, 2);
        assert_eq!(round.wager, 10.0);
        assert_eq!(round.player_hand.len(), 3);
    }

    #[test]
    fn test_double_down_not_offered_without_funds() {
        // Balance 15 cannot cover a doubled wager of 10.
        let mut deck = stacked(&[Rank::Two]);
        let mut round = Round::new(10.0);
        round.player_hand = hand(&[Rank::Five, Rank::Six]);
        let mut input = ChoiceScript::new(&[PlayerChoice::DoubleDown, PlayerChoice::Stand]);
        let state = round
            .player_turn(&mut deck, 15.0, &mut input, &mut NullDisplay)
            .unwrap();
        assert_eq!(state, TurnState::Stood);
        assert_eq!(input.requests, 2);
        assert_eq!(round.wager, 10.0);
    }

    #[test]
    fn test_dealer_draws_to_seventeen() {
        let mut deck = stacked(&[Rank::Ten, Rank::Two]);
        let mut round = Round::new(5.0);
        round.dealer_hand = hand(&[Rank::Six, Rank::Five]);
        round
            .dealer_turn(&mut deck, 500.0, &mut NullDisplay)
            .unwrap();
        assert_eq!(round.dealer_hand.total(), 21);
        assert_eq!(round.phase, RoundPhase::Settling);
        assert_eq!(deck.remaining(), 1);
    }

    #[test]
    fn test_dealer_stands_on_soft_seventeen() {
        let mut deck = stacked(&[Rank::Ten]);
        let mut round = Round::new(5.0);
        round.dealer_hand = hand(&[Rank::Ace, Rank::Six]);
        round
            .dealer_turn(&mut deck, 500.0, &mut NullDisplay)
            .unwrap();
        assert_eq!(round.dealer_hand.total(), 17);
        assert_eq!(round.dealer_hand.len(), 2);
        assert_eq!(deck.remaining(), 1);
    }

    #[test]
    fn test_dealer_should_hit_threshold() {
        assert!(dealer_should_hit(&hand(&[Rank::Ten, Rank::Six])));
        assert!(!dealer_should_hit(&hand(&[Rank::Ten, Rank::Seven])));
    }

    #[test]
    fn test_natural_check_settles_immediately() {
        let mut round = Round::new(20.0);
        round.player_hand = hand(&[Rank::Ace, Rank::King]);
        round.dealer_hand = hand(&[Rank::Nine, Rank::Seven]);
        round.phase = RoundPhase::CheckingNaturals;
        let result = round.check_naturals(PayoutRatio::THREE_TO_TWO).unwrap();
        assert_eq!(result.outcome, RoundOutcome::PlayerBlackjack);
        assert_eq!(round.phase, RoundPhase::Settling);
    }

    #[test]
    fn test_no_natural_moves_to_player_turn() {
        let mut round = Round::new(20.0);
        round.player_hand = hand(&[Rank::Nine, Rank::Seven]);
        round.dealer_hand = hand(&[Rank::Ten, Rank::Six]);
        round.phase = RoundPhase::CheckingNaturals;
        assert!(round.check_naturals(PayoutRatio::THREE_TO_TWO).is_none());
        assert_eq!(round.phase, RoundPhase::PlayerTurn);
    }

    #[test]
    fn test_bust_settlement_debits_the_full_wager() {
        let mut round = Round::new(20.0);
        round.player_hand = hand(&[Rank::Ten, Rank::Eight, Rank::Five]);
        round.dealer_hand = hand(&[Rank::Ten, Rank::Six]);
        let result = round.settle_bust();
        assert_eq!(result.outcome, RoundOutcome::PlayerBust);
        assert_eq!(result.delta, -20.0);
        assert_eq!(round.phase, RoundPhase::Done);
    }
}
