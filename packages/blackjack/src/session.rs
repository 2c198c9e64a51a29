use crate::bets::validate_wager;
use crate::chips::Bankroll;
use crate::deck::Deck;
use crate::error::EmptyDeckError;
use crate::outcome::RoundResult;
use crate::round::{Round, TurnState};
use crate::rules::TableRules;
use crate::table::{DisplayNotifier, InputProvider};
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Owns everything that outlives a single round: the deck, the bankroll,
/// the table rules, and the shuffle rng. One round at a time borrows the
/// deck; settlement is the only thing that touches the bankroll.
pub struct GameSession {
    deck: Deck,
    bankroll: Bankroll,
    rules: TableRules,
    rng: ChaCha8Rng,
}

impl GameSession {
    pub fn new(rules: TableRules) -> Self {
        let mut rng = ChaCha8Rng::from_entropy();
        let deck = Deck::shuffled(&mut rng);
        Self {
            deck,
            bankroll: Bankroll::new(rules.starting_balance),
            rules,
            rng,
        }
    }

    /// Assemble a session from explicit parts. Useful for driving rounds
    /// against a known deck order.
    pub fn from_parts(rules: TableRules, deck: Deck, bankroll: Bankroll, rng: ChaCha8Rng) -> Self {
        Self {
            deck,
            bankroll,
            rules,
            rng,
        }
    }

    pub fn balance(&self) -> f64 {
        self.bankroll.balance()
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The table turns the player away once they cannot cover the
    /// minimum bet.
    pub fn can_continue(&self) -> bool {
        self.bankroll.balance() >= self.rules.minimum_bet
    }

    /// Play one full round: take a wager, reshuffle if the deck has run
    /// low, deal, short-circuit on naturals, otherwise run the player's
    /// turn and (if they did not bust) the dealer's, settle, and report.
    pub fn play_round(
        &mut self,
        input: &mut dyn InputProvider,
        display: &mut dyn DisplayNotifier,
    ) -> Result<RoundResult, EmptyDeckError> {
        let wager = self.request_wager(input, display);

        if self.deck.needs_reshuffle(self.rules.reshuffle_threshold) {
            log::info!(
                "deck down to {} cards, bringing in a fresh one",
                self.deck.remaining()
            );
            self.deck = Deck::shuffled(&mut self.rng);
        }

        let balance = self.bankroll.balance();
        let mut round = Round::new(wager);
        round.deal(&mut self.deck, balance, display)?;

        let result = if let Some(result) = round.check_naturals(self.rules.blackjack_payout) {
            round.reveal(display, balance);
            round.finish();
            result
        } else {
            match round.player_turn(&mut self.deck, balance, input, display)? {
                TurnState::Busted => {
                    round.reveal(display, balance);
                    round.settle_bust()
                }
                TurnState::Stood => {
                    round.dealer_turn(&mut self.deck, balance, display)?;
                    round.settle_showdown()
                }
            }
        };

        self.apply(&result);
        log::debug!(
            "round settled: {:?}, wager {}, delta {:+}",
            result.outcome,
            result.wager,
            result.delta
        );
        display.on_round_result(&result);
        Ok(result)
    }

    fn request_wager(
        &mut self,
        input: &mut dyn InputProvider,
        display: &mut dyn DisplayNotifier,
    ) -> f64 {
        loop {
            let raw = input.request_wager(self.rules.minimum_bet, self.bankroll.balance());
            match validate_wager(&raw, self.bankroll.balance(), self.rules.minimum_bet) {
                Ok(wager) => return wager,
                Err(error) => display.on_wager_rejected(&error),
            }
        }
    }

    fn apply(&mut self, result: &RoundResult) {
        if result.delta > 0.0 {
            self.bankroll.credit(result.delta);
        } else if result.delta < 0.0 {
            self.bankroll.debit(-result.delta);
        }
    }
}
