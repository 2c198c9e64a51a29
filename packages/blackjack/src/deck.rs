use crate::card::{Card, Rank, Suit};
use crate::error::EmptyDeckError;
use rand::seq::SliceRandom;
use rand::Rng;

/// A single 52-card deck, drawn from the top like a stack.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// All 52 suit/rank combinations in deterministic suit-major order.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    /// A fresh standard deck, already shuffled.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    /// An arbitrary stack of cards. The last card is the top of the deck.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Uniform permutation of the remaining cards.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the top card.
    ///
    /// The caller is expected to rebuild the deck before it can run dry;
    /// an empty draw is an invariant violation, not a playable state.
    pub fn draw(&mut self) -> Result<Card, EmptyDeckError> {
        self.cards.pop().ok_or(EmptyDeckError)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn needs_reshuffle(&self, threshold: usize) -> bool {
        self.remaining() < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_standard_deck_has_52_distinct_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.remaining(), 52);
        let distinct: HashSet<Card> = {
            let mut deck = deck;
            let mut seen = HashSet::new();
            while let Ok(card) = deck.draw() {
                seen.insert(card);
            }
            seen
        };
        assert_eq!(distinct.len(), 52);
    }

    #[test]
    fn test_draws_are_distinct_and_decrement_remaining() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut deck = Deck::shuffled(&mut rng);
        let mut seen = HashSet::new();
        for n in 1..=20 {
            seen.insert(deck.draw().unwrap());
            assert_eq!(deck.remaining(), 52 - n);
        }
        assert_eq!(seen.len(), 20);
    }

    #[test]
    fn test_draw_from_empty_deck_fails() {
        let mut deck = Deck::from_cards(Vec::new());
        assert_eq!(deck.draw(), Err(EmptyDeckError));
    }

    #[test]
    fn test_shuffle_preserves_the_card_set() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut deck = Deck::standard();
        deck.shuffle(&mut rng);
        assert_eq!(deck.remaining(), 52);
        let mut seen = HashSet::new();
        while let Ok(card) = deck.draw() {
            seen.insert(card);
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_needs_reshuffle_is_strictly_below_threshold() {
        let deck = Deck::from_cards(vec![Card::new(Suit::Clubs, Rank::Two); 16]);
        assert!(!deck.needs_reshuffle(16));
        assert!(deck.needs_reshuffle(17));
    }
}
