use crate::card::Card;
use serde::{Deserialize, Serialize};

/// Calculate the value of a blackjack hand.
///
/// Every ace starts at 11; while the total exceeds 21 and an ace is still
/// counted high, one ace drops to 1. The result does not depend on the
/// order the cards arrived in.
pub fn hand_total(cards: &[Card]) -> u8 {
    let mut total = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value();
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// A natural: 21 from exactly two cards.
pub fn is_natural(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_total(cards) == 21
}

pub fn is_bust(cards: &[Card]) -> bool {
    hand_total(cards) > 21
}

/// The ordered cards held by one party for the duration of a round.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Receive several cards at once.
    pub fn add_cards<I: IntoIterator<Item = Card>>(&mut self, cards: I) {
        self.cards.extend(cards);
    }

    pub fn total(&self) -> u8 {
        hand_total(&self.cards)
    }

    pub fn is_natural(&self) -> bool {
        is_natural(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        is_bust(&self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
