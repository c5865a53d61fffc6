//! The 60-card deck: canonical build, Fisher-Yates shuffle, dealing.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Suit, MAX_VALUE, MIN_VALUE};
use super::rules::DECK_SIZE;

/// Ordered card stack owned exclusively by the game state machine.
/// Recreated and reshuffled at the start of every round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full deck in canonical order: suits ascending, then Wizards, then
    /// Jesters.
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for value in MIN_VALUE..=MAX_VALUE {
                cards.push(Card::suited(suit, value));
            }
        }
        for instance in 0..4 {
            cards.push(Card::Wizard(instance));
        }
        for instance in 0..4 {
            cards.push(Card::Jester(instance));
        }
        Self { cards }
    }

    /// Rebuild and shuffle in one step.
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut deck = Self::new();
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    /// Deal `n` cards off the top. Callers never request more than remain;
    /// dealing is bounded by the round schedule.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        debug_assert!(n <= self.cards.len());
        let split = self.cards.len().saturating_sub(n);
        self.cards.split_off(split)
    }

    /// Draw a single card, if any remain.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
