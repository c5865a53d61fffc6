//! Core card types: the 60-card deck is four suits of values 1..=13 plus
//! four Wizards and four Jesters.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Spades => "Spades",
        };
        write!(f, "{name}")
    }
}

/// Lowest and highest values of a suited card.
pub const MIN_VALUE: u8 = 1;
pub const MAX_VALUE: u8 = 13;

/// A single card. Wizards and Jesters carry an instance index (0..=3) so all
/// 60 cards have distinct identities; the index never affects comparison.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Card {
    Suited { suit: Suit, value: u8 },
    Wizard(u8),
    Jester(u8),
}

impl Card {
    pub fn suited(suit: Suit, value: u8) -> Self {
        debug_assert!((MIN_VALUE..=MAX_VALUE).contains(&value));
        Card::Suited { suit, value }
    }

    pub fn is_wizard(&self) -> bool {
        matches!(self, Card::Wizard(_))
    }

    pub fn is_jester(&self) -> bool {
        matches!(self, Card::Jester(_))
    }

    /// True for ordinary suit-and-value cards.
    pub fn is_suited(&self) -> bool {
        matches!(self, Card::Suited { .. })
    }

    /// Suit of an ordinary card; Wizards and Jesters have none.
    pub fn suit(&self) -> Option<Suit> {
        match self {
            Card::Suited { suit, .. } => Some(*suit),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<u8> {
        match self {
            Card::Suited { value, .. } => Some(*value),
            _ => None,
        }
    }
}

// Note: derived Ord on Card is only for stable hand sorting (suited by suit
// then value, then Wizards, then Jesters). Never use it for trick resolution;
// that needs lead and trump context.

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Suited { suit, value } => write!(f, "{value} of {suit}"),
            Card::Wizard(_) => write!(f, "Wizard"),
            Card::Jester(_) => write!(f, "Jester"),
        }
    }
}
