//! Per-player record: hand, bid, tricks, cumulative score, round history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cards_types::Card;

pub type PlayerId = Uuid;

/// One line of a player's round history, appended at every round end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEntry {
    pub round_no: u8,
    pub bid: u8,
    pub tricks_won: u8,
    /// Score delta this round produced.
    pub delta: i32,
}

/// A seat at the table. Mutated only by the state machine and command
/// handlers; presentation code sees it through snapshots. Serialization is
/// for room-state handoff only, never for client traffic (hands included).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub bid: Option<u8>,
    pub tricks_won: u8,
    pub score: i32,
    pub rounds: Vec<RoundEntry>,
    pub connected: bool,
    pub is_bot: bool,
}

impl PlayerRecord {
    pub fn human(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            bid: None,
            tricks_won: 0,
            score: 0,
            rounds: Vec::new(),
            connected: true,
            is_bot: false,
        }
    }

    pub fn bot(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            is_bot: true,
            ..Self::human(id, name)
        }
    }

    pub fn has_card(&self, card: &Card) -> bool {
        self.hand.contains(card)
    }

    /// Remove a specific card from the hand, returning it.
    pub fn take_card(&mut self, card: &Card) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c == card)?;
        Some(self.hand.remove(pos))
    }

    /// Clear per-round state ahead of a new deal.
    pub fn reset_for_round(&mut self) {
        self.hand.clear();
        self.bid = None;
        self.tricks_won = 0;
    }

    /// Clear everything a rematch starts over, keeping identity and flags.
    pub fn reset_for_rematch(&mut self) {
        self.reset_for_round();
        self.score = 0;
        self.rounds.clear();
    }
}
