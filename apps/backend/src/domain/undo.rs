//! Pending undo request: approval tally and consensus math.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::cards_types::Card;
use super::player::PlayerId;

/// Outcome a pending request can resolve to before its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoResolution {
    /// Approvals reached the threshold.
    Approved,
    /// Even if every outstanding human approved, the threshold can no longer
    /// be met.
    Unreachable,
}

/// State of an in-flight undo request. Present on the game only while one is
/// pending; cleared on apply or cancellation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoRequest {
    pub requester: PlayerId,
    pub requester_name: String,
    pub card: Card,
    /// Human-readable card description for client prompts.
    pub card_label: String,
    /// Seat index the turn pointer restores to when the undo applies.
    pub previous_idx: usize,
    pub requested_at: OffsetDateTime,
    /// Responder id to approved/denied. Bots respond at request time.
    pub responses: HashMap<PlayerId, bool>,
    /// Approvals needed: max(1, other connected human players) at request
    /// time. Bots never count toward this but their responses do tally.
    pub required: usize,
}

impl UndoRequest {
    pub fn approvals(&self) -> usize {
        self.responses.values().filter(|&&approved| approved).count()
    }

    pub fn denials(&self) -> usize {
        self.responses.values().filter(|&&approved| !approved).count()
    }

    pub fn has_responded(&self, player: PlayerId) -> bool {
        self.responses.contains_key(&player)
    }

    /// Resolution given how many eligible humans have not yet responded.
    pub fn resolution(&self, unresponded_humans: usize) -> Option<UndoResolution> {
        if self.approvals() >= self.required {
            return Some(UndoResolution::Approved);
        }
        if self.approvals() + unresponded_humans < self.required {
            return Some(UndoResolution::Unreachable);
        }
        None
    }
}
