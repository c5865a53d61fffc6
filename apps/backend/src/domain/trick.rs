//! The current trick: ordered plays, derived lead suit, winner resolution.

use serde::{Deserialize, Serialize};

use super::cards_logic::card_beats;
use super::cards_types::{Card, Suit};
use super::errors::GameError;
use super::player::PlayerId;

/// One trick's worth of plays. The lead suit is the suit of the first suited
/// card played; Wizards and Jesters never set it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trick {
    pub plays: Vec<(PlayerId, Card)>,
    pub lead: Option<Suit>,
    /// Set once the trick is complete and resolved.
    pub winner: Option<PlayerId>,
}

impl Trick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, player: PlayerId, card: Card) {
        if self.lead.is_none() {
            self.lead = card.suit();
        }
        self.plays.push((player, card));
    }

    pub fn is_complete(&self, player_count: usize) -> bool {
        self.plays.len() == player_count
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    /// The newest play, if any.
    pub fn last_play(&self) -> Option<&(PlayerId, Card)> {
        self.plays.last()
    }

    /// Fold the beats relation over the plays in order. Calling this on an
    /// empty trick is an invariant violation, not a reachable user error.
    pub fn winner_of(&self, trump: Option<Suit>) -> Result<PlayerId, GameError> {
        let Some(&(first_player, first_card)) = self.plays.first() else {
            return Err(GameError::internal("winner requested for an empty trick"));
        };
        let mut best = (first_player, first_card);
        for &(player, card) in &self.plays[1..] {
            if card_beats(card, best.1, self.lead, trump) {
                best = (player, card);
            }
        }
        Ok(best.0)
    }

    /// Resolve and record the winner.
    pub fn resolve(&mut self, trump: Option<Suit>) -> Result<PlayerId, GameError> {
        let winner = self.winner_of(trump)?;
        self.winner = Some(winner);
        Ok(winner)
    }

    /// Pop the newest play and recompute the lead suit from what remains.
    /// Supports the undo protocol.
    pub fn retract_last(&mut self) -> Option<(PlayerId, Card)> {
        let play = self.plays.pop()?;
        self.lead = self
            .plays
            .iter()
            .find_map(|(_, c)| c.suit());
        Some(play)
    }
}
