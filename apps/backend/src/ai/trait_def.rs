//! Bot player trait definition.

use std::fmt;

use crate::domain::{Card, Game, PlayerId, Suit};

/// Errors that can occur during bot decision-making.
#[derive(Debug)]
pub enum BotError {
    /// Bot produced or found no legal move.
    InvalidMove(String),
    /// Bot encountered an internal error.
    Internal(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::InvalidMove(msg) => write!(f, "bot invalid move: {msg}"),
            BotError::Internal(msg) => write!(f, "bot internal error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}

/// Trait for bot players.
///
/// Implementations receive the full game state and their own seat id and must
/// choose a legal action by querying the legal-move helpers
/// (`Game::legal_bids_for`, `Game::legal_plays_for`). Bots feed the same
/// command handlers as human input; an illegal choice is rejected there like
/// anyone else's.
pub trait BotPlayer: Send + Sync {
    /// Choose a trump suit after a Wizard was turned up (bot is dealer).
    fn choose_trump(&self, game: &Game, me: PlayerId) -> Result<Suit, BotError>;

    /// Choose a bid value from `game.legal_bids_for(me)`.
    fn choose_bid(&self, game: &Game, me: PlayerId) -> Result<u8, BotError>;

    /// Choose a card from `game.legal_plays_for(me)`.
    fn choose_play(&self, game: &Game, me: PlayerId) -> Result<Card, BotError>;
}
