//! Command handlers: one per client-initiated action.
//!
//! Each handler validates phase, actor authority, and payload bounds, lets
//! the state machine mutate, re-reads the machine after the mutation (a
//! single call may cascade transitions: the final bid starts play, the final
//! card can close trick, round, and game at once), and assembles the events
//! describing exactly what changed. Handlers keep no state between calls;
//! `GameFlow` carries only the RNG feeding shuffles and bot undo votes.

mod events;
mod player_actions;
mod round_lifecycle;
mod seats;
mod social;
mod undo_flow;

pub use events::{FinalScore, GameEvent, RoundScore, UndoCancelReason};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Probability a bot approves an undo request, independent per bot.
const BOT_UNDO_APPROVE_P: f64 = 0.8;

pub struct GameFlow {
    rng: StdRng,
}

impl GameFlow {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic flow for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for GameFlow {
    fn default() -> Self {
        Self::new()
    }
}
