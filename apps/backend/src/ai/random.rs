//! Random bot: uniform choice among legal moves. Baseline for tests and a
//! reference for custom strategies.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{BotError, BotPlayer};
use crate::domain::{Card, Game, PlayerId, Suit};

pub struct RandomBot {
    /// Interior mutability: trait methods take `&self` but the RNG advances.
    rng: Mutex<StdRng>,
}

impl RandomBot {
    /// `seed` makes the bot deterministic for tests; `None` uses OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> Option<T>) -> Result<T, BotError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| BotError::Internal(format!("rng lock poisoned: {e}")))?;
        f(&mut rng).ok_or_else(|| BotError::Internal("empty choice set".into()))
    }
}

impl BotPlayer for RandomBot {
    fn choose_trump(&self, _game: &Game, _me: PlayerId) -> Result<Suit, BotError> {
        self.with_rng(|rng| Suit::ALL.choose(rng).copied())
    }

    fn choose_bid(&self, game: &Game, me: PlayerId) -> Result<u8, BotError> {
        let legal = game.legal_bids_for(me);
        if legal.is_empty() {
            return Err(BotError::InvalidMove("no legal bids".into()));
        }
        self.with_rng(|rng| legal.choose(rng).copied())
    }

    fn choose_play(&self, game: &Game, me: PlayerId) -> Result<Card, BotError> {
        let legal = game.legal_plays_for(me);
        if legal.is_empty() {
            return Err(BotError::InvalidMove("no legal plays".into()));
        }
        self.with_rng(|rng| legal.choose(rng).copied())
    }
}
