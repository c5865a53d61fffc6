//! Heuristic bot: bids from hand strength, plays to hit its bid exactly.

use crate::domain::{card_beats, Card, Game, PlayerId, Suit};

use super::trait_def::{BotError, BotPlayer};

#[derive(Debug, Default)]
pub struct HeuristicBot;

impl HeuristicBot {
    pub fn new() -> Self {
        Self
    }

    /// Expected tricks: Wizards are near-certain, high cards and high trumps
    /// are likely.
    fn estimate_tricks(hand: &[Card], trump: Option<Suit>) -> u8 {
        let mut estimate = 0u8;
        for card in hand {
            if card.is_wizard() {
                estimate += 1;
            } else if let (Some(suit), Some(value)) = (card.suit(), card.value()) {
                if Some(suit) == trump && value >= 8 {
                    estimate += 1;
                } else if value >= 12 {
                    estimate += 1;
                }
            }
        }
        estimate
    }

    /// Would this card currently win the trick if nothing stronger follows?
    fn takes_the_trick(game: &Game, card: Card) -> bool {
        let mut best: Option<Card> = None;
        for &(_, played) in &game.trick.plays {
            match best {
                None => best = Some(played),
                Some(b) if card_beats(played, b, game.trick.lead, game.trump_suit) => {
                    best = Some(played)
                }
                _ => {}
            }
        }
        match best {
            None => true,
            Some(b) => card_beats(card, b, game.trick.lead, game.trump_suit),
        }
    }

    /// Rough strength ordering used when ranking candidates.
    fn strength(card: &Card) -> u8 {
        match card {
            Card::Jester(_) => 0,
            Card::Suited { value, .. } => *value,
            Card::Wizard(_) => u8::MAX,
        }
    }
}

impl BotPlayer for HeuristicBot {
    fn choose_trump(&self, game: &Game, me: PlayerId) -> Result<Suit, BotError> {
        // Longest suit in hand; ties break in suit order.
        let hand = game
            .player(me)
            .map(|p| p.hand.as_slice())
            .unwrap_or_default();
        let best = Suit::ALL
            .into_iter()
            .max_by_key(|suit| hand.iter().filter(|c| c.suit() == Some(*suit)).count())
            .unwrap_or(Suit::Clubs);
        Ok(best)
    }

    fn choose_bid(&self, game: &Game, me: PlayerId) -> Result<u8, BotError> {
        let legal = game.legal_bids_for(me);
        if legal.is_empty() {
            return Err(BotError::InvalidMove("no legal bids".into()));
        }
        let hand = game
            .player(me)
            .map(|p| p.hand.as_slice())
            .unwrap_or_default();
        let target = Self::estimate_tricks(hand, game.trump_suit);
        // Closest legal bid to the estimate; the forbidden value may force a
        // neighbor.
        legal
            .iter()
            .min_by_key(|&&b| (i16::from(b) - i16::from(target)).abs())
            .copied()
            .ok_or_else(|| BotError::Internal("empty legal bid set".into()))
    }

    fn choose_play(&self, game: &Game, me: PlayerId) -> Result<Card, BotError> {
        let legal = game.legal_plays_for(me);
        if legal.is_empty() {
            return Err(BotError::InvalidMove("no legal plays".into()));
        }
        let seat = game
            .player(me)
            .ok_or_else(|| BotError::Internal("bot has no seat".into()))?;
        let wants_trick = seat.bid.map(|b| seat.tricks_won < b).unwrap_or(false);

        let mut candidates: Vec<Card> = if wants_trick {
            let winning: Vec<Card> = legal
                .iter()
                .copied()
                .filter(|c| Self::takes_the_trick(game, *c))
                .collect();
            if winning.is_empty() {
                legal
            } else {
                winning
            }
        } else {
            let losing: Vec<Card> = legal
                .iter()
                .copied()
                .filter(|c| !Self::takes_the_trick(game, *c))
                .collect();
            if losing.is_empty() {
                legal
            } else {
                losing
            }
        };

        candidates.sort_by_key(Self::strength);
        let pick = if wants_trick {
            // Strongest card that takes the trick.
            candidates.last().copied()
        } else {
            // Weakest throwaway.
            candidates.first().copied()
        };
        pick.ok_or_else(|| BotError::Internal("empty candidate set".into()))
    }
}
