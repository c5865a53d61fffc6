//! In-round player actions: trump selection, bidding, card play.

use tracing::debug;

use super::events::{FinalScore, RoundScore};
use super::{GameEvent, GameFlow};
use crate::domain::{Card, Game, GameError, PlayerId, Suit};

impl GameFlow {
    /// Dealer picks the trump suit after a Wizard was turned up.
    pub fn select_trump(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        suit: Suit,
    ) -> Result<Vec<GameEvent>, GameError> {
        game.select_trump(actor, suit)?;
        debug!(game_id = %game.id, player_id = %actor, ?suit, "trump selected");
        Ok(vec![GameEvent::TrumpSelected {
            player_id: actor,
            suit,
        }])
    }

    /// Place a bid; the final bid starts trick play.
    pub fn place_bid(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        bid: u8,
    ) -> Result<Vec<GameEvent>, GameError> {
        let bidding_complete = game.place_bid(actor, bid)?;
        debug!(game_id = %game.id, player_id = %actor, bid, "bid placed");

        // Re-read the machine: the mutation may have begun the play phase.
        let next_player = game.current_player().map(|p| p.id);
        let mut events = vec![GameEvent::BidPlaced {
            player_id: actor,
            bid,
            next_player,
        }];
        if bidding_complete {
            let first_player = next_player
                .ok_or_else(|| GameError::internal("play phase started without a current player"))?;
            events.push(GameEvent::BiddingComplete { first_player });
        }
        Ok(events)
    }

    /// Play a card, reporting every transition the play cascaded through.
    pub fn play_card(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        card: Card,
    ) -> Result<Vec<GameEvent>, GameError> {
        let outcome = game.play_card(actor, card)?;
        debug!(game_id = %game.id, player_id = %actor, %card, "card played");

        let mut events = vec![GameEvent::CardPlayed {
            player_id: actor,
            card,
            next_player: outcome.next_player,
        }];
        if let Some(winner) = outcome.trick_winner {
            events.push(GameEvent::TrickComplete { winner });
        }
        if outcome.round_completed {
            events.push(GameEvent::RoundComplete {
                round_no: game.round_no,
                scores: round_scores(game),
            });
        }
        if outcome.game_completed {
            events.push(GameEvent::GameComplete {
                standings: standings(game),
            });
        }
        Ok(events)
    }
}

/// Per-player results of the round just scored, from the freshly appended
/// history entries.
fn round_scores(game: &Game) -> Vec<RoundScore> {
    game.players
        .iter()
        .filter_map(|p| {
            p.rounds.last().map(|entry| RoundScore {
                player_id: p.id,
                name: p.name.clone(),
                bid: entry.bid,
                tricks_won: entry.tricks_won,
                delta: entry.delta,
                total: p.score,
            })
        })
        .collect()
}

fn standings(game: &Game) -> Vec<FinalScore> {
    let mut standings: Vec<FinalScore> = game
        .players
        .iter()
        .map(|p| FinalScore {
            player_id: p.id,
            name: p.name.clone(),
            score: p.score,
        })
        .collect();
    standings.sort_by_key(|s| std::cmp::Reverse(s.score));
    standings
}
