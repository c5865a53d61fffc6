//! Game start, round advancement, and rematch.

use tracing::info;

use super::{GameEvent, GameFlow};
use crate::domain::{Game, GameError, Phase, PlayerId, ValidationKind};

impl GameFlow {
    /// Host starts the game; round 1 is dealt in the same call.
    pub fn start_game(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        game.start(actor)?;
        game.deal_round(&mut self.rng)?;
        info!(
            game_id = %game.id,
            players = game.players.len(),
            max_rounds = game.max_rounds,
            "game started"
        );

        let mut events = vec![GameEvent::GameStarted {
            round_no: game.round_no,
            max_rounds: game.max_rounds,
        }];
        events.push(round_started_event(game)?);
        Ok(events)
    }

    /// Host advances from a scored round into the next deal.
    pub fn advance_round(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        game.advance_round(actor)?;
        game.deal_round(&mut self.rng)?;
        Ok(vec![round_started_event(game)?])
    }

    /// Rematch: the host's request resets the table in place; anyone else's
    /// is broadcast as a plea for one.
    pub fn rematch(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        if game.seat_of(actor).is_none() {
            return Err(GameError::validation(
                ValidationKind::UnknownPlayer,
                "no seat at this table",
            ));
        }
        if !matches!(game.phase, Phase::GameEnd | Phase::RoundEnd | Phase::Lobby) {
            return Err(GameError::Phase("rematch"));
        }
        if !game.is_host(actor) {
            return Ok(vec![GameEvent::RematchRequested { player_id: actor }]);
        }
        game.rematch_reset();
        info!(game_id = %game.id, "rematch started");
        Ok(vec![GameEvent::RematchStarted])
    }
}

/// Shared tail of every deal: announce the new round and how trump resolved.
fn round_started_event(game: &Game) -> Result<GameEvent, GameError> {
    let dealer = game
        .dealer()
        .map(|p| p.id)
        .ok_or_else(|| GameError::internal("dealt round has no dealer"))?;
    Ok(GameEvent::RoundStarted {
        round_no: game.round_no,
        dealer,
        trump_card: game.trump_card,
        trump_suit: game.trump_suit,
        awaiting_trump_choice: game.phase == Phase::TrumpSelection,
    })
}
