//! The undo consensus protocol: request, responses, timer expiry, apply.

use rand::Rng;
use time::Duration;
use tracing::{debug, info};

use super::events::UndoCancelReason;
use super::{GameEvent, GameFlow, BOT_UNDO_APPROVE_P};
use crate::domain::{Game, GameError, PlayerId, UndoResolution};

impl GameFlow {
    /// A player asks to take back their immediately-preceding card play.
    /// Bots are polled on the spot; their votes land in the tally but never
    /// in the approval threshold.
    pub fn request_undo(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        timeout: Duration,
    ) -> Result<Vec<GameEvent>, GameError> {
        game.begin_undo(actor)?;

        let bot_ids: Vec<PlayerId> = game
            .players
            .iter()
            .filter(|p| p.is_bot)
            .map(|p| p.id)
            .collect();
        for bot_id in bot_ids {
            let approve = self.rng.random_bool(BOT_UNDO_APPROVE_P);
            game.record_undo_response(bot_id, approve)?;
        }

        let undo = game
            .undo
            .as_ref()
            .ok_or_else(|| GameError::internal("undo vanished while polling bots"))?;
        info!(
            game_id = %game.id,
            player_id = %actor,
            card = %undo.card_label,
            required = undo.required,
            "undo requested"
        );
        let mut events = vec![GameEvent::UndoRequested {
            requester: actor,
            requester_name: undo.requester_name.clone(),
            card_label: undo.card_label.clone(),
            approvals: undo.approvals(),
            denials: undo.denials(),
            required: undo.required,
            timeout_secs: timeout.whole_seconds().max(0) as u64,
        }];
        events.extend(self.resolve_undo(game)?);
        Ok(events)
    }

    /// One human's vote on the pending request.
    pub fn respond_undo(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        approve: bool,
    ) -> Result<Vec<GameEvent>, GameError> {
        game.record_undo_response(actor, approve)?;

        let undo = game
            .undo
            .as_ref()
            .ok_or_else(|| GameError::internal("undo vanished after a recorded response"))?;
        let mut events = vec![GameEvent::UndoResponse {
            player_id: actor,
            approved: approve,
            approvals: undo.approvals(),
            denials: undo.denials(),
            required: undo.required,
        }];
        events.extend(self.resolve_undo(game)?);
        Ok(events)
    }

    /// The undo deadline expired without consensus. Idempotent: a request
    /// that already resolved leaves nothing to cancel.
    pub fn undo_timed_out(&mut self, game: &mut Game) -> Result<Vec<GameEvent>, GameError> {
        if game.cancel_undo().is_none() {
            return Ok(Vec::new());
        }
        debug!(game_id = %game.id, "undo request timed out");
        Ok(vec![GameEvent::UndoCancelled {
            reason: UndoCancelReason::TimedOut,
        }])
    }

    /// Apply or cancel the pending request the moment its outcome is
    /// mathematically settled.
    fn resolve_undo(&mut self, game: &mut Game) -> Result<Vec<GameEvent>, GameError> {
        match game.undo_resolution() {
            Some(UndoResolution::Approved) => {
                let (player_id, card) = game.apply_undo()?;
                info!(game_id = %game.id, player_id = %player_id, %card, "undo applied");
                Ok(vec![GameEvent::UndoApplied { player_id, card }])
            }
            Some(UndoResolution::Unreachable) => {
                game.cancel_undo();
                debug!(game_id = %game.id, "undo cancelled by denials");
                Ok(vec![GameEvent::UndoCancelled {
                    reason: UndoCancelReason::Denied,
                }])
            }
            None => Ok(Vec::new()),
        }
    }
}
