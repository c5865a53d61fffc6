//! Chat and emote broadcasts. No game-state interaction beyond seat checks.

use super::{GameEvent, GameFlow};
use crate::domain::{Game, GameError, PlayerId, ValidationKind};

const MAX_CHAT_LEN: usize = 500;
const MAX_EMOTE_LEN: usize = 64;

impl GameFlow {
    pub fn chat(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        message: &str,
    ) -> Result<Vec<GameEvent>, GameError> {
        require_seated(game, actor)?;
        let message = message.trim();
        if message.is_empty() || message.chars().count() > MAX_CHAT_LEN {
            return Err(GameError::validation(
                ValidationKind::InvalidMessage,
                format!("chat message must be 1..={MAX_CHAT_LEN} characters"),
            ));
        }
        Ok(vec![GameEvent::Chat {
            player_id: actor,
            message: message.to_string(),
        }])
    }

    pub fn emote(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        emote: &str,
    ) -> Result<Vec<GameEvent>, GameError> {
        require_seated(game, actor)?;
        let emote = emote.trim();
        if emote.is_empty() || emote.chars().count() > MAX_EMOTE_LEN {
            return Err(GameError::validation(
                ValidationKind::InvalidMessage,
                format!("emote must be 1..={MAX_EMOTE_LEN} characters"),
            ));
        }
        Ok(vec![GameEvent::Emote {
            player_id: actor,
            emote: emote.to_string(),
        }])
    }
}

fn require_seated(game: &Game, actor: PlayerId) -> Result<(), GameError> {
    if game.seat_of(actor).is_none() {
        return Err(GameError::validation(
            ValidationKind::UnknownPlayer,
            "no seat at this table",
        ));
    }
    Ok(())
}
