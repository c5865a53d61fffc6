//! Seat management: joining, reconnection, departures, bot seats, and the
//! pause/substitution flow around disconnects.

use time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::{GameEvent, GameFlow};
use crate::domain::snapshot::PlayerPublic;
use crate::domain::{
    AuthorityKind, Game, GameError, Phase, PlayerId, PlayerRecord, ValidationKind,
};

const MAX_NAME_LEN: usize = 32;

impl GameFlow {
    /// Seat a brand-new player. Lobby-only; the first joiner becomes host.
    pub fn join_new(
        &mut self,
        game: &mut Game,
        name: &str,
        password: Option<&str>,
    ) -> Result<(PlayerId, Vec<GameEvent>), GameError> {
        let name = valid_name(name)?;
        if let Some(expected) = game.settings.password.as_deref() {
            if password != Some(expected) {
                return Err(GameError::validation(
                    ValidationKind::WrongPassword,
                    "room password does not match",
                ));
            }
        }
        if game
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(&name))
        {
            return Err(GameError::validation(
                ValidationKind::InvalidName,
                "display name already taken",
            ));
        }

        let id = Uuid::new_v4();
        let record = PlayerRecord::human(id, name);
        game.add_player(record)?;
        info!(game_id = %game.id, player_id = %id, "player joined");

        let player = game.player(id).map(PlayerPublic::of).ok_or_else(|| {
            GameError::internal("player missing immediately after join")
        })?;
        Ok((id, vec![GameEvent::PlayerJoined { player }]))
    }

    /// Reconnect an existing player by stable id. Allowed in every phase;
    /// re-marks the seat connected and refreshes the display name. Clears a
    /// pause held for this player, then re-pauses if someone else is still
    /// missing.
    pub fn reconnect(
        &mut self,
        game: &mut Game,
        player_id: PlayerId,
        name: &str,
        pause_timeout: Duration,
    ) -> Result<Vec<GameEvent>, GameError> {
        let name = valid_name(name)?;
        let record = game.player_mut(player_id).ok_or_else(|| {
            GameError::validation(ValidationKind::UnknownPlayer, "no seat to reconnect")
        })?;
        if record.is_bot {
            // The pause deadline already converted this seat; the late
            // reconnect must not undo the substitution.
            return Err(GameError::validation(
                ValidationKind::UnknownPlayer,
                "seat was converted to a bot",
            ));
        }
        record.connected = true;
        record.name = name;
        let display = record.name.clone();
        info!(game_id = %game.id, player_id = %player_id, "player reconnected");

        let mut events = vec![GameEvent::PlayerReconnected {
            player_id,
            name: display,
        }];
        if game.pause.as_ref().map(|p| p.player) == Some(player_id) {
            game.resume();
            events.push(GameEvent::GameResumed { player_id });
            events.extend(self.pause_for_next_absentee(game, pause_timeout));
        }
        Ok(events)
    }

    /// Voluntary departure. Removes the seat in the lobby; afterwards only
    /// marks it disconnected (the pause flow follows separately).
    pub fn leave(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        pause_timeout: Duration,
    ) -> Result<Vec<GameEvent>, GameError> {
        if game.phase == Phase::Lobby {
            game.remove_player(actor)?;
            info!(game_id = %game.id, player_id = %actor, "player left the lobby");
            return Ok(vec![GameEvent::PlayerLeft {
                player_id: actor,
                removed: true,
            }]);
        }

        let mut events = vec![GameEvent::PlayerLeft {
            player_id: actor,
            removed: false,
        }];
        events.extend(self.player_disconnected(game, actor, pause_timeout)?);
        Ok(events)
    }

    /// A connection dropped (or its player left mid-game): mark the seat
    /// disconnected and pause if the game is active and not already paused.
    pub fn player_disconnected(
        &mut self,
        game: &mut Game,
        player_id: PlayerId,
        pause_timeout: Duration,
    ) -> Result<Vec<GameEvent>, GameError> {
        let record = game.player_mut(player_id).ok_or_else(|| {
            GameError::validation(ValidationKind::UnknownPlayer, "no seat to disconnect")
        })?;
        if record.is_bot {
            return Ok(Vec::new());
        }
        record.connected = false;
        debug!(game_id = %game.id, player_id = %player_id, "player disconnected");

        if game.is_active() && !game.is_paused() {
            game.pause_for(player_id, pause_timeout);
            return Ok(vec![GameEvent::GamePaused {
                player_id,
                timeout_secs: pause_timeout.whole_seconds().max(0) as u64,
            }]);
        }
        Ok(Vec::new())
    }

    /// The pause deadline expired: convert the absent player into a bot and
    /// resume. Idempotent against a racing reconnect; if the pause has
    /// already cleared this is a no-op.
    pub fn pause_timed_out(
        &mut self,
        game: &mut Game,
        pause_timeout: Duration,
    ) -> Result<Vec<GameEvent>, GameError> {
        let Some(pause) = game.pause.as_ref() else {
            return Ok(Vec::new());
        };
        let player_id = pause.player;
        game.resume();
        let name = game.substitute_bot(player_id)?;
        info!(game_id = %game.id, player_id = %player_id, name = %name, "absent player substituted by bot");

        let mut events = vec![
            GameEvent::BotSubstituted { player_id, name },
            GameEvent::GameResumed { player_id },
        ];
        events.extend(self.pause_for_next_absentee(game, pause_timeout));
        Ok(events)
    }

    /// After a resume, immediately pause again if another human seat is still
    /// disconnected; every absentee gets their own deadline.
    fn pause_for_next_absentee(
        &mut self,
        game: &mut Game,
        pause_timeout: Duration,
    ) -> Vec<GameEvent> {
        if !game.is_active() || game.is_paused() {
            return Vec::new();
        }
        let Some(next) = game
            .players
            .iter()
            .find(|p| !p.connected && !p.is_bot)
            .map(|p| p.id)
        else {
            return Vec::new();
        };
        game.pause_for(next, pause_timeout);
        vec![GameEvent::GamePaused {
            player_id: next,
            timeout_secs: pause_timeout.whole_seconds().max(0) as u64,
        }]
    }

    /// Host adds a bot seat. Lobby-only.
    pub fn add_bot(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        if !game.is_host(actor) {
            return Err(GameError::Authority(AuthorityKind::NotHost));
        }
        if game.phase != Phase::Lobby {
            return Err(GameError::Phase("add_bot"));
        }
        let name = game.next_bot_name();
        let id = Uuid::new_v4();
        game.add_player(PlayerRecord::bot(id, name))?;

        let player = game.player(id).map(PlayerPublic::of).ok_or_else(|| {
            GameError::internal("bot missing immediately after add")
        })?;
        Ok(vec![GameEvent::PlayerJoined { player }])
    }

    /// Host removes a bot seat. Lobby-only.
    pub fn remove_bot(
        &mut self,
        game: &mut Game,
        actor: PlayerId,
        bot_id: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        if !game.is_host(actor) {
            return Err(GameError::Authority(AuthorityKind::NotHost));
        }
        if game.phase != Phase::Lobby {
            return Err(GameError::Phase("remove_bot"));
        }
        let is_bot = game
            .player(bot_id)
            .map(|p| p.is_bot)
            .ok_or_else(|| GameError::validation(ValidationKind::UnknownPlayer, "no such seat"))?;
        if !is_bot {
            return Err(GameError::validation(
                ValidationKind::NotABot,
                "seat belongs to a human player",
            ));
        }
        game.remove_player(bot_id)?;
        Ok(vec![GameEvent::PlayerLeft {
            player_id: bot_id,
            removed: true,
        }])
    }
}

fn valid_name(name: &str) -> Result<String, GameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
        return Err(GameError::validation(
            ValidationKind::InvalidName,
            format!("display name must be 1..={MAX_NAME_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}
