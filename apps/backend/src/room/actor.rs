//! The per-room session orchestrator.
//!
//! One `GameRoom` actor owns one `Game`. The actor mailbox is the room's
//! serialized command queue: each inbound message is processed to completion
//! before the next, so the state machine needs no locking. Timers (pause and
//! undo deadlines) are cancellable `run_later` tasks; cancellation and firing
//! both happen on the mailbox, so they can never race a command.

use std::collections::HashMap;
use std::sync::Arc;

use actix::prelude::*;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::ai::{BotPlayer, HeuristicBot};
use crate::config::TimingConfig;
use crate::domain::{Game, GameError, GameId, GameSnapshot, Phase, PlayerId, RoomSettings};
use crate::services::game_flow::{GameEvent, GameFlow};
use crate::ws::protocol::{ClientCommand, PersistentId};

use super::handoff::{ExportState, RoomState};
use super::messages::{Connect, Disconnect, GetSummary, Inbound, OutboundFrame, RoomSummary};
use super::registry::RoomRegistry;

pub struct GameRoom {
    game: Game,
    flow: GameFlow,
    bot: HeuristicBot,
    timing: TimingConfig,
    registry: Arc<RoomRegistry>,

    connections: HashMap<Uuid, Recipient<OutboundFrame>>,
    conn_players: HashMap<Uuid, PlayerId>,
    persistent_ids: HashMap<PersistentId, PlayerId>,

    pause_timer: Option<SpawnHandle>,
    undo_timer: Option<SpawnHandle>,
}

impl GameRoom {
    pub fn new(
        id: GameId,
        settings: RoomSettings,
        timing: TimingConfig,
        registry: Arc<RoomRegistry>,
    ) -> Self {
        Self::with_game(Game::new(id, settings), HashMap::new(), timing, registry)
    }

    /// Rebuild a room from an exported state snapshot. Every seat resumes
    /// disconnected; clients re-attach through their persistent ids.
    pub fn restore(state: RoomState, timing: TimingConfig, registry: Arc<RoomRegistry>) -> Self {
        let RoomState {
            mut game,
            persistent_ids,
        } = state;
        for player in &mut game.players {
            if !player.is_bot {
                player.connected = false;
            }
        }
        Self::with_game(game, persistent_ids.into_iter().collect(), timing, registry)
    }

    fn with_game(
        game: Game,
        persistent_ids: HashMap<PersistentId, PlayerId>,
        timing: TimingConfig,
        registry: Arc<RoomRegistry>,
    ) -> Self {
        Self {
            game,
            flow: GameFlow::new(),
            bot: HeuristicBot::new(),
            timing,
            registry,
            connections: HashMap::new(),
            conn_players: HashMap::new(),
            persistent_ids,
            pause_timer: None,
            undo_timer: None,
        }
    }

    // --- Outbound ---------------------------------------------------------

    fn broadcast_event(&self, event: &GameEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => {
                for addr in self.connections.values() {
                    addr.do_send(OutboundFrame(payload.clone()));
                }
            }
            Err(err) => warn!(room_id = %self.game.id, error = %err, "event serialization failed"),
        }
    }

    fn send_event(&self, conn_id: &Uuid, event: &GameEvent) {
        let Some(addr) = self.connections.get(conn_id) else {
            return;
        };
        match serde_json::to_string(event) {
            Ok(payload) => addr.do_send(OutboundFrame(payload)),
            Err(err) => warn!(room_id = %self.game.id, error = %err, "event serialization failed"),
        }
    }

    fn send_error(&self, conn_id: Uuid, err: &GameError) {
        self.send_event(
            &conn_id,
            &GameEvent::Error {
                code: err.code().to_string(),
                message: err.to_string(),
            },
        );
    }

    /// Personalized snapshots: every mapped connection gets the full state
    /// with only its own hand.
    fn send_snapshots(&self) {
        for (conn_id, player_id) in &self.conn_players {
            let snapshot = GameSnapshot::for_player(&self.game, *player_id);
            self.send_event(conn_id, &GameEvent::Snapshot { state: snapshot });
        }
    }

    // --- Event processing -------------------------------------------------

    /// Broadcast events (private ones only to `origin`), drive the timers
    /// they imply, and refresh snapshots when state changed.
    fn apply_events(&mut self, events: Vec<GameEvent>, origin: Option<Uuid>, ctx: &mut Context<Self>) {
        let mutated = events.iter().any(mutates_state);
        for event in &events {
            match event {
                GameEvent::GamePaused { .. } => self.schedule_pause_timer(ctx),
                GameEvent::GameResumed { .. } => self.cancel_pause_timer(ctx),
                GameEvent::UndoRequested { .. } => self.schedule_undo_timer(ctx),
                GameEvent::UndoApplied { .. } | GameEvent::UndoCancelled { .. } => {
                    self.cancel_undo_timer(ctx)
                }
                _ => {}
            }
            if event.is_private() {
                if let Some(conn_id) = origin {
                    self.send_event(&conn_id, event);
                }
            } else {
                self.broadcast_event(event);
            }
        }
        if mutated {
            self.send_snapshots();
        }
    }

    /// Run bot turns until a human must act. Bots feed the same handlers as
    /// humans; a bot host also advances scored rounds so abandoned games
    /// still finish.
    fn run_bots(&mut self, ctx: &mut Context<Self>) {
        // Upper bound: a full game is far below this many bot actions.
        for _ in 0..10_000 {
            if self.game.is_paused() || self.game.undo.is_some() {
                return;
            }
            let result = match self.game.phase {
                Phase::TrumpSelection => {
                    let Some(dealer) = self.game.dealer().filter(|p| p.is_bot).map(|p| p.id)
                    else {
                        return;
                    };
                    match self.bot.choose_trump(&self.game, dealer) {
                        Ok(suit) => self.flow.select_trump(&mut self.game, dealer, suit),
                        Err(err) => {
                            warn!(room_id = %self.game.id, error = %err, "bot trump choice failed");
                            return;
                        }
                    }
                }
                Phase::Bidding => {
                    let Some(bidder) =
                        self.game.current_player().filter(|p| p.is_bot).map(|p| p.id)
                    else {
                        return;
                    };
                    match self.bot.choose_bid(&self.game, bidder) {
                        Ok(bid) => self.flow.place_bid(&mut self.game, bidder, bid),
                        Err(err) => {
                            warn!(room_id = %self.game.id, error = %err, "bot bid failed");
                            return;
                        }
                    }
                }
                Phase::Playing => {
                    let Some(player) =
                        self.game.current_player().filter(|p| p.is_bot).map(|p| p.id)
                    else {
                        return;
                    };
                    match self.bot.choose_play(&self.game, player) {
                        Ok(card) => self.flow.play_card(&mut self.game, player, card),
                        Err(err) => {
                            warn!(room_id = %self.game.id, error = %err, "bot play failed");
                            return;
                        }
                    }
                }
                Phase::RoundEnd => {
                    let Some(host) = self
                        .game
                        .host
                        .and_then(|id| self.game.player(id))
                        .filter(|p| p.is_bot)
                        .map(|p| p.id)
                    else {
                        return;
                    };
                    self.flow.advance_round(&mut self.game, host)
                }
                _ => return,
            };
            match result {
                Ok(events) => self.apply_events(events, None, ctx),
                Err(err) => {
                    // Bots go through full validation; a rejection here is a
                    // logic defect.
                    error!(room_id = %self.game.id, error = %err, "bot action rejected");
                    return;
                }
            }
        }
        error!(room_id = %self.game.id, "bot loop bound exceeded");
    }

    // --- Timers -----------------------------------------------------------

    fn schedule_pause_timer(&mut self, ctx: &mut Context<Self>) {
        self.cancel_pause_timer(ctx);
        let handle = ctx.run_later(self.timing.pause_std(), |actor, ctx| {
            actor.pause_timer = None;
            let timeout = actor.timing.pause_time();
            match actor.flow.pause_timed_out(&mut actor.game, timeout) {
                Ok(events) => {
                    actor.apply_events(events, None, ctx);
                    actor.run_bots(ctx);
                    actor.maybe_stop(ctx);
                }
                Err(err) => {
                    error!(room_id = %actor.game.id, error = %err, "bot substitution failed")
                }
            }
        });
        self.pause_timer = Some(handle);
    }

    fn cancel_pause_timer(&mut self, ctx: &mut Context<Self>) {
        // Cancelling an already-fired or cleared timer is a no-op.
        if let Some(handle) = self.pause_timer.take() {
            ctx.cancel_future(handle);
        }
    }

    fn schedule_undo_timer(&mut self, ctx: &mut Context<Self>) {
        self.cancel_undo_timer(ctx);
        let handle = ctx.run_later(self.timing.undo_std(), |actor, ctx| {
            actor.undo_timer = None;
            match actor.flow.undo_timed_out(&mut actor.game) {
                Ok(events) => {
                    actor.apply_events(events, None, ctx);
                    actor.run_bots(ctx);
                }
                Err(err) => error!(room_id = %actor.game.id, error = %err, "undo expiry failed"),
            }
        });
        self.undo_timer = Some(handle);
    }

    fn cancel_undo_timer(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.undo_timer.take() {
            ctx.cancel_future(handle);
        }
    }

    // --- Join / dispatch --------------------------------------------------

    fn handle_join(
        &mut self,
        conn_id: Uuid,
        name: String,
        persistent_id: Option<PersistentId>,
        password: Option<String>,
        ctx: &mut Context<Self>,
    ) {
        let persistent = persistent_id.unwrap_or_else(Uuid::new_v4);
        let known = self
            .persistent_ids
            .get(&persistent)
            .copied()
            .filter(|id| self.game.player(*id).is_some());

        let result = match known {
            Some(player_id) => self
                .flow
                .reconnect(&mut self.game, player_id, &name, self.timing.pause_time())
                .map(|events| (player_id, events)),
            None => self
                .flow
                .join_new(&mut self.game, &name, password.as_deref()),
        };

        match result {
            Ok((player_id, events)) => {
                // Drop any stale mapping from a connection this player
                // abandoned.
                self.conn_players.retain(|_, pid| *pid != player_id);
                self.conn_players.insert(conn_id, player_id);
                self.persistent_ids.insert(persistent, player_id);
                self.send_event(
                    &conn_id,
                    &GameEvent::Welcome {
                        player_id,
                        persistent_id: persistent,
                    },
                );
                self.apply_events(events, Some(conn_id), ctx);
                self.run_bots(ctx);
            }
            Err(err) => self.send_error(conn_id, &err),
        }
    }

    fn dispatch(
        &mut self,
        actor: PlayerId,
        command: ClientCommand,
    ) -> Result<Vec<GameEvent>, GameError> {
        match command {
            ClientCommand::Join { .. } => unreachable!("join handled before dispatch"),
            ClientCommand::Leave => self.flow.leave(&mut self.game, actor, self.timing.pause_time()),
            ClientCommand::StartGame => self.flow.start_game(&mut self.game, actor),
            ClientCommand::SelectTrump { suit } => {
                self.flow.select_trump(&mut self.game, actor, suit)
            }
            ClientCommand::PlaceBid { bid } => self.flow.place_bid(&mut self.game, actor, bid),
            ClientCommand::PlayCard { card } => self.flow.play_card(&mut self.game, actor, card),
            ClientCommand::AdvanceRound => self.flow.advance_round(&mut self.game, actor),
            ClientCommand::AddBot => self.flow.add_bot(&mut self.game, actor),
            ClientCommand::RemoveBot { player_id } => {
                self.flow.remove_bot(&mut self.game, actor, player_id)
            }
            ClientCommand::Chat { message } => self.flow.chat(&mut self.game, actor, &message),
            ClientCommand::Emote { emote } => self.flow.emote(&mut self.game, actor, &emote),
            ClientCommand::Rematch => self.flow.rematch(&mut self.game, actor),
            ClientCommand::RequestUndo => {
                self.flow
                    .request_undo(&mut self.game, actor, self.timing.undo_time())
            }
            ClientCommand::RespondUndo { approve } => {
                self.flow.respond_undo(&mut self.game, actor, approve)
            }
        }
    }

    fn maybe_stop(&mut self, ctx: &mut Context<Self>) {
        let deserted = self.connections.is_empty() && !self.game.is_active();
        if self.game.players.is_empty() || deserted {
            ctx.stop();
        }
    }
}

impl Actor for GameRoom {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(room_id = %self.game.id, name = %self.game.settings.name, "room started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.registry.remove(self.game.id);
        info!(room_id = %self.game.id, "room stopped");
    }
}

impl Handler<Connect> for GameRoom {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) {
        self.connections.insert(msg.conn_id, msg.addr);
    }
}

impl Handler<Disconnect> for GameRoom {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, ctx: &mut Self::Context) {
        self.connections.remove(&msg.conn_id);
        let Some(player_id) = self.conn_players.remove(&msg.conn_id) else {
            self.maybe_stop(ctx);
            return;
        };
        // The player may have already resumed on a newer connection.
        if self.conn_players.values().any(|pid| *pid == player_id) {
            return;
        }

        let result = if self.game.phase == Phase::Lobby {
            self.flow
                .leave(&mut self.game, player_id, self.timing.pause_time())
        } else {
            self.flow
                .player_disconnected(&mut self.game, player_id, self.timing.pause_time())
        };
        match result {
            Ok(events) => {
                self.apply_events(events, None, ctx);
                self.run_bots(ctx);
            }
            Err(err) => {
                warn!(room_id = %self.game.id, error = %err, "disconnect handling failed")
            }
        }
        self.maybe_stop(ctx);
    }
}

impl Handler<Inbound> for GameRoom {
    type Result = ();

    fn handle(&mut self, msg: Inbound, ctx: &mut Self::Context) {
        let Inbound { conn_id, command } = msg;

        let command = match command {
            ClientCommand::Join {
                name,
                persistent_id,
                password,
            } => {
                self.handle_join(conn_id, name, persistent_id, password, ctx);
                return;
            }
            other => other,
        };

        let Some(&actor) = self.conn_players.get(&conn_id) else {
            self.send_event(
                &conn_id,
                &GameEvent::Error {
                    code: "not_joined".into(),
                    message: "join the room before sending commands".into(),
                },
            );
            return;
        };

        // While paused, the only command processed is reconnection.
        if self.game.is_paused() {
            self.send_event(
                &conn_id,
                &GameEvent::Error {
                    code: "game_paused".into(),
                    message: "the game is paused awaiting a reconnection".into(),
                },
            );
            return;
        }

        match self.dispatch(actor, command) {
            Ok(events) => {
                self.apply_events(events, Some(conn_id), ctx);
                self.run_bots(ctx);
                self.maybe_stop(ctx);
            }
            Err(err @ GameError::Internal(_)) => {
                // Invariant violation: the room is no longer trustworthy.
                error!(room_id = %self.game.id, error = %err, "internal invariant violated");
                self.broadcast_event(&GameEvent::Error {
                    code: err.code().to_string(),
                    message: err.to_string(),
                });
                ctx.stop();
            }
            Err(err) => self.send_error(conn_id, &err),
        }
    }
}

impl Handler<ExportState> for GameRoom {
    type Result = RoomState;

    fn handle(&mut self, _msg: ExportState, _ctx: &mut Self::Context) -> RoomState {
        RoomState {
            game: self.game.clone(),
            persistent_ids: self
                .persistent_ids
                .iter()
                .map(|(persistent, player)| (*persistent, *player))
                .collect(),
        }
    }
}

impl Handler<GetSummary> for GameRoom {
    type Result = RoomSummary;

    fn handle(&mut self, _msg: GetSummary, _ctx: &mut Self::Context) -> RoomSummary {
        RoomSummary {
            room_id: self.game.id,
            name: self.game.settings.name.clone(),
            visibility: self.game.settings.visibility,
            player_count: self.game.players.len(),
            max_players: self.game.settings.max_players,
            phase: self.game.phase,
            has_password: self.game.settings.password.is_some(),
        }
    }
}

/// Events that reflect a state-machine mutation and therefore warrant a
/// snapshot refresh.
fn mutates_state(event: &GameEvent) -> bool {
    !matches!(
        event,
        GameEvent::Chat { .. }
            | GameEvent::Emote { .. }
            | GameEvent::RematchRequested { .. }
            | GameEvent::Welcome { .. }
            | GameEvent::Snapshot { .. }
            | GameEvent::Error { .. }
    )
}
