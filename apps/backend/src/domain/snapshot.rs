//! Personalized full-state snapshots. Each recipient sees every player's
//! public record but only their own hand; other hands never leave the server.

use serde::{Deserialize, Serialize};

use super::cards_types::{Card, Suit};
use super::player::{PlayerId, PlayerRecord, RoundEntry};
use super::state::{Game, GameId, Phase, Visibility};

/// Public view of a seat: everything except hand contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    pub bid: Option<u8>,
    pub tricks_won: u8,
    pub score: i32,
    pub card_count: usize,
    pub connected: bool,
    pub is_bot: bool,
    pub rounds: Vec<RoundEntry>,
}

impl PlayerPublic {
    pub fn of(record: &PlayerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            bid: record.bid,
            tricks_won: record.tricks_won,
            score: record.score,
            card_count: record.hand.len(),
            connected: record.connected,
            is_bot: record.is_bot,
            rounds: record.rounds.clone(),
        }
    }
}

/// Room settings safe to broadcast (no password).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsPublic {
    pub name: String,
    pub visibility: Visibility,
    pub max_players: usize,
    pub has_password: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PausePublic {
    pub player: PlayerId,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoPublic {
    pub requester: PlayerId,
    pub requester_name: String,
    pub card: Card,
    pub card_label: String,
    pub approvals: usize,
    pub denials: usize,
    pub required: usize,
}

/// Full game state as seen by one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub room_id: GameId,
    pub phase: Phase,
    pub round_no: u8,
    pub max_rounds: u8,
    pub trump_suit: Option<Suit>,
    pub trump_card: Option<Card>,
    pub players: Vec<PlayerPublic>,
    pub current_player: Option<PlayerId>,
    pub dealer: Option<PlayerId>,
    pub host: Option<PlayerId>,
    pub trick_plays: Vec<(PlayerId, Card)>,
    pub lead: Option<Suit>,
    pub settings: SettingsPublic,
    pub pause: Option<PausePublic>,
    pub undo: Option<UndoPublic>,
    pub you: PlayerId,
    pub your_hand: Vec<Card>,
    /// Non-empty exactly when it is the viewer's turn to play.
    pub your_legal_plays: Vec<Card>,
    /// Non-empty exactly when it is the viewer's turn to bid.
    pub your_legal_bids: Vec<u8>,
}

impl GameSnapshot {
    pub fn for_player(game: &Game, viewer: PlayerId) -> Self {
        let players = game.players.iter().map(PlayerPublic::of).collect();

        let your_hand = game
            .player(viewer)
            .map(|p| p.hand.clone())
            .unwrap_or_default();

        Self {
            room_id: game.id,
            phase: game.phase,
            round_no: game.round_no,
            max_rounds: game.max_rounds,
            trump_suit: game.trump_suit,
            trump_card: game.trump_card,
            players,
            current_player: game.current_player().map(|p| p.id),
            dealer: game.dealer().map(|p| p.id),
            host: game.host,
            trick_plays: game.trick.plays.clone(),
            lead: game.trick.lead,
            settings: SettingsPublic {
                name: game.settings.name.clone(),
                visibility: game.settings.visibility,
                max_players: game.settings.max_players,
                has_password: game.settings.password.is_some(),
            },
            pause: game.pause.as_ref().map(|p| PausePublic {
                player: p.player,
                timeout_secs: p.timeout.whole_seconds().max(0) as u64,
            }),
            undo: game.undo.as_ref().map(|u| UndoPublic {
                requester: u.requester,
                requester_name: u.requester_name.clone(),
                card: u.card,
                card_label: u.card_label.clone(),
                approvals: u.approvals(),
                denials: u.denials(),
                required: u.required,
            }),
            you: viewer,
            your_hand,
            your_legal_plays: game.legal_plays_for(viewer),
            your_legal_bids: game.legal_bids_for(viewer),
        }
    }
}
