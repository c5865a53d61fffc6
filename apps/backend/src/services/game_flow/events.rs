//! Outbound domain events: one variant per observable transition. The room
//! serializes these to every connection, except `Welcome` and `Error` which
//! go only to the connection they concern.

use serde::{Deserialize, Serialize};

use crate::domain::snapshot::{GameSnapshot, PlayerPublic};
use crate::domain::{Card, PlayerId, Suit};

/// Per-player line of a round result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundScore {
    pub player_id: PlayerId,
    pub name: String,
    pub bid: u8,
    pub tricks_won: u8,
    pub delta: i32,
    pub total: i32,
}

/// Final standing line, ordered best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
    pub player_id: PlayerId,
    pub name: String,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoCancelReason {
    TimedOut,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Private ack to a joining or reconnecting connection, emitted by the
    /// room (which owns the reconnection-id mapping).
    Welcome {
        player_id: PlayerId,
        persistent_id: PlayerId,
    },
    PlayerJoined {
        player: PlayerPublic,
    },
    PlayerReconnected {
        player_id: PlayerId,
        name: String,
    },
    PlayerLeft {
        player_id: PlayerId,
        /// True when the seat was removed (lobby); false when only marked
        /// disconnected.
        removed: bool,
    },
    GameStarted {
        round_no: u8,
        max_rounds: u8,
    },
    RoundStarted {
        round_no: u8,
        dealer: PlayerId,
        trump_card: Option<Card>,
        trump_suit: Option<Suit>,
        /// True when a Wizard was turned up and the dealer must choose.
        awaiting_trump_choice: bool,
    },
    TrumpSelected {
        player_id: PlayerId,
        suit: Suit,
    },
    BidPlaced {
        player_id: PlayerId,
        bid: u8,
        next_player: Option<PlayerId>,
    },
    BiddingComplete {
        first_player: PlayerId,
    },
    CardPlayed {
        player_id: PlayerId,
        card: Card,
        next_player: Option<PlayerId>,
    },
    TrickComplete {
        winner: PlayerId,
    },
    RoundComplete {
        round_no: u8,
        scores: Vec<RoundScore>,
    },
    GameComplete {
        standings: Vec<FinalScore>,
    },
    GamePaused {
        player_id: PlayerId,
        timeout_secs: u64,
    },
    GameResumed {
        player_id: PlayerId,
    },
    BotSubstituted {
        player_id: PlayerId,
        name: String,
    },
    Chat {
        player_id: PlayerId,
        message: String,
    },
    Emote {
        player_id: PlayerId,
        emote: String,
    },
    RematchRequested {
        player_id: PlayerId,
    },
    RematchStarted,
    UndoRequested {
        requester: PlayerId,
        requester_name: String,
        card_label: String,
        approvals: usize,
        denials: usize,
        required: usize,
        timeout_secs: u64,
    },
    UndoResponse {
        player_id: PlayerId,
        approved: bool,
        approvals: usize,
        denials: usize,
        required: usize,
    },
    UndoApplied {
        player_id: PlayerId,
        card: Card,
    },
    UndoCancelled {
        reason: UndoCancelReason,
    },
    /// Personalized full-state snapshot; built per recipient by the room.
    Snapshot {
        state: GameSnapshot,
    },
    /// Sent only to the connection whose command failed.
    Error {
        code: String,
        message: String,
    },
}

impl GameEvent {
    /// Events the room never broadcasts to the whole table.
    pub fn is_private(&self) -> bool {
        matches!(
            self,
            GameEvent::Welcome { .. } | GameEvent::Snapshot { .. } | GameEvent::Error { .. }
        )
    }
}
