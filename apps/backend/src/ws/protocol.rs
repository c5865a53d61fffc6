//! Wire protocol: client commands in, game events out.
//!
//! Commands and events are internally tagged JSON
//! (`{"type": "place_bid", "bid": 2}`). Outbound frames reuse
//! [`GameEvent`] directly; there is no separate server message type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Card, PlayerId, Suit};

pub use crate::services::game_flow::GameEvent;

/// Client-generated id a player presents to resume its seat after a drop.
pub type PersistentId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// New player or reconnection; reconnection matches `persistent_id`.
    Join {
        name: String,
        #[serde(default)]
        persistent_id: Option<PersistentId>,
        #[serde(default)]
        password: Option<String>,
    },
    Leave,
    StartGame,
    SelectTrump {
        suit: Suit,
    },
    PlaceBid {
        bid: u8,
    },
    PlayCard {
        card: Card,
    },
    AdvanceRound,
    AddBot,
    RemoveBot {
        player_id: PlayerId,
    },
    Chat {
        message: String,
    },
    Emote {
        emote: String,
    },
    Rematch,
    RequestUndo,
    RespondUndo {
        approve: bool,
    },
}
