//! Actor messages exchanged between websocket sessions and their room.

use actix::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{GameId, Phase, Visibility};
use crate::ws::protocol::ClientCommand;

/// A pre-serialized outbound event frame, ready for the socket.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct OutboundFrame(pub String);

/// A websocket session attached to the room.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub conn_id: Uuid,
    pub addr: Recipient<OutboundFrame>,
}

/// A websocket session dropped.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub conn_id: Uuid,
}

/// One client command, applied in mailbox order.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Inbound {
    pub conn_id: Uuid,
    pub command: ClientCommand,
}

/// Room-browser listing entry.
#[derive(Debug, Clone, Serialize, MessageResponse)]
pub struct RoomSummary {
    pub room_id: GameId,
    pub name: String,
    pub visibility: Visibility,
    pub player_count: usize,
    pub max_players: usize,
    pub phase: Phase,
    pub has_password: bool,
}

#[derive(Message)]
#[rtype(result = "RoomSummary")]
pub struct GetSummary;
