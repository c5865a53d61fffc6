//! Serializable room state for in-memory snapshotting or handoff: the full
//! game (hands included), the reconnection-id mappings, and everything the
//! game carries with it (settings, bot-name counter, host). Never sent to
//! clients.

use actix::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{Game, PlayerId};
use crate::ws::protocol::PersistentId;

#[derive(Debug, Clone, Serialize, Deserialize, MessageResponse)]
pub struct RoomState {
    pub game: Game,
    pub persistent_ids: Vec<(PersistentId, PlayerId)>,
}

/// Ask a room for a consistent state snapshot. Processed on the mailbox, so
/// it always reflects a fully-applied command, never a partial mutation.
#[derive(Message)]
#[rtype(result = "RoomState")]
pub struct ExportState;
