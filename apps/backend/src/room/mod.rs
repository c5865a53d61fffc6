//! Session orchestration: one actor per room plus the process-wide registry.

pub mod actor;
pub mod handoff;
pub mod messages;
pub mod registry;

pub use actor::GameRoom;
pub use handoff::{ExportState, RoomState};
pub use messages::{Connect, Disconnect, GetSummary, Inbound, OutboundFrame, RoomSummary};
pub use registry::RoomRegistry;
